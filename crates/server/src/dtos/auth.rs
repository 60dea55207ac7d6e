use super::lecturer::LecturerInfo;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// OAuth2 password-grant style login form
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
    pub lecturer: LecturerInfo,
}
