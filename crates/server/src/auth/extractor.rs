use crate::{error::ApiError, state::AppState};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use database::{entities::lecturer, services::lecturer::LecturerService};

/// The lecturer named by the request's bearer token
pub struct CurrentLecturer(pub lecturer::Model);

impl FromRequestParts<AppState> for CurrentLecturer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            log::warn!("Rejected {}: missing bearer token", parts.uri.path());
            ApiError::Unauthorized
        })?;

        let username = state.credentials.validate_token(token).map_err(|e| {
            log::warn!("Rejected {}: {e}", parts.uri.path());
            ApiError::from(e)
        })?;

        match LecturerService::find_by_username(&state.db, &username).await? {
            Some(lecturer) => Ok(Self(lecturer)),
            None => {
                log::warn!("Rejected {}: unknown user {username}", parts.uri.path());
                Err(ApiError::UnknownUser)
            }
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
