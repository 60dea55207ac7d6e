use crate::{
    dtos::{
        ResponseEntity,
        auth::{LoginForm, TokenResponse},
        lecturer::{LecturerInfo, RegisterLecturer},
    },
    error::ApiError,
    extract::{Form, Json},
    state::AppState,
};
use axum::{Router, extract::State, routing::post};
use database::services::lecturer::LecturerService;
use sea_orm::TransactionTrait;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(login))
        .route("/auth/register", post(register))
}

/// Exchanges a username and password for a bearer token
#[utoipa::path(
    post,
    path = "/auth/token",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = ResponseEntity<TokenResponse>),
        (status = 400, description = "Incorrect username or password")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<ResponseEntity<TokenResponse>, ApiError> {
    let lecturer = LecturerService::find_by_username(&state.db, &form.username)
        .await?
        .filter(|lecturer| state.credentials.verify(&form.password, &lecturer.password))
        .ok_or(ApiError::InvalidCredentials)?;

    let access_token = state.credentials.issue_token(&lecturer.username, None)?;
    log::info!("Lecturer {} logged in", lecturer.username);

    Ok(ResponseEntity::ok(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        lecturer: LecturerInfo::summary(lecturer),
    }))
}

/// Registers a new lecturer account
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterLecturer,
    responses(
        (status = 201, description = "Lecturer registered", body = ResponseEntity<LecturerInfo>),
        (status = 400, description = "Malformed registration"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterLecturer>,
) -> Result<ResponseEntity<LecturerInfo>, ApiError> {
    let password_hash = state.credentials.hash(&body.password)?;
    let new = body.into_new(password_hash)?;

    let txn = state.db.begin().await?;
    let lecturer = LecturerService::create(&txn, new).await?;
    txn.commit().await?;

    log::info!("Registered lecturer {}", lecturer.username);
    Ok(ResponseEntity::created(LecturerInfo::summary(lecturer)))
}
