use crate::{
    dtos::{
        PageParams, ResponseEntity,
        lecturer::{LecturerInfo, UpdateLecturer},
    },
    error::ApiError,
    extract::{Json, Path, Query},
    state::AppState,
};
use axum::{Router, extract::State, routing::get};
use database::services::lecturer::LecturerService;
use sea_orm::TransactionTrait;

pub fn router() -> Router<AppState> {
    Router::new().route("/lecturer", get(list_lecturers)).route(
        "/lecturer/{id}",
        get(get_lecturer).put(update_lecturer).delete(delete_lecturer),
    )
}

/// Lists lecturers with their schedules and reservations
#[utoipa::path(
    get,
    path = "/lecturer",
    params(PageParams),
    responses(
        (status = 200, description = "Lecturers", body = ResponseEntity<Vec<LecturerInfo>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Lecturers"
)]
pub async fn list_lecturers(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<ResponseEntity<Vec<LecturerInfo>>, ApiError> {
    let txn = state.db.begin().await?;
    let lecturers = LecturerService::list(&txn, params.into()).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(
        lecturers.into_iter().map(LecturerInfo::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/lecturer/{id}",
    params(("id" = i32, Path, description = "Lecturer ID")),
    responses(
        (status = 200, description = "Lecturer found", body = ResponseEntity<LecturerInfo>),
        (status = 404, description = "Lecturer not found")
    ),
    tag = "Lecturers"
)]
pub async fn get_lecturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseEntity<LecturerInfo>, ApiError> {
    let txn = state.db.begin().await?;
    let lecturer = LecturerService::get(&txn, id).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(lecturer.into()))
}

/// Changes only the fields present in the body. A new password is hashed
/// before it is stored.
#[utoipa::path(
    put,
    path = "/lecturer/{id}",
    params(("id" = i32, Path, description = "Lecturer ID")),
    request_body = UpdateLecturer,
    responses(
        (status = 200, description = "Lecturer updated", body = ResponseEntity<LecturerInfo>),
        (status = 404, description = "Lecturer not found"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "Lecturers"
)]
pub async fn update_lecturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateLecturer>,
) -> Result<ResponseEntity<LecturerInfo>, ApiError> {
    let password_hash = body
        .password
        .as_deref()
        .map(|password| state.credentials.hash(password))
        .transpose()?;
    let patch = body.into_patch(password_hash)?;

    let txn = state.db.begin().await?;
    let lecturer = LecturerService::update(&txn, id, patch).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(lecturer.into()))
}

/// Deletes a lecturer. Their schedules and reservations stay, detached.
#[utoipa::path(
    delete,
    path = "/lecturer/{id}",
    params(("id" = i32, Path, description = "Lecturer ID")),
    responses(
        (status = 200, description = "Lecturer deleted", body = ResponseEntity<String>),
        (status = 404, description = "Lecturer not found")
    ),
    tag = "Lecturers"
)]
pub async fn delete_lecturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseEntity<String>, ApiError> {
    let txn = state.db.begin().await?;
    LecturerService::delete(&txn, id).await?;
    txn.commit().await?;

    log::info!("Deleted lecturer {id}");
    Ok(ResponseEntity::deleted())
}
