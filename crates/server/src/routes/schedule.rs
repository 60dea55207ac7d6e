use crate::{
    dtos::{
        PageParams, ResponseEntity,
        schedule::{CreateSchedule, ScheduleInfo, UpdateSchedule},
    },
    error::ApiError,
    extract::{Json, Path, Query},
    state::AppState,
};
use axum::{Router, extract::State, routing::get};
use database::services::schedule::ScheduleService;
use sea_orm::TransactionTrait;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schedule", get(list_schedules).post(create_schedule))
        .route(
            "/schedule/{id}",
            get(get_schedule).put(update_schedule).delete(delete_schedule),
        )
}

#[utoipa::path(
    get,
    path = "/schedule",
    params(PageParams),
    responses(
        (status = 200, description = "Schedules", body = ResponseEntity<Vec<ScheduleInfo>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedules"
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<ResponseEntity<Vec<ScheduleInfo>>, ApiError> {
    let txn = state.db.begin().await?;
    let schedules = ScheduleService::list(&txn, params.into()).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(
        schedules.into_iter().map(ScheduleInfo::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/schedule/{id}",
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule found", body = ResponseEntity<ScheduleInfo>),
        (status = 404, description = "Schedule not found")
    ),
    tag = "Schedules"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseEntity<ScheduleInfo>, ApiError> {
    let txn = state.db.begin().await?;
    let schedule = ScheduleService::get(&txn, id).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(schedule.into()))
}

/// Creates a teaching schedule for an existing lecturer
#[utoipa::path(
    post,
    path = "/schedule",
    request_body = CreateSchedule,
    responses(
        (status = 201, description = "Schedule created", body = ResponseEntity<ScheduleInfo>),
        (status = 400, description = "start_block comes after end_block"),
        (status = 404, description = "Lecturer not found")
    ),
    tag = "Schedules"
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(body): Json<CreateSchedule>,
) -> Result<ResponseEntity<ScheduleInfo>, ApiError> {
    let txn = state.db.begin().await?;
    let schedule = ScheduleService::create(&txn, body.into()).await?;
    txn.commit().await?;

    Ok(ResponseEntity::created(schedule.into()))
}

#[utoipa::path(
    put,
    path = "/schedule/{id}",
    params(("id" = i32, Path, description = "Schedule ID")),
    request_body = UpdateSchedule,
    responses(
        (status = 200, description = "Schedule updated", body = ResponseEntity<ScheduleInfo>),
        (status = 400, description = "start_block comes after end_block"),
        (status = 404, description = "Schedule or lecturer not found")
    ),
    tag = "Schedules"
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateSchedule>,
) -> Result<ResponseEntity<ScheduleInfo>, ApiError> {
    let txn = state.db.begin().await?;
    let schedule = ScheduleService::update(&txn, id, body.into()).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(schedule.into()))
}

/// Deletes a schedule and the reservations made for it
#[utoipa::path(
    delete,
    path = "/schedule/{id}",
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule deleted", body = ResponseEntity<String>),
        (status = 404, description = "Schedule not found")
    ),
    tag = "Schedules"
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseEntity<String>, ApiError> {
    let txn = state.db.begin().await?;
    ScheduleService::delete(&txn, id).await?;
    txn.commit().await?;

    Ok(ResponseEntity::deleted())
}
