use crate::{
    auth::extractor::CurrentLecturer,
    dtos::{
        PageParams, ResponseEntity,
        reservation::{CreateReservation, ReservationInfo, UpdateReservation},
    },
    error::ApiError,
    extract::{Json, Path, Query},
    state::AppState,
};
use axum::{Router, extract::State, routing::get};
use database::services::reservation::{
    NewReservation, ReservationPatch, ReservationService, already_reserved,
};
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, IsolationLevel, TransactionTrait};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reservation", get(list_reservations).post(create_reservation))
        .route(
            "/reservation/{id}",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
}

/// Check-then-insert must not interleave with another booking
async fn begin_serializable(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    db.begin_with_config(Some(IsolationLevel::Serializable), None)
        .await
}

#[utoipa::path(
    get,
    path = "/reservation",
    params(PageParams),
    responses(
        (status = 200, description = "Reservations", body = ResponseEntity<Vec<ReservationInfo>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reservations"
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<ResponseEntity<Vec<ReservationInfo>>, ApiError> {
    let txn = state.db.begin().await?;
    let reservations = ReservationService::list(&txn, params.into()).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(
        reservations.into_iter().map(ReservationInfo::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/reservation/{id}",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation found", body = ResponseEntity<ReservationInfo>),
        (status = 404, description = "Reservation not found")
    ),
    tag = "Reservations"
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseEntity<ReservationInfo>, ApiError> {
    let txn = state.db.begin().await?;
    let reservation = ReservationService::get(&txn, id).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(reservation.into()))
}

/// Books a room for a schedule on a date
///
/// The reservation takes the schedule's `start_block` and `end_block`. It is
/// made for `lecturer_id` when given, otherwise for the authenticated
/// lecturer. Rejected with 409 when it collides with another reservation of
/// the same room on the same date.
#[utoipa::path(
    post,
    path = "/reservation",
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Room reserved", body = ResponseEntity<ReservationInfo>),
        (status = 400, description = "Malformed reservation"),
        (status = 401, description = "Missing, invalid or expired bearer token"),
        (status = 404, description = "Schedule, lecturer or room not found"),
        (status = 409, description = "Room is already reserved")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    CurrentLecturer(caller): CurrentLecturer,
    Json(body): Json<CreateReservation>,
) -> Result<ResponseEntity<ReservationInfo>, ApiError> {
    let new: NewReservation = body.try_into()?;

    let txn = begin_serializable(&state.db).await?;
    let reservation = ReservationService::create(&txn, new, caller, state.conflict_rule).await?;
    txn.commit().await.map_err(already_reserved)?;

    log::info!(
        "Reserved room {} on {} ({}..{})",
        reservation.reservation.room_id,
        reservation.reservation.date,
        reservation.reservation.start_block,
        reservation.reservation.end_block
    );
    Ok(ResponseEntity::created(reservation.into()))
}

/// Changes only the fields present in the body, re-checking conflicts when
/// the room, date or blocks move
#[utoipa::path(
    put,
    path = "/reservation/{id}",
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateReservation,
    responses(
        (status = 200, description = "Reservation updated", body = ResponseEntity<ReservationInfo>),
        (status = 400, description = "Malformed update"),
        (status = 401, description = "Missing, invalid or expired bearer token"),
        (status = 404, description = "Reservation or referenced entity not found"),
        (status = 409, description = "Room is already reserved")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reservations"
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    CurrentLecturer(_caller): CurrentLecturer,
    Path(id): Path<i32>,
    Json(body): Json<UpdateReservation>,
) -> Result<ResponseEntity<ReservationInfo>, ApiError> {
    let patch: ReservationPatch = body.try_into()?;

    let txn = begin_serializable(&state.db).await?;
    let reservation = ReservationService::update(&txn, id, patch, state.conflict_rule).await?;
    txn.commit().await.map_err(already_reserved)?;

    Ok(ResponseEntity::ok(reservation.into()))
}

#[utoipa::path(
    delete,
    path = "/reservation/{id}",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation deleted", body = ResponseEntity<String>),
        (status = 404, description = "Reservation not found")
    ),
    tag = "Reservations"
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseEntity<String>, ApiError> {
    let txn = state.db.begin().await?;
    ReservationService::delete(&txn, id).await?;
    txn.commit().await?;

    Ok(ResponseEntity::deleted())
}
