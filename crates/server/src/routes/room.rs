use crate::{
    dtos::{
        PageParams, ResponseEntity,
        room::{CreateRoom, RoomInfo, UpdateRoom},
    },
    error::ApiError,
    extract::{Json, Path, Query},
    state::AppState,
};
use axum::{Router, extract::State, routing::get};
use database::services::room::RoomService;
use sea_orm::TransactionTrait;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/room", get(list_rooms).post(create_room))
        .route(
            "/room/{id}",
            get(get_room).put(update_room).delete(delete_room),
        )
}

/// Lists rooms with their building and reservations
#[utoipa::path(
    get,
    path = "/room",
    params(PageParams),
    responses(
        (status = 200, description = "Rooms", body = ResponseEntity<Vec<RoomInfo>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Rooms"
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<ResponseEntity<Vec<RoomInfo>>, ApiError> {
    let txn = state.db.begin().await?;
    let rooms = RoomService::list(&txn, params.into()).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(rooms.into_iter().map(RoomInfo::from).collect()))
}

#[utoipa::path(
    get,
    path = "/room/{id}",
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room found", body = ResponseEntity<RoomInfo>),
        (status = 404, description = "Room not found")
    ),
    tag = "Rooms"
)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseEntity<RoomInfo>, ApiError> {
    let txn = state.db.begin().await?;
    let room = RoomService::get(&txn, id).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(room.into()))
}

/// Creates a room in an existing building; capacity defaults to 20
#[utoipa::path(
    post,
    path = "/room",
    request_body = CreateRoom,
    responses(
        (status = 201, description = "Room created", body = ResponseEntity<RoomInfo>),
        (status = 404, description = "Building not found")
    ),
    tag = "Rooms"
)]
pub async fn create_room(
    State(state): State<AppState>,
    Json(body): Json<CreateRoom>,
) -> Result<ResponseEntity<RoomInfo>, ApiError> {
    let txn = state.db.begin().await?;
    let room = RoomService::create(&txn, body.into()).await?;
    txn.commit().await?;

    Ok(ResponseEntity::created(room.into()))
}

#[utoipa::path(
    put,
    path = "/room/{id}",
    params(("id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoom,
    responses(
        (status = 200, description = "Room updated", body = ResponseEntity<RoomInfo>),
        (status = 404, description = "Room or building not found")
    ),
    tag = "Rooms"
)]
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateRoom>,
) -> Result<ResponseEntity<RoomInfo>, ApiError> {
    let txn = state.db.begin().await?;
    let room = RoomService::update(&txn, id, body.into()).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(room.into()))
}

/// Deletes a room and its reservations
#[utoipa::path(
    delete,
    path = "/room/{id}",
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room deleted", body = ResponseEntity<String>),
        (status = 404, description = "Room not found")
    ),
    tag = "Rooms"
)]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseEntity<String>, ApiError> {
    let txn = state.db.begin().await?;
    RoomService::delete(&txn, id).await?;
    txn.commit().await?;

    Ok(ResponseEntity::deleted())
}
