use crate::{
    dtos::{
        PageParams, ResponseEntity,
        building::{BuildingInfo, CreateBuilding, UpdateBuilding},
    },
    error::ApiError,
    extract::{Json, Path, Query},
    state::AppState,
};
use axum::{Router, extract::State, routing::get};
use database::services::building::BuildingService;
use sea_orm::TransactionTrait;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/building", get(list_buildings).post(create_building))
        .route(
            "/building/{id}",
            get(get_building).put(update_building).delete(delete_building),
        )
}

/// Lists buildings with their rooms
#[utoipa::path(
    get,
    path = "/building",
    params(PageParams),
    responses(
        (status = 200, description = "Buildings", body = ResponseEntity<Vec<BuildingInfo>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Buildings"
)]
pub async fn list_buildings(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<ResponseEntity<Vec<BuildingInfo>>, ApiError> {
    let txn = state.db.begin().await?;
    let buildings = BuildingService::list(&txn, params.into()).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(
        buildings.into_iter().map(BuildingInfo::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/building/{id}",
    params(("id" = i32, Path, description = "Building ID")),
    responses(
        (status = 200, description = "Building found", body = ResponseEntity<BuildingInfo>),
        (status = 404, description = "Building not found")
    ),
    tag = "Buildings"
)]
pub async fn get_building(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseEntity<BuildingInfo>, ApiError> {
    let txn = state.db.begin().await?;
    let building = BuildingService::get(&txn, id).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(building.into()))
}

#[utoipa::path(
    post,
    path = "/building",
    request_body = CreateBuilding,
    responses(
        (status = 201, description = "Building created", body = ResponseEntity<BuildingInfo>),
        (status = 400, description = "Malformed building")
    ),
    tag = "Buildings"
)]
pub async fn create_building(
    State(state): State<AppState>,
    Json(body): Json<CreateBuilding>,
) -> Result<ResponseEntity<BuildingInfo>, ApiError> {
    let txn = state.db.begin().await?;
    let building = BuildingService::create(&txn, body.into()).await?;
    txn.commit().await?;

    Ok(ResponseEntity::created(building.into()))
}

/// Changes only the fields present in the body
#[utoipa::path(
    put,
    path = "/building/{id}",
    params(("id" = i32, Path, description = "Building ID")),
    request_body = UpdateBuilding,
    responses(
        (status = 200, description = "Building updated", body = ResponseEntity<BuildingInfo>),
        (status = 404, description = "Building not found")
    ),
    tag = "Buildings"
)]
pub async fn update_building(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateBuilding>,
) -> Result<ResponseEntity<BuildingInfo>, ApiError> {
    let txn = state.db.begin().await?;
    let building = BuildingService::update(&txn, id, body.into()).await?;
    txn.commit().await?;

    Ok(ResponseEntity::ok(building.into()))
}

/// Deletes a building together with its rooms and their reservations
#[utoipa::path(
    delete,
    path = "/building/{id}",
    params(("id" = i32, Path, description = "Building ID")),
    responses(
        (status = 200, description = "Building deleted", body = ResponseEntity<String>),
        (status = 404, description = "Building not found")
    ),
    tag = "Buildings"
)]
pub async fn delete_building(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ResponseEntity<String>, ApiError> {
    let txn = state.db.begin().await?;
    BuildingService::delete(&txn, id).await?;
    txn.commit().await?;

    Ok(ResponseEntity::deleted())
}
