use super::{building::BuildingInfo, reservation::ReservationInfo};
use database::{
    entities::{building, room},
    services::room::{NewRoom, RoomDetails, RoomPatch},
};
use models::timestamp::format_timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[schema(no_recursion)]
pub struct RoomInfo {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub capacity: i32,
    pub building_id: i32,
    pub building: Option<BuildingInfo>,
    pub reservations: Option<Vec<ReservationInfo>>,
    pub created_at: String,
    pub last_edited: String,
}

impl RoomInfo {
    pub fn summary(room: room::Model) -> Self {
        Self {
            id: room.id,
            name: room.name,
            code: room.code,
            capacity: room.capacity,
            building_id: room.building_id,
            building: None,
            reservations: None,
            created_at: format_timestamp(&room.created_at),
            last_edited: format_timestamp(&room.last_edited),
        }
    }

    /// Room nested in a reservation: its building, but no reservations
    pub fn with_building(room: room::Model, building: Option<building::Model>) -> Self {
        Self {
            building: building.map(BuildingInfo::summary),
            ..Self::summary(room)
        }
    }
}

impl From<RoomDetails> for RoomInfo {
    fn from(details: RoomDetails) -> Self {
        Self {
            reservations: Some(
                details
                    .reservations
                    .into_iter()
                    .map(ReservationInfo::summary)
                    .collect(),
            ),
            ..Self::with_building(details.room, details.building)
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoom {
    pub name: String,
    pub code: String,
    pub building_id: i32,
    /// Defaults to 20
    pub capacity: Option<i32>,
}

impl From<CreateRoom> for NewRoom {
    fn from(body: CreateRoom) -> Self {
        NewRoom {
            name: body.name,
            code: body.code,
            building_id: body.building_id,
            capacity: body.capacity,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateRoom {
    pub name: Option<String>,
    pub code: Option<String>,
    pub building_id: Option<i32>,
    pub capacity: Option<i32>,
}

impl From<UpdateRoom> for RoomPatch {
    fn from(body: UpdateRoom) -> Self {
        RoomPatch {
            name: body.name,
            code: body.code,
            building_id: body.building_id,
            capacity: body.capacity,
        }
    }
}
