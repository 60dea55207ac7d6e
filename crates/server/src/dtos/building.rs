use super::room::RoomInfo;
use database::{
    entities::building,
    services::building::{BuildingDetails, BuildingPatch, NewBuilding},
};
use models::timestamp::format_timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[schema(no_recursion)]
pub struct BuildingInfo {
    pub id: i32,
    pub name: String,
    pub code: String,
    /// `null` when nested inside a room
    pub rooms: Option<Vec<RoomInfo>>,
    pub created_at: String,
    pub last_edited: String,
}

impl BuildingInfo {
    pub fn summary(building: building::Model) -> Self {
        Self {
            id: building.id,
            name: building.name,
            code: building.code,
            rooms: None,
            created_at: format_timestamp(&building.created_at),
            last_edited: format_timestamp(&building.last_edited),
        }
    }
}

impl From<BuildingDetails> for BuildingInfo {
    fn from(details: BuildingDetails) -> Self {
        Self {
            rooms: Some(details.rooms.into_iter().map(RoomInfo::summary).collect()),
            ..Self::summary(details.building)
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBuilding {
    pub name: String,
    pub code: String,
}

impl From<CreateBuilding> for NewBuilding {
    fn from(body: CreateBuilding) -> Self {
        NewBuilding {
            name: body.name,
            code: body.code,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBuilding {
    pub name: Option<String>,
    pub code: Option<String>,
}

impl From<UpdateBuilding> for BuildingPatch {
    fn from(body: UpdateBuilding) -> Self {
        BuildingPatch {
            name: body.name,
            code: body.code,
        }
    }
}
