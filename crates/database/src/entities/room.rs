use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Capacity given to rooms created without one
pub const DEFAULT_CAPACITY: i32 = 20;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub code: String,
    pub capacity: i32,
    pub building_id: i32,
    pub created_at: DateTime,
    pub last_edited: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::building::Entity",
        from = "Column::BuildingId",
        to = "super::building::Column::Id",
        on_delete = "Cascade"
    )]
    Building,
    #[sea_orm(has_many = "super::room_reservation::Entity")]
    Reservations,
}

impl Related<super::building::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Building.def()
    }
}

impl Related<super::room_reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

super::timestamped_behavior!();
