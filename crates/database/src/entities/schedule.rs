use models::time_block::{BlockRange, TimeBlock};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `None` once the owning lecturer has been deleted
    pub lecturer_id: Option<i32>,
    pub course: String,
    pub start_block: TimeBlock,
    pub end_block: TimeBlock,
    pub created_at: DateTime,
    pub last_edited: DateTime,
}

impl Model {
    pub fn blocks(&self) -> BlockRange {
        BlockRange::new(self.start_block, self.end_block)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lecturer::Entity",
        from = "Column::LecturerId",
        to = "super::lecturer::Column::Id",
        on_delete = "SetNull"
    )]
    Lecturer,
    #[sea_orm(has_many = "super::room_reservation::Entity")]
    Reservations,
}

impl Related<super::lecturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecturer.def()
    }
}

impl Related<super::room_reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

super::timestamped_behavior!();
