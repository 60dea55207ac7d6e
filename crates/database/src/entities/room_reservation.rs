use models::time_block::{BlockRange, TimeBlock};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "room_reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub room_id: i32,
    pub schedule_id: i32,
    /// `None` once the booking lecturer has been deleted
    pub lecturer_id: Option<i32>,
    pub date: DateTime,
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
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id",
        on_delete = "Cascade"
    )]
    Room,
    #[sea_orm(
        belongs_to = "super::schedule::Entity",
        from = "Column::ScheduleId",
        to = "super::schedule::Column::Id",
        on_delete = "Cascade"
    )]
    Schedule,
    #[sea_orm(
        belongs_to = "super::lecturer::Entity",
        from = "Column::LecturerId",
        to = "super::lecturer::Column::Id",
        on_delete = "SetNull"
    )]
    Lecturer,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedule.def()
    }
}

impl Related<super::lecturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecturer.def()
    }
}

super::timestamped_behavior!();
