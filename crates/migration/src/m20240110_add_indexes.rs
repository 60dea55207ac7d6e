use sea_orm_migration::prelude::*;

use crate::m20240110_create_all_tables::{RoomReservations, Rooms, Schedules};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on rooms.building_id for cascades and building views
        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_building_id")
                    .table(Rooms::Table)
                    .col(Rooms::BuildingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_lecturer_id")
                    .table(Schedules::Table)
                    .col(Schedules::LecturerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_reservations_schedule_id")
                    .table(RoomReservations::Table)
                    .col(RoomReservations::ScheduleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_reservations_lecturer_id")
                    .table(RoomReservations::Table)
                    .col(RoomReservations::LecturerId)
                    .to_owned(),
            )
            .await?;

        // Two bookings of a room on a date may never share a start or an end
        // block. These back up the conflict check against concurrent inserts
        // and also serve its (room_id, date) scan.
        manager
            .create_index(
                Index::create()
                    .name("uq_room_reservations_room_date_start")
                    .table(RoomReservations::Table)
                    .col(RoomReservations::RoomId)
                    .col(RoomReservations::Date)
                    .col(RoomReservations::StartBlock)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_room_reservations_room_date_end")
                    .table(RoomReservations::Table)
                    .col(RoomReservations::RoomId)
                    .col(RoomReservations::Date)
                    .col(RoomReservations::EndBlock)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let reservation_indexes = [
            "uq_room_reservations_room_date_end",
            "uq_room_reservations_room_date_start",
            "idx_room_reservations_lecturer_id",
            "idx_room_reservations_schedule_id",
        ];
        for name in reservation_indexes {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(RoomReservations::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name("idx_schedules_lecturer_id")
                    .table(Schedules::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_rooms_building_id")
                    .table(Rooms::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
