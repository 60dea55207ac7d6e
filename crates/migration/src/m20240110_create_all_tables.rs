use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create buildings table
        manager
            .create_table(
                Table::create()
                    .table(Buildings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Buildings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Buildings::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Buildings::Code).string_len(30).not_null())
                    .col(ColumnDef::new(Buildings::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Buildings::LastEdited).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create rooms table
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Rooms::Code).string_len(30).not_null())
                    .col(
                        ColumnDef::new(Rooms::Capacity)
                            .integer()
                            .not_null()
                            .default(20),
                    )
                    .col(ColumnDef::new(Rooms::BuildingId).integer().not_null())
                    .col(ColumnDef::new(Rooms::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Rooms::LastEdited).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-rooms-building_id")
                            .from(Rooms::Table, Rooms::BuildingId)
                            .to(Buildings::Table, Buildings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create lecturers table
        manager
            .create_table(
                Table::create()
                    .table(Lecturers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lecturers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Lecturers::Username)
                            .string_len(200)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Lecturers::Password).string().not_null())
                    .col(
                        ColumnDef::new(Lecturers::FirstName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Lecturers::LastName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Lecturers::Email)
                            .string_len(200)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Lecturers::Dob).date_time().not_null())
                    .col(
                        ColumnDef::new(Lecturers::Gender)
                            .string()
                            .not_null()
                            .default("MALE"),
                    )
                    .col(
                        ColumnDef::new(Lecturers::Faculty)
                            .string()
                            .not_null()
                            .default("COMPUTER_SCIENCE"),
                    )
                    .col(
                        ColumnDef::new(Lecturers::Enabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Lecturers::Active)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Lecturers::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Lecturers::LastEdited).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create schedules table. Lecturers detach from their schedules on delete.
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::LecturerId).integer())
                    .col(ColumnDef::new(Schedules::Course).string_len(200).not_null())
                    .col(ColumnDef::new(Schedules::StartBlock).string().not_null())
                    .col(ColumnDef::new(Schedules::EndBlock).string().not_null())
                    .col(ColumnDef::new(Schedules::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Schedules::LastEdited).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-lecturer_id")
                            .from(Schedules::Table, Schedules::LecturerId)
                            .to(Lecturers::Table, Lecturers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create room_reservations table
        manager
            .create_table(
                Table::create()
                    .table(RoomReservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomReservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RoomReservations::RoomId).integer().not_null())
                    .col(
                        ColumnDef::new(RoomReservations::ScheduleId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoomReservations::LecturerId).integer())
                    .col(ColumnDef::new(RoomReservations::Date).date_time().not_null())
                    .col(
                        ColumnDef::new(RoomReservations::StartBlock)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoomReservations::EndBlock).string().not_null())
                    .col(
                        ColumnDef::new(RoomReservations::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomReservations::LastEdited)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-room_reservations-room_id")
                            .from(RoomReservations::Table, RoomReservations::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-room_reservations-schedule_id")
                            .from(RoomReservations::Table, RoomReservations::ScheduleId)
                            .to(Schedules::Table, Schedules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-room_reservations-lecturer_id")
                            .from(RoomReservations::Table, RoomReservations::LecturerId)
                            .to(Lecturers::Table, Lecturers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomReservations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lecturers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Buildings::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Buildings {
    Table,
    Id,
    Name,
    Code,
    CreatedAt,
    LastEdited,
}

#[derive(DeriveIden)]
pub(crate) enum Rooms {
    Table,
    Id,
    Name,
    Code,
    Capacity,
    BuildingId,
    CreatedAt,
    LastEdited,
}

#[derive(DeriveIden)]
pub(crate) enum Lecturers {
    Table,
    Id,
    Username,
    Password,
    FirstName,
    LastName,
    Email,
    Dob,
    Gender,
    Faculty,
    Enabled,
    Active,
    CreatedAt,
    LastEdited,
}

#[derive(DeriveIden)]
pub(crate) enum Schedules {
    Table,
    Id,
    LecturerId,
    Course,
    StartBlock,
    EndBlock,
    CreatedAt,
    LastEdited,
}

#[derive(DeriveIden)]
pub(crate) enum RoomReservations {
    Table,
    Id,
    RoomId,
    ScheduleId,
    LecturerId,
    Date,
    StartBlock,
    EndBlock,
    CreatedAt,
    LastEdited,
}
