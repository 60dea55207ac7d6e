#![allow(dead_code)]

use chrono::NaiveDateTime;
use database::{
    db::create_connection,
    entities::{building, lecturer, room, schedule},
    services::{
        building::{BuildingService, NewBuilding},
        lecturer::{LecturerService, NewLecturer},
        room::{NewRoom, RoomService},
        schedule::{NewSchedule, ScheduleService},
    },
};
use migration::{Migrator, MigratorTrait};
use models::{
    profile::{Faculty, Gender},
    time_block::TimeBlock,
    timestamp::parse_timestamp,
};
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with all migrations applied
pub async fn inmem_db() -> DatabaseConnection {
    let db = create_connection("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn date(value: &str) -> NaiveDateTime {
    parse_timestamp(value).expect("valid timestamp")
}

pub async fn seed_lecturer(db: &DatabaseConnection, username: &str) -> lecturer::Model {
    LecturerService::create(
        db,
        NewLecturer {
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: username.to_string(),
            email: format!("{username}@example.com"),
            dob: date("1990-05-01T00:00:00Z"),
            gender: Gender::Female,
            faculty: Faculty::ComputerScience,
        },
    )
    .await
    .expect("seed lecturer")
}

pub async fn seed_building(db: &DatabaseConnection, code: &str) -> building::Model {
    BuildingService::create(
        db,
        NewBuilding {
            name: format!("Building {code}"),
            code: code.to_string(),
        },
    )
    .await
    .expect("seed building")
    .building
}

pub async fn seed_room(db: &DatabaseConnection, building_id: i32, code: &str) -> room::Model {
    RoomService::create(
        db,
        NewRoom {
            name: format!("Room {code}"),
            code: code.to_string(),
            building_id,
            capacity: None,
        },
    )
    .await
    .expect("seed room")
    .room
}

pub async fn seed_schedule(
    db: &DatabaseConnection,
    lecturer_id: i32,
    start_block: TimeBlock,
    end_block: TimeBlock,
) -> schedule::Model {
    ScheduleService::create(
        db,
        NewSchedule {
            lecturer_id,
            course: "Networking".to_string(),
            start_block,
            end_block,
        },
    )
    .await
    .expect("seed schedule")
    .schedule
}
