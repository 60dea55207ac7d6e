mod common;

use common::{date, inmem_db, seed_building, seed_lecturer, seed_room, seed_schedule};
use database::{
    entities::{room, room_reservation, schedule},
    error::{EntityKind, ServiceError},
    services::{
        Page,
        building::{BuildingPatch, BuildingService},
        lecturer::{LecturerPatch, LecturerService, NewLecturer},
        reservation::{NewReservation, ReservationService},
        room::{NewRoom, RoomPatch, RoomService},
        schedule::{NewSchedule, ScheduleService},
    },
};
use models::{
    conflict::ConflictRule,
    profile::{Faculty, Gender},
    time_block::TimeBlock,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use std::time::Duration;

async fn book(
    db: &DatabaseConnection,
    room_id: i32,
    schedule_id: i32,
    lecturer: &database::entities::lecturer::Model,
) -> room_reservation::Model {
    ReservationService::create(
        db,
        NewReservation {
            room_id: Some(room_id),
            schedule_id: Some(schedule_id),
            lecturer_id: None,
            date: date("2024-01-10T00:00:00Z"),
        },
        lecturer.clone(),
        ConflictRule::EndpointMatch,
    )
    .await
    .unwrap()
    .reservation
}

#[tokio::test]
async fn test_deleting_building_cascades_to_rooms_and_reservations() {
    let db = inmem_db().await;
    let lecturer = seed_lecturer(&db, "lecturer").await;
    let doomed = seed_building(&db, "K").await;
    let kept = seed_building(&db, "A").await;
    let doomed_room = seed_room(&db, doomed.id, "P1").await;
    let kept_room = seed_room(&db, kept.id, "P2").await;
    let schedule = seed_schedule(&db, lecturer.id, TimeBlock::Block1, TimeBlock::Block2).await;
    book(&db, doomed_room.id, schedule.id, &lecturer).await;
    let kept_reservation = book(&db, kept_room.id, schedule.id, &lecturer).await;

    BuildingService::delete(&db, doomed.id).await.unwrap();

    assert!(room::Entity::find_by_id(doomed_room.id).one(&db).await.unwrap().is_none());
    assert_eq!(room::Entity::find().count(&db).await.unwrap(), 1);
    let reservations = room_reservation::Entity::find().all(&db).await.unwrap();
    assert_eq!(reservations, vec![kept_reservation]);
}

#[tokio::test]
async fn test_deleting_lecturer_keeps_schedules_and_reservations() {
    let db = inmem_db().await;
    let lecturer = seed_lecturer(&db, "leaving").await;
    let building = seed_building(&db, "B").await;
    let room = seed_room(&db, building.id, "P1").await;
    let schedule = seed_schedule(&db, lecturer.id, TimeBlock::Block2, TimeBlock::Block3).await;
    let reservation = book(&db, room.id, schedule.id, &lecturer).await;

    LecturerService::delete(&db, lecturer.id).await.unwrap();

    let schedule = schedule::Entity::find_by_id(schedule.id)
        .one(&db)
        .await
        .unwrap()
        .expect("schedule survives");
    assert_eq!(schedule.lecturer_id, None);

    let reservation = room_reservation::Entity::find_by_id(reservation.id)
        .one(&db)
        .await
        .unwrap()
        .expect("reservation survives");
    assert_eq!(reservation.lecturer_id, None);

    let details = ReservationService::get(&db, reservation.id).await.unwrap();
    assert!(details.lecturer.is_none());
    assert!(details.schedule.is_some());
}

#[tokio::test]
async fn test_deleting_schedule_removes_its_reservations() {
    let db = inmem_db().await;
    let lecturer = seed_lecturer(&db, "lecturer").await;
    let building = seed_building(&db, "C").await;
    let room = seed_room(&db, building.id, "P1").await;
    let schedule = seed_schedule(&db, lecturer.id, TimeBlock::Block4, TimeBlock::Block4).await;
    book(&db, room.id, schedule.id, &lecturer).await;

    ScheduleService::delete(&db, schedule.id).await.unwrap();

    assert_eq!(room_reservation::Entity::find().count(&db).await.unwrap(), 0);
    assert!(room::Entity::find_by_id(room.id).one(&db).await.unwrap().is_some());
}

#[tokio::test]
async fn test_lecturer_patch_changes_only_supplied_fields() {
    let db = inmem_db().await;
    let before = seed_lecturer(&db, "lecturer").await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let after = LecturerService::update(
        &db,
        before.id,
        LecturerPatch {
            email: Some("new-address@example.com".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .lecturer;

    assert_eq!(after.email, "new-address@example.com");
    assert_eq!(after.username, before.username);
    assert_eq!(after.first_name, before.first_name);
    assert_eq!(after.last_name, before.last_name);
    assert_eq!(after.password, before.password);
    assert_eq!(after.dob, before.dob);
    assert_eq!(after.faculty, before.faculty);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.last_edited > before.last_edited);
}

#[tokio::test]
async fn test_duplicate_username_or_email_is_a_conflict() {
    let db = inmem_db().await;
    let existing = seed_lecturer(&db, "taken").await;
    let other = seed_lecturer(&db, "other").await;

    let duplicate = LecturerService::create(
        &db,
        NewLecturer {
            username: "taken".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            dob: date("1985-12-09T00:00:00Z"),
            gender: Gender::Female,
            faculty: Faculty::Language,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(ServiceError::Conflict(_))));

    let stolen_email = LecturerService::update(
        &db,
        other.id,
        LecturerPatch {
            email: Some(existing.email.clone()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(stolen_email, Err(ServiceError::Conflict(_))));

    // Keeping one's own email is not a conflict
    LecturerService::update(
        &db,
        existing.id,
        LecturerPatch {
            email: Some(existing.email.clone()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_room_defaults_and_patch() {
    let db = inmem_db().await;
    let building = seed_building(&db, "D").await;
    let annex = seed_building(&db, "E").await;

    let created = RoomService::create(
        &db,
        NewRoom {
            name: "Phong 1".to_string(),
            code: "P1".to_string(),
            building_id: building.id,
            capacity: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.room.capacity, room::DEFAULT_CAPACITY);

    let moved = RoomService::update(
        &db,
        created.room.id,
        RoomPatch {
            building_id: Some(annex.id),
            capacity: Some(45),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(moved.room.capacity, 45);
    assert_eq!(moved.room.name, "Phong 1");
    assert_eq!(moved.building.unwrap().id, annex.id);

    let orphan = RoomService::create(
        &db,
        NewRoom {
            name: "Nowhere".to_string(),
            code: "X".to_string(),
            building_id: 999,
            capacity: Some(5),
        },
    )
    .await;
    assert!(matches!(
        orphan,
        Err(ServiceError::NotFound(EntityKind::Building))
    ));
}

#[tokio::test]
async fn test_schedule_requires_lecturer_and_ordered_blocks() {
    let db = inmem_db().await;
    let lecturer = seed_lecturer(&db, "lecturer").await;

    let unknown = ScheduleService::create(
        &db,
        NewSchedule {
            lecturer_id: 999,
            course: "Compilers".to_string(),
            start_block: TimeBlock::Block1,
            end_block: TimeBlock::Block2,
        },
    )
    .await;
    assert!(matches!(
        unknown,
        Err(ServiceError::NotFound(EntityKind::Lecturer))
    ));

    let backwards = ScheduleService::create(
        &db,
        NewSchedule {
            lecturer_id: lecturer.id,
            course: "Compilers".to_string(),
            start_block: TimeBlock::Block6,
            end_block: TimeBlock::Block2,
        },
    )
    .await;
    assert!(matches!(backwards, Err(ServiceError::Validation(_))));
}

#[tokio::test]
async fn test_building_list_pages_and_nests_rooms() {
    let db = inmem_db().await;
    let first = seed_building(&db, "A").await;
    let second = seed_building(&db, "B").await;
    seed_room(&db, first.id, "A1").await;
    seed_room(&db, first.id, "A2").await;
    seed_room(&db, second.id, "B1").await;

    let all = BuildingService::list(&db, Page::default()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].rooms.len(), 2);
    assert_eq!(all[1].rooms.len(), 1);

    let tail = BuildingService::list(&db, Page::new(1, 10)).await.unwrap();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].building.id, second.id);

    let renamed = BuildingService::update(
        &db,
        first.id,
        BuildingPatch {
            name: Some("Nha A".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.building.name, "Nha A");
    assert_eq!(renamed.building.code, "A");

    assert!(matches!(
        BuildingService::get(&db, 999).await,
        Err(ServiceError::NotFound(EntityKind::Building))
    ));
}
