//! Room reservations and the conflict check guarding them
//!
//! A reservation always books the block range of its schedule: the create
//! input has no block fields, and the stored `start_block`/`end_block` are
//! copied from the resolved schedule. The lecturer is the one named in the
//! input, or the authenticated caller when none is named.
//!
//! Two reservations of the same room on the same date may not collide under
//! the configured [`ConflictRule`]. The check scans existing rows and then
//! inserts, so callers run it inside one transaction; the schema's unique
//! indexes on `(room_id, date, start_block)` and `(room_id, date, end_block)`
//! catch whatever slips past a concurrent writer.

use super::{Page, index_by};
use crate::{
    entities::{building, lecturer, room, room_reservation, schedule},
    error::{EntityKind, ServiceError, ServiceResult, is_serialization_failure},
    services::{
        lecturer::LecturerService, room::RoomService, schedule::ScheduleService,
        schedule::ensure_ordered,
    },
};
use chrono::NaiveDateTime;
use models::{
    conflict::ConflictRule,
    time_block::{BlockRange, TimeBlock},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// Input of the reservation workflow
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub room_id: Option<i32>,
    pub schedule_id: Option<i32>,
    /// Books on behalf of this lecturer instead of the caller
    pub lecturer_id: Option<i32>,
    pub date: NaiveDateTime,
}

/// Fields to change on a reservation; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct ReservationPatch {
    pub room_id: Option<i32>,
    pub schedule_id: Option<i32>,
    pub lecturer_id: Option<i32>,
    pub date: Option<NaiveDateTime>,
    pub start_block: Option<TimeBlock>,
    pub end_block: Option<TimeBlock>,
}

/// A reservation with its room (and the room's building), schedule and
/// lecturer
#[derive(Debug, Clone)]
pub struct ReservationDetails {
    pub reservation: room_reservation::Model,
    pub room: Option<room::Model>,
    pub building: Option<building::Model>,
    pub schedule: Option<schedule::Model>,
    pub lecturer: Option<lecturer::Model>,
}

pub struct ReservationService;

impl ReservationService {
    pub async fn list<C: ConnectionTrait>(
        conn: &C,
        page: Page,
    ) -> Result<Vec<ReservationDetails>, DbErr> {
        let reservations = room_reservation::Entity::find()
            .order_by_asc(room_reservation::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(conn)
            .await?;

        Self::details(conn, reservations).await
    }

    pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<ReservationDetails> {
        let reservation = Self::find(conn, id).await?;
        Self::single(conn, reservation).await
    }

    /// Whether booking `blocks` of `room_id` on `date` collides with an
    /// existing reservation other than `exclude`
    pub async fn has_conflict<C: ConnectionTrait>(
        conn: &C,
        room_id: i32,
        date: NaiveDateTime,
        blocks: BlockRange,
        rule: ConflictRule,
        exclude: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = room_reservation::Entity::find()
            .filter(room_reservation::Column::RoomId.eq(room_id))
            .filter(room_reservation::Column::Date.eq(date));
        if let Some(id) = exclude {
            query = query.filter(room_reservation::Column::Id.ne(id));
        }

        let existing = query.all(conn).await?;
        Ok(existing
            .iter()
            .any(|reservation| rule.collides(&reservation.blocks(), &blocks)))
    }

    /// Books a room for a schedule on a date
    ///
    /// Resolves the schedule, then the lecturer (falling back to
    /// `caller`), then the room, derives the blocks from the schedule and
    /// rejects the booking with [`ServiceError::ReservationConflict`] if it
    /// collides with an existing one.
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        new: NewReservation,
        caller: lecturer::Model,
        rule: ConflictRule,
    ) -> ServiceResult<ReservationDetails> {
        let schedule_id = new
            .schedule_id
            .ok_or_else(|| ServiceError::Validation("schedule_id is required".to_string()))?;
        let schedule = ScheduleService::find(conn, schedule_id).await?;

        let lecturer = match new.lecturer_id {
            Some(lecturer_id) => LecturerService::find(conn, lecturer_id).await?,
            None => caller,
        };

        let room_id = new
            .room_id
            .ok_or_else(|| ServiceError::Validation("room_id is required".to_string()))?;
        let room = RoomService::find(conn, room_id).await?;

        let blocks = schedule.blocks();
        if Self::has_conflict(conn, room.id, new.date, blocks, rule, None).await? {
            log::info!(
                "Rejected booking of room {} on {} for {}..{}: already reserved",
                room.id,
                new.date,
                blocks.start,
                blocks.end
            );
            return Err(ServiceError::ReservationConflict);
        }

        let reservation = room_reservation::ActiveModel {
            room_id: Set(room.id),
            schedule_id: Set(schedule.id),
            lecturer_id: Set(Some(lecturer.id)),
            date: Set(new.date),
            start_block: Set(blocks.start),
            end_block: Set(blocks.end),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(already_reserved)?;

        let building = building::Entity::find_by_id(room.building_id)
            .one(conn)
            .await?;

        Ok(ReservationDetails {
            reservation,
            room: Some(room),
            building,
            schedule: Some(schedule),
            lecturer: Some(lecturer),
        })
    }

    /// Applies a patch, re-running the conflict check when the room, date
    /// or blocks change
    pub async fn update<C: ConnectionTrait>(
        conn: &C,
        id: i32,
        patch: ReservationPatch,
        rule: ConflictRule,
    ) -> ServiceResult<ReservationDetails> {
        let current = Self::find(conn, id).await?;

        if let Some(room_id) = patch.room_id {
            RoomService::find(conn, room_id).await?;
        }
        if let Some(schedule_id) = patch.schedule_id {
            ScheduleService::find(conn, schedule_id).await?;
        }
        if let Some(lecturer_id) = patch.lecturer_id {
            LecturerService::find(conn, lecturer_id).await?;
        }

        let room_id = patch.room_id.unwrap_or(current.room_id);
        let date = patch.date.unwrap_or(current.date);
        let blocks = BlockRange::new(
            patch.start_block.unwrap_or(current.start_block),
            patch.end_block.unwrap_or(current.end_block),
        );
        ensure_ordered(blocks)?;

        let moved =
            room_id != current.room_id || date != current.date || blocks != current.blocks();
        if moved && Self::has_conflict(conn, room_id, date, blocks, rule, Some(id)).await? {
            return Err(ServiceError::ReservationConflict);
        }

        let mut reservation: room_reservation::ActiveModel = current.into();
        if let Some(room_id) = patch.room_id {
            reservation.room_id = Set(room_id);
        }
        if let Some(schedule_id) = patch.schedule_id {
            reservation.schedule_id = Set(schedule_id);
        }
        if let Some(lecturer_id) = patch.lecturer_id {
            reservation.lecturer_id = Set(Some(lecturer_id));
        }
        if let Some(date) = patch.date {
            reservation.date = Set(date);
        }
        if let Some(start_block) = patch.start_block {
            reservation.start_block = Set(start_block);
        }
        if let Some(end_block) = patch.end_block {
            reservation.end_block = Set(end_block);
        }

        let reservation = reservation
            .update(conn)
            .await
            .map_err(already_reserved)?;
        Self::single(conn, reservation).await
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<()> {
        Self::find(conn, id).await?;
        room_reservation::Entity::delete_by_id(id).exec(conn).await?;
        Ok(())
    }

    pub async fn find<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> ServiceResult<room_reservation::Model> {
        room_reservation::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound(EntityKind::Reservation))
    }

    async fn single<C: ConnectionTrait>(
        conn: &C,
        reservation: room_reservation::Model,
    ) -> ServiceResult<ReservationDetails> {
        Self::details(conn, vec![reservation])
            .await?
            .pop()
            .ok_or(ServiceError::NotFound(EntityKind::Reservation))
    }

    /// Batch fetch rooms, buildings, schedules and lecturers for many
    /// reservations
    async fn details<C: ConnectionTrait>(
        conn: &C,
        reservations: Vec<room_reservation::Model>,
    ) -> Result<Vec<ReservationDetails>, DbErr> {
        if reservations.is_empty() {
            return Ok(vec![]);
        }

        let room_ids: Vec<i32> = reservations.iter().map(|r| r.room_id).collect();
        let schedule_ids: Vec<i32> = reservations.iter().map(|r| r.schedule_id).collect();
        let lecturer_ids: Vec<i32> = reservations.iter().filter_map(|r| r.lecturer_id).collect();

        let rooms = room::Entity::find()
            .filter(room::Column::Id.is_in(room_ids))
            .all(conn)
            .await?;
        let building_ids: Vec<i32> = rooms.iter().map(|r| r.building_id).collect();
        let buildings = building::Entity::find()
            .filter(building::Column::Id.is_in(building_ids))
            .all(conn)
            .await?;
        let schedules = schedule::Entity::find()
            .filter(schedule::Column::Id.is_in(schedule_ids))
            .all(conn)
            .await?;
        let lecturers = if lecturer_ids.is_empty() {
            Vec::new()
        } else {
            lecturer::Entity::find()
                .filter(lecturer::Column::Id.is_in(lecturer_ids))
                .all(conn)
                .await?
        };

        let rooms = index_by(rooms, |r| r.id);
        let buildings = index_by(buildings, |b| b.id);
        let schedules = index_by(schedules, |s| s.id);
        let lecturers = index_by(lecturers, |l| l.id);

        Ok(reservations
            .into_iter()
            .map(|reservation| {
                let room = rooms.get(&reservation.room_id).cloned();
                let building = room
                    .as_ref()
                    .and_then(|room| buildings.get(&room.building_id).cloned());

                ReservationDetails {
                    room,
                    building,
                    schedule: schedules.get(&reservation.schedule_id).cloned(),
                    lecturer: reservation
                        .lecturer_id
                        .and_then(|id| lecturers.get(&id).cloned()),
                    reservation,
                }
            })
            .collect())
    }
}

/// Maps a write that lost to a concurrent booking to
/// [`ServiceError::ReservationConflict`]
///
/// The unique indexes on room, date and block endpoints back up the conflict
/// check. Under serializable isolation a concurrent booking of the same slot
/// surfaces as a serialization failure instead, on the insert or on commit.
pub fn already_reserved(err: DbErr) -> ServiceError {
    if is_serialization_failure(&err) {
        log::info!("Rejected booking: lost to a concurrent reservation");
        return ServiceError::ReservationConflict;
    }
    ServiceError::from_unique_violation(err, |_| ServiceError::ReservationConflict)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::test::sqlstate;

    #[test]
    fn test_already_reserved() {
        assert!(matches!(
            already_reserved(sqlstate("40001")),
            ServiceError::ReservationConflict
        ));
        assert!(matches!(
            already_reserved(sqlstate("57014")),
            ServiceError::Database(_)
        ));
        assert!(matches!(
            already_reserved(DbErr::RecordNotUpdated),
            ServiceError::Database(_)
        ));
    }
}
