use super::{Page, group_by, index_by};
use crate::{
    entities::{lecturer, room_reservation, schedule},
    error::{EntityKind, ServiceError, ServiceResult},
    services::lecturer::LecturerService,
};
use models::time_block::{BlockRange, TimeBlock};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

pub struct NewSchedule {
    pub lecturer_id: i32,
    pub course: String,
    pub start_block: TimeBlock,
    pub end_block: TimeBlock,
}

/// Fields to change on a schedule; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct SchedulePatch {
    pub lecturer_id: Option<i32>,
    pub course: Option<String>,
    pub start_block: Option<TimeBlock>,
    pub end_block: Option<TimeBlock>,
}

/// A schedule with its lecturer and the reservations made for it
#[derive(Debug, Clone)]
pub struct ScheduleDetails {
    pub schedule: schedule::Model,
    pub lecturer: Option<lecturer::Model>,
    pub reservations: Vec<room_reservation::Model>,
}

pub struct ScheduleService;

impl ScheduleService {
    pub async fn list<C: ConnectionTrait>(
        conn: &C,
        page: Page,
    ) -> Result<Vec<ScheduleDetails>, DbErr> {
        let schedules = schedule::Entity::find()
            .order_by_asc(schedule::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(conn)
            .await?;

        Self::details(conn, schedules).await
    }

    pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<ScheduleDetails> {
        let schedule = Self::find(conn, id).await?;
        Self::single(conn, schedule).await
    }

    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        new: NewSchedule,
    ) -> ServiceResult<ScheduleDetails> {
        let lecturer = LecturerService::find(conn, new.lecturer_id).await?;
        ensure_ordered(BlockRange::new(new.start_block, new.end_block))?;

        let schedule = schedule::ActiveModel {
            lecturer_id: Set(Some(lecturer.id)),
            course: Set(new.course),
            start_block: Set(new.start_block),
            end_block: Set(new.end_block),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(ScheduleDetails {
            schedule,
            lecturer: Some(lecturer),
            reservations: Vec::new(),
        })
    }

    pub async fn update<C: ConnectionTrait>(
        conn: &C,
        id: i32,
        patch: SchedulePatch,
    ) -> ServiceResult<ScheduleDetails> {
        let current = Self::find(conn, id).await?;

        if let Some(lecturer_id) = patch.lecturer_id {
            LecturerService::find(conn, lecturer_id).await?;
        }
        ensure_ordered(BlockRange::new(
            patch.start_block.unwrap_or(current.start_block),
            patch.end_block.unwrap_or(current.end_block),
        ))?;

        let mut schedule: schedule::ActiveModel = current.into();
        if let Some(lecturer_id) = patch.lecturer_id {
            schedule.lecturer_id = Set(Some(lecturer_id));
        }
        if let Some(course) = patch.course {
            schedule.course = Set(course);
        }
        if let Some(start_block) = patch.start_block {
            schedule.start_block = Set(start_block);
        }
        if let Some(end_block) = patch.end_block {
            schedule.end_block = Set(end_block);
        }

        let schedule = schedule.update(conn).await?;
        Self::single(conn, schedule).await
    }

    /// Deletes a schedule along with the reservations made for it
    pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<()> {
        Self::find(conn, id).await?;

        room_reservation::Entity::delete_many()
            .filter(room_reservation::Column::ScheduleId.eq(id))
            .exec(conn)
            .await?;
        schedule::Entity::delete_by_id(id).exec(conn).await?;
        Ok(())
    }

    pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<schedule::Model> {
        schedule::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound(EntityKind::Schedule))
    }

    async fn single<C: ConnectionTrait>(
        conn: &C,
        schedule: schedule::Model,
    ) -> ServiceResult<ScheduleDetails> {
        Self::details(conn, vec![schedule])
            .await?
            .pop()
            .ok_or(ServiceError::NotFound(EntityKind::Schedule))
    }

    /// Batch fetch lecturers and reservations for many schedules
    async fn details<C: ConnectionTrait>(
        conn: &C,
        schedules: Vec<schedule::Model>,
    ) -> Result<Vec<ScheduleDetails>, DbErr> {
        if schedules.is_empty() {
            return Ok(vec![]);
        }

        let schedule_ids: Vec<i32> = schedules.iter().map(|s| s.id).collect();
        let lecturer_ids: Vec<i32> = schedules.iter().filter_map(|s| s.lecturer_id).collect();

        let lecturers = if lecturer_ids.is_empty() {
            Vec::new()
        } else {
            lecturer::Entity::find()
                .filter(lecturer::Column::Id.is_in(lecturer_ids))
                .all(conn)
                .await?
        };
        let reservations = room_reservation::Entity::find()
            .filter(room_reservation::Column::ScheduleId.is_in(schedule_ids))
            .order_by_asc(room_reservation::Column::Date)
            .order_by_asc(room_reservation::Column::Id)
            .all(conn)
            .await?;

        let lecturers = index_by(lecturers, |l| l.id);
        let mut reservations_by_schedule = group_by(reservations, |r| r.schedule_id);

        Ok(schedules
            .into_iter()
            .map(|schedule| ScheduleDetails {
                lecturer: schedule
                    .lecturer_id
                    .and_then(|id| lecturers.get(&id).cloned()),
                reservations: reservations_by_schedule
                    .remove(&schedule.id)
                    .unwrap_or_default(),
                schedule,
            })
            .collect())
    }
}

pub(crate) fn ensure_ordered(blocks: BlockRange) -> ServiceResult<()> {
    if blocks.is_ordered() {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "start_block {} must not come after end_block {}",
            blocks.start, blocks.end
        )))
    }
}
