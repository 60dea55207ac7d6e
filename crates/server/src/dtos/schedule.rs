use super::{lecturer::LecturerInfo, reservation::ReservationInfo};
use database::{
    entities::schedule,
    services::schedule::{NewSchedule, ScheduleDetails, SchedulePatch},
};
use models::{time_block::TimeBlock, timestamp::format_timestamp};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[schema(no_recursion)]
pub struct ScheduleInfo {
    pub id: i32,
    pub course: String,
    #[schema(value_type = String, example = "BLOCK_1")]
    pub start_block: TimeBlock,
    #[schema(value_type = String, example = "BLOCK_2")]
    pub end_block: TimeBlock,
    /// `null` once the lecturer has been deleted
    pub lecturer_id: Option<i32>,
    pub lecturer: Option<LecturerInfo>,
    pub reservations: Option<Vec<ReservationInfo>>,
    pub created_at: String,
    pub last_edited: String,
}

impl ScheduleInfo {
    pub fn summary(schedule: schedule::Model) -> Self {
        Self {
            id: schedule.id,
            course: schedule.course,
            start_block: schedule.start_block,
            end_block: schedule.end_block,
            lecturer_id: schedule.lecturer_id,
            lecturer: None,
            reservations: None,
            created_at: format_timestamp(&schedule.created_at),
            last_edited: format_timestamp(&schedule.last_edited),
        }
    }
}

impl From<ScheduleDetails> for ScheduleInfo {
    fn from(details: ScheduleDetails) -> Self {
        Self {
            lecturer: details.lecturer.map(LecturerInfo::summary),
            reservations: Some(
                details
                    .reservations
                    .into_iter()
                    .map(ReservationInfo::summary)
                    .collect(),
            ),
            ..Self::summary(details.schedule)
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSchedule {
    pub lecturer_id: i32,
    pub course: String,
    #[schema(value_type = String, example = "BLOCK_1")]
    pub start_block: TimeBlock,
    #[schema(value_type = String, example = "BLOCK_2")]
    pub end_block: TimeBlock,
}

impl From<CreateSchedule> for NewSchedule {
    fn from(body: CreateSchedule) -> Self {
        NewSchedule {
            lecturer_id: body.lecturer_id,
            course: body.course,
            start_block: body.start_block,
            end_block: body.end_block,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSchedule {
    pub lecturer_id: Option<i32>,
    pub course: Option<String>,
    #[schema(value_type = Option<String>)]
    pub start_block: Option<TimeBlock>,
    #[schema(value_type = Option<String>)]
    pub end_block: Option<TimeBlock>,
}

impl From<UpdateSchedule> for SchedulePatch {
    fn from(body: UpdateSchedule) -> Self {
        SchedulePatch {
            lecturer_id: body.lecturer_id,
            course: body.course,
            start_block: body.start_block,
            end_block: body.end_block,
        }
    }
}
