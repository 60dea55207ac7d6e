use super::{
    lecturer::LecturerInfo, parse_date, parse_optional_date, room::RoomInfo,
    schedule::ScheduleInfo,
};
use crate::error::ApiError;
use database::{
    entities::room_reservation,
    services::reservation::{NewReservation, ReservationDetails, ReservationPatch},
};
use models::{time_block::TimeBlock, timestamp::format_timestamp};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[schema(no_recursion)]
pub struct ReservationInfo {
    pub id: i32,
    pub date: String,
    #[schema(value_type = String, example = "BLOCK_1")]
    pub start_block: TimeBlock,
    #[schema(value_type = String, example = "BLOCK_2")]
    pub end_block: TimeBlock,
    pub room_id: i32,
    pub schedule_id: i32,
    pub lecturer_id: Option<i32>,
    /// Carries its building only
    pub room: Option<RoomInfo>,
    pub schedule: Option<ScheduleInfo>,
    pub lecturer: Option<LecturerInfo>,
    pub created_at: String,
    pub last_edited: String,
}

impl ReservationInfo {
    pub fn summary(reservation: room_reservation::Model) -> Self {
        Self {
            id: reservation.id,
            date: format_timestamp(&reservation.date),
            start_block: reservation.start_block,
            end_block: reservation.end_block,
            room_id: reservation.room_id,
            schedule_id: reservation.schedule_id,
            lecturer_id: reservation.lecturer_id,
            room: None,
            schedule: None,
            lecturer: None,
            created_at: format_timestamp(&reservation.created_at),
            last_edited: format_timestamp(&reservation.last_edited),
        }
    }
}

impl From<ReservationDetails> for ReservationInfo {
    fn from(details: ReservationDetails) -> Self {
        let building = details.building;
        Self {
            room: details
                .room
                .map(|room| RoomInfo::with_building(room, building)),
            schedule: details.schedule.map(ScheduleInfo::summary),
            lecturer: details.lecturer.map(LecturerInfo::summary),
            ..Self::summary(details.reservation)
        }
    }
}

/// Booking request. The blocks are not part of the request: they are
/// copied from the schedule. Without `lecturer_id` the booking is made for
/// the authenticated lecturer.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservation {
    pub room_id: Option<i32>,
    pub schedule_id: Option<i32>,
    pub lecturer_id: Option<i32>,
    #[schema(example = "2024-01-10T00:00:00Z")]
    pub date: String,
}

impl TryFrom<CreateReservation> for NewReservation {
    type Error = ApiError;

    fn try_from(body: CreateReservation) -> Result<Self, Self::Error> {
        Ok(NewReservation {
            date: parse_date("date", &body.date)?,
            room_id: body.room_id,
            schedule_id: body.schedule_id,
            lecturer_id: body.lecturer_id,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateReservation {
    pub room_id: Option<i32>,
    pub schedule_id: Option<i32>,
    pub lecturer_id: Option<i32>,
    pub date: Option<String>,
    #[schema(value_type = Option<String>)]
    pub start_block: Option<TimeBlock>,
    #[schema(value_type = Option<String>)]
    pub end_block: Option<TimeBlock>,
}

impl TryFrom<UpdateReservation> for ReservationPatch {
    type Error = ApiError;

    fn try_from(body: UpdateReservation) -> Result<Self, Self::Error> {
        Ok(ReservationPatch {
            date: parse_optional_date("date", body.date)?,
            room_id: body.room_id,
            schedule_id: body.schedule_id,
            lecturer_id: body.lecturer_id,
            start_block: body.start_block,
            end_block: body.end_block,
        })
    }
}
