use super::{
    parse_date, parse_optional_date, reservation::ReservationInfo, schedule::ScheduleInfo,
};
use crate::error::ApiError;
use database::{
    entities::lecturer,
    services::lecturer::{LecturerDetails, LecturerPatch, NewLecturer},
};
use models::{
    profile::{Faculty, Gender},
    timestamp::format_timestamp,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A lecturer's public profile; the password hash is never exposed
#[derive(Debug, Serialize, ToSchema)]
#[schema(no_recursion)]
pub struct LecturerInfo {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dob: String,
    #[schema(value_type = String, example = "MALE")]
    pub gender: Gender,
    #[schema(value_type = String, example = "COMPUTER_SCIENCE")]
    pub faculty: Faculty,
    pub enabled: bool,
    pub active: bool,
    pub schedules: Option<Vec<ScheduleInfo>>,
    pub reservations: Option<Vec<ReservationInfo>>,
    pub created_at: String,
    pub last_edited: String,
}

impl LecturerInfo {
    pub fn summary(lecturer: lecturer::Model) -> Self {
        Self {
            id: lecturer.id,
            username: lecturer.username,
            first_name: lecturer.first_name,
            last_name: lecturer.last_name,
            email: lecturer.email,
            dob: format_timestamp(&lecturer.dob),
            gender: lecturer.gender,
            faculty: lecturer.faculty,
            enabled: lecturer.enabled,
            active: lecturer.active,
            schedules: None,
            reservations: None,
            created_at: format_timestamp(&lecturer.created_at),
            last_edited: format_timestamp(&lecturer.last_edited),
        }
    }
}

impl From<LecturerDetails> for LecturerInfo {
    fn from(details: LecturerDetails) -> Self {
        Self {
            schedules: Some(
                details
                    .schedules
                    .into_iter()
                    .map(ScheduleInfo::summary)
                    .collect(),
            ),
            reservations: Some(
                details
                    .reservations
                    .into_iter()
                    .map(ReservationInfo::summary)
                    .collect(),
            ),
            ..Self::summary(details.lecturer)
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterLecturer {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    #[schema(example = "1990-05-01T00:00:00Z")]
    pub dob: String,
    #[serde(default)]
    #[schema(value_type = String, example = "MALE")]
    pub gender: Gender,
    #[serde(default)]
    #[schema(value_type = String, example = "COMPUTER_SCIENCE")]
    pub faculty: Faculty,
}

impl RegisterLecturer {
    pub fn into_new(self, password_hash: String) -> Result<NewLecturer, ApiError> {
        Ok(NewLecturer {
            dob: parse_date("dob", &self.dob)?,
            username: self.username,
            password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            gender: self.gender,
            faculty: self.faculty,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateLecturer {
    pub username: Option<String>,
    /// Stored re-hashed
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<String>,
    #[schema(value_type = Option<String>)]
    pub gender: Option<Gender>,
    #[schema(value_type = Option<String>)]
    pub faculty: Option<Faculty>,
}

impl UpdateLecturer {
    /// `password_hash` replaces the plaintext password carried by the body
    pub fn into_patch(self, password_hash: Option<String>) -> Result<LecturerPatch, ApiError> {
        Ok(LecturerPatch {
            dob: parse_optional_date("dob", self.dob)?,
            username: self.username,
            password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            gender: self.gender,
            faculty: self.faculty,
        })
    }
}
