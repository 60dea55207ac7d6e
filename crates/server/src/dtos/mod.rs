pub mod auth;
pub mod building;
pub mod lecturer;
pub mod reservation;
pub mod room;
pub mod schedule;

use crate::error::ApiError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use database::services::Page;
use models::timestamp::{TIMESTAMP_FORMAT, parse_timestamp};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Envelope wrapping every response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ResponseEntity<T> {
    /// Same as the HTTP status code
    pub status: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ResponseEntity<T> {
    pub fn ok(data: T) -> Self {
        Self::success(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Self {
        Self::success(StatusCode::CREATED, data)
    }

    pub fn success(status: StatusCode, data: T) -> Self {
        Self {
            status: status.as_u16(),
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

impl ResponseEntity<String> {
    /// Body of a successful delete
    pub fn deleted() -> Self {
        Self::ok("Success!".to_string())
    }
}

impl<T: Serialize> IntoResponse for ResponseEntity<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Offset pagination for list endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Rows to skip (default 0)
    pub skip: Option<u64>,
    /// Maximum number of rows (default 100)
    pub limit: Option<u64>,
}

impl From<PageParams> for Page {
    fn from(params: PageParams) -> Self {
        Page::new(
            params.skip.unwrap_or(0),
            params.limit.unwrap_or(Page::DEFAULT_LIMIT),
        )
    }
}

/// Parses a `YYYY-MM-DDTHH:MM:SSZ` field of a request body
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDateTime, ApiError> {
    parse_timestamp(value).map_err(|_| {
        ApiError::Validation(format!(
            "{field} must match {TIMESTAMP_FORMAT}, got {value:?}"
        ))
    })
}

pub(crate) fn parse_optional_date(
    field: &str,
    value: Option<String>,
) -> Result<Option<NaiveDateTime>, ApiError> {
    value.map(|value| parse_date(field, &value)).transpose()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_page_defaults() {
        assert_eq!(Page::from(PageParams::default()), Page::new(0, 100));
        assert_eq!(
            Page::from(PageParams {
                skip: Some(20),
                limit: Some(5)
            }),
            Page::new(20, 5)
        );
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("date", "2024-01-10T00:00:00Z").is_ok());
        assert!(matches!(
            parse_date("date", "2024-01-10"),
            Err(ApiError::Validation(_))
        ));
        assert!(parse_optional_date("dob", None).unwrap().is_none());
    }
}
