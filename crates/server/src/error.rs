use crate::{auth::credentials::CredentialError, dtos::ResponseEntity};
use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use sea_orm::DbErr;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Every failure a handler can return; rendered as the response envelope
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Could not validate credentials")]
    UnknownUser,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::ReservationConflict | ServiceError::Conflict(_)) => {
                StatusCode::CONFLICT
            }
            Self::Service(ServiceError::Validation(_)) | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidToken | Self::ExpiredToken | Self::UnknownUser => {
                StatusCode::UNAUTHORIZED
            }
            Self::Service(ServiceError::Database(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::Service(ServiceError::Database(err))
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidToken => Self::InvalidToken,
            CredentialError::ExpiredToken => Self::ExpiredToken,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("Request failed: {self}");
            INTERNAL_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        let mut response = ResponseEntity::<()>::failure(status, message).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::body::to_bytes;
    use database::error::EntityKind;
    use serde_json::{Value, json};

    async fn render(err: ApiError) -> (StatusCode, Option<HeaderValue>, Value) {
        let response = err.into_response();
        let status = response.status();
        let challenge = response.headers().get(header::WWW_AUTHENTICATE).cloned();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, challenge, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let (status, challenge, body) =
            render(ServiceError::NotFound(EntityKind::Room).into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(challenge.is_none());
        assert_eq!(
            body,
            json!({ "status": 404, "message": "Room is not found!", "data": null })
        );
    }

    #[tokio::test]
    async fn test_reservation_conflict() {
        let (status, _, body) = render(ServiceError::ReservationConflict.into()).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Room is already reserved!");
    }

    #[tokio::test]
    async fn test_internal_errors_are_opaque() {
        let (status, _, body) =
            render(DbErr::Custom("relation \"lecturers\" does not exist".into()).into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
        assert_eq!(body["message"], INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_auth_failures_challenge_for_bearer() {
        for err in [
            ApiError::Unauthorized,
            ApiError::InvalidToken,
            ApiError::ExpiredToken,
            ApiError::UnknownUser,
        ] {
            let (status, challenge, body) = render(err).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(challenge.unwrap(), "Bearer");
            assert_eq!(body["status"], 401);
        }
    }

    #[tokio::test]
    async fn test_bad_credentials_are_a_bad_request() {
        let (status, challenge, _) = render(ApiError::InvalidCredentials).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(challenge.is_none());
    }
}
