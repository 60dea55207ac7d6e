use sea_orm::{DbErr, RuntimeErr, SqlErr, sqlx};
use thiserror::Error;

/// Entity kinds named in not-found errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Building,
    Room,
    Lecturer,
    Schedule,
    Reservation,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Building => "Building",
            Self::Room => "Room",
            Self::Lecturer => "Lecturer",
            Self::Schedule => "Schedule",
            Self::Reservation => "Reservation",
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{} is not found!", .0.as_str())]
    NotFound(EntityKind),

    #[error("Room is already reserved!")]
    ReservationConflict,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] DbErr),
}

impl ServiceError {
    /// Maps a unique-constraint violation to `on_unique`, passing any other
    /// database error through unchanged
    pub(crate) fn from_unique_violation(
        err: DbErr,
        on_unique: impl FnOnce(String) -> Self,
    ) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => on_unique(detail),
            _ => Self::Database(err),
        }
    }
}

/// SQLSTATE of a serializable transaction that lost to a concurrent writer
const SERIALIZATION_FAILURE: &str = "40001";

/// Whether the database aborted the statement or commit because a concurrent
/// serializable transaction touched the same rows
pub fn is_serialization_failure(err: &DbErr) -> bool {
    let runtime = match err {
        DbErr::Conn(err) | DbErr::Exec(err) | DbErr::Query(err) => err,
        _ => return false,
    };

    match runtime {
        RuntimeErr::SqlxError(sqlx::Error::Database(db_err)) => {
            db_err.code().as_deref() == Some(SERIALIZATION_FAILURE)
        }
        _ => false,
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
