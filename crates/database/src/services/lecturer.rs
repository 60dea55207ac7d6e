use super::{Page, group_by};
use crate::{
    entities::{lecturer, room_reservation, schedule},
    error::{EntityKind, ServiceError, ServiceResult},
};
use chrono::{NaiveDateTime, Utc};
use models::profile::{Faculty, Gender};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};

/// A lecturer registration whose password has already been hashed
pub struct NewLecturer {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dob: NaiveDateTime,
    pub gender: Gender,
    pub faculty: Faculty,
}

/// Fields to change on a lecturer; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct LecturerPatch {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<NaiveDateTime>,
    pub gender: Option<Gender>,
    pub faculty: Option<Faculty>,
}

/// A lecturer with their schedules and reservations
#[derive(Debug, Clone)]
pub struct LecturerDetails {
    pub lecturer: lecturer::Model,
    pub schedules: Vec<schedule::Model>,
    pub reservations: Vec<room_reservation::Model>,
}

pub struct LecturerService;

impl LecturerService {
    pub async fn list<C: ConnectionTrait>(
        conn: &C,
        page: Page,
    ) -> Result<Vec<LecturerDetails>, DbErr> {
        let lecturers = lecturer::Entity::find()
            .order_by_asc(lecturer::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(conn)
            .await?;

        Self::details(conn, lecturers).await
    }

    pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<LecturerDetails> {
        let lecturer = Self::find(conn, id).await?;
        Self::single(conn, lecturer).await
    }

    pub async fn find_by_username<C: ConnectionTrait>(
        conn: &C,
        username: &str,
    ) -> Result<Option<lecturer::Model>, DbErr> {
        lecturer::Entity::find()
            .filter(lecturer::Column::Username.eq(username))
            .one(conn)
            .await
    }

    /// Registers a lecturer; usernames and emails must be unused
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        new: NewLecturer,
    ) -> ServiceResult<lecturer::Model> {
        Self::ensure_unique(conn, Some(&new.username), Some(&new.email), None).await?;

        lecturer::ActiveModel {
            username: Set(new.username),
            password: Set(new.password_hash),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            email: Set(new.email),
            dob: Set(new.dob),
            gender: Set(new.gender),
            faculty: Set(new.faculty),
            enabled: Set(false),
            active: Set(false),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| ServiceError::from_unique_violation(e, ServiceError::Conflict))
    }

    pub async fn update<C: ConnectionTrait>(
        conn: &C,
        id: i32,
        patch: LecturerPatch,
    ) -> ServiceResult<LecturerDetails> {
        let current = Self::find(conn, id).await?;
        Self::ensure_unique(
            conn,
            patch.username.as_deref(),
            patch.email.as_deref(),
            Some(current.id),
        )
        .await?;

        let mut lecturer: lecturer::ActiveModel = current.into();
        if let Some(username) = patch.username {
            lecturer.username = Set(username);
        }
        if let Some(password_hash) = patch.password_hash {
            lecturer.password = Set(password_hash);
        }
        if let Some(first_name) = patch.first_name {
            lecturer.first_name = Set(first_name);
        }
        if let Some(last_name) = patch.last_name {
            lecturer.last_name = Set(last_name);
        }
        if let Some(email) = patch.email {
            lecturer.email = Set(email);
        }
        if let Some(dob) = patch.dob {
            lecturer.dob = Set(dob);
        }
        if let Some(gender) = patch.gender {
            lecturer.gender = Set(gender);
        }
        if let Some(faculty) = patch.faculty {
            lecturer.faculty = Set(faculty);
        }

        let lecturer = lecturer
            .update(conn)
            .await
            .map_err(|e| ServiceError::from_unique_violation(e, ServiceError::Conflict))?;
        Self::single(conn, lecturer).await
    }

    /// Deletes a lecturer. Their schedules and reservations are kept and
    /// detached from them.
    pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<()> {
        Self::find(conn, id).await?;
        let now = Utc::now().naive_utc();

        schedule::Entity::update_many()
            .col_expr(schedule::Column::LecturerId, Expr::value(Option::<i32>::None))
            .col_expr(schedule::Column::LastEdited, Expr::value(now))
            .filter(schedule::Column::LecturerId.eq(id))
            .exec(conn)
            .await?;
        room_reservation::Entity::update_many()
            .col_expr(
                room_reservation::Column::LecturerId,
                Expr::value(Option::<i32>::None),
            )
            .col_expr(room_reservation::Column::LastEdited, Expr::value(now))
            .filter(room_reservation::Column::LecturerId.eq(id))
            .exec(conn)
            .await?;

        lecturer::Entity::delete_by_id(id).exec(conn).await?;
        Ok(())
    }

    pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<lecturer::Model> {
        lecturer::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound(EntityKind::Lecturer))
    }

    /// Rejects a username or email already used by another lecturer
    async fn ensure_unique<C: ConnectionTrait>(
        conn: &C,
        username: Option<&str>,
        email: Option<&str>,
        exclude: Option<i32>,
    ) -> ServiceResult<()> {
        let checks = [
            (
                lecturer::Column::Username,
                username,
                "User with this username is existed!",
            ),
            (
                lecturer::Column::Email,
                email,
                "User with this email is existed!",
            ),
        ];

        for (column, value, message) in checks {
            let Some(value) = value else { continue };

            let mut query = lecturer::Entity::find().filter(column.eq(value));
            if let Some(id) = exclude {
                query = query.filter(lecturer::Column::Id.ne(id));
            }
            if query.one(conn).await?.is_some() {
                return Err(ServiceError::Conflict(message.to_string()));
            }
        }

        Ok(())
    }

    async fn single<C: ConnectionTrait>(
        conn: &C,
        lecturer: lecturer::Model,
    ) -> ServiceResult<LecturerDetails> {
        Self::details(conn, vec![lecturer])
            .await?
            .pop()
            .ok_or(ServiceError::NotFound(EntityKind::Lecturer))
    }

    /// Batch fetch schedules and reservations for many lecturers
    async fn details<C: ConnectionTrait>(
        conn: &C,
        lecturers: Vec<lecturer::Model>,
    ) -> Result<Vec<LecturerDetails>, DbErr> {
        if lecturers.is_empty() {
            return Ok(vec![]);
        }

        let lecturer_ids: Vec<i32> = lecturers.iter().map(|l| l.id).collect();

        let schedules = schedule::Entity::find()
            .filter(schedule::Column::LecturerId.is_in(lecturer_ids.clone()))
            .order_by_asc(schedule::Column::Id)
            .all(conn)
            .await?;
        let reservations = room_reservation::Entity::find()
            .filter(room_reservation::Column::LecturerId.is_in(lecturer_ids))
            .order_by_asc(room_reservation::Column::Date)
            .order_by_asc(room_reservation::Column::Id)
            .all(conn)
            .await?;

        // Both filters above exclude rows whose lecturer_id is NULL
        let mut schedules_by_lecturer = group_by(schedules, |s| s.lecturer_id);
        let mut reservations_by_lecturer = group_by(reservations, |r| r.lecturer_id);

        Ok(lecturers
            .into_iter()
            .map(|lecturer| LecturerDetails {
                schedules: schedules_by_lecturer
                    .remove(&Some(lecturer.id))
                    .unwrap_or_default(),
                reservations: reservations_by_lecturer
                    .remove(&Some(lecturer.id))
                    .unwrap_or_default(),
                lecturer,
            })
            .collect())
    }
}
