use super::{Page, group_by, index_by};
use crate::{
    entities::{building, room, room_reservation},
    error::{EntityKind, ServiceError, ServiceResult},
    services::building::BuildingService,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

pub struct NewRoom {
    pub name: String,
    pub code: String,
    pub building_id: i32,
    /// Falls back to [`room::DEFAULT_CAPACITY`]
    pub capacity: Option<i32>,
}

/// Fields to change on a room; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub building_id: Option<i32>,
    pub capacity: Option<i32>,
}

/// A room with its building and its reservations
#[derive(Debug, Clone)]
pub struct RoomDetails {
    pub room: room::Model,
    pub building: Option<building::Model>,
    pub reservations: Vec<room_reservation::Model>,
}

pub struct RoomService;

impl RoomService {
    pub async fn list<C: ConnectionTrait>(conn: &C, page: Page) -> Result<Vec<RoomDetails>, DbErr> {
        let rooms = room::Entity::find()
            .order_by_asc(room::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(conn)
            .await?;

        Self::details(conn, rooms).await
    }

    pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<RoomDetails> {
        let room = Self::find(conn, id).await?;
        Self::single(conn, room).await
    }

    pub async fn create<C: ConnectionTrait>(conn: &C, new: NewRoom) -> ServiceResult<RoomDetails> {
        let building = BuildingService::find(conn, new.building_id).await?;

        let room = room::ActiveModel {
            name: Set(new.name),
            code: Set(new.code),
            building_id: Set(building.id),
            capacity: Set(new.capacity.unwrap_or(room::DEFAULT_CAPACITY)),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(RoomDetails {
            room,
            building: Some(building),
            reservations: Vec::new(),
        })
    }

    pub async fn update<C: ConnectionTrait>(
        conn: &C,
        id: i32,
        patch: RoomPatch,
    ) -> ServiceResult<RoomDetails> {
        let mut room: room::ActiveModel = Self::find(conn, id).await?.into();

        if let Some(name) = patch.name {
            room.name = Set(name);
        }
        if let Some(code) = patch.code {
            room.code = Set(code);
        }
        if let Some(capacity) = patch.capacity {
            room.capacity = Set(capacity);
        }
        if let Some(building_id) = patch.building_id {
            BuildingService::find(conn, building_id).await?;
            room.building_id = Set(building_id);
        }

        let room = room.update(conn).await?;
        Self::single(conn, room).await
    }

    /// Deletes a room along with its reservations
    pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<()> {
        Self::find(conn, id).await?;

        room_reservation::Entity::delete_many()
            .filter(room_reservation::Column::RoomId.eq(id))
            .exec(conn)
            .await?;
        room::Entity::delete_by_id(id).exec(conn).await?;
        Ok(())
    }

    pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<room::Model> {
        room::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound(EntityKind::Room))
    }

    async fn single<C: ConnectionTrait>(conn: &C, room: room::Model) -> ServiceResult<RoomDetails> {
        Self::details(conn, vec![room])
            .await?
            .pop()
            .ok_or(ServiceError::NotFound(EntityKind::Room))
    }

    /// Batch fetch buildings and reservations for many rooms
    async fn details<C: ConnectionTrait>(
        conn: &C,
        rooms: Vec<room::Model>,
    ) -> Result<Vec<RoomDetails>, DbErr> {
        if rooms.is_empty() {
            return Ok(vec![]);
        }

        let room_ids: Vec<i32> = rooms.iter().map(|r| r.id).collect();
        let building_ids: Vec<i32> = rooms.iter().map(|r| r.building_id).collect();

        let buildings = building::Entity::find()
            .filter(building::Column::Id.is_in(building_ids))
            .all(conn)
            .await?;
        let reservations = room_reservation::Entity::find()
            .filter(room_reservation::Column::RoomId.is_in(room_ids))
            .order_by_asc(room_reservation::Column::Date)
            .order_by_asc(room_reservation::Column::Id)
            .all(conn)
            .await?;

        let buildings = index_by(buildings, |b| b.id);
        let mut reservations_by_room = group_by(reservations, |r| r.room_id);

        Ok(rooms
            .into_iter()
            .map(|room| RoomDetails {
                building: buildings.get(&room.building_id).cloned(),
                reservations: reservations_by_room.remove(&room.id).unwrap_or_default(),
                room,
            })
            .collect())
    }
}
