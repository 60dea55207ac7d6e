use super::{Page, group_by};
use crate::{
    entities::{building, room, room_reservation},
    error::{EntityKind, ServiceError, ServiceResult},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

pub struct NewBuilding {
    pub name: String,
    pub code: String,
}

/// Fields to change on a building; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct BuildingPatch {
    pub name: Option<String>,
    pub code: Option<String>,
}

/// A building together with its rooms
#[derive(Debug, Clone)]
pub struct BuildingDetails {
    pub building: building::Model,
    pub rooms: Vec<room::Model>,
}

pub struct BuildingService;

impl BuildingService {
    pub async fn list<C: ConnectionTrait>(
        conn: &C,
        page: Page,
    ) -> Result<Vec<BuildingDetails>, DbErr> {
        let buildings = building::Entity::find()
            .order_by_asc(building::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(conn)
            .await?;

        Self::with_rooms(conn, buildings).await
    }

    pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<BuildingDetails> {
        let building = Self::find(conn, id).await?;
        Ok(Self::hydrate(conn, building).await?)
    }

    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        new: NewBuilding,
    ) -> ServiceResult<BuildingDetails> {
        let building = building::ActiveModel {
            name: Set(new.name),
            code: Set(new.code),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(BuildingDetails {
            building,
            rooms: Vec::new(),
        })
    }

    pub async fn update<C: ConnectionTrait>(
        conn: &C,
        id: i32,
        patch: BuildingPatch,
    ) -> ServiceResult<BuildingDetails> {
        let mut building: building::ActiveModel = Self::find(conn, id).await?.into();

        if let Some(name) = patch.name {
            building.name = Set(name);
        }
        if let Some(code) = patch.code {
            building.code = Set(code);
        }

        let building = building.update(conn).await?;
        Ok(Self::hydrate(conn, building).await?)
    }

    /// Deletes a building along with its rooms and their reservations
    pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<()> {
        Self::find(conn, id).await?;

        let room_ids: Vec<i32> = room::Entity::find()
            .select_only()
            .column(room::Column::Id)
            .filter(room::Column::BuildingId.eq(id))
            .into_tuple()
            .all(conn)
            .await?;

        if !room_ids.is_empty() {
            room_reservation::Entity::delete_many()
                .filter(room_reservation::Column::RoomId.is_in(room_ids.clone()))
                .exec(conn)
                .await?;
            room::Entity::delete_many()
                .filter(room::Column::Id.is_in(room_ids))
                .exec(conn)
                .await?;
        }

        building::Entity::delete_by_id(id).exec(conn).await?;
        log::info!("Deleted building {id} with its rooms");
        Ok(())
    }

    pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<building::Model> {
        building::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound(EntityKind::Building))
    }

    async fn hydrate<C: ConnectionTrait>(
        conn: &C,
        building: building::Model,
    ) -> Result<BuildingDetails, DbErr> {
        let rooms = room::Entity::find()
            .filter(room::Column::BuildingId.eq(building.id))
            .order_by_asc(room::Column::Id)
            .all(conn)
            .await?;

        Ok(BuildingDetails { building, rooms })
    }

    /// Batch fetch the rooms of many buildings
    async fn with_rooms<C: ConnectionTrait>(
        conn: &C,
        buildings: Vec<building::Model>,
    ) -> Result<Vec<BuildingDetails>, DbErr> {
        if buildings.is_empty() {
            return Ok(vec![]);
        }

        let building_ids: Vec<i32> = buildings.iter().map(|b| b.id).collect();
        let rooms = room::Entity::find()
            .filter(room::Column::BuildingId.is_in(building_ids))
            .order_by_asc(room::Column::Id)
            .all(conn)
            .await?;
        let mut rooms_by_building = group_by(rooms, |r| r.building_id);

        Ok(buildings
            .into_iter()
            .map(|building| BuildingDetails {
                rooms: rooms_by_building.remove(&building.id).unwrap_or_default(),
                building,
            })
            .collect())
    }
}
