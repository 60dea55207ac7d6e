/// Implements `ActiveModelBehavior` so that `created_at` is stamped on insert
/// and `last_edited` on every insert and update.
macro_rules! timestamped_behavior {
    () => {
        #[async_trait::async_trait]
        impl ActiveModelBehavior for ActiveModel {
            async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
            where
                C: ConnectionTrait,
            {
                let now = chrono::Utc::now().naive_utc();
                if insert {
                    self.created_at = sea_orm::ActiveValue::Set(now);
                }
                self.last_edited = sea_orm::ActiveValue::Set(now);
                Ok(self)
            }
        }
    };
}

pub(crate) use timestamped_behavior;

pub mod building;
pub mod lecturer;
pub mod room;
pub mod room_reservation;
pub mod schedule;
