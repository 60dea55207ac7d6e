use log::LevelFilter;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

/// Creates a database connection pool for the given connection string
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    // Every connection to `sqlite::memory:` opens its own empty database
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    Database::connect(options).await
}
