use database::db::create_connection;
use log::info;
use migration::{Migrator, MigratorTrait};
use server::{app, config::Config, state::AppState, utils::shutdown::shutdown_signal};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;

    let db = create_connection(&config.database_url).await?;
    Migrator::up(&db, None).await?;
    info!("Database migrations are up to date");

    info!("Reservation conflict rule: {}", config.conflict_rule);
    let state = AppState::new(db, &config);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Running axum on http://{address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
