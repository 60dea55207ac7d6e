pub mod auth;
pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod utils;

use axum::{Router, middleware, routing::get};
use doc::ApiDoc;
use state::AppState;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Every route of the service, with request logging and compression
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .merge(routes::auth::router())
        .merge(routes::building::router())
        .merge(routes::room::router())
        .merge(routes::lecturer::router())
        .merge(routes::schedule::router())
        .merge(routes::reservation::router())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(utils::request_log::log_request))
        .layer(CompressionLayer::new())
        .with_state(state)
}
