use axum::http::StatusCode;

/// Liveness probe, answers `OK` in plain text
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
