use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Logs one line per request once the response is ready
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{method} {path} {} {:.1?}",
        response.status().as_u16(),
        started.elapsed()
    );
    response
}
