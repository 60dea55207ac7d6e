#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::TimeDelta;
use database::db::create_connection;
use migration::{Migrator, MigratorTrait};
use models::conflict::ConflictRule;
use serde_json::{Value, json};
use server::{app, config::Config, state::AppState};
use tower::ServiceExt;

pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Router over a fresh in-memory database
pub async fn test_app() -> (Router, AppState) {
    test_app_with_rule(ConflictRule::EndpointMatch).await
}

pub async fn test_app_with_rule(conflict_rule: ConflictRule) -> (Router, AppState) {
    let db = create_connection("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        secret_key: "integration-test-secret".to_string(),
        access_token_ttl: TimeDelta::minutes(15),
        database_url: "sqlite::memory:".to_string(),
        conflict_rule,
    };
    let state = AppState::new(db, &config);
    (app(state.clone()), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    Response {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/auth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}&password={password}")))
        .unwrap()
}

pub async fn register(app: &Router, username: &str) -> Response {
    let body = json!({
        "username": username,
        "password": "123456",
        "first_name": "lecturer",
        "last_name": "1",
        "email": format!("{username}@example.com"),
        "dob": "1990-05-01T00:00:00Z",
        "gender": "FEMALE",
        "faculty": "COMPUTER_SCIENCE",
    });
    send(app, json_request(Method::POST, "/auth/register", &body, None)).await
}

/// Registers `username` with password `123456` and returns a bearer token
pub async fn login_as(app: &Router, username: &str) -> (i64, String) {
    let registered = register(app, username).await;
    assert_eq!(registered.status, StatusCode::CREATED);

    let login = send(app, login_request(username, "123456")).await;
    assert_eq!(login.status, StatusCode::OK);

    (
        registered.body["data"]["id"].as_i64().unwrap(),
        login.body["data"]["access_token"].as_str().unwrap().to_string(),
    )
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

/// Building, room and a BLOCK_1..BLOCK_2 schedule owned by `lecturer_id`;
/// returns `(room_id, schedule_id)`
pub async fn seed_room_and_schedule(app: &Router, lecturer_id: i64) -> (i64, i64) {
    let building = post_json(app, "/building", json!({ "name": "Nha K", "code": "K" })).await;
    assert_eq!(building.status, StatusCode::CREATED);
    let building_id = building.body["data"]["id"].as_i64().unwrap();

    let room = post_json(
        app,
        "/room",
        json!({ "name": "Phong 1", "code": "P1", "building_id": building_id }),
    )
    .await;
    assert_eq!(room.status, StatusCode::CREATED);

    let schedule = post_json(
        app,
        "/schedule",
        json!({
            "lecturer_id": lecturer_id,
            "course": "Networking",
            "start_block": "BLOCK_1",
            "end_block": "BLOCK_2",
        }),
    )
    .await;
    assert_eq!(schedule.status, StatusCode::CREATED);

    (
        room.body["data"]["id"].as_i64().unwrap(),
        schedule.body["data"]["id"].as_i64().unwrap(),
    )
}

/// Schedule of `lecturer_id` spanning `start..end`; returns its id
pub async fn create_schedule(app: &Router, lecturer_id: i64, start: &str, end: &str) -> i64 {
    let schedule = post_json(
        app,
        "/schedule",
        json!({
            "lecturer_id": lecturer_id,
            "course": "Operating Systems",
            "start_block": start,
            "end_block": end,
        }),
    )
    .await;
    assert_eq!(schedule.status, StatusCode::CREATED);
    schedule.body["data"]["id"].as_i64().unwrap()
}

/// Books `room_id` for `schedule_id` on `date` as the owner of `token`
pub async fn reserve(
    app: &Router,
    token: &str,
    room_id: i64,
    schedule_id: i64,
    date: &str,
) -> Response {
    let body = json!({ "room_id": room_id, "schedule_id": schedule_id, "date": date });
    send(app, json_request(Method::POST, "/reservation", &body, Some(token))).await
}
