#![allow(dead_code)]

use std::str::FromStr;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;
use tower::ServiceExt;

use focusflow::api::router;
use focusflow::config::Config;
use focusflow::db;
use focusflow::state::AppState;

/// One connection, so every query sees the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Invalid sqlite url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create database");
    db::migrate(&pool).await.expect("Failed to run migrations");
    pool
}

/// A file-backed database shared by `connections` connections, for tests
/// that need requests to overlap. Keep the `TempDir` alive for the test.
pub async fn file_pool(connections: u32) -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("focusflow.db"))
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(connections)
        .connect_with(options)
        .await
        .expect("Failed to create database");
    db::migrate(&pool).await.expect("Failed to run migrations");
    (pool, dir)
}

pub fn test_config() -> Config {
    Config {
        bcrypt_cost: 4,
        ..Config::default()
    }
}

pub async fn test_app() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    let app = router(AppState::new(pool.clone(), test_config()));
    (app, pool)
}

pub async fn file_app(connections: u32) -> (Router, SqlitePool, TempDir) {
    let (pool, dir) = file_pool(connections).await;
    let app = router(AppState::new(pool.clone(), test_config()));
    (app, pool, dir)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("Failed to build request"))
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Registers a user and returns its id.
pub async fn register(app: &Router, name: &str, email: &str) -> String {
    let uri = format!(
        "/user/register?name={}&email={}&password=Secret1%21",
        name,
        email.replace('@', "%40")
    );
    let (status, body) = send(app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["payload"]["id"].as_str().expect("user id").to_string()
}

pub fn assert_envelope(body: &Value, status: StatusCode, message: &str) {
    assert_eq!(body["success"], status.is_success(), "{body}");
    assert_eq!(body["status"], status.as_u16(), "{body}");
    assert_eq!(body["message"], message, "{body}");
}
