pub mod cards;
pub mod extract;
pub mod flashcards;
pub mod pomodoro;
pub mod streaks;
pub mod users;

use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE, request::Parts},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::api::extract::ValidJson;
use crate::config::Config;
use crate::error::AppError;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation::is_strong_password;

#[derive(Deserialize)]
struct PasswordCheck {
    password: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.config.clone());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/validate-password", post(validate_password))
        .merge(users::routes())
        .merge(cards::routes())
        .merge(flashcards::routes())
        .merge(pomodoro::routes())
        .merge(streaks::routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: Arc<Config>) -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin_host(origin).is_some_and(|host| config.is_allowed_host(&host))
            },
        ))
}

/// Hostname part of an `Origin` header such as `https://app.example:5173`.
fn origin_host(origin: &HeaderValue) -> Option<String> {
    let origin = origin.to_str().ok()?;
    let authority = origin.split_once("://").map_or(origin, |(_, rest)| rest);
    let authority = authority.split('/').next()?;
    let host = match authority.strip_prefix('[') {
        // bracketed IPv6 literal
        Some(rest) => rest.split(']').next()?,
        None => authority.split(':').next()?,
    };
    (!host.is_empty()).then(|| host.to_string())
}

async fn root() -> ApiResponse<()> {
    ApiResponse::new(StatusCode::OK, "Welcome to the API!", None)
}

async fn health(State(state): State<AppState>) -> Result<ApiResponse<()>, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(ApiResponse::new(StatusCode::OK, "OK", None))
}

async fn validate_password(ValidJson(req): ValidJson<PasswordCheck>) -> ApiResponse<()> {
    if req.password.as_deref().is_some_and(is_strong_password) {
        ApiResponse::new(StatusCode::OK, "Valid password", None)
    } else {
        ApiResponse::failure(StatusCode::BAD_REQUEST, "Invalid password")
    }
}

async fn not_found() -> AppError {
    AppError::not_found("Route not found")
}
