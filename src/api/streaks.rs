use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::Local;

use crate::api::extract::ValidJson;
use crate::api::users::ensure_user;
use crate::error::AppError;
use crate::models::{DailyStreak, StreakRequest};
use crate::response::ApiResponse;
use crate::services::StreakService;
use crate::state::AppState;
use crate::validation::non_blank;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/streak/user/{user_id}", get(get_streak))
        .route("/api/streak/complete", post(record_completion))
        .route("/api/streak/force-increment", post(force_increment))
}

fn require_user_id(req: &StreakRequest) -> Result<&str, AppError> {
    non_blank(req.user_id.as_deref()).ok_or_else(|| AppError::validation("User ID is required"))
}

async fn get_streak(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<DailyStreak>, AppError> {
    ensure_user(&state, &user_id).await?;
    let streak = StreakService::new(state.db.clone()).get_or_create(&user_id).await?;
    Ok(ApiResponse::ok("Daily streak retrieved successfully", streak))
}

async fn record_completion(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<StreakRequest>,
) -> Result<ApiResponse<DailyStreak>, AppError> {
    let user_id = require_user_id(&req)?;
    ensure_user(&state, user_id).await?;
    let streak = StreakService::new(state.db.clone())
        .record_completion(user_id, Local::now().date_naive())
        .await?;
    Ok(ApiResponse::ok("Daily streak updated successfully", streak))
}

async fn force_increment(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<StreakRequest>,
) -> Result<ApiResponse<DailyStreak>, AppError> {
    let user_id = require_user_id(&req)?;
    ensure_user(&state, user_id).await?;
    let streak = StreakService::new(state.db.clone())
        .force_increment(user_id, Local::now().date_naive())
        .await?;
    Ok(ApiResponse::ok("Daily streak incremented successfully (forced)", streak))
}
