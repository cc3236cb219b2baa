use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use chrono::Local;

use crate::api::extract::ValidJson;
use crate::api::users::ensure_user;
use crate::db::pomodoro;
use crate::error::AppError;
use crate::models::{
    Durations, NewTaskRequest, PomodoroSession, PomodoroSettings, PomodoroTask, SessionMode,
    SetCurrentTaskRequest, StartSessionRequest, UpdateSettingsRequest, UpdateTaskRequest,
};
use crate::response::ApiResponse;
use crate::services::SessionService;
use crate::state::AppState;
use crate::validation::non_blank;

const TASK_NOT_FOUND: &str = "Task not found";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pomodoro/settings/user/{user_id}", get(get_settings))
        .route("/pomodoro/settings/{id}", put(update_settings))
        .route("/pomodoro/tasks", post(create_task))
        .route("/pomodoro/tasks/user/{user_id}", get(list_tasks))
        .route("/pomodoro/tasks/{id}", put(update_task).delete(delete_task))
        .route("/pomodoro/tasks/{id}/set-current", put(set_current_task))
        .route("/pomodoro/sessions", post(start_session))
        .route("/pomodoro/sessions/user/{user_id}", get(list_sessions))
        .route("/pomodoro/sessions/{id}/complete", put(complete_session))
}

fn require_user_id(raw: Option<&str>) -> Result<&str, AppError> {
    non_blank(raw).ok_or_else(|| AppError::validation("User ID is required"))
}

async fn get_settings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<PomodoroSettings>, AppError> {
    ensure_user(&state, &user_id).await?;
    let settings = pomodoro::get_or_create_settings(&state.db, &user_id).await?;
    Ok(ApiResponse::ok("Pomodoro settings retrieved successfully", settings))
}

async fn update_settings(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateSettingsRequest>,
) -> Result<ApiResponse<PomodoroSettings>, AppError> {
    // zero and negative minutes count as missing
    let (Some(pomodoro_time), Some(short_break_time), Some(long_break_time)) = (
        req.pomodoro_time.filter(|m| *m > 0),
        req.short_break_time.filter(|m| *m > 0),
        req.long_break_time.filter(|m| *m > 0),
    ) else {
        return Err(AppError::validation("All time values are required"));
    };

    let durations = Durations { pomodoro_time, short_break_time, long_break_time };
    let settings = pomodoro::update_settings(&state.db, &id, durations)
        .await?
        .ok_or_else(|| AppError::not_found("Settings not found"))?;
    Ok(ApiResponse::ok("Pomodoro settings updated successfully", settings))
}

async fn list_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<PomodoroTask>>, AppError> {
    let tasks = pomodoro::fetch_tasks_by_user(&state.db, &user_id).await?;
    Ok(ApiResponse::ok("Pomodoro tasks retrieved successfully", tasks))
}

async fn create_task(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<NewTaskRequest>,
) -> Result<ApiResponse<PomodoroTask>, AppError> {
    let user_id = require_user_id(req.user_id.as_deref())?;
    let text = non_blank(req.text.as_deref())
        .ok_or_else(|| AppError::validation("Task text is required"))?;

    let task = pomodoro::insert_task(
        &state.db,
        user_id,
        text,
        req.completed.unwrap_or(false),
        req.current.unwrap_or(false),
    )
    .await?;
    Ok(ApiResponse::created("Pomodoro task created successfully", task))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateTaskRequest>,
) -> Result<ApiResponse<PomodoroTask>, AppError> {
    let mut task = pomodoro::find_task_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found(TASK_NOT_FOUND))?;

    req.apply(&mut task);
    let task = pomodoro::save_task(&state.db, &task)
        .await?
        .ok_or_else(|| AppError::not_found(TASK_NOT_FOUND))?;
    Ok(ApiResponse::ok("Pomodoro task updated successfully", task))
}

async fn set_current_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<SetCurrentTaskRequest>,
) -> Result<ApiResponse<PomodoroTask>, AppError> {
    let user_id = require_user_id(req.user_id.as_deref())?;

    let task = pomodoro::set_current_task(&state.db, user_id, &id)
        .await?
        .ok_or_else(|| AppError::not_found(TASK_NOT_FOUND))?;
    Ok(ApiResponse::ok("Current task set successfully", task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<PomodoroTask>, AppError> {
    let task = pomodoro::delete_task(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found(TASK_NOT_FOUND))?;
    Ok(ApiResponse::ok("Pomodoro task deleted successfully", task))
}

async fn start_session(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<StartSessionRequest>,
) -> Result<ApiResponse<PomodoroSession>, AppError> {
    let user_id = require_user_id(req.user_id.as_deref())?;
    let mode = match non_blank(req.mode.as_deref()) {
        Some(raw) => raw.parse::<SessionMode>().map_err(|_| {
            AppError::validation(
                "Invalid session mode. Must be 'pomodoro', 'short_break' or 'long_break'",
            )
        })?,
        None => SessionMode::Pomodoro,
    };
    if req.duration.is_some_and(|minutes| minutes <= 0) {
        return Err(AppError::validation("Duration must be a positive number of minutes"));
    }

    let session = SessionService::new(state.db.clone())
        .start(user_id, mode, req.duration)
        .await?;
    Ok(ApiResponse::created("Pomodoro session started successfully", session))
}

async fn list_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<PomodoroSession>>, AppError> {
    let sessions = pomodoro::fetch_sessions_by_user(&state.db, &user_id).await?;
    Ok(ApiResponse::ok("Pomodoro sessions retrieved successfully", sessions))
}

async fn complete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<PomodoroSession>, AppError> {
    let today = Local::now().date_naive();
    let session = SessionService::new(state.db.clone())
        .complete(&id, today)
        .await?
        .ok_or_else(|| AppError::not_found("Session not found"))?;
    Ok(ApiResponse::ok("Session completed successfully", session))
}
