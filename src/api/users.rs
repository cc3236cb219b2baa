use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use tracing::info;

use crate::api::extract::ValidQuery;
use crate::db::users;
use crate::error::AppError;
use crate::models::{LoginParams, NewUser, RegisterParams, User};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation::{is_valid_email, non_blank};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(list_users))
        .route("/user/", get(list_users))
        .route("/user/register", post(register))
        .route("/user/login", post(login))
        .route("/user/{id}", get(get_user).delete(delete_user))
}

/// 404s for ids with no user row, ahead of lookups that would otherwise
/// create dependent rows lazily.
pub(crate) async fn ensure_user(state: &AppState, user_id: &str) -> Result<(), AppError> {
    if users::user_exists(&state.db, user_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("User not found"))
    }
}

async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))?
        .map_err(AppError::from)
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("verify task failed: {e}")))?
        .map_err(AppError::from)
}

async fn register(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<RegisterParams>,
) -> Result<ApiResponse<User>, AppError> {
    let name = non_blank(params.name.as_deref());
    let email = non_blank(params.email.as_deref());
    let password = params.password.filter(|p| !p.is_empty());
    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(AppError::validation("Missing user information"));
    };

    if !is_valid_email(email) {
        return Err(AppError::validation("Invalid email format"));
    }
    if users::find_user_by_email(&state.db, email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(password, state.config.bcrypt_cost).await?;
    let new_user = NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash,
    };

    // two registrations racing past the lookup meet the unique index
    let user = users::insert_user(&state.db, new_user).await.map_err(|e| {
        let duplicate = e.as_database_error().is_some_and(|db| db.is_unique_violation());
        if duplicate {
            AppError::Conflict("Email already registered".to_string())
        } else {
            AppError::from(e)
        }
    })?;

    info!(user_id = %user.id, "user registered");
    Ok(ApiResponse::created("User created", user))
}

async fn login(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<LoginParams>,
) -> Result<ApiResponse<User>, AppError> {
    let email = non_blank(params.email.as_deref());
    let password = params.password.filter(|p| !p.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(AppError::validation("Missing email or password"));
    };

    let user = users::find_user_by_email(&state.db, email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if !verify_password(password, user.password.clone()).await? {
        info!(user_id = %user.id, "login rejected");
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    Ok(ApiResponse::ok("Login success", user))
}

async fn list_users(State(state): State<AppState>) -> Result<ApiResponse<Vec<User>>, AppError> {
    let users = users::fetch_users(&state.db).await?;
    Ok(ApiResponse::ok("Users retrieved successfully", users))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<User>, AppError> {
    let user = users::find_user_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ApiResponse::ok("User retrieved successfully", user))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<User>, AppError> {
    let user = users::delete_user(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    info!(user_id = %user.id, "user deleted");
    Ok(ApiResponse::ok("User deleted successfully", user))
}
