use sqlx::SqlitePool;

use crate::db::{new_id, timestamp};
use crate::models::{NewUser, User};

const USER_COLUMNS: &str = "id, name, email, password, created_at, updated_at";

pub async fn insert_user(db: &SqlitePool, user: NewUser) -> Result<User, sqlx::Error> {
    let now = timestamp();
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (id, name, email, password, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(new_id())
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&now)
    .fetch_one(db)
    .await
}

pub async fn find_user_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(db)
        .await
}

pub async fn user_exists(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
        .bind(id)
        .fetch_one(db)
        .await
}

pub async fn find_user_by_id(db: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn fetch_users(db: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, rowid ASC"
    ))
    .fetch_all(db)
    .await
}

pub async fn delete_user(db: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("DELETE FROM users WHERE id = ? RETURNING {USER_COLUMNS}"))
        .bind(id)
        .fetch_optional(db)
        .await
}
