use sqlx::SqlitePool;

use crate::db::{new_id, timestamp};
use crate::models::{Card, NewCard};

const CARD_COLUMNS: &str =
    "id, title, description, deadline, user_id, status, created_at, updated_at";

pub async fn insert_card(db: &SqlitePool, card: NewCard) -> Result<Card, sqlx::Error> {
    let now = timestamp();
    sqlx::query_as::<_, Card>(&format!(
        "INSERT INTO cards (id, title, description, deadline, user_id, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
         RETURNING {CARD_COLUMNS}"
    ))
    .bind(new_id())
    .bind(&card.title)
    .bind(&card.description)
    .bind(card.deadline)
    .bind(&card.user_id)
    .bind(card.status)
    .bind(&now)
    .fetch_one(db)
    .await
}

pub async fn fetch_cards_by_user(db: &SqlitePool, user_id: &str) -> Result<Vec<Card>, sqlx::Error> {
    sqlx::query_as::<_, Card>(&format!(
        "SELECT {CARD_COLUMNS} FROM cards
         WHERE user_id = ?
         ORDER BY created_at DESC, rowid DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find_card_by_id(db: &SqlitePool, id: &str) -> Result<Option<Card>, sqlx::Error> {
    sqlx::query_as::<_, Card>(&format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Writes the editable fields of `card` back and bumps `updated_at`.
pub async fn update_card(db: &SqlitePool, card: &Card) -> Result<Option<Card>, sqlx::Error> {
    sqlx::query_as::<_, Card>(&format!(
        "UPDATE cards
         SET title = ?1,
             description = ?2,
             deadline = ?3,
             status = ?4,
             updated_at = ?5
         WHERE id = ?6
         RETURNING {CARD_COLUMNS}"
    ))
    .bind(&card.title)
    .bind(&card.description)
    .bind(card.deadline)
    .bind(card.status)
    .bind(timestamp())
    .bind(&card.id)
    .fetch_optional(db)
    .await
}

pub async fn delete_card(db: &SqlitePool, id: &str) -> Result<Option<Card>, sqlx::Error> {
    sqlx::query_as::<_, Card>(&format!("DELETE FROM cards WHERE id = ? RETURNING {CARD_COLUMNS}"))
        .bind(id)
        .fetch_optional(db)
        .await
}
