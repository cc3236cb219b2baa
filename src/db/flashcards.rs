use sqlx::SqlitePool;

use crate::db::{new_id, timestamp};
use crate::models::{Flashcard, FlashcardSet, FlashcardSetSummary, FlashcardSetWithCards};

const SET_COLUMNS: &str = "id, user_id, name, description, created_at, updated_at";
const CARD_COLUMNS: &str = "id, set_id, front, back, created_at, updated_at";

pub async fn insert_set(
    db: &SqlitePool,
    user_id: &str,
    name: &str,
    description: &str,
) -> Result<FlashcardSet, sqlx::Error> {
    let now = timestamp();
    sqlx::query_as::<_, FlashcardSet>(&format!(
        "INSERT INTO flashcard_sets (id, user_id, name, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)
         RETURNING {SET_COLUMNS}"
    ))
    .bind(new_id())
    .bind(user_id)
    .bind(name)
    .bind(description)
    .bind(&now)
    .fetch_one(db)
    .await
}

pub async fn fetch_sets_by_user(
    db: &SqlitePool,
    user_id: &str,
) -> Result<Vec<FlashcardSetSummary>, sqlx::Error> {
    sqlx::query_as::<_, FlashcardSetSummary>(
        r#"
        SELECT fs.id, fs.user_id, fs.name, fs.description, fs.created_at, fs.updated_at,
               (SELECT COUNT(*) FROM flashcards f WHERE f.set_id = fs.id) AS card_count
        FROM flashcard_sets fs
        WHERE fs.user_id = ?
        ORDER BY fs.updated_at DESC, fs.rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find_set_by_id(db: &SqlitePool, id: &str) -> Result<Option<FlashcardSet>, sqlx::Error> {
    sqlx::query_as::<_, FlashcardSet>(&format!(
        "SELECT {SET_COLUMNS} FROM flashcard_sets WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

/// The set plus its cards in creation order, or `None` if the set is gone.
pub async fn find_set_with_cards(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<FlashcardSetWithCards>, sqlx::Error> {
    let Some(set) = find_set_by_id(db, id).await? else {
        return Ok(None);
    };
    let cards = fetch_cards_by_set(db, id).await?;
    Ok(Some(FlashcardSetWithCards { set, cards }))
}

pub async fn update_set(
    db: &SqlitePool,
    id: &str,
    name: &str,
    description: &str,
) -> Result<Option<FlashcardSet>, sqlx::Error> {
    sqlx::query_as::<_, FlashcardSet>(&format!(
        "UPDATE flashcard_sets
         SET name = ?1, description = ?2, updated_at = ?3
         WHERE id = ?4
         RETURNING {SET_COLUMNS}"
    ))
    .bind(name)
    .bind(description)
    .bind(timestamp())
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_set(db: &SqlitePool, id: &str) -> Result<Option<FlashcardSet>, sqlx::Error> {
    sqlx::query_as::<_, FlashcardSet>(&format!(
        "DELETE FROM flashcard_sets WHERE id = ? RETURNING {SET_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

async fn touch_set(db: &SqlitePool, set_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE flashcard_sets SET updated_at = ? WHERE id = ?")
        .bind(timestamp())
        .bind(set_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn insert_card(
    db: &SqlitePool,
    set_id: &str,
    front: &str,
    back: &str,
) -> Result<Flashcard, sqlx::Error> {
    let now = timestamp();
    let card = sqlx::query_as::<_, Flashcard>(&format!(
        "INSERT INTO flashcards (id, set_id, front, back, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)
         RETURNING {CARD_COLUMNS}"
    ))
    .bind(new_id())
    .bind(set_id)
    .bind(front)
    .bind(back)
    .bind(&now)
    .fetch_one(db)
    .await?;

    touch_set(db, set_id).await?;
    Ok(card)
}

pub async fn fetch_cards_by_set(db: &SqlitePool, set_id: &str) -> Result<Vec<Flashcard>, sqlx::Error> {
    sqlx::query_as::<_, Flashcard>(&format!(
        "SELECT {CARD_COLUMNS} FROM flashcards
         WHERE set_id = ?
         ORDER BY created_at ASC, rowid ASC"
    ))
    .bind(set_id)
    .fetch_all(db)
    .await
}

pub async fn find_card_by_id(db: &SqlitePool, id: &str) -> Result<Option<Flashcard>, sqlx::Error> {
    sqlx::query_as::<_, Flashcard>(&format!("SELECT {CARD_COLUMNS} FROM flashcards WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn update_card(
    db: &SqlitePool,
    id: &str,
    front: &str,
    back: &str,
) -> Result<Option<Flashcard>, sqlx::Error> {
    let card = sqlx::query_as::<_, Flashcard>(&format!(
        "UPDATE flashcards
         SET front = ?1, back = ?2, updated_at = ?3
         WHERE id = ?4
         RETURNING {CARD_COLUMNS}"
    ))
    .bind(front)
    .bind(back)
    .bind(timestamp())
    .bind(id)
    .fetch_optional(db)
    .await?;

    if let Some(card) = &card {
        touch_set(db, &card.set_id).await?;
    }
    Ok(card)
}

pub async fn delete_card(db: &SqlitePool, id: &str) -> Result<Option<Flashcard>, sqlx::Error> {
    sqlx::query_as::<_, Flashcard>(&format!(
        "DELETE FROM flashcards WHERE id = ? RETURNING {CARD_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}
