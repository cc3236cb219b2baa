use sqlx::SqliteExecutor;

use crate::db::timestamp;
use crate::models::DailyStreak;
use crate::streak::Counters;

const STREAK_COLUMNS: &str =
    "user_id, current_streak, longest_streak, last_completed_date, created_at, updated_at";

pub async fn find_streak_by_user<'e, E>(db: E, user_id: &str) -> Result<Option<DailyStreak>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, DailyStreak>(&format!(
        "SELECT {STREAK_COLUMNS} FROM daily_streaks WHERE user_id = ?"
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Inserts a zeroed record unless one already exists.
pub async fn insert_empty_streak<'e, E>(db: E, user_id: &str) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = timestamp();
    sqlx::query(
        r#"
        INSERT INTO daily_streaks
            (user_id, current_streak, longest_streak, last_completed_date, created_at, updated_at)
        VALUES (?1, 0, 0, NULL, ?2, ?2)
        ON CONFLICT(user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(&now)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn save_streak<'e, E>(db: E, user_id: &str, counters: Counters) -> Result<DailyStreak, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, DailyStreak>(&format!(
        "UPDATE daily_streaks
         SET current_streak = ?1,
             longest_streak = ?2,
             last_completed_date = ?3,
             updated_at = ?4
         WHERE user_id = ?5
         RETURNING {STREAK_COLUMNS}"
    ))
    .bind(counters.current)
    .bind(counters.longest)
    .bind(counters.last_completed)
    .bind(timestamp())
    .bind(user_id)
    .fetch_one(db)
    .await
}
