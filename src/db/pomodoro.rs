use sqlx::{SqliteExecutor, SqlitePool};

use crate::db::{new_id, timestamp};
use crate::models::{Durations, PomodoroSession, PomodoroSettings, PomodoroTask, SessionMode};

const SETTINGS_COLUMNS: &str =
    "id, user_id, pomodoro_time, short_break_time, long_break_time, created_at, updated_at";
const TASK_COLUMNS: &str = "id, user_id, text, completed, current, created_at, updated_at";
const SESSION_COLUMNS: &str = "id, user_id, mode, duration, completed, started_at, completed_at";

// settings

pub async fn find_settings_by_user(
    db: &SqlitePool,
    user_id: &str,
) -> Result<Option<PomodoroSettings>, sqlx::Error> {
    sqlx::query_as::<_, PomodoroSettings>(&format!(
        "SELECT {SETTINGS_COLUMNS} FROM pomodoro_settings WHERE user_id = ? LIMIT 1"
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Returns the user's settings, inserting the defaults on first read.
pub async fn get_or_create_settings(
    db: &SqlitePool,
    user_id: &str,
) -> Result<PomodoroSettings, sqlx::Error> {
    if let Some(settings) = find_settings_by_user(db, user_id).await? {
        return Ok(settings);
    }

    let defaults = Durations::default();
    let now = timestamp();
    // a concurrent first read may have inserted already; the unique user_id keeps one row
    sqlx::query(
        r#"
        INSERT INTO pomodoro_settings
            (id, user_id, pomodoro_time, short_break_time, long_break_time, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        ON CONFLICT(user_id) DO NOTHING
        "#,
    )
    .bind(new_id())
    .bind(user_id)
    .bind(defaults.pomodoro_time)
    .bind(defaults.short_break_time)
    .bind(defaults.long_break_time)
    .bind(&now)
    .execute(db)
    .await?;

    find_settings_by_user(db, user_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

pub async fn update_settings(
    db: &SqlitePool,
    id: &str,
    durations: Durations,
) -> Result<Option<PomodoroSettings>, sqlx::Error> {
    sqlx::query_as::<_, PomodoroSettings>(&format!(
        "UPDATE pomodoro_settings
         SET pomodoro_time = ?1,
             short_break_time = ?2,
             long_break_time = ?3,
             updated_at = ?4
         WHERE id = ?5
         RETURNING {SETTINGS_COLUMNS}"
    ))
    .bind(durations.pomodoro_time)
    .bind(durations.short_break_time)
    .bind(durations.long_break_time)
    .bind(timestamp())
    .bind(id)
    .fetch_optional(db)
    .await
}

// tasks

pub async fn fetch_tasks_by_user(
    db: &SqlitePool,
    user_id: &str,
) -> Result<Vec<PomodoroTask>, sqlx::Error> {
    sqlx::query_as::<_, PomodoroTask>(&format!(
        "SELECT {TASK_COLUMNS} FROM pomodoro_tasks
         WHERE user_id = ?
         ORDER BY created_at ASC, rowid ASC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find_task_by_id<'e, E>(db: E, id: &str) -> Result<Option<PomodoroTask>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, PomodoroTask>(&format!(
        "SELECT {TASK_COLUMNS} FROM pomodoro_tasks WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

async fn clear_current<'e, E>(db: E, user_id: &str) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE pomodoro_tasks SET current = 0, updated_at = ?1 WHERE user_id = ?2 AND current = 1",
    )
    .bind(timestamp())
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

/// Inserts a task. When it is created as current, the user's other current
/// flags are cleared in the same transaction.
pub async fn insert_task(
    db: &SqlitePool,
    user_id: &str,
    text: &str,
    completed: bool,
    current: bool,
) -> Result<PomodoroTask, sqlx::Error> {
    let mut tx = db.begin().await?;
    if current {
        clear_current(&mut *tx, user_id).await?;
    }

    let now = timestamp();
    let task = sqlx::query_as::<_, PomodoroTask>(&format!(
        "INSERT INTO pomodoro_tasks (id, user_id, text, completed, current, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(new_id())
    .bind(user_id)
    .bind(text)
    .bind(completed)
    .bind(current)
    .bind(&now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(task)
}

/// Persists the merged task. Marking it current clears its siblings first.
pub async fn save_task(db: &SqlitePool, task: &PomodoroTask) -> Result<Option<PomodoroTask>, sqlx::Error> {
    let mut tx = db.begin().await?;
    if task.current {
        clear_current(&mut *tx, &task.user_id).await?;
    }

    let saved = sqlx::query_as::<_, PomodoroTask>(&format!(
        "UPDATE pomodoro_tasks
         SET text = ?1,
             completed = ?2,
             current = ?3,
             updated_at = ?4
         WHERE id = ?5
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(&task.text)
    .bind(task.completed)
    .bind(task.current)
    .bind(timestamp())
    .bind(&task.id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(saved)
}

/// Makes `task_id` the user's only current task. The transaction opens with
/// the clearing write so concurrent callers queue on the write lock; if the
/// task does not belong to `user_id` it is rolled back and nothing changes.
pub async fn set_current_task(
    db: &SqlitePool,
    user_id: &str,
    task_id: &str,
) -> Result<Option<PomodoroTask>, sqlx::Error> {
    let mut tx = db.begin().await?;

    clear_current(&mut *tx, user_id).await?;
    let task = sqlx::query_as::<_, PomodoroTask>(&format!(
        "UPDATE pomodoro_tasks
         SET current = 1, updated_at = ?1
         WHERE id = ?2 AND user_id = ?3
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(timestamp())
    .bind(task_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    match task {
        Some(task) => {
            tx.commit().await?;
            Ok(Some(task))
        }
        None => {
            tx.rollback().await?;
            Ok(None)
        }
    }
}

pub async fn delete_task(db: &SqlitePool, id: &str) -> Result<Option<PomodoroTask>, sqlx::Error> {
    sqlx::query_as::<_, PomodoroTask>(&format!(
        "DELETE FROM pomodoro_tasks WHERE id = ? RETURNING {TASK_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

// sessions

pub async fn insert_session(
    db: &SqlitePool,
    user_id: &str,
    mode: SessionMode,
    duration: i32,
) -> Result<PomodoroSession, sqlx::Error> {
    sqlx::query_as::<_, PomodoroSession>(&format!(
        "INSERT INTO pomodoro_sessions (id, user_id, mode, duration, completed, started_at, completed_at)
         VALUES (?1, ?2, ?3, ?4, 0, ?5, NULL)
         RETURNING {SESSION_COLUMNS}"
    ))
    .bind(new_id())
    .bind(user_id)
    .bind(mode)
    .bind(duration)
    .bind(timestamp())
    .fetch_one(db)
    .await
}

pub async fn fetch_sessions_by_user(
    db: &SqlitePool,
    user_id: &str,
) -> Result<Vec<PomodoroSession>, sqlx::Error> {
    sqlx::query_as::<_, PomodoroSession>(&format!(
        "SELECT {SESSION_COLUMNS} FROM pomodoro_sessions
         WHERE user_id = ?
         ORDER BY started_at DESC, rowid DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find_session_by_id(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<PomodoroSession>, sqlx::Error> {
    sqlx::query_as::<_, PomodoroSession>(&format!(
        "SELECT {SESSION_COLUMNS} FROM pomodoro_sessions WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Marks an open session completed. The flag is the predicate, so exactly one
/// caller sees `Some` for a given session; later calls get `None`.
pub async fn complete_open_session(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<PomodoroSession>, sqlx::Error> {
    sqlx::query_as::<_, PomodoroSession>(&format!(
        "UPDATE pomodoro_sessions
         SET completed = 1, completed_at = ?1
         WHERE id = ?2 AND completed = 0
         RETURNING {SESSION_COLUMNS}"
    ))
    .bind(timestamp())
    .bind(id)
    .fetch_optional(db)
    .await
}
