use sqlx::SqlitePool;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::db::streaks;
use crate::models::DailyStreak;
use crate::streak;

/// Streak reads and updates. Each update reads, computes and writes inside a
/// single transaction.
#[derive(Clone)]
pub struct StreakService {
    db: SqlitePool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    DateGated,
    Forced,
}

impl StreakService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn get_or_create(&self, user_id: &str) -> Result<DailyStreak, sqlx::Error> {
        if let Some(streak) = streaks::find_streak_by_user(&self.db, user_id).await? {
            return Ok(streak);
        }
        streaks::insert_empty_streak(&self.db, user_id).await?;
        streaks::find_streak_by_user(&self.db, user_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Counts a completion on `today`. A second call on the same day returns
    /// the stored record untouched.
    pub async fn record_completion(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<DailyStreak, sqlx::Error> {
        self.update(user_id, today, Mode::DateGated).await
    }

    /// Increments without the same-day check.
    pub async fn force_increment(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<DailyStreak, sqlx::Error> {
        self.update(user_id, today, Mode::Forced).await
    }

    async fn update(
        &self,
        user_id: &str,
        today: NaiveDate,
        mode: Mode,
    ) -> Result<DailyStreak, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        streaks::insert_empty_streak(&mut *tx, user_id).await?;
        let current = streaks::find_streak_by_user(&mut *tx, user_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        let next = match mode {
            Mode::DateGated => streak::accrue(current.counters(), today),
            Mode::Forced => Some(streak::increment(current.counters(), today)),
        };

        let result = match next {
            Some(counters) => {
                let saved = streaks::save_streak(&mut *tx, user_id, counters).await?;
                info!(
                    user_id,
                    current = saved.current_streak,
                    longest = saved.longest_streak,
                    forced = (mode == Mode::Forced),
                    "streak advanced"
                );
                saved
            }
            None => {
                debug!(user_id, "completion already counted today");
                current
            }
        };

        tx.commit().await?;
        Ok(result)
    }
}
