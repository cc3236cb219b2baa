use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::pomodoro;
use crate::models::{PomodoroSession, SessionMode};
use crate::services::StreakService;

pub struct SessionService {
    db: SqlitePool,
    streaks: StreakService,
}

impl SessionService {
    pub fn new(db: SqlitePool) -> Self {
        let streaks = StreakService::new(db.clone());
        Self { db, streaks }
    }

    /// Starts a session. Without an explicit duration the user's configured
    /// length for `mode` is used.
    pub async fn start(
        &self,
        user_id: &str,
        mode: SessionMode,
        duration: Option<i32>,
    ) -> Result<PomodoroSession, sqlx::Error> {
        let duration = match duration {
            Some(minutes) => minutes,
            None => pomodoro::get_or_create_settings(&self.db, user_id)
                .await?
                .minutes_for(mode),
        };
        pomodoro::insert_session(&self.db, user_id, mode, duration).await
    }

    /// Completes the session and, for focus sessions, accrues the owner's
    /// streak. Already-completed sessions are returned as they are.
    pub async fn complete(
        &self,
        id: &str,
        today: NaiveDate,
    ) -> Result<Option<PomodoroSession>, sqlx::Error> {
        let Some(session) = pomodoro::complete_open_session(&self.db, id).await? else {
            return pomodoro::find_session_by_id(&self.db, id).await;
        };

        info!(session_id = %session.id, mode = %session.mode, "pomodoro session completed");
        if session.mode == SessionMode::Pomodoro {
            // the completion stands even if the streak write fails
            if let Err(e) = self.streaks.record_completion(&session.user_id, today).await {
                warn!(user_id = %session.user_id, "failed to update streak: {}", e);
            }
        }

        Ok(Some(session))
    }
}
