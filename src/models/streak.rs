use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::streak::Counters;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyStreak {
    pub user_id: String,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_completed_date: Option<NaiveDate>,
    pub created_at: String,
    pub updated_at: String,
}

impl DailyStreak {
    pub fn counters(&self) -> Counters {
        Counters {
            current: self.current_streak,
            longest: self.longest_streak,
            last_completed: self.last_completed_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreakRequest {
    pub user_id: Option<String>,
}
