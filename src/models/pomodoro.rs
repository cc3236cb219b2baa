use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_POMODORO_MINUTES: i32 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: i32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: i32 = 15;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PomodoroSettings {
    pub id: String,
    pub user_id: String,
    pub pomodoro_time: i32,
    pub short_break_time: i32,
    pub long_break_time: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl PomodoroSettings {
    pub fn minutes_for(&self, mode: SessionMode) -> i32 {
        match mode {
            SessionMode::Pomodoro => self.pomodoro_time,
            SessionMode::ShortBreak => self.short_break_time,
            SessionMode::LongBreak => self.long_break_time,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSettingsRequest {
    pub pomodoro_time: Option<i32>,
    pub short_break_time: Option<i32>,
    pub long_break_time: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub pomodoro_time: i32,
    pub short_break_time: i32,
    pub long_break_time: i32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            pomodoro_time: DEFAULT_POMODORO_MINUTES,
            short_break_time: DEFAULT_SHORT_BREAK_MINUTES,
            long_break_time: DEFAULT_LONG_BREAK_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PomodoroTask {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub completed: bool,
    pub current: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTaskRequest {
    pub user_id: Option<String>,
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub current: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub current: Option<bool>,
}

impl UpdateTaskRequest {
    pub fn apply(self, task: &mut PomodoroTask) {
        if let Some(text) = self.text.filter(|t| !t.trim().is_empty()) {
            task.text = text;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(current) = self.current {
            task.current = current;
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetCurrentTaskRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum SessionMode {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionMode::Pomodoro => "pomodoro",
            SessionMode::ShortBreak => "short_break",
            SessionMode::LongBreak => "long_break",
        })
    }
}

impl FromStr for SessionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pomodoro" => Ok(SessionMode::Pomodoro),
            "short_break" | "shortBreak" => Ok(SessionMode::ShortBreak),
            "long_break" | "longBreak" => Ok(SessionMode::LongBreak),
            other => Err(format!("unknown session mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PomodoroSession {
    pub id: String,
    pub user_id: String,
    pub mode: SessionMode,
    pub duration: i32,
    pub completed: bool,
    pub started_at: String,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionRequest {
    pub user_id: Option<String>,
    pub mode: Option<String>,
    pub duration: Option<i32>,
}
