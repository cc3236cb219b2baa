use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const INVALID_STATUS_MESSAGE: &str =
    "Invalid status value. Must be 'sudah selesai' or 'belum selesai'";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum CardStatus {
    #[default]
    #[serde(rename = "belum selesai")]
    #[sqlx(rename = "belum selesai")]
    Active,
    #[serde(rename = "sudah selesai")]
    #[sqlx(rename = "sudah selesai")]
    Completed,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Active => "belum selesai",
            CardStatus::Completed => "sudah selesai",
        }
    }

    /// Cards only ever move from active to completed.
    pub fn can_transition_to(&self, next: CardStatus) -> bool {
        !matches!((self, next), (CardStatus::Completed, CardStatus::Active))
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "belum selesai" => Ok(CardStatus::Active),
            "sudah selesai" => Ok(CardStatus::Completed),
            other => Err(format!("unknown card status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub user_id: String,
    pub status: CardStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Card {
    /// Presentation-only: nothing ever persists an overdue state.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == CardStatus::Active && self.deadline < now
    }
}

#[derive(Debug, Serialize)]
pub struct CardView {
    #[serde(flatten)]
    pub card: Card,
    pub is_overdue: bool,
}

impl CardView {
    pub fn new(card: Card, now: DateTime<Utc>) -> Self {
        let is_overdue = card.is_overdue(now);
        Self { card, is_overdue }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCardRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
    pub user_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCardRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCard {
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub user_id: String,
    pub status: CardStatus,
}

/// Validated partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: Option<CardStatus>,
}

impl CardPatch {
    pub fn apply(self, card: &mut Card) {
        if let Some(title) = self.title {
            card.title = title;
        }
        if let Some(description) = self.description {
            card.description = description;
        }
        if let Some(deadline) = self.deadline {
            card.deadline = deadline;
        }
        if let Some(status) = self.status {
            card.status = status;
        }
    }
}

/// Accepts RFC 3339, `datetime-local` style values (read as UTC) and bare dates.
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
