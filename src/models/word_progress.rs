//! Per-word spaced repetition state, tracked separately for every scope.
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

pub const MILLIS_PER_MINUTE: i64 = 60 * 1000;

/// Mastery stage of a word. Only a hard rating moves a word backwards (to `Learning`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    New,
    Learning,
    Review,
    Mastered,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::New,
        Status::Learning,
        Status::Review,
        Status::Mastered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Learning => "learning",
            Status::Review => "review",
            Status::Mastered => "mastered",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "new" => Ok(Status::New),
            "learning" => Ok(Status::Learning),
            "review" => Ok(Status::Review),
            "mastered" => Ok(Status::Mastered),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordProgress {
    /// Minutes until the next review
    pub interval: i64,
    pub repetition: u32,
    pub ease_factor: f64,
    pub next_review: Option<Timestamp>,
    pub last_review: Option<Timestamp>,
    pub status: Status,
}

impl Default for WordProgress {
    fn default() -> Self {
        Self {
            interval: 0,
            repetition: 0,
            ease_factor: 2.5,
            next_review: None,
            last_review: None,
            status: Status::New,
        }
    }
}

impl WordProgress {
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review.is_some_and(|next| next <= now)
    }

    /// How long ago the word became due; zero or negative if it isn't due yet.
    pub fn overdue_by(&self, now: Timestamp) -> i64 {
        self.next_review.map_or(0, |next| now - next)
    }
}

/// Key of a progress record in a snapshot: `<scope>_<word id>`.
pub fn progress_key(scope: &str, word_id: &str) -> String {
    format!("{scope}_{word_id}")
}

/// Scope names end at the first `_` of a progress key, so they can't contain one.
pub fn check_scope(scope: &str) -> Result<()> {
    if scope.is_empty() || scope.contains('_') {
        return Err(Error::InvalidScope(scope.to_string()));
    }
    Ok(())
}
