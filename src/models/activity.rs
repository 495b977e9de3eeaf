//! Learner activity outside the scheduler: streaks, XP and levels, daily logs and goals.

use super::Timestamp;
use chrono::{DateTime, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Consecutive days with at least one rated word.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
    pub last_date: Option<NaiveDate>,
}

fn yesterday(today: NaiveDate) -> Option<NaiveDate> {
    today.checked_sub_days(Days::new(1))
}

impl Streak {
    /// Registers activity on `today`: continues a streak from yesterday or starts a new one.
    pub fn record_activity(&mut self, today: NaiveDate) {
        if self.last_date == Some(today) {
            return;
        }
        if self.last_date.is_some() && self.last_date == yesterday(today) {
            self.current += 1;
        } else {
            self.current = 1;
        }
        self.last_date = Some(today);
        self.longest = self.longest.max(self.current);
    }

    /// Drops the current streak if neither today nor yesterday had any activity.
    pub fn check(&mut self, today: NaiveDate) {
        let active = self.last_date == Some(today)
            || (self.last_date.is_some() && self.last_date == yesterday(today));
        if !active {
            self.current = 0;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_xp: u64,
    pub words_learned: u32,
    pub quizzes_taken: u32,
    pub correct_answers: u32,
    pub total_answers: u32,
}

impl UserStats {
    /// Percentage of correct answers, rounded. Zero before the first answer.
    pub fn accuracy(&self) -> u32 {
        percent(self.correct_answers, self.total_answers)
    }
}

fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelInfo {
    pub level: u32,
    pub current_xp: u64,
    pub required_xp: u64,
    pub progress_percent: u32,
}

/// Learner level for `xp`. Level `n` takes `n * 100` XP on top of the previous levels.
pub fn calculate_level(xp: u64) -> LevelInfo {
    let mut level = 1;
    let mut required_xp = 100;
    let mut total_needed = 100;

    while xp >= total_needed {
        level += 1;
        required_xp = level as u64 * 100;
        total_needed += required_xp;
    }

    let current_xp = xp - (total_needed - required_xp);
    LevelInfo {
        level,
        current_xp,
        required_xp,
        progress_percent: (current_xp as f64 / required_xp as f64 * 100.0).round() as u32,
    }
}

/// Counters for a single calendar day.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLog {
    pub words_studied: u32,
    pub quizzes_done: u32,
    pub xp_earned: u64,
    pub correct_answers: u32,
    pub total_answers: u32,
    pub started_at: Option<Timestamp>,
}

impl DailyLog {
    pub fn record_answer(&mut self, xp: u32, correct: bool, now: Timestamp) {
        self.started_at.get_or_insert(now);
        self.words_studied += 1;
        self.xp_earned += xp as u64;
        self.total_answers += 1;
        if correct {
            self.correct_answers += 1;
        }
    }

    pub fn record_quiz(&mut self, now: Timestamp) {
        self.started_at.get_or_insert(now);
        self.quizzes_done += 1;
    }

    pub fn accuracy(&self) -> u32 {
        percent(self.correct_answers, self.total_answers)
    }
}

/// Calendar day of `timestamp` in the local time zone.
pub fn local_date(timestamp: Timestamp) -> NaiveDate {
    DateTime::from_timestamp_millis(timestamp)
        .unwrap_or_default()
        .with_timezone(&Local)
        .date_naive()
}

/// Key of a daily log entry, e.g. "2026-10-16".
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalProgress {
    pub current: u32,
    pub goal: u32,
    pub percent: u32,
    pub completed: bool,
}

pub fn goal_progress(today: &DailyLog, goal: u32) -> GoalProgress {
    let current = today.words_studied;
    GoalProgress {
        current,
        goal,
        percent: percent(current, goal).min(100),
        completed: current >= goal,
    }
}

/// The `days` dates ending at `today`, oldest first.
pub fn last_days(today: NaiveDate, days: u64) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .collect()
}
