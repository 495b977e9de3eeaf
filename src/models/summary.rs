//! Aggregate counts over a progress snapshot. Everything here is recomputed on demand.

use super::{Status, Timestamp, WordProgress};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub new: usize,
    pub learning: usize,
    pub review: usize,
    pub mastered: usize,
    pub total: usize,
}

impl StatusCounts {
    fn add(&mut self, status: Status) {
        match status {
            Status::New => self.new += 1,
            Status::Learning => self.learning += 1,
            Status::Review => self.review += 1,
            Status::Mastered => self.mastered += 1,
        }
        self.total += 1;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StudySummary {
    pub due: usize,
    pub new: usize,
    pub learning: usize,
    pub review: usize,
    pub mastered: usize,
    pub total: usize,
}

fn in_scope<'a>(
    progress: &'a HashMap<String, WordProgress>,
    scope: &str,
) -> impl Iterator<Item = (&'a String, &'a WordProgress)> {
    let prefix = format!("{scope}_");
    progress
        .iter()
        .filter(move |(key, _)| key.starts_with(&prefix))
}

/// Counts of the records tracked under `scope`.
pub fn summarize(
    progress: &HashMap<String, WordProgress>,
    scope: &str,
    now: Timestamp,
) -> StudySummary {
    let mut counts = StatusCounts::default();
    let mut due = 0;

    for (_, record) in in_scope(progress, scope) {
        counts.add(record.status);
        if record.is_due(now) {
            due += 1;
        }
    }

    StudySummary {
        due,
        new: counts.new,
        learning: counts.learning,
        review: counts.review,
        mastered: counts.mastered,
        total: counts.total,
    }
}

/// Records of `scope` that are due at `now`, keyed by word id, most overdue first.
pub fn due_words(
    progress: &HashMap<String, WordProgress>,
    scope: &str,
    now: Timestamp,
) -> Vec<(String, WordProgress)> {
    let prefix_len = scope.len() + 1;
    let mut due: Vec<_> = in_scope(progress, scope)
        .filter(|(_, record)| record.is_due(now))
        .map(|(key, record)| (key[prefix_len..].to_string(), record.clone()))
        .collect();
    due.sort_by(|(a_id, a), (b_id, b)| {
        b.overdue_by(now)
            .cmp(&a.overdue_by(now))
            .then_with(|| a_id.cmp(b_id))
    });
    due
}

/// Status counts grouped by scope, where the scope is the key up to the first `_`.
pub fn category_breakdown(progress: &HashMap<String, WordProgress>) -> BTreeMap<String, StatusCounts> {
    let mut categories: BTreeMap<String, StatusCounts> = BTreeMap::new();
    for (key, record) in progress {
        let category = key.split('_').next().unwrap_or(key);
        categories
            .entry(category.to_string())
            .or_default()
            .add(record.status);
    }
    categories
}

/// Status counts across every scope.
pub fn status_counts(progress: &HashMap<String, WordProgress>) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for record in progress.values() {
        counts.add(record.status);
    }
    counts
}
