//! A study session: walks through a batch of words and schedules each rated word.
//! One rating means one read of the progress record and one write of its successor.

use super::{
    Quality, SchedulerConfig, Status, Timestamp, Word, WordProgress, build_session,
    compute_next_review, reward_for,
};
use crate::database::ProgressStore;
use crate::error::Result;
use rand::Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub correct: u32,
    pub incorrect: u32,
    pub xp_earned: u32,
}

/// What happened when a word was rated. Callers feed this into the activity log.
#[derive(Clone, Debug, PartialEq)]
pub struct RatingOutcome {
    pub word_id: String,
    pub quality: Quality,
    pub previous: WordProgress,
    pub next: WordProgress,
    pub xp: u32,
}

impl RatingOutcome {
    pub fn correct(&self) -> bool {
        self.quality.is_correct()
    }

    /// A new word recalled correctly for the first time counts as learned.
    pub fn learned_new_word(&self) -> bool {
        self.correct() && self.previous.status == Status::New
    }
}

pub struct StudySession {
    pub scope: String,
    pub words: Vec<Word>,
    pub current_index: usize,
    pub show_translation: bool,
    pub stats: SessionStats,
}

impl StudySession {
    pub fn new(scope: &str, words: Vec<Word>) -> Self {
        Self {
            scope: scope.to_string(),
            words,
            current_index: 0,
            show_translation: false,
            stats: SessionStats::default(),
        }
    }

    /// Picks up to `count` words of `corpus` for `scope` based on the stored progress.
    pub fn start<S, R>(
        store: &S,
        corpus: &[Word],
        scope: &str,
        count: usize,
        now: Timestamp,
        rng: &mut R,
    ) -> Result<Self>
    where
        S: ProgressStore + ?Sized,
        R: Rng + ?Sized,
    {
        let snapshot = store.snapshot()?;
        let words = build_session(corpus, &snapshot, scope, count, now, rng);
        log::info!("Started session in {scope:?} with {} words", words.len());
        Ok(Self::new(scope, words))
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.current_index)
    }

    pub fn toggle_translation(&mut self) {
        self.show_translation = !self.show_translation;
    }

    /// Moves on without scheduling the current word.
    pub fn skip_current(&mut self) {
        if self.current_index < self.words.len() {
            self.current_index += 1;
            self.show_translation = false;
        }
    }

    /// Schedules the current word with `quality`, persists it and advances.
    /// Returns `None` once the session is over.
    pub fn rate_current<S: ProgressStore + ?Sized>(
        &mut self,
        store: &mut S,
        quality: Quality,
        now: Timestamp,
        config: &SchedulerConfig,
    ) -> Result<Option<RatingOutcome>> {
        let Some(word) = self.words.get(self.current_index) else {
            return Ok(None);
        };

        let previous = store.get(&self.scope, &word.id)?;
        let next = compute_next_review(&previous, quality, now, config);
        let xp = reward_for(quality, previous.status);
        store.put(&self.scope, &word.id, &next)?;

        let outcome = RatingOutcome {
            word_id: word.id.clone(),
            quality,
            previous,
            next,
            xp,
        };

        self.stats.xp_earned += xp;
        if outcome.correct() {
            self.stats.correct += 1;
        } else {
            self.stats.incorrect += 1;
        }
        self.skip_current();

        Ok(Some(outcome))
    }

    pub fn total_count(&self) -> usize {
        self.words.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.words.len().saturating_sub(self.current_index)
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.words.len()
    }

    pub fn progress_message(&self) -> String {
        format!(
            "{} / {}",
            (self.current_index + 1).min(self.total_count()),
            self.total_count()
        )
    }
}
