//! Persistence of word progress and learner activity.
//!
//! The scheduler never touches storage itself: callers read a record through a
//! [`ProgressStore`], compute the next state and write it back.

pub mod db;
pub mod memory;

use crate::error::Result;
use crate::models::WordProgress;
use std::collections::HashMap;

pub use db::SqliteStore;
pub use memory::MemoryStore;

/// Key-value store of progress records, keyed by `(scope, word id)`.
pub trait ProgressStore {
    /// Returns the stored record, or a fresh `new` record if there is none.
    fn get(&self, scope: &str, word_id: &str) -> Result<WordProgress>;

    fn put(&mut self, scope: &str, word_id: &str, progress: &WordProgress) -> Result<()>;

    /// All records, keyed by `progress_key(scope, word_id)`.
    fn snapshot(&self) -> Result<HashMap<String, WordProgress>>;
}
