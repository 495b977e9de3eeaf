//! In-memory progress store, used for tests and for replaying sessions.
use super::ProgressStore;
use crate::error::Result;
use crate::models::{WordProgress, check_scope, progress_key};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, WordProgress>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, scope: &str, word_id: &str) -> Result<WordProgress> {
        Ok(self
            .records
            .get(&progress_key(scope, word_id))
            .cloned()
            .unwrap_or_default())
    }

    fn put(&mut self, scope: &str, word_id: &str, progress: &WordProgress) -> Result<()> {
        check_scope(scope)?;
        self.records
            .insert(progress_key(scope, word_id), progress.clone());
        Ok(())
    }

    fn snapshot(&self) -> Result<HashMap<String, WordProgress>> {
        Ok(self.records.clone())
    }
}
