pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use config::Settings;
pub use database::{MemoryStore, ProgressStore, SqliteStore};
pub use error::{Error, Result};
pub use models::{
    Corpus, Quality, SchedulerConfig, Status, StudySession, StudySummary, Word, WordList,
    WordProgress, build_session, compute_next_review, reward_for, summarize,
};
