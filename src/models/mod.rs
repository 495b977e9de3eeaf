pub mod activity;
pub mod corpus;
pub mod quality;
pub mod quiz;
pub mod session_builder;
pub mod sm2;
pub mod study_session;
pub mod summary;
pub mod word;
pub mod word_list;
pub mod word_progress;

pub use corpus::Corpus;
pub use quality::Quality;
pub use quiz::QuizQuestion;
pub use session_builder::build_session;
pub use sm2::{SchedulerConfig, compute_next_review, format_interval, reward_for};
pub use study_session::{RatingOutcome, SessionStats, StudySession};
pub use summary::{StatusCounts, StudySummary, summarize};
pub use word::Word;
pub use word_list::WordList;
pub use word_progress::{MILLIS_PER_MINUTE, Status, Timestamp, WordProgress, check_scope, progress_key};
