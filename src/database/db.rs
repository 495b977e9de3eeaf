//! Database operations for the vocabulary trainer
//!
//! Handles SQLite database initialization, storage of the word corpus, per-scope word
//! progress, and the learner's activity (stats, streak, daily logs, settings).

use super::ProgressStore;
use crate::config::Settings;
use crate::error::Result;
use crate::models::activity::{DailyLog, Streak, UserStats, day_key, local_date};
use crate::models::{
    Corpus, RatingOutcome, Status, Timestamp, Word, WordList, WordProgress, check_scope, progress_key,
};
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Opens (or creates) the database at `path` and makes sure the schema exists
pub fn init_database(path: impl AsRef<Path>) -> Result<Connection> {
    let conn = Connection::open(path)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Creates tables for words, progress, daily logs and app state.
/// Sets the current time to now if not already initialized.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS words (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            category TEXT NOT NULL,
            level TEXT NOT NULL,
            word TEXT NOT NULL,
            phonetic TEXT NOT NULL DEFAULT '',
            translation TEXT NOT NULL,
            example TEXT NOT NULL DEFAULT '',
            example_translation TEXT NOT NULL DEFAULT ''
        )",
        (),
    )?;

    // One row per (scope, word); next_review/last_review in epoch milliseconds
    conn.execute(
        "CREATE TABLE IF NOT EXISTS progress (
            scope TEXT NOT NULL,
            word_id TEXT NOT NULL,
            interval_minutes INTEGER NOT NULL DEFAULT 0,
            repetition INTEGER NOT NULL DEFAULT 0,
            ease_factor REAL NOT NULL DEFAULT 2.5,
            next_review INTEGER,
            last_review INTEGER,
            status TEXT NOT NULL DEFAULT 'new',
            PRIMARY KEY (scope, word_id)
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS daily_log (
            day TEXT PRIMARY KEY,
            words_studied INTEGER NOT NULL DEFAULT 0,
            quizzes_done INTEGER NOT NULL DEFAULT 0,
            xp_earned INTEGER NOT NULL DEFAULT 0,
            correct_answers INTEGER NOT NULL DEFAULT 0,
            total_answers INTEGER NOT NULL DEFAULT 0,
            started_at INTEGER
        )",
        (),
    )?;

    // Key-value table for the clock, settings, stats and streak
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_time', ?1)",
        params![Utc::now().timestamp_millis().to_string()],
    )?;

    Ok(())
}

/// Retrieves the simulated current time from the database
pub fn get_current_time(conn: &Connection) -> Result<Timestamp> {
    let value: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_time'",
        [],
        |row| row.get(0),
    )?;

    Ok(value.parse::<Timestamp>().unwrap_or_else(|_| {
        log::warn!("Invalid current_time {value:?} in app_state, using the system clock");
        Utc::now().timestamp_millis()
    }))
}

/// Today's date according to the simulated clock
pub fn get_current_date(conn: &Connection) -> Result<NaiveDate> {
    Ok(local_date(get_current_time(conn)?))
}

/// Advances the clock by 24 hours (for trying out spaced repetition)
pub fn advance_day(conn: &Connection) -> Result<Timestamp> {
    let next_day = get_current_time(conn)? + MILLIS_PER_DAY;
    conn.execute(
        "UPDATE app_state SET value = ?1 WHERE key = 'current_time'",
        params![next_day.to_string()],
    )?;
    log::info!("Advanced clock to {}", local_date(next_day));
    Ok(next_day)
}

fn get_state<T: DeserializeOwned + Default>(key: &str, conn: &Connection) -> Result<T> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;

    Ok(match value {
        Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed {key:?} in app_state: {e}");
            T::default()
        }),
        None => T::default(),
    })
}

fn set_state<T: Serialize>(key: &str, value: &T, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
        params![key, serde_json::to_string(value)?],
    )?;
    Ok(())
}

pub fn load_settings(conn: &Connection) -> Result<Settings> {
    get_state("settings", conn)
}

pub fn save_settings(settings: &Settings, conn: &Connection) -> Result<()> {
    set_state("settings", settings, conn)
}

pub fn load_stats(conn: &Connection) -> Result<UserStats> {
    get_state("stats", conn)
}

pub fn save_stats(stats: &UserStats, conn: &Connection) -> Result<()> {
    set_state("stats", stats, conn)
}

pub fn load_streak(conn: &Connection) -> Result<Streak> {
    get_state("streak", conn)
}

pub fn save_streak(streak: &Streak, conn: &Connection) -> Result<()> {
    set_state("streak", streak, conn)
}

/// Loads the streak and resets it if the learner skipped a day
pub fn check_streak(conn: &Connection) -> Result<Streak> {
    let mut streak = load_streak(conn)?;
    streak.check(get_current_date(conn)?);
    save_streak(&streak, conn)?;
    Ok(streak)
}

/// Adds a word to the corpus, or updates it if the id already exists
pub fn add_word(word: &Word, position: usize, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO words
            (id, position, category, level, word, phonetic, translation, example, example_translation)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            word.id,
            position as i64,
            word.category,
            word.level,
            word.word,
            word.phonetic,
            word.translation,
            word.example,
            word.example_translation
        ],
    )?;
    Ok(())
}

/// Stores a whole word list in one transaction
pub fn save_word_list(list: &WordList, conn: &Connection) -> Result<()> {
    check_scope(&list.category)?;
    let tx = conn.unchecked_transaction()?;
    for (position, word) in list.words.iter().enumerate() {
        add_word(word, position, &tx)?;
    }
    tx.commit()?;
    log::info!(
        "Saved {} words in category '{}'",
        list.words.len(),
        list.category
    );
    Ok(())
}

fn word_from_row(row: &Row) -> rusqlite::Result<Word> {
    Ok(Word {
        id: row.get(0)?,
        category: row.get(1)?,
        level: row.get(2)?,
        word: row.get(3)?,
        phonetic: row.get(4)?,
        translation: row.get(5)?,
        example: row.get(6)?,
        example_translation: row.get(7)?,
    })
}

/// Retrieves all words of a category in import order
pub fn get_words_for_category(category: &str, conn: &Connection) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(
        "SELECT id, category, level, word, phonetic, translation, example, example_translation
         FROM words WHERE category = ?1 ORDER BY position, id",
    )?;

    let words = stmt
        .query_map(params![category], word_from_row)?
        .collect::<rusqlite::Result<Vec<Word>>>()?;

    Ok(words)
}

/// Retrieves all category names from database
pub fn get_all_categories(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT category FROM words ORDER BY category")?;
    let categories = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(categories)
}

/// Loads every word list into memory
///
/// Does not load progress - that's read from the progress store when a session starts.
pub fn load_corpus(conn: &Connection) -> Result<Corpus> {
    let mut lists = Vec::new();
    for category in get_all_categories(conn)? {
        let words = get_words_for_category(&category, conn)?;
        lists.push(WordList { category, words });
    }
    Ok(Corpus { lists })
}

/// Reads a progress row. Rows that can't be interpreted count as a new word.
fn progress_from_row(row: &Row) -> rusqlite::Result<WordProgress> {
    let status: String = row.get(5)?;
    let progress = WordProgress {
        interval: row.get(0)?,
        repetition: row.get(1)?,
        ease_factor: row.get(2)?,
        next_review: row.get(3)?,
        last_review: row.get(4)?,
        status: match status.parse::<Status>() {
            Ok(status) => status,
            Err(e) => {
                log::warn!("Treating malformed progress row as new: {e}");
                return Ok(WordProgress::default());
            }
        },
    };
    Ok(progress)
}

pub fn get_word_progress(scope: &str, word_id: &str, conn: &Connection) -> Result<WordProgress> {
    let progress = conn
        .query_row(
            "SELECT interval_minutes, repetition, ease_factor, next_review, last_review, status
             FROM progress WHERE scope = ?1 AND word_id = ?2",
            params![scope, word_id],
            progress_from_row,
        )
        .optional()?;

    Ok(progress.unwrap_or_default())
}

pub fn save_word_progress(
    scope: &str,
    word_id: &str,
    progress: &WordProgress,
    conn: &Connection,
) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO progress
            (scope, word_id, interval_minutes, repetition, ease_factor, next_review, last_review, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            scope,
            word_id,
            progress.interval,
            progress.repetition,
            progress.ease_factor,
            progress.next_review,
            progress.last_review,
            progress.status.as_str()
        ],
    )?;
    Ok(())
}

/// Every progress record, keyed by `<scope>_<word id>`
pub fn load_progress(conn: &Connection) -> Result<HashMap<String, WordProgress>> {
    let mut stmt = conn.prepare(
        "SELECT interval_minutes, repetition, ease_factor, next_review, last_review, status,
                scope, word_id
         FROM progress",
    )?;

    let records = stmt
        .query_map([], |row| {
            let scope: String = row.get(6)?;
            let word_id: String = row.get(7)?;
            Ok((progress_key(&scope, &word_id), progress_from_row(row)?))
        })?
        .collect::<rusqlite::Result<HashMap<_, _>>>()?;

    Ok(records)
}

/// Replaces all progress with `records`.
/// Keys are split at the first `_` into scope and word id; scope names never contain one.
pub fn replace_progress(records: &HashMap<String, WordProgress>, conn: &Connection) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM progress", ())?;
    let mut saved = 0;
    for (key, progress) in records {
        match key.split_once('_') {
            Some((scope, word_id)) if !scope.is_empty() && !word_id.is_empty() => {
                save_word_progress(scope, word_id, progress, &tx)?;
                saved += 1;
            }
            _ => log::warn!("Skipping progress record with malformed key {key:?}"),
        }
    }
    tx.commit()?;
    Ok(saved)
}

pub fn get_daily_log(date: NaiveDate, conn: &Connection) -> Result<DailyLog> {
    let log = conn
        .query_row(
            "SELECT words_studied, quizzes_done, xp_earned, correct_answers, total_answers, started_at
             FROM daily_log WHERE day = ?1",
            params![day_key(date)],
            |row| {
                Ok(DailyLog {
                    words_studied: row.get(0)?,
                    quizzes_done: row.get(1)?,
                    xp_earned: row.get::<_, i64>(2)? as u64,
                    correct_answers: row.get(3)?,
                    total_answers: row.get(4)?,
                    started_at: row.get(5)?,
                })
            },
        )
        .optional()?;

    Ok(log.unwrap_or_default())
}

pub fn save_daily_log(date: NaiveDate, log: &DailyLog, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO daily_log
            (day, words_studied, quizzes_done, xp_earned, correct_answers, total_answers, started_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            day_key(date),
            log.words_studied,
            log.quizzes_done,
            log.xp_earned as i64,
            log.correct_answers,
            log.total_answers,
            log.started_at
        ],
    )?;
    Ok(())
}

/// Applies a rated word to stats, streak and today's log.
/// The overall answer counters are left to [`record_quiz_answer`].
pub fn record_answer(outcome: &RatingOutcome, now: Timestamp, conn: &Connection) -> Result<()> {
    let today = local_date(now);
    let tx = conn.unchecked_transaction()?;

    let mut stats = load_stats(&tx)?;
    stats.total_xp += outcome.xp as u64;
    if outcome.learned_new_word() {
        stats.words_learned += 1;
    }
    save_stats(&stats, &tx)?;

    let mut streak = load_streak(&tx)?;
    streak.record_activity(today);
    save_streak(&streak, &tx)?;

    let mut log = get_daily_log(today, &tx)?;
    log.record_answer(outcome.xp, outcome.correct(), now);
    save_daily_log(today, &log, &tx)?;

    tx.commit()?;
    Ok(())
}

/// Counts a quiz answer towards the overall accuracy
pub fn record_quiz_answer(correct: bool, conn: &Connection) -> Result<()> {
    let mut stats = load_stats(conn)?;
    stats.total_answers += 1;
    if correct {
        stats.correct_answers += 1;
    }
    save_stats(&stats, conn)
}

/// Counts a finished quiz session
pub fn record_quiz_finished(now: Timestamp, conn: &Connection) -> Result<()> {
    let today = local_date(now);
    let tx = conn.unchecked_transaction()?;

    let mut stats = load_stats(&tx)?;
    stats.quizzes_taken += 1;
    save_stats(&stats, &tx)?;

    let mut log = get_daily_log(today, &tx)?;
    log.record_quiz(now);
    save_daily_log(today, &log, &tx)?;

    tx.commit()?;
    Ok(())
}

/// SQLite backed [`ProgressStore`]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(init_database(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self::new(conn))
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl ProgressStore for SqliteStore {
    fn get(&self, scope: &str, word_id: &str) -> Result<WordProgress> {
        get_word_progress(scope, word_id, &self.conn)
    }

    fn put(&mut self, scope: &str, word_id: &str, progress: &WordProgress) -> Result<()> {
        check_scope(scope)?;
        save_word_progress(scope, word_id, progress, &self.conn)
    }

    fn snapshot(&self) -> Result<HashMap<String, WordProgress>> {
        load_progress(&self.conn)
    }
}
