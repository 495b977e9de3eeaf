//! Terminal front end: runs study and quiz sessions and prints progress reports.
//! Reads answers line by line so the same code drives stdin and tests.

use std::io::{BufRead, Write};

use rand::Rng;
use vocab_app::database::db;
use vocab_app::models::activity::{calculate_level, goal_progress, last_days};
use vocab_app::models::summary::{category_breakdown, due_words, status_counts};
use vocab_app::models::{QuizQuestion, SessionStats, format_interval};
use vocab_app::{
    Corpus, ProgressStore, Quality, Result, SchedulerConfig, Settings, SqliteStore, StudySession,
    Word, summarize,
};

/// Main application state
pub struct App {
    store: SqliteStore,
    corpus: Corpus,
    settings: Settings,
    config: SchedulerConfig,
}

/// Reads one trimmed line; `None` at end of input
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

impl App {
    /// Creates a new application instance with the corpus loaded from the database
    pub fn new(store: SqliteStore) -> Result<Self> {
        let corpus = db::load_corpus(store.conn())?;
        let settings = db::load_settings(store.conn())?;
        Ok(Self {
            store,
            corpus,
            settings,
            config: SchedulerConfig::default(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Words of `scope` at the selected level
    fn words_for(&self, scope: &str) -> Vec<Word> {
        self.corpus.select(scope, &self.settings.level)
    }

    /// Asks for a rating until the learner gives one of 1, 3 or 5
    fn read_quality<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<Quality>> {
        loop {
            write!(out, "Rate: 1 = hard, 3 = good, 5 = easy > ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(None);
            };
            if line == "q" {
                return Ok(None);
            }
            match line.parse::<u8>().map_err(|_| line.clone()) {
                Ok(value) => match Quality::try_from(value) {
                    Ok(quality) => return Ok(Some(quality)),
                    Err(e) => writeln!(out, "{e}")?,
                },
                Err(text) => writeln!(out, "Not a rating: {text:?}")?,
            }
        }
    }

    /// Runs a flashcard session: reveal the word, then rate how well it was recalled
    pub fn run_study<R: BufRead, W: Write>(
        &mut self,
        scope: &str,
        count: usize,
        rng: &mut impl Rng,
        input: &mut R,
        out: &mut W,
    ) -> Result<SessionStats> {
        let now = db::get_current_time(self.store.conn())?;
        let words = self.words_for(scope);
        let mut session = StudySession::start(&self.store, &words, scope, count, now, rng)?;

        if session.is_completed() {
            writeln!(out, "Nothing to study in '{scope}' - all caught up!")?;
            return Ok(session.stats);
        }

        while let Some(word) = session.current_word().cloned() {
            writeln!(out)?;
            writeln!(out, "[{}] {}  {}", session.progress_message(), word.word, word.phonetic)?;
            writeln!(out, "(Enter to reveal, q to quit)")?;
            match read_line(input)? {
                Some(line) if line != "q" => {}
                _ => break,
            }

            session.toggle_translation();
            writeln!(out, "  {}", word.translation)?;
            if !word.example.is_empty() {
                writeln!(out, "  {}", word.example)?;
                writeln!(out, "  {}", word.example_translation)?;
            }

            let Some(quality) = Self::read_quality(input, out)? else {
                break;
            };
            if let Some(outcome) = session.rate_current(&mut self.store, quality, now, &self.config)? {
                db::record_answer(&outcome, now, self.store.conn())?;
                writeln!(
                    out,
                    "+{} XP, next review in {}",
                    outcome.xp,
                    format_interval(outcome.next.interval)
                )?;
            }
        }

        Self::print_session_stats(&session.stats, out)?;
        Ok(session.stats)
    }

    /// Runs a quiz: pick the right translation. Correct answers count as an easy rating,
    /// wrong ones as a hard one.
    pub fn run_quiz<R: BufRead, W: Write>(
        &mut self,
        scope: &str,
        count: usize,
        rng: &mut impl Rng,
        input: &mut R,
        out: &mut W,
    ) -> Result<SessionStats> {
        let now = db::get_current_time(self.store.conn())?;
        let words = self.words_for(scope);
        let mut session = StudySession::start(&self.store, &words, scope, count, now, rng)?;

        if session.is_completed() {
            writeln!(out, "Nothing to study in '{scope}' - all caught up!")?;
            return Ok(session.stats);
        }

        let mut answered = false;
        while let Some(word) = session.current_word().cloned() {
            let question = QuizQuestion::new(&word, &words, rng);
            writeln!(out)?;
            writeln!(out, "[{}] {}", session.progress_message(), word.word)?;
            for (i, option) in question.options.iter().enumerate() {
                writeln!(out, "  {}) {}", i + 1, option.translation)?;
            }
            write!(out, "Answer (q to quit) > ")?;
            out.flush()?;

            let Some(line) = read_line(input)? else {
                break;
            };
            if line == "q" {
                break;
            }
            let choice = line.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
            answered = true;

            let correct = choice.is_some_and(|c| question.is_correct(c));
            db::record_quiz_answer(correct, self.store.conn())?;
            let quality = if correct { Quality::Easy } else { Quality::Hard };
            if let Some(outcome) = session.rate_current(&mut self.store, quality, now, &self.config)? {
                db::record_answer(&outcome, now, self.store.conn())?;
                if correct {
                    writeln!(out, "Correct! +{} XP", outcome.xp)?;
                } else {
                    writeln!(
                        out,
                        "Wrong - it's \"{}\". +{} XP, back in {}",
                        word.translation,
                        outcome.xp,
                        format_interval(outcome.next.interval)
                    )?;
                }
            }
        }

        if answered {
            db::record_quiz_finished(now, self.store.conn())?;
        }
        Self::print_session_stats(&session.stats, out)?;
        Ok(session.stats)
    }

    fn print_session_stats<W: Write>(stats: &SessionStats, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(
            out,
            "Session complete: {} correct, {} incorrect, {} XP",
            stats.correct, stats.incorrect, stats.xp_earned
        )?;
        Ok(())
    }

    /// Prints the due/status counts of `scope` and the per-category breakdown
    pub fn print_summary<W: Write>(&self, scope: &str, out: &mut W) -> Result<()> {
        let now = db::get_current_time(self.store.conn())?;
        let progress = self.store.snapshot()?;
        let summary = summarize(&progress, scope, now);

        writeln!(out, "Scope '{scope}'")?;
        writeln!(
            out,
            "  due {}, new {}, learning {}, review {}, mastered {} ({} tracked)",
            summary.due, summary.new, summary.learning, summary.review, summary.mastered, summary.total
        )?;

        let due = due_words(&progress, scope, now);
        if !due.is_empty() {
            let ids: Vec<_> = due.iter().take(10).map(|(id, _)| id.as_str()).collect();
            writeln!(out, "  due now: {}", ids.join(", "))?;
        }

        let overall = status_counts(&progress);
        writeln!(
            out,
            "All scopes: {} learning, {} review, {} mastered",
            overall.learning, overall.review, overall.mastered
        )?;

        let breakdown = category_breakdown(&progress);
        if !breakdown.is_empty() {
            writeln!(out, "By scope:")?;
            for (category, counts) in breakdown {
                writeln!(
                    out,
                    "  {category:<12} {:>4} tracked, {:>4} mastered",
                    counts.total, counts.mastered
                )?;
            }
        }
        Ok(())
    }

    /// Prints streak, level, accuracy, today's log and the last week of activity
    pub fn print_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        let conn = self.store.conn();
        let today = db::get_current_date(conn)?;
        let streak = db::check_streak(conn)?;
        let stats = db::load_stats(conn)?;
        let level = calculate_level(stats.total_xp);
        let today_log = db::get_daily_log(today, conn)?;
        let goal = goal_progress(&today_log, self.settings.daily_goal);

        writeln!(out, "Date: {today}")?;
        writeln!(out, "Streak: {} days (longest {})", streak.current, streak.longest)?;
        writeln!(
            out,
            "Level {}: {}/{} XP ({}%), {} XP total",
            level.level, level.current_xp, level.required_xp, level.progress_percent, stats.total_xp
        )?;
        writeln!(
            out,
            "Words learned: {}, quizzes: {}, accuracy: {}%",
            stats.words_learned,
            stats.quizzes_taken,
            stats.accuracy()
        )?;
        writeln!(
            out,
            "Today: {} words, {} XP, {}% accuracy",
            today_log.words_studied,
            today_log.xp_earned,
            today_log.accuracy()
        )?;
        writeln!(
            out,
            "Daily goal: {}/{} ({}%){}",
            goal.current,
            goal.goal,
            goal.percent,
            if goal.completed { " done!" } else { "" }
        )?;

        writeln!(out, "Last 7 days:")?;
        for date in last_days(today, 7) {
            let log = db::get_daily_log(date, conn)?;
            writeln!(
                out,
                "  {} {:>3} words {:>4} XP",
                date.format("%a %d"),
                log.words_studied,
                log.xp_earned
            )?;
        }
        Ok(())
    }
}
