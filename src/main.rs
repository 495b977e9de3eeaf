mod app;

use std::io;
use std::path::PathBuf;

use app::App;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use vocab_app::database::db;
use vocab_app::export::json;
use vocab_app::{ProgressStore, SqliteStore, Word, WordList};

#[derive(Parser)]
#[command(name = "vocab", about = "Vocabulary flashcards with spaced repetition")]
struct Cli {
    /// SQLite database holding words and progress
    #[arg(long, global = true, default_value = "vocab.sqlite3")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Study flashcards: due reviews first, then new words, then words in learning
    Study {
        /// Category, level (a1..c1) or "all"
        #[arg(long)]
        scope: Option<String>,
        #[arg(long)]
        count: Option<usize>,
        /// Seed for the word order, for reproducible sessions
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Multiple-choice quiz over the same selection of words
    Quiz {
        #[arg(long)]
        scope: Option<String>,
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Due/new/learning/review/mastered counts
    Summary {
        #[arg(long)]
        scope: Option<String>,
    },
    /// Streak, XP level, daily goal and weekly activity
    Stats,
    /// Import a category file (JSON array of words)
    Import {
        file: PathBuf,
        /// Defaults to the file name without extension
        #[arg(long)]
        category: Option<String>,
    },
    ExportProgress {
        file: PathBuf,
    },
    ImportProgress {
        file: PathBuf,
    },
    /// Move the clock forward by one day
    NextDay,
    /// Set the daily goal (words per day)
    Goal {
        words: u32,
    },
    /// Show or change the default scope, level and session size
    Settings {
        /// Category, level or "all" studied when --scope is left out
        #[arg(long)]
        category: Option<String>,
        /// Only study words of this level (a1..c1), or "all"
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        session_size: Option<usize>,
    },
}

fn sample_word(n: usize, word: &str, translation: &str, example: &str) -> Word {
    Word {
        id: format!("daily_{n}"),
        word: word.to_string(),
        phonetic: String::new(),
        translation: translation.to_string(),
        example: example.to_string(),
        example_translation: String::new(),
        category: "daily".to_string(),
        level: "a1".to_string(),
    }
}

fn seed_sample_words(store: &SqliteStore) -> vocab_app::Result<()> {
    let list = WordList {
        category: "daily".to_string(),
        words: vec![
            sample_word(1, "hello", "merhaba", "Hello, how are you?"),
            sample_word(2, "thank you", "teşekkürler", "Thank you for your help."),
            sample_word(3, "please", "lütfen", "Please sit down."),
        ],
    };
    db::save_word_list(&list, store.conn())
}

fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let store = SqliteStore::open(&cli.db)?;
    if db::get_all_categories(store.conn())?.is_empty() {
        seed_sample_words(&store)?;
        log::info!("Sample words created");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    match cli.command {
        Command::Study { scope, count, seed } => {
            let mut app = App::new(store)?;
            let scope = scope.unwrap_or_else(|| app.settings().category.clone());
            let count = count.unwrap_or(app.settings().session_size);
            app.run_study(&scope, count, &mut rng_for(seed), &mut input, &mut out)?;
        }
        Command::Quiz { scope, count, seed } => {
            let mut app = App::new(store)?;
            let scope = scope.unwrap_or_else(|| app.settings().category.clone());
            let count = count.unwrap_or(app.settings().session_size);
            app.run_quiz(&scope, count, &mut rng_for(seed), &mut input, &mut out)?;
        }
        Command::Summary { scope } => {
            let app = App::new(store)?;
            let scope = scope.unwrap_or_else(|| app.settings().category.clone());
            app.print_summary(&scope, &mut out)?;
        }
        Command::Stats => App::new(store)?.print_stats(&mut out)?,
        Command::Import { file, category } => {
            let category = match category {
                Some(category) => category,
                None => file
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "misc".to_string()),
            };
            let list = json::import_category(&file, &category)?;
            db::save_word_list(&list, store.conn())?;
            println!("Imported {} words into '{}'", list.words.len(), category);
        }
        Command::ExportProgress { file } => {
            let progress = store.snapshot()?;
            json::export_progress_to_path(&progress, &file)?;
            println!("Exported {} progress records", progress.len());
        }
        Command::ImportProgress { file } => {
            let progress = json::import_progress(&file)?;
            let saved = db::replace_progress(&progress, store.conn())?;
            println!("Imported {saved} progress records");
        }
        Command::NextDay => {
            let now = db::advance_day(store.conn())?;
            println!("It is now {}", vocab_app::models::activity::local_date(now));
        }
        Command::Goal { words } => {
            let mut settings = db::load_settings(store.conn())?;
            settings.daily_goal = words;
            db::save_settings(&settings, store.conn())?;
            println!("Daily goal set to {words} words");
        }
        Command::Settings {
            category,
            level,
            session_size,
        } => {
            let mut settings = db::load_settings(store.conn())?;
            if let Some(category) = category {
                settings.category = category;
            }
            if let Some(level) = level {
                settings.level = level.to_lowercase();
            }
            if let Some(session_size) = session_size {
                settings.session_size = session_size;
            }
            db::save_settings(&settings, store.conn())?;
            println!(
                "Category '{}', level '{}', {} words per session",
                settings.category, settings.level, settings.session_size
            );
        }
    }

    Ok(())
}
