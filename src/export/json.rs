//! JSON import/export module.
//! Loads category word files into word lists, and saves/loads progress snapshots so they
//! can be moved between machines.

use crate::error::{Error, Result};
use crate::models::word_list::level_for_position;
use crate::models::{Word, WordList, WordProgress, check_scope};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Word ids in category files are usually numbers, but strings are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn as_string(&self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s.clone(),
        }
    }
}

/// A word as it appears in a category file, before it is tagged with category and level.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWord {
    id: RawId,
    word: String,
    #[serde(default)]
    phonetic: String,
    translation: String,
    #[serde(default)]
    example: String,
    #[serde(default, rename = "exampleTr")]
    example_translation: String,
    #[serde(default)]
    level: Option<String>,
}

fn read_to_string(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

fn write_string(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

/// Parses the contents of a category file (a JSON array of words).
/// Ids get the category as prefix; words without a level get one from their position.
pub fn parse_category(json: &str, category: &str) -> Result<WordList> {
    check_scope(category)?;
    let raw: Vec<RawWord> = serde_json::from_str(json)?;
    let len = raw.len();

    let words = raw
        .into_iter()
        .enumerate()
        .map(|(index, w)| Word {
            id: format!("{category}_{}", w.id.as_string()),
            word: w.word,
            phonetic: w.phonetic,
            translation: w.translation,
            example: w.example,
            example_translation: w.example_translation,
            category: category.to_string(),
            level: w
                .level
                .unwrap_or_else(|| level_for_position(index, len).to_string()),
        })
        .collect();

    Ok(WordList {
        category: category.to_string(),
        words,
    })
}

/// Imports a category file.
/// Returns an error if the category name is invalid, the file doesn't exist, isn't valid
/// JSON or holds no words.
pub fn import_category(path: impl AsRef<Path>, category: &str) -> Result<WordList> {
    let path = path.as_ref();
    let list = parse_category(&read_to_string(path)?, category)?;
    if list.words.is_empty() {
        return Err(Error::EmptyWordList(path.to_path_buf()));
    }

    log::info!(
        "Imported {} words into '{}' from {}",
        list.words.len(),
        category,
        path.display()
    );
    Ok(list)
}

/// Exports a progress snapshot, sorted by key so the file diffs nicely.
pub fn export_progress_to_path(
    progress: &HashMap<String, WordProgress>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let sorted: BTreeMap<_, _> = progress.iter().collect();
    write_string(path.as_ref(), &serde_json::to_string_pretty(&sorted)?)?;
    log::info!(
        "Exported {} progress records to {}",
        progress.len(),
        path.as_ref().display()
    );
    Ok(())
}

pub fn import_progress(path: impl AsRef<Path>) -> Result<HashMap<String, WordProgress>> {
    let progress = serde_json::from_str(&read_to_string(path.as_ref())?)?;
    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use std::fs;

    const KITCHEN: &str = r#"[
  {"id": 1, "word": "spoon", "phonetic": "/spuːn/", "translation": "kaşık",
   "example": "Pass me a spoon.", "exampleTr": "Bana bir kaşık uzat."},
  {"id": 2, "word": "fork", "translation": "çatal"},
  {"id": "3", "word": "colander", "translation": "süzgeç", "level": "c1"},
  {"id": 4, "word": "kettle", "translation": "çaydanlık"},
  {"id": 5, "word": "whisk", "translation": "çırpıcı"}
]"#;

    #[test]
    fn test_parse_category() {
        let list = parse_category(KITCHEN, "kitchen").unwrap();

        assert_eq!(list.category, "kitchen");
        assert_eq!(list.words.len(), 5);

        let spoon = &list.words[0];
        assert_eq!(spoon.id, "kitchen_1");
        assert_eq!(spoon.category, "kitchen");
        assert_eq!(spoon.example_translation, "Bana bir kaşık uzat.");
        assert_eq!(spoon.level, "a1");

        assert_eq!(list.words[1].phonetic, "");
        assert_eq!(list.words[1].level, "a2");
        assert_eq!(list.words[2].id, "kitchen_3");
        assert_eq!(list.words[2].level, "c1");
        assert_eq!(list.words[4].level, "c1");
    }

    #[test]
    fn test_import_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kitchen.json");
        fs::write(&path, KITCHEN).unwrap();

        let list = import_category(&path, "kitchen").unwrap();
        assert_eq!(list.words.len(), 5);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = import_category(dir.path().join("missing.json"), "kitchen");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(
            import_category(&path, "kitchen"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_import_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "[]").unwrap();

        assert!(matches!(
            import_category(&path, "kitchen"),
            Err(Error::EmptyWordList(_))
        ));
    }

    #[test]
    fn test_import_rejects_underscore_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daily_life.json");
        fs::write(&path, KITCHEN).unwrap();

        assert!(matches!(
            import_category(&path, "daily_life"),
            Err(Error::InvalidScope(_))
        ));
        assert_eq!(import_category(&path, "daily-life").unwrap().words[0].id, "daily-life_1");
    }

    #[test]
    fn test_progress_export_and_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let progress = HashMap::from([(
            "kitchen_kitchen_1".to_string(),
            WordProgress {
                interval: 1440,
                repetition: 1,
                ease_factor: 2.36,
                next_review: Some(86_400_000),
                last_review: Some(0),
                status: Status::Learning,
            },
        )]);

        export_progress_to_path(&progress, &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"easeFactor\": 2.36"));
        assert!(written.contains("\"status\": \"learning\""));

        assert_eq!(import_progress(&path).unwrap(), progress);
    }
}
