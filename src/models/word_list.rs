//! WordList is one category of the corpus, e.g. "kitchen" or "travel"
use super::Word;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WordList {
    pub category: String,
    pub words: Vec<Word>,
}

/// CEFR level for the word at `index` of a list with `len` words.
/// Earlier words in a category file are the more basic ones.
pub fn level_for_position(index: usize, len: usize) -> &'static str {
    if len == 0 {
        return "a1";
    }
    let pos = index as f64 / len as f64;
    if pos >= 0.8 {
        "c1"
    } else if pos >= 0.6 {
        "b2"
    } else if pos >= 0.4 {
        "b1"
    } else if pos >= 0.2 {
        "a2"
    } else {
        "a1"
    }
}
