//! Word is a vocabulary entry: the term, how it sounds, its translation and an example.
//! The scheduler only cares about the id and the category/level tags.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    pub word: String,
    #[serde(default)]
    pub phonetic: String,
    pub translation: String,
    #[serde(default)]
    pub example: String,
    #[serde(default, rename = "exampleTr")]
    pub example_translation: String,
    pub category: String,
    pub level: String,
}

impl Word {
    /// Does this word belong to `scope`? A scope is a category, a level, or "all".
    pub fn in_scope(&self, scope: &str) -> bool {
        scope == "all" || self.category == scope || self.level == scope
    }
}
