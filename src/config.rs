//! User settings, persisted as JSON in the `app_state` table.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Scope studied when none is given: a category, a level, or "all"
    pub category: String,
    /// CEFR level the studied words are narrowed down to, or "all"
    pub level: String,
    pub daily_goal: u32,
    pub session_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            category: "all".to_string(),
            level: "all".to_string(),
            daily_goal: 10,
            session_size: 20,
        }
    }
}
