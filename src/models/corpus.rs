//! Container for all word lists, in stable import order
use super::{Word, WordList};

#[derive(Clone, Debug, Default)]
pub struct Corpus {
    pub lists: Vec<WordList>,
}

impl Corpus {
    pub fn word_count(&self) -> usize {
        self.lists.iter().map(|list| list.words.len()).sum()
    }

    /// Words of the corpus that belong to `scope`, in corpus order.
    pub fn words_in_scope(&self, scope: &str) -> Vec<Word> {
        self.lists
            .iter()
            .flat_map(|list| list.words.iter())
            .filter(|word| word.in_scope(scope))
            .cloned()
            .collect()
    }

    /// Words of `scope` narrowed down to one CEFR `level`; "all" keeps every level.
    pub fn select(&self, scope: &str, level: &str) -> Vec<Word> {
        let mut words = self.words_in_scope(scope);
        if level != "all" {
            words.retain(|word| word.level == level);
        }
        words
    }
}
