//! Multiple-choice quiz: the learner picks the right translation among a few options.
use super::Word;
use rand::Rng;
use rand::seq::SliceRandom;

pub const DISTRACTORS: usize = 3;

#[derive(Clone, Debug)]
pub struct QuizQuestion {
    pub word: Word,
    pub options: Vec<Word>,
    pub correct_index: usize,
}

impl QuizQuestion {
    /// Builds a question for `word` with up to three wrong options drawn from `pool`.
    pub fn new<R: Rng + ?Sized>(word: &Word, pool: &[Word], rng: &mut R) -> Self {
        let others: Vec<&Word> = pool.iter().filter(|w| w.id != word.id).collect();
        let mut options: Vec<Word> = others
            .choose_multiple(rng, DISTRACTORS)
            .map(|w| (*w).clone())
            .collect();
        options.push(word.clone());
        options.shuffle(rng);

        let correct_index = options
            .iter()
            .position(|w| w.id == word.id)
            .unwrap_or_default();

        Self {
            word: word.clone(),
            options,
            correct_index,
        }
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}
