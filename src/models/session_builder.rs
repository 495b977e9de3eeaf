//! Picks the words for the next study session.
//!
//! Words are split into three tiers which are never interleaved:
//! due reviews first (most overdue on top), then new words, then words still being learned.
//! Words in review or mastered that aren't due yet are left out.

use super::{Status, Timestamp, Word, WordProgress, progress_key};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tier {
    Due,
    New,
    Learning,
}

struct Candidate<'a> {
    word: &'a Word,
    overdue: i64,
}

fn tier_of(progress: Option<&WordProgress>, now: Timestamp) -> Option<Tier> {
    match progress {
        None => Some(Tier::New),
        Some(p) if p.status == Status::New => Some(Tier::New),
        Some(p) if p.is_due(now) => Some(Tier::Due),
        Some(p) if p.status == Status::Learning => Some(Tier::Learning),
        Some(_) => None,
    }
}

/// Returns at most `count` words of `words` to study in `scope`, ordered by priority.
/// Order inside a tier is randomized with `rng`; due words are additionally sorted by how
/// overdue they are, so the random order only breaks ties there.
pub fn build_session<R: Rng + ?Sized>(
    words: &[Word],
    progress: &HashMap<String, WordProgress>,
    scope: &str,
    count: usize,
    now: Timestamp,
    rng: &mut R,
) -> Vec<Word> {
    if count == 0 || words.is_empty() {
        return Vec::new();
    }

    let mut due = Vec::new();
    let mut new = Vec::new();
    let mut learning = Vec::new();

    for word in words {
        let record = progress.get(&progress_key(scope, &word.id));
        let bucket = match tier_of(record, now) {
            Some(Tier::Due) => &mut due,
            Some(Tier::New) => &mut new,
            Some(Tier::Learning) => &mut learning,
            None => continue,
        };
        bucket.push(Candidate {
            word,
            overdue: record.map_or(0, |p| p.overdue_by(now)),
        });
    }

    log::debug!(
        "session candidates in {scope:?}: {} due, {} new, {} learning",
        due.len(),
        new.len(),
        learning.len()
    );

    due.shuffle(rng);
    // Stable sort keeps the shuffled order between equally overdue words
    due.sort_by(|a, b| b.overdue.cmp(&a.overdue));
    new.shuffle(rng);
    learning.shuffle(rng);

    due.into_iter()
        .chain(new)
        .chain(learning)
        .take(count)
        .map(|candidate| candidate.word.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    const NOW: Timestamp = 1_700_000_000_000;
    const SCOPE: &str = "kitchen";

    fn word(n: usize) -> Word {
        Word {
            id: format!("kitchen_{n}"),
            word: format!("word{n}"),
            phonetic: String::new(),
            translation: format!("translation{n}"),
            example: String::new(),
            example_translation: String::new(),
            category: SCOPE.to_string(),
            level: "a1".to_string(),
        }
    }

    fn record(status: Status, next_review: Option<Timestamp>) -> WordProgress {
        WordProgress {
            interval: 1440,
            repetition: 2,
            ease_factor: 2.5,
            next_review,
            last_review: next_review.map(|t| t - 1440 * 60_000),
            status,
        }
    }

    fn ids(words: &[Word]) -> Vec<String> {
        words.iter().map(|w| w.id.clone()).collect()
    }

    /// Words 0-2 due (word 0 the most overdue), 3-4 new, 5 learning, 6 review not due.
    fn fixture() -> (Vec<Word>, HashMap<String, WordProgress>) {
        let words: Vec<Word> = (0..7).map(word).collect();
        let mut progress = HashMap::new();
        progress.insert(
            progress_key(SCOPE, "kitchen_0"),
            record(Status::Review, Some(NOW - 3_000_000)),
        );
        progress.insert(
            progress_key(SCOPE, "kitchen_1"),
            record(Status::Learning, Some(NOW - 2_000_000)),
        );
        progress.insert(
            progress_key(SCOPE, "kitchen_2"),
            record(Status::Mastered, Some(NOW - 1_000_000)),
        );
        progress.insert(progress_key(SCOPE, "kitchen_3"), WordProgress::default());
        progress.insert(
            progress_key(SCOPE, "kitchen_5"),
            record(Status::Learning, Some(NOW + 600_000)),
        );
        progress.insert(
            progress_key(SCOPE, "kitchen_6"),
            record(Status::Review, Some(NOW + 600_000)),
        );
        (words, progress)
    }

    #[test]
    fn test_tier_order() {
        let (words, progress) = fixture();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let session = build_session(&words, &progress, SCOPE, 10, NOW, &mut rng);
        let session = ids(&session);

        assert_eq!(session.len(), 6);
        assert_eq!(&session[..3], ["kitchen_0", "kitchen_1", "kitchen_2"]);
        let new: HashSet<_> = session[3..5].iter().cloned().collect();
        assert_eq!(
            new,
            HashSet::from(["kitchen_3".to_string(), "kitchen_4".to_string()])
        );
        assert_eq!(session[5], "kitchen_5");
        assert!(!session.contains(&"kitchen_6".to_string()));
    }

    #[test]
    fn test_count_limits_to_due_words() {
        let (words, progress) = fixture();
        let due = ["kitchen_0", "kitchen_1", "kitchen_2"];

        for count in 0..=3 {
            let mut rng = ChaCha8Rng::seed_from_u64(count as u64);
            let session = build_session(&words, &progress, SCOPE, count, NOW, &mut rng);
            assert_eq!(session.len(), count);
            assert!(session.iter().all(|w| due.contains(&w.id.as_str())));
        }
    }

    #[test]
    fn test_never_returns_foreign_words() {
        let (words, progress) = fixture();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for count in [1, 4, 6, 50] {
            let session = build_session(&words, &progress, SCOPE, count, NOW, &mut rng);
            assert!(session.len() <= count);
            assert!(session.iter().all(|w| words.contains(w)));
        }
    }

    #[test]
    fn test_empty_inputs() {
        let (words, progress) = fixture();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert!(build_session(&[], &progress, SCOPE, 10, NOW, &mut rng).is_empty());
        assert!(build_session(&words, &progress, SCOPE, 0, NOW, &mut rng).is_empty());
    }

    #[test]
    fn test_nothing_to_study() {
        let words = vec![word(0)];
        let mut progress = HashMap::new();
        progress.insert(
            progress_key(SCOPE, "kitchen_0"),
            record(Status::Mastered, Some(NOW + 1)),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert!(build_session(&words, &progress, SCOPE, 10, NOW, &mut rng).is_empty());
    }

    #[test]
    fn test_scope_partitions_progress() {
        let (words, progress) = fixture();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        // No records exist under another scope, so every word is new there
        let session = build_session(&words, &progress, "a1", 10, NOW, &mut rng);
        assert_eq!(session.len(), words.len());
    }

    #[test]
    fn test_same_seed_same_order() {
        let words: Vec<Word> = (0..30).map(word).collect();
        let progress = HashMap::new();

        let first = build_session(
            &words,
            &progress,
            SCOPE,
            30,
            NOW,
            &mut ChaCha8Rng::seed_from_u64(42),
        );
        let second = build_session(
            &words,
            &progress,
            SCOPE,
            30,
            NOW,
            &mut ChaCha8Rng::seed_from_u64(42),
        );

        assert_eq!(ids(&first), ids(&second));
        assert_ne!(ids(&first), ids(&words), "new words should be shuffled");
    }
}
