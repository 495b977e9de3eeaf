//! SM-2 (SuperMemo 2) derived review scheduler.
//!
//! The learner answers with one of three buttons (see [`Quality`]) and the scheduler decides
//! when the word comes back:
//! - Hard: the learning ladder restarts and the word returns in 10 minutes
//! - Good: 1 day, then 3 days, then the previous interval times the ease factor
//! - Easy: 3 days, then the previous interval times the ease factor and an extra bonus
//! - A word with 5+ successful repetitions and an interval of 30 days or more is mastered
//! - The ease factor follows the classic SM-2 update and never falls below 1.3
//!
//! Intervals are kept in minutes, timestamps in milliseconds.

use super::{MILLIS_PER_MINUTE, Quality, Status, Timestamp, WordProgress};

/// Tunables of the scheduler. `Default` gives the values the app ships with.
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    pub min_ease_factor: f64,
    pub default_ease_factor: f64,
    /// Minutes until a word rated hard comes back
    pub hard_interval: i64,
    /// First interval after a good rating; the second one is three times this
    pub good_interval: i64,
    pub easy_interval: i64,
    pub easy_bonus: f64,
    pub easy_ease_bonus: f64,
    pub mastery_repetitions: u32,
    pub mastery_interval: i64,
    /// Longest interval in minutes; repeated easy ratings stop growing here
    pub max_interval: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_ease_factor: 1.3,
            default_ease_factor: 2.5,
            hard_interval: 10,
            good_interval: 1440,
            easy_interval: 4320,
            easy_bonus: 1.3,
            easy_ease_bonus: 0.15,
            mastery_repetitions: 5,
            mastery_interval: 43200,
            max_interval: 100 * 365 * 1440,
        }
    }
}

/// Calculates the progress record that follows `current` after a rating given at `now`.
pub fn compute_next_review(
    current: &WordProgress,
    quality: Quality,
    now: Timestamp,
    config: &SchedulerConfig,
) -> WordProgress {
    let (mut interval, mut repetition, mut ease_factor) = if current.status == Status::New {
        (0, 0, config.default_ease_factor)
    } else {
        (current.interval, current.repetition, current.ease_factor)
    };

    let mut status = match quality {
        Quality::Hard => {
            repetition = 0;
            interval = config.hard_interval;
            Status::Learning
        }
        Quality::Good => {
            interval = match repetition {
                0 => config.good_interval,
                1 => config.good_interval * 3,
                _ => (interval as f64 * ease_factor).round() as i64,
            };
            repetition += 1;
            if repetition >= 3 {
                Status::Review
            } else {
                Status::Learning
            }
        }
        Quality::Easy => {
            interval = match repetition {
                0 => config.easy_interval,
                _ => (interval as f64 * ease_factor * config.easy_bonus).round() as i64,
            };
            repetition += 1;
            ease_factor += config.easy_ease_bonus;
            if repetition >= 2 {
                Status::Review
            } else {
                Status::Learning
            }
        }
    };

    interval = interval.min(config.max_interval);

    if repetition >= config.mastery_repetitions && interval >= config.mastery_interval {
        status = Status::Mastered;
    }

    // Classic SM-2 E-Factor update
    let q = quality.value() as f64;
    ease_factor += 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
    ease_factor = ease_factor.max(config.min_ease_factor);

    log::debug!(
        "rated {:?}: {} -> {} (interval {} min, repetition {}, ease {:.2})",
        quality,
        current.status,
        status,
        interval,
        repetition,
        ease_factor
    );

    WordProgress {
        interval,
        repetition,
        ease_factor,
        next_review: Some(now.saturating_add(interval.saturating_mul(MILLIS_PER_MINUTE))),
        last_review: Some(now),
        status,
    }
}

/// XP earned for a rating. First recalls pay more, rehearsing mastered words pays less.
pub fn reward_for(quality: Quality, previous_status: Status) -> u32 {
    let multiplier = match previous_status {
        Status::New => 1.5,
        Status::Learning => 1.0,
        Status::Review => 0.8,
        Status::Mastered => 0.5,
    };
    (quality.base_xp() * multiplier).round() as u32
}

/// Human readable interval, e.g. "10 minutes", "3 days", "2 months".
pub fn format_interval(minutes: i64) -> String {
    let (amount, unit) = if minutes < 60 {
        (minutes, "minute")
    } else if minutes < 1440 {
        ((minutes as f64 / 60.0).round() as i64, "hour")
    } else if minutes < 43200 {
        ((minutes as f64 / 1440.0).round() as i64, "day")
    } else {
        ((minutes as f64 / 43200.0).round() as i64, "month")
    };

    if amount == 1 {
        format!("{amount} {unit}")
    } else {
        format!("{amount} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: Timestamp = 1_700_000_000_000;

    fn rate(progress: &WordProgress, quality: Quality) -> WordProgress {
        compute_next_review(progress, quality, NOW, &SchedulerConfig::default())
    }

    #[test]
    fn test_good_ladder() {
        let first = rate(&WordProgress::default(), Quality::Good);
        assert_eq!(first.interval, 1440);
        assert_eq!(first.repetition, 1);
        assert_eq!(first.status, Status::Learning);

        let second = rate(&first, Quality::Good);
        assert_eq!(second.interval, 4320);
        assert_eq!(second.repetition, 2);
        assert_eq!(second.status, Status::Learning);

        let third = rate(&second, Quality::Good);
        assert_eq!(third.repetition, 3);
        assert_eq!(third.status, Status::Review);
        assert_eq!(
            third.interval,
            (4320.0 * second.ease_factor).round() as i64
        );
    }

    #[test]
    fn test_easy_ladder() {
        let first = rate(&WordProgress::default(), Quality::Easy);
        assert_eq!(first.interval, 4320);
        assert_eq!(first.repetition, 1);
        assert_eq!(first.status, Status::Learning);
        // 2.5 + 0.15 bonus + 0.1 from the SM-2 update
        assert!((first.ease_factor - 2.75).abs() < 1e-9);

        let second = rate(&first, Quality::Easy);
        assert_eq!(second.repetition, 2);
        assert_eq!(second.status, Status::Review);
        assert_eq!(second.interval, 15444);
    }

    #[test]
    fn test_hard_resets() {
        let mut progress = WordProgress::default();
        for _ in 0..4 {
            progress = rate(&progress, Quality::Easy);
        }
        assert!(progress.repetition > 0);

        let next = rate(&progress, Quality::Hard);
        assert_eq!(next.repetition, 0);
        assert_eq!(next.interval, 10);
        assert_eq!(next.status, Status::Learning);
        assert!(next.ease_factor < progress.ease_factor);

        let from_new = rate(&WordProgress::default(), Quality::Hard);
        assert_eq!(from_new.repetition, 0);
        assert_eq!(from_new.interval, 10);
        assert_eq!(from_new.status, Status::Learning);
    }

    #[test]
    fn test_mastery_reached_exactly_at_threshold() {
        let config = SchedulerConfig::default();
        let mut progress = WordProgress::default();
        let mut statuses = Vec::new();

        for _ in 0..6 {
            progress = rate(&progress, Quality::Easy);
            let crossed = progress.repetition >= config.mastery_repetitions
                && progress.interval >= config.mastery_interval;
            assert_eq!(progress.status == Status::Mastered, crossed);
            statuses.push(progress.status);
        }

        assert_eq!(
            statuses,
            vec![
                Status::Learning,
                Status::Review,
                Status::Review,
                Status::Review,
                Status::Mastered,
                Status::Mastered,
            ]
        );
    }

    #[test]
    fn test_interval_growth_is_capped() {
        let config = SchedulerConfig::default();
        let mut progress = WordProgress::default();

        for _ in 0..20 {
            let next = rate(&progress, Quality::Easy);
            assert!(next.interval >= progress.interval);
            assert!(next.interval <= config.max_interval);
            assert!(next.next_review.unwrap() > NOW);
            progress = next;
        }
        assert_eq!(progress.interval, config.max_interval);
        assert_eq!(progress.status, Status::Mastered);
    }

    #[test]
    fn test_huge_stored_interval() {
        let imported = WordProgress {
            interval: i64::MAX / 2,
            repetition: 9,
            ease_factor: 3.0,
            next_review: Some(NOW),
            last_review: Some(NOW),
            status: Status::Review,
        };

        let next = rate(&imported, Quality::Good);
        assert_eq!(next.interval, SchedulerConfig::default().max_interval);
        assert!(!next.is_due(NOW));
    }

    #[test]
    fn test_ef_floor() {
        let qualities = [Quality::Hard, Quality::Good, Quality::Easy];
        for ease_factor in [1.3, 1.35, 1.5, 2.5, 3.0] {
            for repetition in 0..6 {
                let current = WordProgress {
                    interval: 1440,
                    repetition,
                    ease_factor,
                    next_review: Some(NOW),
                    last_review: Some(NOW - 1440 * MILLIS_PER_MINUTE),
                    status: Status::Review,
                };
                for quality in qualities {
                    assert!(rate(&current, quality).ease_factor >= 1.3);
                }
            }
        }

        let mut progress = WordProgress::default();
        for _ in 0..10 {
            progress = rate(&progress, Quality::Hard);
        }
        assert_eq!(progress.ease_factor, 1.3);
    }

    #[test]
    fn test_new_status_ignores_stale_values() {
        let stale = WordProgress {
            interval: 99_999,
            repetition: 7,
            ease_factor: 1.3,
            next_review: None,
            last_review: None,
            status: Status::New,
        };

        assert_eq!(
            rate(&stale, Quality::Good),
            rate(&WordProgress::default(), Quality::Good)
        );
    }

    #[test]
    fn test_next_review_timestamps() {
        let next = rate(&WordProgress::default(), Quality::Good);

        assert_eq!(next.last_review, Some(NOW));
        assert_eq!(next.next_review, Some(NOW + 1440 * 60_000));
    }

    #[test]
    fn test_does_not_mutate_input() {
        let current = WordProgress::default();
        let _ = rate(&current, Quality::Easy);
        assert_eq!(current, WordProgress::default());
    }

    #[test]
    fn test_reward_for() {
        assert_eq!(reward_for(Quality::Easy, Status::New), 15);
        assert_eq!(reward_for(Quality::Easy, Status::Mastered), 5);
        assert_eq!(reward_for(Quality::Good, Status::New), 8);
        assert_eq!(reward_for(Quality::Good, Status::Review), 4);
        assert_eq!(reward_for(Quality::Hard, Status::Learning), 2);
        assert_eq!(reward_for(Quality::Hard, Status::Mastered), 1);
        assert!(reward_for(Quality::Easy, Status::New) > reward_for(Quality::Easy, Status::Mastered));
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(10), "10 minutes");
        assert_eq!(format_interval(1), "1 minute");
        assert_eq!(format_interval(90), "2 hours");
        assert_eq!(format_interval(1440), "1 day");
        assert_eq!(format_interval(4320), "3 days");
        assert_eq!(format_interval(86400), "2 months");
    }
}
