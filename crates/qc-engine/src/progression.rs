//! Difficulty state machine and re-eligibility timing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::ScoringConfig,
    types::{Correctness, Difficulty},
};

/// Where a card lands after an attempt and when it may be attempted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advancement {
    pub flashcard_id: Uuid,
    pub difficulty: Difficulty,
    /// `None` for buried cards: they never become eligible through scoring.
    pub eligible_at: Option<DateTime<Utc>>,
}

/// Next tier for `current` given the attempt's `correctness`.
///
/// A complete answer climbs one tier and stays put at buried. Anything else resets
/// to easy, buried included.
pub const fn next_difficulty(current: Difficulty, correctness: Correctness) -> Difficulty {
    match correctness {
        Correctness::Complete => match current {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard | Difficulty::Buried => Difficulty::Buried,
        },
        Correctness::None | Correctness::Partial => Difficulty::Easy,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Progression {
    config: ScoringConfig,
}

impl Progression {
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Advance a card seen at `now`.
    ///
    /// The delay is taken from the tier the card lands on, not the one it left.
    /// Eligibility past the last representable instant saturates there.
    pub fn advance(
        &self,
        flashcard_id: Uuid,
        current: Difficulty,
        correctness: Correctness,
        now: DateTime<Utc>,
    ) -> Advancement {
        let difficulty = next_difficulty(current, correctness);
        let eligible_at = self
            .config
            .delays
            .for_difficulty(difficulty)
            .map(|delay| {
                now.checked_add_signed(delay)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC)
            });

        Advancement {
            flashcard_id,
            difficulty,
            eligible_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::config::EligibilityDelays;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_complete_climbs_one_tier() {
        assert_eq!(
            next_difficulty(Difficulty::Easy, Correctness::Complete),
            Difficulty::Medium
        );
        assert_eq!(
            next_difficulty(Difficulty::Medium, Correctness::Complete),
            Difficulty::Hard
        );
        assert_eq!(
            next_difficulty(Difficulty::Hard, Correctness::Complete),
            Difficulty::Buried
        );
    }

    #[test]
    fn test_buried_is_absorbing_on_success() {
        let mut difficulty = Difficulty::Buried;
        for _ in 0..3 {
            difficulty = next_difficulty(difficulty, Correctness::Complete);
            assert_eq!(difficulty, Difficulty::Buried);
        }
    }

    #[test]
    fn test_failure_resets_to_easy() {
        for current in [
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Buried,
        ] {
            assert_eq!(next_difficulty(current, Correctness::None), Difficulty::Easy);
            assert_eq!(
                next_difficulty(current, Correctness::Partial),
                Difficulty::Easy
            );
        }
    }

    #[test]
    fn test_delay_uses_new_tier() {
        let progression = Progression::default();
        let card = Uuid::from_u128(1);

        let advanced = progression.advance(card, Difficulty::Easy, Correctness::Complete, now());
        assert_eq!(advanced.difficulty, Difficulty::Medium);
        assert_eq!(advanced.eligible_at, Some(now() + Duration::days(7)));

        let advanced = progression.advance(card, Difficulty::Medium, Correctness::Complete, now());
        assert_eq!(advanced.difficulty, Difficulty::Hard);
        assert_eq!(advanced.eligible_at, Some(now() + Duration::days(28)));

        let reset = progression.advance(card, Difficulty::Hard, Correctness::None, now());
        assert_eq!(reset.difficulty, Difficulty::Easy);
        assert_eq!(reset.eligible_at, Some(now() + Duration::minutes(30)));
    }

    #[test]
    fn test_buried_has_no_eligibility() {
        let progression = Progression::default();

        let advanced = progression.advance(
            Uuid::from_u128(1),
            Difficulty::Hard,
            Correctness::Complete,
            now(),
        );
        assert_eq!(advanced.difficulty, Difficulty::Buried);
        assert_eq!(advanced.eligible_at, None);
    }

    #[test]
    fn test_configured_delays() {
        let progression = Progression::new(ScoringConfig {
            delays: EligibilityDelays {
                easy_minutes: 1,
                medium_minutes: 2,
                hard_minutes: 3,
            },
            ..ScoringConfig::default()
        });

        let advanced = progression.advance(
            Uuid::from_u128(1),
            Difficulty::Medium,
            Correctness::Complete,
            now(),
        );
        assert_eq!(advanced.eligible_at, Some(now() + Duration::minutes(3)));
    }

    #[test]
    fn test_oversized_delay_does_not_panic() {
        let progression = Progression::new(ScoringConfig {
            delays: EligibilityDelays {
                hard_minutes: i64::MAX / 2,
                ..EligibilityDelays::default()
            },
            ..ScoringConfig::default()
        });

        let advanced = progression.advance(
            Uuid::from_u128(1),
            Difficulty::Medium,
            Correctness::Complete,
            now(),
        );
        assert_eq!(advanced.difficulty, Difficulty::Hard);
        assert_eq!(advanced.eligible_at, Some(DateTime::<Utc>::MAX_UTC));
    }
}
