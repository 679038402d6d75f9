//! Scoring configuration threaded explicitly into the scorer and the progression.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{scorer::difficulty_multiplier, types::Difficulty};

/// Longest eligibility delay a deployment may configure: one hundred years.
pub const MAX_DELAY_MINUTES: i64 = 100 * 365 * 24 * 60;

/// Constants driving point values and re-eligibility delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points for a complete answer on an easy card, before multipliers.
    pub base_score: i64,
    /// Extra factor applied to complete multiple-choice answers.
    pub multiple_correct_multiplier: i64,
    pub delays: EligibilityDelays,
}

impl ScoringConfig {
    /// Largest award this configuration can produce: a complete multiple-choice
    /// answer on a hard card. `None` if it does not fit in an `i64`.
    pub fn max_points(&self) -> Option<i64> {
        self.base_score
            .checked_mul(difficulty_multiplier(Difficulty::Hard))?
            .checked_mul(self.multiple_correct_multiplier)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 1,
            multiple_correct_multiplier: 2,
            delays: EligibilityDelays::default(),
        }
    }
}

/// Minutes a card waits, per tier it lands on, before it is eligible again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityDelays {
    pub easy_minutes: i64,
    pub medium_minutes: i64,
    pub hard_minutes: i64,
}

impl Default for EligibilityDelays {
    fn default() -> Self {
        Self {
            easy_minutes: 30,
            medium_minutes: 10_080,
            hard_minutes: 40_320,
        }
    }
}

impl EligibilityDelays {
    /// Delay for a card that has just landed on `difficulty`.
    ///
    /// Buried cards never become eligible again, so they have no delay. Minutes
    /// beyond what a [`Duration`] can hold saturate at [`Duration::MAX`].
    pub fn for_difficulty(&self, difficulty: Difficulty) -> Option<Duration> {
        let minutes = match difficulty {
            Difficulty::Easy => self.easy_minutes,
            Difficulty::Medium => self.medium_minutes,
            Difficulty::Hard => self.hard_minutes,
            Difficulty::Buried => return None,
        };
        Some(Duration::try_minutes(minutes).unwrap_or(Duration::MAX))
    }

    /// Longest configured delay, in minutes.
    pub fn longest(&self) -> i64 {
        self.easy_minutes
            .max(self.medium_minutes)
            .max(self.hard_minutes)
    }
}
