//! Scoring engine for QuizCards
//!
//! This crate turns an attempt on a flashcard into points and a new difficulty tier.
//! It performs no I/O: callers load the card, run [`Engine::evaluate`] and persist the
//! returned [`AttemptOutcome`] in a single transaction.
//!
//! # Scoring
//!
//! Only complete answers score. Points are `base_score` times the difficulty
//! multiplier (easy 1, medium 3, hard 8), doubled by default for multiple-choice
//! questions. Buried cards never score.
//!
//! # Progression
//!
//! * Complete: easy -> medium -> hard -> buried
//! * Anything else: back to easy
//!
//! The card becomes eligible again after the delay of the tier it lands on:
//! 30 minutes (easy), 7 days (medium) or 28 days (hard). Buried cards never do.

pub mod config;
pub mod engine;
pub mod error;
pub mod points;
pub mod progression;
pub mod scorer;
pub mod types;
pub mod validation;

pub use config::{EligibilityDelays, MAX_DELAY_MINUTES, ScoringConfig};
pub use engine::{AttemptOutcome, CardSnapshot, Engine};
pub use error::{ParseEnumError, QuizError};
pub use points::{Direction, adjust};
pub use progression::{Advancement, Progression, next_difficulty};
pub use scorer::{ScoreOutcome, Scorer, difficulty_multiplier};
pub use types::{
    AnswerId, AnswerKey, Correctness, Difficulty, GivenAnswer, LifecycleStatus, QuestionType,
    SubmittedAnswer,
};
pub use validation::{AnswerDraft, FlashcardDraft, validate_draft};
