//! The attempt pipeline: scorer first, progression second.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::ScoringConfig,
    error::QuizError,
    progression::Progression,
    scorer::Scorer,
    types::{AnswerKey, Correctness, Difficulty, GivenAnswer, QuestionType, SubmittedAnswer},
};

/// Everything the engine needs to know about a stored flashcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSnapshot {
    pub id: Uuid,
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub key: AnswerKey,
}

/// Outcome of one attempt, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptOutcome {
    pub flashcard_id: Uuid,
    pub correctness: Correctness,
    pub points: i64,
    /// Difficulty in effect when the attempt was made.
    pub difficulty_before: Difficulty,
    pub difficulty_after: Difficulty,
    pub eligible_at: Option<DateTime<Utc>>,
    pub last_seen_at: DateTime<Utc>,
    pub given_answers: Vec<GivenAnswer>,
    pub statement_answer: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    scorer: Scorer,
    progression: Progression,
}

impl Engine {
    pub const fn new(config: ScoringConfig) -> Self {
        Self {
            scorer: Scorer::new(config),
            progression: Progression::new(config),
        }
    }

    /// Score `submitted` against `card` and work out the card's next state.
    ///
    /// The scorer short-circuits retired cards to `(none, 0)`; the same predicate
    /// then skips progression, so they stay buried and never become eligible again.
    /// The attempt is still reported so it can be recorded.
    pub fn evaluate(
        &self,
        card: &CardSnapshot,
        submitted: &SubmittedAnswer,
        now: DateTime<Utc>,
    ) -> Result<AttemptOutcome, QuizError> {
        let score = self.scorer.score(
            card.id,
            card.question_type,
            card.difficulty,
            &card.key,
            submitted,
        )?;

        let (difficulty_after, eligible_at) = if card.difficulty.is_retired() {
            (card.difficulty, None)
        } else {
            let advancement =
                self.progression
                    .advance(card.id, card.difficulty, score.correctness, now);
            (advancement.difficulty, advancement.eligible_at)
        };

        Ok(AttemptOutcome {
            flashcard_id: card.id,
            correctness: score.correctness,
            points: score.points,
            difficulty_before: card.difficulty,
            difficulty_after,
            eligible_at,
            last_seen_at: now,
            given_answers: card.key.snapshot(submitted),
            statement_answer: submitted.statement_value(),
        })
    }
}
