//! Classifies a submitted answer against the card's ground truth and prices it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::ScoringConfig,
    error::QuizError,
    types::{AnswerKey, Correctness, Difficulty, QuestionType, SubmittedAnswer},
};

/// Result of scoring one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub correctness: Correctness,
    pub points: i64,
}

impl ScoreOutcome {
    /// Zero points, nothing right.
    pub const fn missed() -> Self {
        Self {
            correctness: Correctness::None,
            points: 0,
        }
    }
}

/// Point multiplier for a live difficulty tier.
///
/// # Panics
///
/// Panics for [`Difficulty::Buried`]: buried cards are short-circuited before any
/// multiplier is looked up.
pub fn difficulty_multiplier(difficulty: Difficulty) -> i64 {
    match difficulty {
        Difficulty::Easy => 1,
        Difficulty::Medium => 3,
        Difficulty::Hard => 8,
        Difficulty::Buried => unreachable!("buried cards never reach the multiplier lookup"),
    }
}

/// Pure, all-or-nothing scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a submission.
    ///
    /// Buried cards always yield `(none, 0)` without looking at the submission. For
    /// live cards the submission must have the card's shape and may only reference
    /// the card's own answers.
    ///
    /// Multiple-choice answers are complete only when the selection equals the correct
    /// set exactly; subsets, supersets and overlaps all score zero.
    pub fn score(
        &self,
        flashcard_id: Uuid,
        question_type: QuestionType,
        difficulty: Difficulty,
        key: &AnswerKey,
        submitted: &SubmittedAnswer,
    ) -> Result<ScoreOutcome, QuizError> {
        if difficulty.is_retired() {
            return Ok(ScoreOutcome::missed());
        }

        let is_correct = match (question_type, key, submitted) {
            (
                QuestionType::Statement,
                AnswerKey::Statement { is_true },
                SubmittedAnswer::Statement(given),
            ) => given == is_true,
            (QuestionType::Single, AnswerKey::Choices(_), SubmittedAnswer::Single(answer_id)) => {
                ensure_known(flashcard_id, key, [answer_id])?;
                let correct = key.correct_ids();
                correct.len() == 1 && correct.contains(answer_id)
            }
            (
                QuestionType::Multiple,
                AnswerKey::Choices(_),
                SubmittedAnswer::Multiple(selected),
            ) => {
                ensure_known(flashcard_id, key, selected)?;
                *selected == key.correct_ids()
            }
            (_, AnswerKey::Statement { .. }, _) if question_type != QuestionType::Statement => {
                return Err(QuizError::UndeterminedQuestionType {
                    reason: "a choice question is missing its answers",
                });
            }
            (_, AnswerKey::Choices(_), _) if question_type == QuestionType::Statement => {
                return Err(QuizError::UndeterminedQuestionType {
                    reason: "a statement cannot carry answer options",
                });
            }
            _ => {
                return Err(QuizError::UndeterminedQuestionType {
                    reason: "the submitted answer does not match the question type",
                });
            }
        };

        if !is_correct {
            return Ok(ScoreOutcome::missed());
        }

        Ok(ScoreOutcome {
            correctness: Correctness::Complete,
            points: self.points_for(question_type, difficulty),
        })
    }

    /// Points awarded for a complete answer of `question_type` at `difficulty`.
    ///
    /// Saturates at `i64::MAX` rather than overflowing.
    pub fn points_for(&self, question_type: QuestionType, difficulty: Difficulty) -> i64 {
        let points = self
            .config
            .base_score
            .saturating_mul(difficulty_multiplier(difficulty));
        match question_type {
            QuestionType::Multiple => {
                points.saturating_mul(self.config.multiple_correct_multiplier)
            }
            QuestionType::Statement | QuestionType::Single => points,
        }
    }
}

fn ensure_known<'a, I>(flashcard_id: Uuid, key: &AnswerKey, selected: I) -> Result<(), QuizError>
where
    I: IntoIterator<Item = &'a Uuid>,
{
    match selected.into_iter().find(|id| !key.contains(id)) {
        Some(answer_id) => Err(QuizError::AnswerMismatch {
            flashcard_id,
            answer_id: *answer_id,
        }),
        None => Ok(()),
    }
}
