//! Error taxonomy shared by the engine and its collaborators.

use thiserror::Error;
use uuid::Uuid;

/// Validation failures raised while creating, scoring or selecting flashcards.
///
/// Every variant is a recoverable, user-facing input problem. The engine never
/// retries and none of these errors is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("question type cannot be determined: {reason}")]
    UndeterminedQuestionType { reason: &'static str },

    #[error("at least one answer must be marked as correct")]
    LessThanOneCorrectAnswer,

    #[error("a single-choice question must have exactly one correct answer")]
    MoreThanOneCorrectAnswer,

    #[error("answer {answer_id} does not belong to flashcard {flashcard_id}")]
    AnswerMismatch { flashcard_id: Uuid, answer_id: Uuid },

    #[error("no flashcard is eligible for a new attempt right now")]
    NoEligibleQuestions,
}

impl QuizError {
    /// Stable machine-readable code, safe to match on in clients.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UndeterminedQuestionType { .. } => "undetermined_question_type",
            Self::LessThanOneCorrectAnswer => "less_than_one_correct_answer",
            Self::MoreThanOneCorrectAnswer => "more_than_one_correct_answer",
            Self::AnswerMismatch { .. } => "answer_mismatch",
            Self::NoEligibleQuestions => "no_eligible_questions",
        }
    }

    /// Short human-readable title.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::UndeterminedQuestionType { .. } => "Undetermined question type",
            Self::LessThanOneCorrectAnswer => "No correct answer",
            Self::MoreThanOneCorrectAnswer => "Too many correct answers",
            Self::AnswerMismatch { .. } => "Answer mismatch",
            Self::NoEligibleQuestions => "No eligible questions",
        }
    }
}

/// Returned when a stored string does not name a variant of one of the closed enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}
