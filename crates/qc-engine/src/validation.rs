//! Creation-time shape validation.
//!
//! The scorer assumes every card it sees satisfies these rules, so the persistence
//! layer must run them before a flashcard is stored.

use serde::{Deserialize, Serialize};

use crate::{error::QuizError, types::QuestionType};

/// One option of a choice flashcard being authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerDraft {
    pub text: String,
    pub explanation: Option<String>,
    pub is_correct: bool,
}

/// Question-shaping part of a flashcard being authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardDraft {
    /// Explicit type; inferred from the other fields when absent.
    pub question_type: Option<QuestionType>,
    pub is_true: Option<bool>,
    pub answers: Option<Vec<AnswerDraft>>,
}

/// Determine the question type of a draft, rejecting inconsistent shapes.
///
/// A draft carries either a truth value (statement) or a non-empty answer list
/// (choice), never both. Without an explicit type, one correct answer means
/// single-choice and several mean multiple-choice.
pub fn validate_draft(draft: &FlashcardDraft) -> Result<QuestionType, QuizError> {
    let answers = draft.answers.as_deref().filter(|answers| !answers.is_empty());

    match (draft.is_true, answers) {
        (Some(_), Some(_)) => Err(QuizError::UndeterminedQuestionType {
            reason: "both a truth value and answers were given",
        }),
        (None, None) => Err(QuizError::UndeterminedQuestionType {
            reason: "neither a truth value nor answers were given",
        }),
        (Some(_), None) => match draft.question_type {
            None | Some(QuestionType::Statement) => Ok(QuestionType::Statement),
            Some(QuestionType::Single | QuestionType::Multiple) => {
                Err(QuizError::UndeterminedQuestionType {
                    reason: "a choice question needs answers, not a truth value",
                })
            }
        },
        (None, Some(answers)) => {
            let correct = answers.iter().filter(|answer| answer.is_correct).count();
            if correct == 0 {
                return Err(QuizError::LessThanOneCorrectAnswer);
            }

            match draft.question_type {
                Some(QuestionType::Statement) => Err(QuizError::UndeterminedQuestionType {
                    reason: "a statement needs a truth value, not answers",
                }),
                Some(QuestionType::Single) if correct > 1 => {
                    Err(QuizError::MoreThanOneCorrectAnswer)
                }
                Some(question_type) => Ok(question_type),
                None if correct == 1 => Ok(QuestionType::Single),
                None => Ok(QuestionType::Multiple),
            }
        }
    }
}
