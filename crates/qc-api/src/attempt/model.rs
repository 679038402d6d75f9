use chrono::{DateTime, Utc};
use qc_db::models::{Answer, Attempt, Flashcard};
use qc_engine::{
    AnswerKey, AttemptOutcome, CardSnapshot, Correctness, Difficulty, GivenAnswer, QuestionType,
    SubmittedAnswer,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// Body of `POST /flashcards/{id}/attempts`. Exactly one field is set, matching the
/// card's question type.
#[derive(Debug, Deserialize)]
pub struct SubmitAttemptRequest {
    pub is_true: Option<bool>,
    pub answer_id: Option<Uuid>,
    pub answer_ids: Option<Vec<Uuid>>,
}

impl SubmitAttemptRequest {
    pub fn into_submitted(self) -> Result<SubmittedAnswer, ApiError> {
        Ok(SubmittedAnswer::from_shape(
            self.is_true,
            self.answer_id,
            self.answer_ids,
        )?)
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// Build the engine's view of a stored card.
pub fn card_snapshot(flashcard: &Flashcard, answers: &[Answer]) -> Result<CardSnapshot, ApiError> {
    let key = match (flashcard.question_type, flashcard.is_true) {
        (QuestionType::Statement, Some(is_true)) => AnswerKey::Statement { is_true },
        (QuestionType::Statement, None) => {
            return Err(ApiError::Internal(format!(
                "statement flashcard {} has no truth value",
                flashcard.id
            )));
        }
        (QuestionType::Single | QuestionType::Multiple, _) => {
            AnswerKey::choices(answers.iter().map(|answer| (answer.id, answer.is_correct)))
        }
    };

    Ok(CardSnapshot {
        id: flashcard.id,
        question_type: flashcard.question_type,
        difficulty: flashcard.difficulty,
        key,
    })
}

#[derive(Debug, Serialize)]
pub struct AttemptResultResponse {
    pub attempt_id: Uuid,
    pub flashcard_id: Uuid,
    pub correctness: Correctness,
    pub points: i64,
    pub difficulty_before: Difficulty,
    pub difficulty: Difficulty,
    pub eligible_at: Option<DateTime<Utc>>,
    pub answered_at: DateTime<Utc>,
    /// The user's cumulative points after this attempt
    pub total_points: i64,
    pub given_answers: Vec<GivenAnswer>,
}

impl AttemptResultResponse {
    pub fn new(attempt_id: Uuid, outcome: AttemptOutcome, total_points: i64) -> Self {
        Self {
            attempt_id,
            flashcard_id: outcome.flashcard_id,
            correctness: outcome.correctness,
            points: outcome.points,
            difficulty_before: outcome.difficulty_before,
            difficulty: outcome.difficulty_after,
            eligible_at: outcome.eligible_at,
            answered_at: outcome.last_seen_at,
            total_points,
            given_answers: outcome.given_answers,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttemptHistoryEntry {
    pub id: Uuid,
    pub answered_at: DateTime<Utc>,
    pub correctness: Correctness,
    pub points: i64,
    pub difficulty: Difficulty,
    pub statement_answer: Option<bool>,
    pub given_answers: Vec<GivenAnswer>,
}

impl AttemptHistoryEntry {
    pub fn new(attempt: Attempt, given_answers: Vec<GivenAnswer>) -> Self {
        Self {
            id: attempt.id,
            answered_at: attempt.answered_at,
            correctness: attempt.correctness,
            points: attempt.points,
            difficulty: attempt.difficulty,
            statement_answer: attempt.statement_answer,
            given_answers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_engine::LifecycleStatus;

    fn flashcard(question_type: QuestionType, is_true: Option<bool>) -> Flashcard {
        let now = Utc::now();
        Flashcard {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            question_type,
            text: "question".to_string(),
            explanation: None,
            is_true,
            difficulty: Difficulty::Medium,
            status: LifecycleStatus::Published,
            last_seen_at: None,
            eligible_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn answer(flashcard_id: Uuid, position: i32, is_correct: bool) -> Answer {
        Answer {
            id: Uuid::new_v4(),
            flashcard_id,
            position,
            text: format!("option {position}"),
            explanation: None,
            is_correct,
        }
    }

    #[test]
    fn test_statement_snapshot() {
        let card = flashcard(QuestionType::Statement, Some(false));

        let snapshot = card_snapshot(&card, &[]).unwrap();

        assert_eq!(snapshot.id, card.id);
        assert_eq!(snapshot.difficulty, Difficulty::Medium);
        assert_eq!(snapshot.key, AnswerKey::Statement { is_true: false });
    }

    #[test]
    fn test_choice_snapshot_keeps_every_option() {
        let card = flashcard(QuestionType::Multiple, None);
        let answers = vec![
            answer(card.id, 0, true),
            answer(card.id, 1, false),
            answer(card.id, 2, true),
        ];

        let snapshot = card_snapshot(&card, &answers).unwrap();

        assert!(answers.iter().all(|a| snapshot.key.contains(&a.id)));
        assert_eq!(snapshot.key.correct_ids().len(), 2);
    }

    #[test]
    fn test_statement_without_truth_is_internal_error() {
        let card = flashcard(QuestionType::Statement, None);
        assert!(matches!(
            card_snapshot(&card, &[]),
            Err(ApiError::Internal(_))
        ));
    }

    #[test]
    fn test_submission_shape() {
        let request = SubmitAttemptRequest {
            is_true: Some(true),
            answer_id: None,
            answer_ids: None,
        };
        assert_eq!(
            request.into_submitted().unwrap(),
            SubmittedAnswer::Statement(true)
        );

        let request = SubmitAttemptRequest {
            is_true: Some(true),
            answer_id: Some(Uuid::new_v4()),
            answer_ids: None,
        };
        assert!(matches!(
            request.into_submitted(),
            Err(ApiError::Quiz(_))
        ));
    }
}
