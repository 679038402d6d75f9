use chrono::{DateTime, Utc};
use qc_db::models::{Answer, Flashcard};
use qc_engine::{AnswerDraft, Difficulty, FlashcardDraft, LifecycleStatus, QuestionType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateAnswerRequest {
    #[validate(length(min = 1, max = 500))]
    pub text: String,
    #[validate(length(max = 2000))]
    pub explanation: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
}

/// Body of `POST /flashcards`.
///
/// Statements carry `is_true`, choice questions carry `answers`. `question_type`
/// may be omitted and is then inferred from the number of correct answers.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFlashcardRequest {
    pub question_type: Option<QuestionType>,
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    #[validate(length(max = 2000))]
    pub explanation: Option<String>,
    pub is_true: Option<bool>,
    #[validate(length(max = 10))]
    pub answers: Option<Vec<CreateAnswerRequest>>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: LifecycleStatus,
}

impl CreateFlashcardRequest {
    /// The question-shaping part, as the engine validates it.
    pub fn draft(&self) -> FlashcardDraft {
        FlashcardDraft {
            question_type: self.question_type,
            is_true: self.is_true,
            answers: self.answers.as_ref().map(|answers| {
                answers
                    .iter()
                    .map(|answer| AnswerDraft {
                        text: answer.text.clone(),
                        explanation: answer.explanation.clone(),
                        is_correct: answer.is_correct,
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: LifecycleStatus,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub id: Uuid,
    pub text: String,
    pub explanation: Option<String>,
    pub is_correct: bool,
}

impl From<Answer> for AnswerResponse {
    fn from(answer: Answer) -> Self {
        Self {
            id: answer.id,
            text: answer.text,
            explanation: answer.explanation,
            is_correct: answer.is_correct,
        }
    }
}

/// Owner view of a flashcard, including the answer key.
#[derive(Debug, Serialize)]
pub struct FlashcardResponse {
    pub id: Uuid,
    pub question_type: QuestionType,
    pub text: String,
    pub explanation: Option<String>,
    pub is_true: Option<bool>,
    pub difficulty: Difficulty,
    pub status: LifecycleStatus,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub eligible_at: Option<DateTime<Utc>>,
    pub answers: Vec<AnswerResponse>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FlashcardResponse {
    pub fn new(flashcard: Flashcard, answers: Vec<Answer>, tags: Vec<String>) -> Self {
        Self {
            id: flashcard.id,
            question_type: flashcard.question_type,
            text: flashcard.text,
            explanation: flashcard.explanation,
            is_true: flashcard.is_true,
            difficulty: flashcard.difficulty,
            status: flashcard.status,
            last_seen_at: flashcard.last_seen_at,
            eligible_at: flashcard.eligible_at,
            answers: answers.into_iter().map(AnswerResponse::from).collect(),
            tags,
            created_at: flashcard.created_at,
            updated_at: flashcard.updated_at,
        }
    }
}
