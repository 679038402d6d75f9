use chrono::{DateTime, Utc};
use qc_engine::{Correctness, Difficulty, LifecycleStatus, QuestionType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Flashcard row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Flashcard {
    /// Unique flashcard identifier
    pub id: Uuid,
    /// Owning user (indexed)
    pub user_id: Uuid,
    #[sqlx(try_from = "String")]
    pub question_type: QuestionType,
    pub text: String,
    pub explanation: Option<String>,
    /// Truth value, only set for statements
    pub is_true: Option<bool>,
    #[sqlx(try_from = "String")]
    pub difficulty: Difficulty,
    #[sqlx(try_from = "String")]
    pub status: LifecycleStatus,
    /// When the card was last attempted
    pub last_seen_at: Option<DateTime<Utc>>,
    /// Earliest time the card may be selected again
    pub eligible_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Answer option of a choice flashcard
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Answer {
    pub id: Uuid,
    pub flashcard_id: Uuid,
    /// Display order, starting at 0
    pub position: i32,
    pub text: String,
    pub explanation: Option<String>,
    pub is_correct: bool,
}

/// Immutable record of one scoring event
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attempt {
    pub id: Uuid,
    pub flashcard_id: Uuid,
    pub user_id: Uuid,
    pub answered_at: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub correctness: Correctness,
    pub points: i64,
    /// Difficulty in effect when the attempt was made
    #[sqlx(try_from = "String")]
    pub difficulty: Difficulty,
    /// What was answered on a statement card
    pub statement_answer: Option<bool>,
}

/// Option selected during an attempt, with its correctness at that time
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttemptAnswer {
    pub attempt_id: Uuid,
    pub answer_id: Uuid,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_premium: bool,
    /// Cumulative points, may be negative after corrections
    pub points: i64,
}

/// Insert struct for a flashcard whose shape has already been validated
#[derive(Debug, Clone)]
pub struct NewFlashcard<'a> {
    pub user_id: Uuid,
    pub question_type: QuestionType,
    pub text: &'a str,
    pub explanation: Option<&'a str>,
    pub is_true: Option<bool>,
    pub status: LifecycleStatus,
}

/// Insert struct for an attempt
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub flashcard_id: Uuid,
    pub user_id: Uuid,
    pub answered_at: DateTime<Utc>,
    pub correctness: Correctness,
    pub points: i64,
    pub difficulty: Difficulty,
    pub statement_answer: Option<bool>,
}
