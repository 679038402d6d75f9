use chrono::{DateTime, Utc};
use qc_engine::{AnswerDraft, Difficulty, LifecycleStatus};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{Answer, Flashcard, NewFlashcard};

pub async fn count_owned_by_user<'e, E>(executor: E, user_id: Uuid) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*)
            FROM flashcards
            WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
}

pub async fn insert_flashcard<'e, E>(
    executor: E,
    flashcard: &NewFlashcard<'_>,
) -> Result<Flashcard, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO flashcards (user_id, question_type, text, explanation, is_true, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, question_type, text, explanation, is_true, difficulty, status,
                      last_seen_at, eligible_at, created_at, updated_at
        "#,
    )
    .bind(flashcard.user_id)
    .bind(flashcard.question_type.as_str())
    .bind(flashcard.text)
    .bind(flashcard.explanation)
    .bind(flashcard.is_true)
    .bind(flashcard.status.as_str())
    .fetch_one(executor)
    .await
}

pub async fn insert_answer<'e, E>(
    executor: E,
    flashcard_id: Uuid,
    position: i32,
    answer: &AnswerDraft,
) -> Result<Answer, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO answers (flashcard_id, position, text, explanation, is_correct)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, flashcard_id, position, text, explanation, is_correct
        "#,
    )
    .bind(flashcard_id)
    .bind(position)
    .bind(&answer.text)
    .bind(answer.explanation.as_deref())
    .bind(answer.is_correct)
    .fetch_one(executor)
    .await
}

/// Fetch a flashcard only if it belongs to `user_id`.
pub async fn find_owned<'e, E>(
    executor: E,
    flashcard_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Flashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, question_type, text, explanation, is_true, difficulty, status,
                   last_seen_at, eligible_at, created_at, updated_at
            FROM flashcards
            WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(flashcard_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Same as [`find_owned`] but locks the row until the surrounding transaction ends.
pub async fn find_owned_for_update<'e, E>(
    executor: E,
    flashcard_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Flashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, question_type, text, explanation, is_true, difficulty, status,
                   last_seen_at, eligible_at, created_at, updated_at
            FROM flashcards
            WHERE id = $1 AND user_id = $2
            FOR UPDATE
        "#,
    )
    .bind(flashcard_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn list_answers<'e, E>(
    executor: E,
    flashcard_id: Uuid,
) -> Result<Vec<Answer>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, flashcard_id, position, text, explanation, is_correct
            FROM answers
            WHERE flashcard_id = $1
            ORDER BY position
        "#,
    )
    .bind(flashcard_id)
    .fetch_all(executor)
    .await
}

/// Persist the difficulty transition of a scored attempt.
pub async fn apply_progression<'e, E>(
    executor: E,
    flashcard_id: Uuid,
    difficulty: Difficulty,
    last_seen_at: DateTime<Utc>,
    eligible_at: Option<DateTime<Utc>>,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE flashcards
            SET difficulty = $2,
                last_seen_at = $3,
                eligible_at = $4,
                updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(flashcard_id)
    .bind(difficulty.as_str())
    .bind(last_seen_at)
    .bind(eligible_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn update_status<'e, E>(
    executor: E,
    flashcard_id: Uuid,
    user_id: Uuid,
    status: LifecycleStatus,
) -> Result<Option<Flashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE flashcards
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, question_type, text, explanation, is_true, difficulty, status,
                      last_seen_at, eligible_at, created_at, updated_at
        "#,
    )
    .bind(flashcard_id)
    .bind(user_id)
    .bind(status.as_str())
    .fetch_optional(executor)
    .await
}

/// Bring a buried card back to easy, immediately eligible.
///
/// Returns `None` when the card does not exist, is not owned by `user_id` or is not
/// buried.
pub async fn revive<'e, E>(
    executor: E,
    flashcard_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Flashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE flashcards
            SET difficulty = 'easy', eligible_at = NULL, updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND difficulty = 'buried'
            RETURNING id, user_id, question_type, text, explanation, is_true, difficulty, status,
                      last_seen_at, eligible_at, created_at, updated_at
        "#,
    )
    .bind(flashcard_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Pick one random published, live flashcard whose eligibility has passed.
pub async fn pick_eligible<'e, E>(
    executor: E,
    user_id: Uuid,
    tag: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<Flashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT f.id, f.user_id, f.question_type, f.text, f.explanation, f.is_true,
                   f.difficulty, f.status, f.last_seen_at, f.eligible_at,
                   f.created_at, f.updated_at
            FROM flashcards f
            WHERE f.user_id = $1
                AND f.status = 'published'
                AND f.difficulty <> 'buried'
                AND (f.eligible_at IS NULL OR f.eligible_at <= $2)
                AND (
                    $3::text IS NULL OR EXISTS (
                        SELECT 1
                        FROM flashcard_tags ft
                        JOIN tags t ON t.id = ft.tag_id
                        WHERE ft.flashcard_id = f.id AND t.name = $3
                    )
                )
            ORDER BY random()
            LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(now)
    .bind(tag)
    .fetch_optional(executor)
    .await
}
