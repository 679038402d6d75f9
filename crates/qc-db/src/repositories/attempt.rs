use qc_engine::GivenAnswer;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{Attempt, AttemptAnswer, NewAttempt};

pub async fn insert_attempt<'e, E>(
    executor: E,
    attempt: &NewAttempt,
) -> Result<Attempt, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO attempts (
                flashcard_id, user_id, answered_at, correctness, points, difficulty,
                statement_answer
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, flashcard_id, user_id, answered_at, correctness, points, difficulty,
                statement_answer
        "#,
    )
    .bind(attempt.flashcard_id)
    .bind(attempt.user_id)
    .bind(attempt.answered_at)
    .bind(attempt.correctness.as_str())
    .bind(attempt.points)
    .bind(attempt.difficulty.as_str())
    .bind(attempt.statement_answer)
    .fetch_one(executor)
    .await
}

pub async fn insert_given_answer<'e, E>(
    executor: E,
    attempt_id: Uuid,
    given: &GivenAnswer,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO attempt_answers (attempt_id, answer_id, is_correct)
            VALUES ($1, $2, $3)
        "#,
    )
    .bind(attempt_id)
    .bind(given.answer_id)
    .bind(given.is_correct)
    .execute(executor)
    .await?;
    Ok(())
}

/// Most recent attempts on a flashcard, newest first.
pub async fn list_for_flashcard<'e, E>(
    executor: E,
    flashcard_id: Uuid,
    limit: i64,
) -> Result<Vec<Attempt>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, flashcard_id, user_id, answered_at, correctness, points, difficulty,
                statement_answer
            FROM attempts
            WHERE flashcard_id = $1
            ORDER BY answered_at DESC, id DESC
            LIMIT $2
        "#,
    )
    .bind(flashcard_id)
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn given_answers_for<'e, E>(
    executor: E,
    attempt_ids: &[Uuid],
) -> Result<Vec<AttemptAnswer>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT attempt_id, answer_id, is_correct
            FROM attempt_answers
            WHERE attempt_id = ANY($1)
        "#,
    )
    .bind(attempt_ids)
    .fetch_all(executor)
    .await
}
