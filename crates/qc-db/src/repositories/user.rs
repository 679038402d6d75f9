use qc_engine::{Direction, points};
use sqlx::{Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::models::UserProfile;

pub async fn find_profile_by_id<'e, E>(
    executor: E,
    user_id: Uuid,
) -> Result<Option<UserProfile>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, username, email, is_premium, points
            FROM users
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Like [`find_profile_by_id`], holding the user row until the transaction ends.
pub async fn find_profile_for_update<'e, E>(
    executor: E,
    user_id: Uuid,
) -> Result<Option<UserProfile>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, username, email, is_premium, points
            FROM users
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Move the user's cumulative points and return the new total.
///
/// The row is locked while [`points::adjust`] computes the total. Returns `None` if
/// the user does not exist.
pub async fn adjust_points(
    conn: &mut PgConnection,
    user_id: Uuid,
    delta: i64,
    direction: Direction,
) -> Result<Option<i64>, sqlx::Error> {
    let current: Option<i64> = sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT points
            FROM users
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(current) = current else {
        return Ok(None);
    };
    let total = points::adjust(current, delta, direction);

    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET points = $2, updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(total)
    .execute(&mut *conn)
    .await?;

    Ok(Some(total))
}
