use sqlx::{Executor, Postgres};
use uuid::Uuid;

/// Return the id of the user's tag called `name`, creating it if needed.
pub async fn upsert_tag<'e, E>(executor: E, user_id: Uuid, name: &str) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO tags (user_id, name)
            VALUES ($1, $2)
            ON CONFLICT (user_id, name)
            DO UPDATE SET name = EXCLUDED.name
            RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(executor)
    .await
}

pub async fn attach_tag<'e, E>(
    executor: E,
    flashcard_id: Uuid,
    tag_id: Uuid,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO flashcard_tags (flashcard_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
        "#,
    )
    .bind(flashcard_id)
    .bind(tag_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn names_for_flashcard<'e, E>(
    executor: E,
    flashcard_id: Uuid,
) -> Result<Vec<String>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT t.name
            FROM flashcard_tags ft
            JOIN tags t ON t.id = ft.tag_id
            WHERE ft.flashcard_id = $1
            ORDER BY t.name
        "#,
    )
    .bind(flashcard_id)
    .fetch_all(executor)
    .await
}
