use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::post,
};
use chrono::Utc;
use qc_db::{
    models::NewAttempt,
    repositories::{attempt, flashcard, user},
};
use qc_engine::{Direction, GivenAnswer};
use uuid::Uuid;

use super::model::{
    AttemptHistoryEntry, AttemptResultResponse, HistoryQuery, SubmitAttemptRequest, card_snapshot,
};
use crate::{ApiState, auth::AuthUser, error::ApiError, metrics, validation::history_limit};

pub fn routes() -> Router<ApiState> {
    Router::new().route(
        "/flashcards/{id}/attempts",
        post(submit_attempt).get(list_attempts),
    )
}

/// Score an attempt and persist everything it changes in one transaction: the card's
/// new difficulty and eligibility, the attempt record with its answer snapshot, and
/// the user's points.
async fn submit_attempt(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(flashcard_id): Path<Uuid>,
    Json(payload): Json<SubmitAttemptRequest>,
) -> Result<(StatusCode, Json<AttemptResultResponse>), ApiError> {
    let submitted = payload.into_submitted()?;

    let mut tx = state.pool.begin().await.map_err(ApiError::Database)?;

    // Row lock serialises concurrent attempts on the same card
    let card = flashcard::find_owned_for_update(&mut *tx, flashcard_id, auth_user.user_id)
        .await
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::NotFound(format!("Flashcard {flashcard_id} not found")))?;
    let answers = flashcard::list_answers(&mut *tx, card.id)
        .await
        .map_err(ApiError::Database)?;

    let snapshot = card_snapshot(&card, &answers)?;
    let outcome = state.engine.evaluate(&snapshot, &submitted, Utc::now())?;

    flashcard::apply_progression(
        &mut *tx,
        card.id,
        outcome.difficulty_after,
        outcome.last_seen_at,
        outcome.eligible_at,
    )
    .await
    .map_err(ApiError::Database)?;

    let recorded = attempt::insert_attempt(
        &mut *tx,
        &NewAttempt {
            flashcard_id: card.id,
            user_id: auth_user.user_id,
            answered_at: outcome.last_seen_at,
            correctness: outcome.correctness,
            points: outcome.points,
            difficulty: outcome.difficulty_before,
            statement_answer: outcome.statement_answer,
        },
    )
    .await
    .map_err(ApiError::Database)?;

    for given in &outcome.given_answers {
        attempt::insert_given_answer(&mut *tx, recorded.id, given)
            .await
            .map_err(ApiError::Database)?;
    }

    let total_points =
        user::adjust_points(&mut *tx, auth_user.user_id, outcome.points, Direction::Add)
            .await
            .map_err(ApiError::Database)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tx.commit().await.map_err(ApiError::Database)?;

    metrics::record_attempt(snapshot.question_type, outcome.correctness, outcome.points);
    tracing::info!(
        attempt_id = %recorded.id,
        flashcard_id = %card.id,
        correctness = %outcome.correctness,
        points = outcome.points,
        from = %outcome.difficulty_before,
        to = %outcome.difficulty_after,
        "Attempt scored"
    );

    Ok((
        StatusCode::CREATED,
        Json(AttemptResultResponse::new(recorded.id, outcome, total_points)),
    ))
}

/// Recent attempts on a card, newest first.
async fn list_attempts(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(flashcard_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<AttemptHistoryEntry>>, ApiError> {
    let limit = history_limit(query.limit)?;

    flashcard::find_owned(&state.pool, flashcard_id, auth_user.user_id)
        .await
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::NotFound(format!("Flashcard {flashcard_id} not found")))?;

    let attempts = attempt::list_for_flashcard(&state.pool, flashcard_id, limit)
        .await
        .map_err(ApiError::Database)?;

    let ids = attempts.iter().map(|a| a.id).collect::<Vec<_>>();
    let mut given_by_attempt: HashMap<Uuid, Vec<GivenAnswer>> = HashMap::new();
    for given in attempt::given_answers_for(&state.pool, &ids)
        .await
        .map_err(ApiError::Database)?
    {
        given_by_attempt
            .entry(given.attempt_id)
            .or_default()
            .push(GivenAnswer {
                answer_id: given.answer_id,
                is_correct: given.is_correct,
            });
    }

    let history = attempts
        .into_iter()
        .map(|recorded| {
            let given = given_by_attempt.remove(&recorded.id).unwrap_or_default();
            AttemptHistoryEntry::new(recorded, given)
        })
        .collect();

    Ok(Json(history))
}
