use std::collections::BTreeSet;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use qc_db::{
    models::NewFlashcard,
    repositories::{flashcard, tag, user},
};
use uuid::Uuid;
use validator::Validate;

use super::model::{CreateFlashcardRequest, FlashcardResponse, UpdateStatusRequest};
use crate::{ApiState, auth::AuthUser, error::ApiError, validation::normalize_tag};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/flashcards", post(create_flashcard))
        .route("/flashcards/{id}", get(get_flashcard))
        .route("/flashcards/{id}/status", patch(update_status))
        .route("/flashcards/{id}/revive", post(revive_flashcard))
}

fn flashcard_not_found(flashcard_id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Flashcard {flashcard_id} not found"))
}

async fn create_flashcard(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<CreateFlashcardRequest>,
) -> Result<(StatusCode, Json<FlashcardResponse>), ApiError> {
    payload.validate()?;
    for answer in payload.answers.iter().flatten() {
        answer.validate()?;
    }

    let tags = payload
        .tags
        .iter()
        .map(|raw| normalize_tag(raw))
        .collect::<Result<BTreeSet<_>, _>>()?;

    let draft = payload.draft();
    let question_type = qc_engine::validate_draft(&draft)?;

    let mut tx = state.pool.begin().await.map_err(ApiError::Database)?;

    // Row lock keeps concurrent creates from overshooting the free limit
    let profile = user::find_profile_for_update(&mut *tx, auth_user.user_id)
        .await
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if !profile.is_premium {
        let owned = flashcard::count_owned_by_user(&mut *tx, auth_user.user_id)
            .await
            .map_err(ApiError::Database)?;
        if owned >= state.free_flashcard_limit {
            tracing::info!(
                user_id = %auth_user.user_id,
                owned,
                limit = state.free_flashcard_limit,
                "Free flashcard limit reached"
            );
            return Err(ApiError::Forbidden(format!(
                "Free accounts can own at most {} flashcards",
                state.free_flashcard_limit
            )));
        }
    }

    let created = flashcard::insert_flashcard(
        &mut *tx,
        &NewFlashcard {
            user_id: auth_user.user_id,
            question_type,
            text: &payload.text,
            explanation: payload.explanation.as_deref(),
            is_true: draft.is_true,
            status: payload.status,
        },
    )
    .await
    .map_err(ApiError::Database)?;

    let mut answers = Vec::new();
    for (position, answer) in draft.answers.iter().flatten().enumerate() {
        let stored = flashcard::insert_answer(&mut *tx, created.id, position as i32, answer)
            .await
            .map_err(ApiError::Database)?;
        answers.push(stored);
    }

    for name in &tags {
        let tag_id = tag::upsert_tag(&mut *tx, auth_user.user_id, name)
            .await
            .map_err(ApiError::Database)?;
        tag::attach_tag(&mut *tx, created.id, tag_id)
            .await
            .map_err(ApiError::Database)?;
    }

    tx.commit().await.map_err(ApiError::Database)?;

    tracing::info!(
        flashcard_id = %created.id,
        user_id = %auth_user.user_id,
        question_type = %question_type,
        answers = answers.len(),
        tags = tags.len(),
        "Flashcard created"
    );

    Ok((
        StatusCode::CREATED,
        Json(FlashcardResponse::new(
            created,
            answers,
            tags.into_iter().collect(),
        )),
    ))
}

async fn get_flashcard(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(flashcard_id): Path<Uuid>,
) -> Result<Json<FlashcardResponse>, ApiError> {
    let card = flashcard::find_owned(&state.pool, flashcard_id, auth_user.user_id)
        .await
        .map_err(ApiError::Database)?
        .ok_or_else(|| flashcard_not_found(flashcard_id))?;

    let answers = flashcard::list_answers(&state.pool, card.id)
        .await
        .map_err(ApiError::Database)?;
    let tags = tag::names_for_flashcard(&state.pool, card.id)
        .await
        .map_err(ApiError::Database)?;

    Ok(Json(FlashcardResponse::new(card, answers, tags)))
}

async fn update_status(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(flashcard_id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<FlashcardResponse>, ApiError> {
    let card = flashcard::update_status(
        &state.pool,
        flashcard_id,
        auth_user.user_id,
        payload.status,
    )
    .await
    .map_err(ApiError::Database)?
    .ok_or_else(|| flashcard_not_found(flashcard_id))?;

    tracing::info!(flashcard_id = %card.id, status = %card.status, "Flashcard status updated");

    let answers = flashcard::list_answers(&state.pool, card.id)
        .await
        .map_err(ApiError::Database)?;
    let tags = tag::names_for_flashcard(&state.pool, card.id)
        .await
        .map_err(ApiError::Database)?;

    Ok(Json(FlashcardResponse::new(card, answers, tags)))
}

/// Put a buried card back into rotation at easy, eligible immediately.
async fn revive_flashcard(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(flashcard_id): Path<Uuid>,
) -> Result<Json<FlashcardResponse>, ApiError> {
    let Some(card) = flashcard::revive(&state.pool, flashcard_id, auth_user.user_id)
        .await
        .map_err(ApiError::Database)?
    else {
        // Nothing updated: either the card is missing or it is not buried
        return match flashcard::find_owned(&state.pool, flashcard_id, auth_user.user_id)
            .await
            .map_err(ApiError::Database)?
        {
            Some(card) => Err(ApiError::Validation(format!(
                "Only buried flashcards can be revived, this one is {}",
                card.difficulty
            ))),
            None => Err(flashcard_not_found(flashcard_id)),
        };
    };

    tracing::info!(flashcard_id = %card.id, user_id = %auth_user.user_id, "Flashcard revived");

    let answers = flashcard::list_answers(&state.pool, card.id)
        .await
        .map_err(ApiError::Database)?;
    let tags = tag::names_for_flashcard(&state.pool, card.id)
        .await
        .map_err(ApiError::Database)?;

    Ok(Json(FlashcardResponse::new(card, answers, tags)))
}
