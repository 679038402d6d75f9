use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Utc;
use qc_db::repositories::{flashcard, tag};
use qc_engine::{Difficulty, QuestionType, QuizError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, auth::AuthUser, error::ApiError, metrics, validation::normalize_tag};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/questions/random", get(random_question))
}

#[derive(Debug, Deserialize)]
pub struct RandomQuestionQuery {
    pub tag: Option<String>,
}

/// An option as shown to the user: no correctness flag, no explanation.
#[derive(Debug, Serialize)]
pub struct QuestionOption {
    pub id: Uuid,
    pub text: String,
}

/// A flashcard ready to be answered. Nothing here reveals the answer key.
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub question_type: QuestionType,
    pub text: String,
    pub difficulty: Difficulty,
    pub options: Vec<QuestionOption>,
    pub tags: Vec<String>,
}

async fn random_question(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<RandomQuestionQuery>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let tag_filter = query.tag.as_deref().map(normalize_tag).transpose()?;

    let picked = flashcard::pick_eligible(
        &state.pool,
        auth_user.user_id,
        tag_filter.as_deref(),
        Utc::now(),
    )
    .await
    .map_err(ApiError::Database)?;

    metrics::record_question_selection(picked.is_some());
    let card = picked.ok_or(QuizError::NoEligibleQuestions)?;

    let options = flashcard::list_answers(&state.pool, card.id)
        .await
        .map_err(ApiError::Database)?
        .into_iter()
        .map(|answer| QuestionOption {
            id: answer.id,
            text: answer.text,
        })
        .collect();
    let tags = tag::names_for_flashcard(&state.pool, card.id)
        .await
        .map_err(ApiError::Database)?;

    tracing::debug!(flashcard_id = %card.id, tag = ?tag_filter, "Question selected");

    Ok(Json(QuestionResponse {
        id: card.id,
        question_type: card.question_type,
        text: card.text,
        difficulty: card.difficulty,
        options,
        tags,
    }))
}
