use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::{attempt, flashcard, question, state::ApiState, user};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .merge(flashcard::routes())
        .merge(attempt::routes())
        .merge(question::routes())
        .merge(user::routes())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Ready once the database answers.
async fn ready(State(state): State<ApiState>) -> StatusCode {
    match qc_db::ping(&state.pool).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "title": "Not found",
            "message": "The requested resource was not found",
            "code": "not_found"
        })),
    )
}
