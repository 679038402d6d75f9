use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use qc_engine::QuizError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub title: String,
    pub message: String,
    pub code: String,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Quiz(QuizError::NoEligibleQuestions) => StatusCode::NOT_FOUND,
            Self::Quiz(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Jwt(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> ErrorBody {
        let (title, code, message) = match self {
            Self::Auth(message) => ("Unauthorized", "unauthorized", message.clone()),
            Self::Forbidden(message) => ("Forbidden", "forbidden", message.clone()),
            Self::NotFound(message) => ("Not found", "not_found", message.clone()),
            Self::Validation(message) => ("Invalid request", "validation_error", message.clone()),
            Self::Quiz(error) => (error.title(), error.code(), error.to_string()),
            Self::Database(_) | Self::Jwt(_) | Self::Internal(_) => (
                "Internal server error",
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        ErrorBody {
            title: title.to_string(),
            message,
            code: code.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}
