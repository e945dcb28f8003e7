//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use whatsai_types::error::{PersonalityError, TrainingError};
use whatsai_types::llm::LlmError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Style-training errors.
    Training(TrainingError),
    /// Personality selection errors.
    Personality(PersonalityError),
    /// Text-generation backend errors.
    Llm(LlmError),
    /// Authentication failure.
    Unauthorized(String),
    /// Validation error.
    Validation(String),
}

impl From<TrainingError> for AppError {
    fn from(e: TrainingError) -> Self {
        AppError::Training(e)
    }
}

impl From<PersonalityError> for AppError {
    fn from(e: PersonalityError) -> Self {
        AppError::Personality(e)
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Training(e @ TrainingError::SampleTooShort { .. }) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Training(TrainingError::AlreadyRunning) => (
                StatusCode::CONFLICT,
                "TRAINING_IN_PROGRESS",
                "A training run is already in progress".to_string(),
            ),
            AppError::Training(e) => (StatusCode::BAD_GATEWAY, "ANALYSIS_FAILED", e.to_string()),
            AppError::Personality(e) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Llm(LlmError::RateLimited { .. }) => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "Generation backend is rate limiting requests".to_string(),
            ),
            AppError::Llm(e) => (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", e.to_string()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, ApiResponse::failure(code, message)).into_response()
    }
}
