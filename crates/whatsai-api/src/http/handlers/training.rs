//! Style training endpoints.
//!
//! - POST /api/v1/training - Analyze a writing sample and apply it
//! - GET  /api/v1/training - Current training state

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use whatsai_types::personality::Personality;
use whatsai_types::status::TrainingState;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for POST /api/v1/training.
#[derive(Debug, Deserialize)]
pub struct TrainRequest {
    pub sample: String,
}

/// POST /api/v1/training - Run style analysis to completion.
///
/// Returns the newly active Custom personality.
pub async fn start_training(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(body): Json<TrainRequest>,
) -> Result<Json<ApiResponse<Personality>>, AppError> {
    let start = Instant::now();
    let personality = state.trainer.train(&body.sample).await?;
    Ok(Json(
        ApiResponse::timed((*personality).clone(), start)
            .with_link("self", "/api/v1/training")
            .with_link("personality", "/api/v1/personality"),
    ))
}

/// GET /api/v1/training - Training state.
pub async fn get_training(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<ApiResponse<TrainingState>>, AppError> {
    let start = Instant::now();
    Ok(Json(
        ApiResponse::timed(state.ctx.training_state(), start)
            .with_link("self", "/api/v1/training"),
    ))
}
