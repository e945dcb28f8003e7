//! POST /api/v1/preview - Generate a reply with the active personality
//! without sending it anywhere.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use whatsai_types::chat::Turn;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body: the test conversation, oldest first.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub history: Vec<Turn>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub reply: String,
    pub personality: String,
}

pub async fn preview_reply(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(body): Json<PreviewRequest>,
) -> Result<Json<ApiResponse<PreviewResponse>>, AppError> {
    let start = Instant::now();
    if body.history.is_empty() {
        return Err(AppError::Validation("history must not be empty".to_string()));
    }

    let personality = state.ctx.personalities.active().await;
    let reply = state
        .generator
        .generate_reply(&body.history, &personality)
        .await?;

    let data = PreviewResponse {
        reply,
        personality: personality.personality_type.to_string(),
    };
    Ok(Json(
        ApiResponse::timed(data, start).with_link("self", "/api/v1/preview"),
    ))
}
