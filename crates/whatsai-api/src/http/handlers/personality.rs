//! Personality endpoints.
//!
//! - GET /api/v1/personalities - Presets plus the active personality
//! - GET /api/v1/personality   - Active personality
//! - PUT /api/v1/personality   - Switch personality (preset by type, or full)

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use whatsai_core::personality::PersonalityManager;
use whatsai_types::error::PersonalityError;
use whatsai_types::personality::{Personality, PersonalityType};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for PUT /api/v1/personality.
///
/// A body carrying a `description` is taken as a full personality;
/// `{"type": "..."}` alone selects a preset.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SetPersonalityRequest {
    Full(Personality),
    Preset {
        #[serde(rename = "type")]
        personality_type: PersonalityType,
    },
}

/// GET /api/v1/personalities - The preset list and the active personality.
pub async fn list_personalities(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let active = state.ctx.personalities.active().await;
    let data = serde_json::json!({
        "presets": PersonalityManager::presets(),
        "active": &*active,
    });
    Ok(Json(
        ApiResponse::timed(data, start)
            .with_link("self", "/api/v1/personalities")
            .with_link("active", "/api/v1/personality"),
    ))
}

/// GET /api/v1/personality - The active personality.
pub async fn get_personality(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<ApiResponse<Personality>>, AppError> {
    let start = Instant::now();
    let active = state.ctx.personalities.active().await;
    Ok(Json(
        ApiResponse::timed((*active).clone(), start).with_link("self", "/api/v1/personality"),
    ))
}

/// PUT /api/v1/personality - Replace the active personality.
///
/// History is untouched; only subsequent replies use the new style.
pub async fn set_personality(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(body): Json<SetPersonalityRequest>,
) -> Result<Json<ApiResponse<Personality>>, AppError> {
    let start = Instant::now();

    let active: Arc<Personality> = match body {
        SetPersonalityRequest::Preset { personality_type } => {
            state
                .ctx
                .personalities
                .activate_preset(personality_type)
                .await?
        }
        SetPersonalityRequest::Full(personality) => {
            if personality.description.trim().is_empty() {
                return Err(PersonalityError::Invalid(
                    "description must not be empty".to_string(),
                )
                .into());
            }
            state.ctx.personalities.set_active(personality).await
        }
    };

    tracing::info!(personality = %active.personality_type, "personality changed");
    state
        .ctx
        .activity
        .info(format!("Personality changed to: {}", active.personality_type));

    Ok(Json(
        ApiResponse::timed((*active).clone(), start).with_link("self", "/api/v1/personality"),
    ))
}
