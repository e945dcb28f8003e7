//! Bot status endpoints.
//!
//! - GET  /api/v1/status        - Status snapshot
//! - POST /api/v1/status/toggle - Flip auto-reply
//! - PUT  /api/v1/status/active - Set auto-reply explicitly

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for PUT /api/v1/status/active.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

fn status_view(state: &AppState) -> serde_json::Value {
    let status = state.ctx.status.snapshot();
    serde_json::json!({
        "is_active": status.is_active,
        "connected": status.connected,
        "replies_sent": status.replies_sent,
        "last_active": status.last_active,
        "contacts": state.ctx.conversations.contact_count(),
        "provider": state.generator.provider_name(),
        "model": state.generator.model(),
    })
}

/// GET /api/v1/status - Current bot status.
pub async fn get_status(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let resp = ApiResponse::timed(status_view(&state), start)
        .with_link("self", "/api/v1/status")
        .with_link("toggle", "/api/v1/status/toggle");
    Ok(Json(resp))
}

/// POST /api/v1/status/toggle - Flip auto-reply on/off.
pub async fn toggle_status(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    state.ctx.toggle_auto_reply();
    Ok(Json(
        ApiResponse::timed(status_view(&state), start).with_link("self", "/api/v1/status"),
    ))
}

/// PUT /api/v1/status/active - Set auto-reply to an explicit value.
pub async fn set_active(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(body): Json<SetActiveRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    state.ctx.set_auto_reply(body.active);
    Ok(Json(
        ApiResponse::timed(status_view(&state), start).with_link("self", "/api/v1/status"),
    ))
}
