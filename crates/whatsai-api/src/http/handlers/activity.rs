//! GET /api/v1/activity - Recent activity log lines, newest first.

use std::time::Instant;

use axum::Json;
use axum::extract::State;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

pub async fn get_activity(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let entries = state
        .ctx
        .activity
        .entries()
        .into_iter()
        .map(|entry| {
            serde_json::json!({
                "timestamp": entry.timestamp,
                "level": entry.level,
                "message": entry.message,
                "line": entry.to_string(),
            })
        })
        .collect();

    Ok(Json(
        ApiResponse::timed(entries, start).with_link("self", "/api/v1/activity"),
    ))
}
