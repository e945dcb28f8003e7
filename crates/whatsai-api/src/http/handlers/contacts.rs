//! GET /api/v1/contacts/{id}/history - Conversation context kept for a contact.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use whatsai_types::chat::{ContactId, Turn};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Unknown contacts return an empty history rather than 404.
pub async fn get_history(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Turn>>>, AppError> {
    let start = Instant::now();
    if id.trim().is_empty() {
        return Err(AppError::Validation("Contact id must not be empty".to_string()));
    }
    let contact = ContactId::new(id);
    let history = state.ctx.conversations.history(&contact).await;

    let link = format!("/api/v1/contacts/{contact}/history");
    Ok(Json(ApiResponse::timed(history, start).with_link("self", &link)))
}
