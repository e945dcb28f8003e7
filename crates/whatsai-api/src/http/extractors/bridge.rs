//! Shared-secret check for webhook calls from the WhatsApp bridge.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use whatsai_infra::whatsapp::event::BRIDGE_TOKEN_HEADER;

use crate::http::error::AppError;
use crate::state::AppState;

/// Marker for a request that carried the configured bridge token (or
/// arrived when none is configured).
pub struct BridgeAuthenticated;

impl FromRequestParts<AppState> for BridgeAuthenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.bridge.token.as_deref() else {
            return Ok(BridgeAuthenticated);
        };

        let provided = parts
            .headers
            .get(BRIDGE_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim);

        match provided {
            Some(token) if token == expected => Ok(BridgeAuthenticated),
            _ => {
                tracing::warn!("rejected bridge event with missing or wrong token");
                Err(AppError::Unauthorized("Invalid bridge token".to_string()))
            }
        }
    }
}
