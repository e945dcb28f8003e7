//! POST /api/v1/whatsapp/events - Events pushed by the WhatsApp bridge.
//!
//! Answers `202 Accepted` right away. Chat messages are handled on their
//! own tokio task so a slow generation call never blocks the bridge, and
//! messages from different contacts proceed in parallel.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use whatsai_infra::whatsapp::event::BridgeEvent;

use crate::http::extractors::bridge::BridgeAuthenticated;
use crate::state::AppState;

pub async fn receive_event(
    State(state): State<AppState>,
    _auth: BridgeAuthenticated,
    Json(event): Json<BridgeEvent>,
) -> StatusCode {
    match event {
        BridgeEvent::Message(message) => {
            tracing::debug!(contact = %message.contact_id, "bridge message event");
            let orchestrator = Arc::clone(&state.orchestrator);
            tokio::spawn(async move {
                let outcome = orchestrator.handle(&message).await;
                tracing::debug!(contact = %message.contact_id, ?outcome, "message handled");
            });
        }
        BridgeEvent::Ready => {
            state.ctx.set_connected(true);
        }
        BridgeEvent::Qr { code } => {
            state.ctx.set_connected(false);
            tracing::info!(qr = %code, "scan the QR code with WhatsApp to link this account");
            state
                .ctx
                .activity
                .warn("Waiting for QR scan to connect WhatsApp");
        }
        BridgeEvent::Disconnected { reason } => {
            state.ctx.set_connected(false);
            let reason = reason.unwrap_or_else(|| "unknown".to_string());
            tracing::warn!(%reason, "whatsapp bridge disconnected");
            state
                .ctx
                .activity
                .warn(format!("Disconnected from WhatsApp Gateway: {reason}"));
        }
    }
    StatusCode::ACCEPTED
}
