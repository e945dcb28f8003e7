//! Events pushed by the WhatsApp bridge sidecar.

use serde::{Deserialize, Serialize};
use whatsai_types::chat::InboundMessage;

/// Header carrying the shared bridge secret, in both directions.
pub const BRIDGE_TOKEN_HEADER: &str = "x-bridge-token";

/// A webhook event from the bridge, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeEvent {
    /// A chat message arrived on the linked account.
    Message(InboundMessage),
    /// The session is authenticated and live.
    Ready,
    /// The session needs pairing; `code` is the QR payload to scan.
    Qr { code: String },
    Disconnected {
        #[serde(default)]
        reason: Option<String>,
    },
}
