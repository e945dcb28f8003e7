//! MessageTransport trait: the outbound half of the WhatsApp session.
//!
//! The session itself (QR pairing, auth, delivery) is owned by an external
//! bridge. Core code only needs to show a typing indicator and post a reply.
//! Implementations live in whatsai-infra (e.g., `BridgeTransport`).

use whatsai_types::chat::{ContactId, InboundMessage};
use whatsai_types::error::TransportError;

pub trait MessageTransport: Send + Sync {
    /// Show the "typing..." chat state to the contact.
    fn send_typing(
        &self,
        contact: &ContactId,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;

    /// Deliver `text` as a reply to `message`.
    fn send_reply(
        &self,
        message: &InboundMessage,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}
