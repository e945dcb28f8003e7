//! WhatsApp bridge client.
//!
//! The WhatsApp Web session (QR pairing, auth, delivery) is owned by a
//! sidecar bridge. The bridge pushes [`event::BridgeEvent`]s to our webhook
//! and accepts two calls back:
//!
//! - `POST {base}/chats/{contact}/typing`
//! - `POST {base}/messages` with `{"to","body","quotedMessageId"}`

pub mod event;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;

use whatsai_core::transport::MessageTransport;
use whatsai_types::chat::{ContactId, InboundMessage};
use whatsai_types::config::BridgeSettings;
use whatsai_types::error::TransportError;

use self::event::BRIDGE_TOKEN_HEADER;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutgoingMessage<'a> {
    to: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    quoted_message_id: Option<&'a str>,
}

/// [`MessageTransport`] backed by the bridge's HTTP API.
#[derive(Clone)]
pub struct BridgeTransport {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BridgeTransport {
    pub fn new(settings: &BridgeSettings) -> Self {
        Self {
            client: Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `segments` onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let invalid =
            || TransportError::Unreachable(format!("invalid bridge url '{}'", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn post(&self, segments: &[&str]) -> Result<RequestBuilder, TransportError> {
        let request = self.client.post(self.endpoint(segments)?);
        Ok(match &self.token {
            Some(token) => request.header(BRIDGE_TOKEN_HEADER, token),
            None => request,
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<(), TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<(), TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Rejected {
        status: status.as_u16(),
        body,
    })
}

impl MessageTransport for BridgeTransport {
    async fn send_typing(&self, contact: &ContactId) -> Result<(), TransportError> {
        self.send(self.post(&["chats", contact.as_str(), "typing"])?)
            .await
    }

    async fn send_reply(&self, message: &InboundMessage, text: &str) -> Result<(), TransportError> {
        let payload = OutgoingMessage {
            to: message.contact_id.as_str(),
            body: text,
            quoted_message_id: message.id.as_deref(),
        };
        self.send(self.post(&["messages"])?.json(&payload)).await?;
        tracing::debug!(contact = %message.contact_id, "reply delivered to bridge");
        Ok(())
    }
}
