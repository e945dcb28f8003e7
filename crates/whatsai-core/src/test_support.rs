//! Hand-written mocks shared by the unit tests in this crate.

use std::sync::{Arc, Mutex};

use whatsai_types::chat::{ContactId, InboundMessage};
use whatsai_types::error::TransportError;
use whatsai_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};

use crate::llm::provider::LlmProvider;
use crate::transport::MessageTransport;

#[derive(Clone)]
enum MockOutcome {
    Reply(String),
    Fail,
    Stall,
}

/// LLM provider returning a canned response and recording every request.
pub(crate) struct MockProvider {
    capabilities: ProviderCapabilities,
    outcome: MockOutcome,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    pub(crate) fn replying(content: &str) -> Self {
        Self::with_outcome(MockOutcome::Reply(content.to_string()))
    }

    pub(crate) fn failing() -> Self {
        Self::with_outcome(MockOutcome::Fail)
    }

    /// Never answers.
    pub(crate) fn stalled() -> Self {
        Self::with_outcome(MockOutcome::Stall)
    }

    fn with_outcome(outcome: MockOutcome) -> Self {
        Self {
            capabilities: ProviderCapabilities {
                structured_output: true,
                max_context_tokens: 1_000_000,
                max_output_tokens: 8_192,
            },
            outcome,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded requests; grab it before boxing the provider.
    pub(crate) fn request_log(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.outcome {
            MockOutcome::Reply(content) => Ok(CompletionResponse {
                id: "resp-mock".to_string(),
                content: content.clone(),
                model: "mock-model".to_string(),
                stop_reason: StopReason::EndTurn,
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 5,
                },
            }),
            MockOutcome::Fail => Err(LlmError::Provider {
                message: "backend unavailable".to_string(),
            }),
            MockOutcome::Stall => std::future::pending().await,
        }
    }
}

/// Transport recording typing signals and sent replies.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    pub(crate) typing: Arc<Mutex<Vec<ContactId>>>,
    pub(crate) sent: Arc<Mutex<Vec<(ContactId, String)>>>,
    fail_delivery: bool,
    fail_typing: bool,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_delivery() -> Self {
        Self {
            fail_delivery: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_typing() -> Self {
        Self {
            fail_typing: true,
            ..Self::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<(ContactId, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn typing_count(&self) -> usize {
        self.typing.lock().unwrap().len()
    }
}

impl MessageTransport for MockTransport {
    async fn send_typing(&self, contact: &ContactId) -> Result<(), TransportError> {
        if self.fail_typing {
            return Err(TransportError::Unreachable("typing failed".to_string()));
        }
        self.typing.lock().unwrap().push(contact.clone());
        Ok(())
    }

    async fn send_reply(&self, message: &InboundMessage, text: &str) -> Result<(), TransportError> {
        if self.fail_delivery {
            return Err(TransportError::Rejected {
                status: 503,
                body: "session not ready".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((message.contact_id.clone(), text.to_string()));
        Ok(())
    }
}

/// Build an inbound message from a one-to-one chat.
pub(crate) fn inbound(contact: &str, body: &str) -> InboundMessage {
    InboundMessage {
        id: Some(format!("msg-{body}")),
        contact_id: ContactId::from(contact),
        body: body.to_string(),
        from_me: false,
        is_group: false,
    }
}
