//! Router test helpers: a canned backend and pre-wired state.

use axum::body::to_bytes;
use axum::response::Response;
use whatsai_core::llm::box_provider::BoxLlmProvider;
use whatsai_core::llm::provider::LlmProvider;
use whatsai_infra::whatsapp::BridgeTransport;
use whatsai_types::config::{BridgeSettings, GlobalConfig};
use whatsai_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};

use crate::state::AppState;

/// Backend that answers every request with the same text.
pub(crate) struct StubProvider {
    content: String,
    capabilities: ProviderCapabilities,
}

impl StubProvider {
    pub(crate) fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            capabilities: ProviderCapabilities {
                structured_output: true,
                max_context_tokens: 32_000,
                max_output_tokens: 1_024,
            },
        }
    }
}

impl LlmProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Ok(CompletionResponse {
            id: "resp-stub".to_string(),
            content: self.content.clone(),
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }
}

/// State with default config and a backend replying `content`.
pub(crate) fn test_state(content: &str) -> AppState {
    state_with(GlobalConfig::default(), content)
}

/// State with the given config. The bridge points at a closed port so any
/// delivery attempt fails fast.
pub(crate) fn state_with(mut config: GlobalConfig, content: &str) -> AppState {
    config.bot.reply_delay_ms = 0;
    let transport = BridgeTransport::new(&BridgeSettings {
        base_url: "http://127.0.0.1:1".to_string(),
        token: config.bridge.token.clone(),
    });
    AppState::from_parts(
        config,
        BoxLlmProvider::new(StubProvider::new(content)),
        transport,
    )
}

pub(crate) async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
