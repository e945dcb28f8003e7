//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API.
//! The orchestrator is generic over its transport, but AppState pins it to
//! the HTTP bridge implementation.

use std::sync::Arc;

use whatsai_core::context::BotContext;
use whatsai_core::generation::{GenerationClient, GenerationSettings};
use whatsai_core::llm::box_provider::BoxLlmProvider;
use whatsai_core::orchestrator::{ReplyOrchestrator, ReplySettings};
use whatsai_core::training::StyleTrainer;
use whatsai_infra::llm::create_provider;
use whatsai_infra::secret::resolve_api_key;
use whatsai_infra::whatsapp::BridgeTransport;
use whatsai_types::config::GlobalConfig;

use crate::http::extractors::auth::hash_api_key;

/// Reply orchestrator pinned to the WhatsApp bridge transport.
pub type ConcreteOrchestrator = ReplyOrchestrator<BridgeTransport>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<BotContext>,
    pub generator: Arc<GenerationClient>,
    pub orchestrator: Arc<ConcreteOrchestrator>,
    pub trainer: Arc<StyleTrainer>,
    pub config: Arc<GlobalConfig>,
    /// SHA-256 of the dashboard token; `None` leaves the dashboard open.
    pub dashboard_token_hash: Option<String>,
}

impl AppState {
    /// Resolve the API key, build the backend provider and bridge client,
    /// and wire the services.
    pub fn init(config: GlobalConfig) -> anyhow::Result<Self> {
        let api_key = resolve_api_key()?;
        let provider = create_provider(&config.llm, api_key)?;
        let transport = BridgeTransport::new(&config.bridge);
        Ok(Self::from_parts(config, provider, transport))
    }

    pub fn from_parts(
        config: GlobalConfig,
        provider: BoxLlmProvider,
        transport: BridgeTransport,
    ) -> Self {
        let ctx = Arc::new(BotContext::new(&config.bot));
        let generator = Arc::new(GenerationClient::new(
            provider,
            GenerationSettings::from(&config.llm),
        ));
        let orchestrator = Arc::new(ReplyOrchestrator::new(
            Arc::clone(&ctx),
            Arc::clone(&generator),
            transport,
            ReplySettings::from(&config.bot),
        ));
        let trainer = Arc::new(StyleTrainer::new(Arc::clone(&ctx), Arc::clone(&generator)));
        let dashboard_token_hash = config
            .dashboard
            .api_token
            .as_deref()
            .map(hash_api_key);

        Self {
            ctx,
            generator,
            orchestrator,
            trainer,
            config: Arc::new(config),
            dashboard_token_hash,
        }
    }
}
