//! LLM provider implementations.
//!
//! Provides the OpenAI-compatible provider and a factory
//! ([`create_provider`]) that builds the configured backend from
//! [`LlmSettings`].

pub mod openai_compat;

use secrecy::SecretString;

use whatsai_core::llm::box_provider::BoxLlmProvider;
use whatsai_types::config::LlmSettings;
use whatsai_types::llm::{LlmError, ProviderType};

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{self as compat_config, OpenAiCompatConfig};

/// Create a [`BoxLlmProvider`] from the `[llm]` config section.
///
/// An explicit `base_url` overrides the provider's default endpoint.
///
/// # Errors
///
/// Returns [`LlmError::InvalidRequest`] for `openai_compatible` without a
/// `base_url`.
pub fn create_provider(
    settings: &LlmSettings,
    api_key: SecretString,
) -> Result<BoxLlmProvider, LlmError> {
    let model = settings.model.as_str();
    let mut config: OpenAiCompatConfig = match settings.provider {
        ProviderType::Gemini => compat_config::gemini_defaults(api_key, model),
        ProviderType::OpenAi => compat_config::openai_defaults(api_key, model),
        ProviderType::OpenAiCompatible => {
            let base_url = settings.base_url.as_deref().ok_or_else(|| {
                LlmError::InvalidRequest(
                    "provider 'openai_compatible' requires llm.base_url".to_string(),
                )
            })?;
            return Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(
                compat_config::custom(api_key, base_url, model),
            )));
        }
    };

    if let Some(base_url) = settings.base_url.as_deref() {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }

    tracing::debug!(
        provider = %config.provider_name,
        base_url = %config.base_url,
        model = %config.model,
        "creating LLM provider"
    );
    Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(config)))
}
