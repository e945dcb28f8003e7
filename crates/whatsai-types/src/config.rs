//! Global configuration types for WhatsAi.
//!
//! `GlobalConfig` represents the top-level `config.toml`. Every section and
//! field has a default so an empty or missing file yields a working setup.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderType;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub bot: BotSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub bridge: BridgeSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

/// Reply behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    /// Auto-reply enabled at startup.
    #[serde(default = "default_true")]
    pub auto_reply: bool,
    /// Artificial delay before generating a reply, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    /// Turns kept per contact.
    #[serde(default = "default_max_history_length")]
    pub max_history_length: usize,
    /// Show "typing..." to the contact while the reply is prepared.
    #[serde(default = "default_true")]
    pub typing_indicator: bool,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            auto_reply: true,
            reply_delay_ms: default_reply_delay_ms(),
            max_history_length: default_max_history_length(),
            typing_indicator: true,
        }
    }
}

/// Text-generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub provider: ProviderType,
    /// Override the provider's default base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_reply_temperature")]
    pub reply_temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: ProviderType::default(),
            base_url: None,
            model: default_model(),
            reply_temperature: default_reply_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// WhatsApp bridge sidecar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeSettings {
    #[serde(default = "default_bridge_url")]
    pub base_url: String,
    /// Shared secret sent/expected in `X-Bridge-Token`.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            base_url: default_bridge_url(),
            token: None,
        }
    }
}

/// HTTP listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Dashboard API access.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// When set, dashboard routes require this token.
    #[serde(default)]
    pub api_token: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_reply_delay_ms() -> u64 {
    2_500
}

fn default_max_history_length() -> usize {
    15
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_reply_temperature() -> f64 {
    0.85
}

fn default_max_tokens() -> u32 {
    1_024
}

fn default_bridge_url() -> String {
    "http://127.0.0.1:3002".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}
