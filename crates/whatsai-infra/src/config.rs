//! Global configuration loader for WhatsAi.
//!
//! Reads `config.toml` from the data directory (`~/.whatsai/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to defaults when the
//! file is missing or malformed, then applies environment overrides.

use std::path::Path;

use whatsai_types::config::GlobalConfig;

use crate::filesystem::config_path;

/// Load `{data_dir}/config.toml` and apply environment overrides.
pub async fn load_config(data_dir: &Path) -> GlobalConfig {
    let mut config = load_global_config(data_dir).await;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            GlobalConfig::default()
        }
    }
}

/// Apply environment overrides through `lookup`.
///
/// | variable                   | field                 |
/// |----------------------------|-----------------------|
/// | `PORT`                     | `server.port`         |
/// | `WHATSAI_BRIDGE_URL`       | `bridge.base_url`     |
/// | `WHATSAI_BRIDGE_TOKEN`     | `bridge.token`        |
/// | `WHATSAI_DASHBOARD_TOKEN`  | `dashboard.api_token` |
///
/// Unparseable or empty values are ignored.
pub fn apply_env_overrides(config: &mut GlobalConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(port) = get("PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!("Ignoring invalid PORT value '{port}'"),
        }
    }
    if let Some(url) = get("WHATSAI_BRIDGE_URL") {
        config.bridge.base_url = url;
    }
    if let Some(token) = get("WHATSAI_BRIDGE_TOKEN") {
        config.bridge.token = Some(token);
    }
    if let Some(token) = get("WHATSAI_DASHBOARD_TOKEN") {
        config.dashboard.api_token = Some(token);
    }
}
