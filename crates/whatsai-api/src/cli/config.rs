//! `whatsai config` - print the effective configuration.
//!
//! Shows the merged result of `config.toml` and environment overrides.
//! Tokens are redacted.

use std::path::Path;

use anyhow::Result;
use console::style;
use whatsai_infra::filesystem::config_path;
use whatsai_infra::secret::resolve_api_key;
use whatsai_types::config::GlobalConfig;

const REDACTED: &str = "********";

pub fn show_config(config: &GlobalConfig, data_dir: &Path, json: bool) -> Result<()> {
    let redacted = redact(config);
    let api_key_set = resolve_api_key().is_ok();

    if json {
        let out = serde_json::json!({
            "data_dir": data_dir.display().to_string(),
            "config_file": config_path(data_dir).display().to_string(),
            "api_key_set": api_key_set,
            "config": redacted,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("Config file:").dim(),
        config_path(data_dir).display()
    );
    println!(
        "  {} {}",
        style("API key:    ").dim(),
        if api_key_set {
            style("set").green()
        } else {
            style("missing (set API_KEY or GEMINI_API_KEY)").red()
        }
    );
    println!();
    println!("{}", toml::to_string_pretty(&redacted)?);
    Ok(())
}

fn redact(config: &GlobalConfig) -> GlobalConfig {
    let mut config = config.clone();
    if config.bridge.token.is_some() {
        config.bridge.token = Some(REDACTED.to_string());
    }
    if config.dashboard.api_token.is_some() {
        config.dashboard.api_token = Some(REDACTED.to_string());
    }
    config
}
