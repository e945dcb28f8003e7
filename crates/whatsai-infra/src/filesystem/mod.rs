//! Data directory layout.

use std::path::{Path, PathBuf};

/// Name of the config file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `WHATSAI_DATA_DIR` environment variable
/// 2. `~/.whatsai`
pub fn resolve_data_dir() -> PathBuf {
    resolve_data_dir_with(std::env::var("WHATSAI_DATA_DIR").ok(), dirs::home_dir())
}

fn resolve_data_dir_with(env_dir: Option<String>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = env_dir.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(home) = home {
        return home.join(".whatsai");
    }

    // Last resort: current directory
    PathBuf::from(".whatsai")
}

/// Path of `config.toml` under `data_dir`.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}
