//! Environment variable secret lookup.
//!
//! Key resolution: `API_KEY` first, then `GEMINI_API_KEY`. Empty or
//! non-Unicode values count as unset.

use secrecy::SecretString;
use whatsai_types::error::ConfigError;

/// Variables checked for the backend API key, in priority order.
pub const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Resolve the backend API key from the process environment.
pub fn resolve_api_key() -> Result<SecretString, ConfigError> {
    resolve_api_key_with(|name| std::env::var(name).ok())
}

/// Resolve the backend API key through `lookup`.
pub fn resolve_api_key_with(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    API_KEY_VARS
        .iter()
        .find_map(|name| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingApiKey(API_KEY_VARS.join(" or ")))
}
