use thiserror::Error;

use crate::llm::LlmError;
use crate::personality::PersonalityType;

/// Errors from the style-training flow.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("sample text too short: {actual} characters, need at least {min}")]
    SampleTooShort { min: usize, actual: usize },

    #[error("a training run is already in progress")]
    AlreadyRunning,

    #[error("style analysis failed: {0}")]
    Analysis(#[from] LlmError),

    #[error("style analysis returned an invalid profile: {0}")]
    InvalidProfile(String),
}

/// Errors from the WhatsApp transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("bridge unreachable: {0}")]
    Unreachable(String),

    #[error("bridge rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Errors from personality selection.
#[derive(Debug, Error)]
pub enum PersonalityError {
    #[error("'{0}' is not a preset personality")]
    NotAPreset(PersonalityType),

    #[error("invalid personality: {0}")]
    Invalid(String),
}

/// Errors from loading configuration and secrets.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing API key: set {0}")]
    MissingApiKey(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
