//! Personality profiles applied to every generated reply.
//!
//! A personality is either one of the fixed presets or a `Custom` profile
//! produced by style analysis of the operator's own messages.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Style family of a personality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonalityType {
    Professional,
    Casual,
    Witty,
    Concise,
    Friendly,
    Custom,
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonalityType::Professional => write!(f, "Professional"),
            PersonalityType::Casual => write!(f, "Casual"),
            PersonalityType::Witty => write!(f, "Witty"),
            PersonalityType::Concise => write!(f, "Concise"),
            PersonalityType::Friendly => write!(f, "Friendly"),
            PersonalityType::Custom => write!(f, "Custom"),
        }
    }
}

impl FromStr for PersonalityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "professional" => Ok(PersonalityType::Professional),
            "casual" => Ok(PersonalityType::Casual),
            "witty" => Ok(PersonalityType::Witty),
            "concise" => Ok(PersonalityType::Concise),
            "friendly" => Ok(PersonalityType::Friendly),
            "custom" => Ok(PersonalityType::Custom),
            other => Err(format!("invalid personality type: '{other}'")),
        }
    }
}

/// A named style profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    #[serde(rename = "type")]
    pub personality_type: PersonalityType,
    /// Free-text style description (the "rules" for the reply).
    pub description: String,
    /// Extra directive text, set for trained personalities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
}

impl Personality {
    pub fn new(personality_type: PersonalityType, description: impl Into<String>) -> Self {
        Self {
            personality_type,
            description: description.into(),
            custom_instructions: None,
        }
    }

    /// Build the `Custom` personality described by a style analysis.
    ///
    /// The analysed tone becomes the description and the generated
    /// directive becomes the custom instructions.
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        Self {
            personality_type: PersonalityType::Custom,
            description: analysis.tone.clone(),
            custom_instructions: Some(analysis.system_instruction.clone()),
        }
    }
}

impl Default for Personality {
    /// The runtime's starting personality.
    fn default() -> Self {
        Self::new(
            PersonalityType::Casual,
            "Relaxed, friendly, uses some emojis, lowercase often.",
        )
    }
}

/// The fixed preset personalities offered in the dashboard.
pub fn presets() -> Vec<Personality> {
    vec![
        Personality::new(
            PersonalityType::Casual,
            "Relaxed, lowercase, plenty of emojis, chill vibes.",
        ),
        Personality::new(
            PersonalityType::Professional,
            "Structured, grammatically correct, concise, polite.",
        ),
        Personality::new(PersonalityType::Witty, "Sharp, funny, uses clever wordplay."),
        Personality::new(PersonalityType::Friendly, "Warm, supportive, enthusiastic."),
        Personality::new(PersonalityType::Concise, "Short, direct answers with no filler."),
    ]
}

/// Structured persona profile returned by style analysis.
///
/// Doubles as the JSON schema sent to the backend, so the field names are
/// the wire names the model must produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Adjectives describing the vibe.
    pub tone: String,
    /// Phrases the author reaches for often.
    pub frequently_used_phrases: Vec<String>,
    /// Directives for mimicking this specific voice.
    pub system_instruction: String,
}

impl AnalysisResult {
    /// Reject results whose required text fields came back blank.
    pub fn validate(&self) -> Result<(), String> {
        if self.tone.trim().is_empty() {
            return Err("analysis returned an empty tone".to_string());
        }
        if self.system_instruction.trim().is_empty() {
            return Err("analysis returned an empty systemInstruction".to_string());
        }
        Ok(())
    }
}
