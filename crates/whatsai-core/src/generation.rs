//! Generation client: the two backend calls WhatsAi makes.
//!
//! - [`GenerationClient::generate_reply`] turns (history, personality) into
//!   the text of the next outbound message.
//! - [`GenerationClient::analyze_style`] turns a writing sample into a
//!   structured [`AnalysisResult`] via JSON-schema constrained output.

use tracing::{Instrument, debug, info_span};

use whatsai_types::chat::Turn;
use whatsai_types::config::LlmSettings;
use whatsai_types::error::TrainingError;
use whatsai_types::llm::{CompletionRequest, LlmError, Message, OutputConfig};
use whatsai_types::personality::{AnalysisResult, Personality};

use crate::llm::box_provider::BoxLlmProvider;
use crate::prompt::ReplyPromptBuilder;

/// Sent when the backend answers with empty content.
pub const FALLBACK_REPLY: &str = "Talk to you in a bit!";

/// Schema name announced to the backend for style analysis.
const ANALYSIS_SCHEMA_NAME: &str = "PersonaAnalysis";

/// Model parameters for generation calls.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub reply_temperature: f64,
    pub max_tokens: u32,
}

impl From<&LlmSettings> for GenerationSettings {
    fn from(settings: &LlmSettings) -> Self {
        Self {
            model: settings.model.clone(),
            reply_temperature: settings.reply_temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

/// Thin request/response wrapper around the text-generation backend.
pub struct GenerationClient {
    provider: BoxLlmProvider,
    settings: GenerationSettings,
}

impl GenerationClient {
    pub fn new(provider: BoxLlmProvider, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Generate the next reply for a conversation.
    ///
    /// Returns the trimmed model text, or [`FALLBACK_REPLY`] when the
    /// backend produced nothing. Backend errors propagate to the caller.
    pub async fn generate_reply(
        &self,
        history: &[Turn],
        personality: &Personality,
    ) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![Message::user(ReplyPromptBuilder::reply_prompt(history))],
            system: Some(ReplyPromptBuilder::system_directive(personality)),
            max_tokens: self.settings.max_tokens,
            temperature: Some(self.settings.reply_temperature),
            output_config: None,
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.operation.name = "chat",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            personality = %personality.personality_type,
        );

        let response = self.provider.complete(&request).instrument(span).await?;
        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = %response.stop_reason,
            "reply generated"
        );

        let text = response.content.trim();
        if text.is_empty() {
            debug!("backend returned empty reply, using fallback");
            return Ok(FALLBACK_REPLY.to_string());
        }
        Ok(text.to_string())
    }

    /// Profile a writing sample into a personality analysis.
    ///
    /// Unlike replies, output is validated strictly: unparseable JSON or a
    /// blank required field fails the call.
    pub async fn analyze_style(&self, sample_text: &str) -> Result<AnalysisResult, TrainingError> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![Message::user(ReplyPromptBuilder::analysis_prompt(sample_text))],
            system: None,
            max_tokens: self.settings.max_tokens,
            temperature: None,
            output_config: Some(OutputConfig::json_schema(
                ANALYSIS_SCHEMA_NAME,
                Self::analysis_schema(),
            )),
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.operation.name = "analyze_style",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            sample_chars = sample_text.chars().count(),
        );

        let response = self.provider.complete(&request).instrument(span).await?;

        let analysis: AnalysisResult = serde_json::from_str(strip_code_fence(&response.content))
            .map_err(|e| {
                TrainingError::InvalidProfile(format!(
                    "failed to parse analysis: {e}\nraw content: {}",
                    response.content
                ))
            })?;
        analysis.validate().map_err(TrainingError::InvalidProfile)?;
        Ok(analysis)
    }

    /// JSON schema for [`AnalysisResult`] with `additionalProperties: false`.
    pub fn analysis_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(AnalysisResult);
        let mut value = serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "additionalProperties".to_string(),
                serde_json::Value::Bool(false),
            );
        }
        value
    }
}

/// Some backends wrap JSON output in a markdown code fence even when a
/// schema was requested.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
