//! Custom personality training from a writing sample.

use std::sync::Arc;

use tracing::{info, warn};
use whatsai_types::error::TrainingError;
use whatsai_types::personality::Personality;
use whatsai_types::status::TrainingState;

use crate::context::BotContext;
use crate::generation::GenerationClient;

/// Shortest sample accepted for analysis, in characters after trimming.
pub const MIN_SAMPLE_CHARS: usize = 50;

/// Reject samples too short to profile. No backend call is made.
pub fn check_sample(sample_text: &str) -> Result<(), TrainingError> {
    let actual = sample_text.trim().chars().count();
    if actual < MIN_SAMPLE_CHARS {
        return Err(TrainingError::SampleTooShort {
            min: MIN_SAMPLE_CHARS,
            actual,
        });
    }
    Ok(())
}

/// Runs style analysis and installs the result as the active personality.
pub struct StyleTrainer {
    ctx: Arc<BotContext>,
    generator: Arc<GenerationClient>,
}

impl StyleTrainer {
    pub fn new(ctx: Arc<BotContext>, generator: Arc<GenerationClient>) -> Self {
        Self { ctx, generator }
    }

    /// Analyze `sample_text` and activate the resulting Custom personality.
    ///
    /// On any failure the active personality is left as it was. Only one
    /// run may be in flight; a second concurrent call gets
    /// [`TrainingError::AlreadyRunning`].
    pub async fn train(&self, sample_text: &str) -> Result<Arc<Personality>, TrainingError> {
        check_sample(sample_text)?;

        let Some(run) = self.ctx.try_begin_training() else {
            return Err(TrainingError::AlreadyRunning);
        };
        info!(sample_chars = sample_text.chars().count(), "style analysis started");
        self.ctx.activity.info("Starting style analysis...");

        match self.generator.analyze_style(sample_text).await {
            Ok(analysis) => {
                let personality = self.ctx.personalities.apply_trained_result(&analysis).await;
                run.finish(TrainingState::Succeeded);
                info!(tone = %analysis.tone, "custom personality applied");
                self.ctx.activity.info("Custom personality trained and applied.");
                Ok(personality)
            }
            Err(e) => {
                warn!(error = %e, "style analysis failed");
                run.finish(TrainingState::Failed {
                    error: e.to_string(),
                });
                self.ctx.activity.error("ERROR: Style analysis failed.");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::generation::GenerationSettings;
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::test_support::MockProvider;
    use whatsai_types::personality::PersonalityType;

    const SAMPLE: &str =
        "lol yeah that works for me, see you at 5 lol. bring snacks pls, i'm starving lol";

    fn trainer(provider: MockProvider) -> StyleTrainer {
        StyleTrainer::new(
            Arc::new(BotContext::default()),
            Arc::new(GenerationClient::new(
                BoxLlmProvider::new(provider),
                GenerationSettings {
                    model: "test-model".to_string(),
                    reply_temperature: 0.85,
                    max_tokens: 512,
                },
            )),
        )
    }

    #[test]
    fn test_check_sample_counts_trimmed_chars() {
        assert!(check_sample(&"a".repeat(50)).is_ok());
        let padded = format!("   {}   ", "a".repeat(49));
        assert!(matches!(
            check_sample(&padded),
            Err(TrainingError::SampleTooShort { min: 50, actual: 49 })
        ));
        // Multi-byte characters count once each
        assert!(check_sample(&"é".repeat(50)).is_ok());
    }

    #[tokio::test]
    async fn test_short_sample_makes_no_backend_call() {
        let provider = MockProvider::replying("{}");
        let log = provider.request_log();
        let trainer = trainer(provider);

        let result = trainer.train("too short").await;
        assert!(matches!(result, Err(TrainingError::SampleTooShort { .. })));
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(trainer.ctx.training_state(), TrainingState::Idle);
    }

    #[tokio::test]
    async fn test_successful_training_activates_custom() {
        let trainer = trainer(MockProvider::replying(
            r#"{"tone":"playful","frequentlyUsedPhrases":["lol"],"systemInstruction":"use lol often"}"#,
        ));

        let personality = trainer.train(SAMPLE).await.unwrap();
        assert_eq!(personality.personality_type, PersonalityType::Custom);
        assert!(
            personality
                .custom_instructions
                .as_deref()
                .unwrap()
                .contains("use lol often")
        );

        let ctx = &trainer.ctx;
        assert_eq!(*ctx.personalities.active().await, *personality);
        assert_eq!(ctx.training_state(), TrainingState::Succeeded);
        let entries = ctx.activity.entries();
        assert_eq!(entries[0].message, "Custom personality trained and applied.");
        assert_eq!(entries[1].message, "Starting style analysis...");
    }

    #[tokio::test]
    async fn test_failed_training_keeps_personality() {
        let trainer = trainer(MockProvider::failing());
        let before = trainer.ctx.personalities.active().await;

        let result = trainer.train(SAMPLE).await;
        assert!(matches!(result, Err(TrainingError::Analysis(_))));
        assert_eq!(*trainer.ctx.personalities.active().await, *before);
        assert!(matches!(
            trainer.ctx.training_state(),
            TrainingState::Failed { .. }
        ));
        assert_eq!(
            trainer.ctx.activity.entries()[0].message,
            "ERROR: Style analysis failed."
        );
    }

    #[tokio::test]
    async fn test_missing_instruction_fails_training() {
        let trainer = trainer(MockProvider::replying(
            r#"{"tone":"playful","frequentlyUsedPhrases":["lol"]}"#,
        ));
        let result = trainer.train(SAMPLE).await;
        assert!(matches!(result, Err(TrainingError::InvalidProfile(_))));
        assert_eq!(
            trainer.ctx.personalities.active().await.personality_type,
            PersonalityType::Casual
        );
    }

    #[tokio::test]
    async fn test_concurrent_training_rejected() {
        let trainer = trainer(MockProvider::replying("{}"));
        let _run = trainer.ctx.try_begin_training().unwrap();

        let result = trainer.train(SAMPLE).await;
        assert!(matches!(result, Err(TrainingError::AlreadyRunning)));
        assert!(trainer.ctx.training_state().is_training());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_training_frees_slot() {
        let provider = MockProvider::stalled();
        let log = provider.request_log();
        let trainer = trainer(provider);

        let abandoned =
            tokio::time::timeout(Duration::from_millis(20), trainer.train(SAMPLE)).await;
        assert!(abandoned.is_err());
        assert!(matches!(
            trainer.ctx.training_state(),
            TrainingState::Failed { .. }
        ));

        let retry = tokio::time::timeout(Duration::from_millis(20), trainer.train(SAMPLE)).await;
        assert!(retry.is_err(), "second run should reach the backend, not be rejected");
        assert_eq!(log.lock().unwrap().len(), 2);
    }
}
