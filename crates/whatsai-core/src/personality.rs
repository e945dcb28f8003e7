//! Holder of the single process-wide active personality.

use std::sync::Arc;

use tokio::sync::RwLock;
use whatsai_types::error::PersonalityError;
use whatsai_types::personality::{self, AnalysisResult, Personality, PersonalityType};

/// Owns the active personality. Switching replaces it wholesale; readers
/// get an `Arc` snapshot that later switches never mutate.
#[derive(Debug)]
pub struct PersonalityManager {
    active: RwLock<Arc<Personality>>,
}

impl PersonalityManager {
    pub fn new(initial: Personality) -> Self {
        Self {
            active: RwLock::new(Arc::new(initial)),
        }
    }

    /// Snapshot of the active personality.
    pub async fn active(&self) -> Arc<Personality> {
        Arc::clone(&*self.active.read().await)
    }

    /// Replace the active personality.
    pub async fn set_active(&self, personality: Personality) -> Arc<Personality> {
        let personality = Arc::new(personality);
        *self.active.write().await = Arc::clone(&personality);
        personality
    }

    /// Activate the preset with the given type.
    pub async fn activate_preset(
        &self,
        personality_type: PersonalityType,
    ) -> Result<Arc<Personality>, PersonalityError> {
        let preset = Self::presets()
            .into_iter()
            .find(|p| p.personality_type == personality_type)
            .ok_or(PersonalityError::NotAPreset(personality_type))?;
        Ok(self.set_active(preset).await)
    }

    /// Build a `Custom` personality from an analysis and activate it.
    pub async fn apply_trained_result(&self, analysis: &AnalysisResult) -> Arc<Personality> {
        self.set_active(Personality::from_analysis(analysis)).await
    }

    /// The fixed preset list.
    pub fn presets() -> Vec<Personality> {
        personality::presets()
    }
}

impl Default for PersonalityManager {
    fn default() -> Self {
        Self::new(Personality::default())
    }
}
