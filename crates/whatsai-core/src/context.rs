//! Process-wide bot state, constructed once and shared by `Arc`.

use std::sync::{Mutex, PoisonError};

use tracing::{info, warn};
use whatsai_types::config::BotSettings;
use whatsai_types::status::TrainingState;

use crate::chat::history::ConversationStore;
use crate::personality::PersonalityManager;
use crate::status::{ActivityLog, BotStatusTracker};

/// Everything the reply pipeline, the trainer, and the dashboard share.
#[derive(Debug)]
pub struct BotContext {
    pub conversations: ConversationStore,
    pub personalities: PersonalityManager,
    pub status: BotStatusTracker,
    pub activity: ActivityLog,
    training: Mutex<TrainingState>,
}

impl BotContext {
    pub fn new(settings: &BotSettings) -> Self {
        Self {
            conversations: ConversationStore::new(settings.max_history_length),
            personalities: PersonalityManager::default(),
            status: BotStatusTracker::new(settings.auto_reply),
            activity: ActivityLog::default(),
            training: Mutex::new(TrainingState::Idle),
        }
    }

    pub fn training_state(&self) -> TrainingState {
        self.training
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Move training to `Training` unless a run is already in progress.
    ///
    /// Returns `None` when another run holds the slot. The returned guard
    /// releases the slot when dropped, so a run abandoned mid-analysis
    /// ends as `Failed` rather than staying `Training`.
    pub(crate) fn try_begin_training(&self) -> Option<TrainingRun<'_>> {
        let mut state = self.training.lock().unwrap_or_else(PoisonError::into_inner);
        if state.is_training() {
            return None;
        }
        *state = TrainingState::Training;
        Some(TrainingRun {
            ctx: self,
            finished: false,
        })
    }

    fn set_training_state(&self, outcome: TrainingState) {
        *self.training.lock().unwrap_or_else(PoisonError::into_inner) = outcome;
    }

    /// Set the auto-reply flag from the dashboard.
    pub fn set_auto_reply(&self, active: bool) -> bool {
        self.status.set_active(active);
        self.log_auto_reply(active);
        active
    }

    /// Flip the auto-reply flag from the dashboard, returning the new value.
    pub fn toggle_auto_reply(&self) -> bool {
        let active = self.status.toggle();
        self.log_auto_reply(active);
        active
    }

    /// Record the bridge connection state.
    pub fn set_connected(&self, connected: bool) {
        let was = self.status.is_connected();
        self.status.set_connected(connected);
        if connected && !was {
            info!("whatsapp bridge connected");
            self.activity.info("Connected to WhatsApp Gateway");
        }
    }

    fn log_auto_reply(&self, active: bool) {
        info!(active, "auto-reply toggled");
        if active {
            self.activity.info("Bot ENABLED by user");
        } else {
            self.activity.warn("Bot DISABLED by user");
        }
    }
}

impl Default for BotContext {
    fn default() -> Self {
        Self::new(&BotSettings::default())
    }
}

/// Holds the training slot for one run.
#[derive(Debug)]
pub(crate) struct TrainingRun<'a> {
    ctx: &'a BotContext,
    finished: bool,
}

impl TrainingRun<'_> {
    /// Record the run's outcome and release the slot.
    pub(crate) fn finish(mut self, outcome: TrainingState) {
        self.finished = true;
        self.ctx.set_training_state(outcome);
    }
}

impl Drop for TrainingRun<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("style analysis abandoned before completion");
            self.ctx.set_training_state(TrainingState::Failed {
                error: CANCELLED_TRAINING.to_string(),
            });
        }
    }
}

/// Error recorded for a run whose caller went away.
pub(crate) const CANCELLED_TRAINING: &str = "training cancelled before completion";
