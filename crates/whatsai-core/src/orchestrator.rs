//! Reply orchestration for inbound WhatsApp messages.
//!
//! The pipeline for an accepted message:
//! ```text
//! received -> history-updated -> (typing sent) -> delayed
//!          -> generated -> sent -> history-updated
//! ```
//! The contact's session lock is held from the first history update to
//! the last, so one contact's messages are handled strictly in order while
//! other contacts run in parallel.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use whatsai_types::chat::{InboundMessage, Turn};
use whatsai_types::config::BotSettings;

use crate::context::BotContext;
use crate::generation::GenerationClient;
use crate::transport::MessageTransport;

/// Why an inbound message was or was not answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyDecision {
    Accept,
    IgnoreDisabled,
    IgnoreSelf,
    IgnoreGroup,
}

impl ReplyDecision {
    /// Classify a message. Checks run in a fixed order: disabled, self, group.
    pub fn decide(auto_reply: bool, message: &InboundMessage) -> Self {
        if !auto_reply {
            ReplyDecision::IgnoreDisabled
        } else if message.from_me {
            ReplyDecision::IgnoreSelf
        } else if message.from_group() {
            ReplyDecision::IgnoreGroup
        } else {
            ReplyDecision::Accept
        }
    }
}

/// Result of handling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Ignored(ReplyDecision),
    Sent { text: String },
    GenerationFailed,
    DeliveryFailed,
}

/// Timing knobs for the reply pipeline.
#[derive(Debug, Clone)]
pub struct ReplySettings {
    pub delay: Duration,
    pub typing_indicator: bool,
}

impl From<&BotSettings> for ReplySettings {
    fn from(settings: &BotSettings) -> Self {
        Self {
            delay: Duration::from_millis(settings.reply_delay_ms),
            typing_indicator: settings.typing_indicator,
        }
    }
}

/// Drives one inbound message through history, generation, and delivery.
pub struct ReplyOrchestrator<T: MessageTransport> {
    ctx: Arc<BotContext>,
    generator: Arc<GenerationClient>,
    transport: T,
    settings: ReplySettings,
}

impl<T: MessageTransport> ReplyOrchestrator<T> {
    pub fn new(
        ctx: Arc<BotContext>,
        generator: Arc<GenerationClient>,
        transport: T,
        settings: ReplySettings,
    ) -> Self {
        Self {
            ctx,
            generator,
            transport,
            settings,
        }
    }

    pub fn context(&self) -> &Arc<BotContext> {
        &self.ctx
    }

    /// Handle one inbound message to completion.
    ///
    /// Never returns an error: every failure is logged and reported
    /// through the returned [`ReplyOutcome`].
    pub async fn handle(&self, message: &InboundMessage) -> ReplyOutcome {
        let decision = ReplyDecision::decide(self.ctx.status.is_active(), message);
        if decision != ReplyDecision::Accept {
            debug!(contact = %message.contact_id, ?decision, "inbound message ignored");
            return ReplyOutcome::Ignored(decision);
        }

        let contact = &message.contact_id;
        let session = self.ctx.conversations.session(contact);
        let mut session = session.lock().await;
        session.push(Turn::them(message.body.clone()));
        info!(contact = %contact, chars = message.body.chars().count(), "inbound message accepted");

        if self.settings.typing_indicator {
            if let Err(e) = self.transport.send_typing(contact).await {
                warn!(contact = %contact, error = %e, "typing indicator failed");
            }
        }

        if !self.settings.delay.is_zero() {
            tokio::time::sleep(self.settings.delay).await;
        }

        let personality = self.ctx.personalities.active().await;
        let history = session.turns();
        let reply = match self.generator.generate_reply(&history, &personality).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(contact = %contact, error = %e, "reply generation failed");
                self.ctx
                    .activity
                    .error(format!("ERROR: Reply generation failed for {contact}"));
                return ReplyOutcome::GenerationFailed;
            }
        };

        if let Err(e) = self.transport.send_reply(message, &reply).await {
            warn!(contact = %contact, error = %e, "reply delivery failed");
            self.ctx
                .activity
                .error(format!("ERROR: Failed to reply to {contact}"));
            return ReplyOutcome::DeliveryFailed;
        }

        session.push(Turn::me(reply.clone()));
        let total = self.ctx.status.record_reply();
        info!(contact = %contact, replies_sent = total, "reply sent");
        self.ctx.activity.info(format!("Replied to {contact}"));

        ReplyOutcome::Sent { text: reply }
    }
}
