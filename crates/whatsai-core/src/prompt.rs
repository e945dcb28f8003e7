//! Prompt assembly for reply generation and style analysis.
//!
//! A reply request carries two separate texts:
//! - the **system directive**: role framing, the active personality, and
//!   fixed behavioural rules;
//! - the **user prompt**: the rendered conversation context followed by an
//!   explicit cue to reply now.

use whatsai_types::chat::{Sender, Turn};
use whatsai_types::personality::Personality;

/// Most recent turns rendered into the context block.
pub const MAX_CONTEXT_TURNS: usize = 15;

/// Label for turns written by the account owner.
const SELF_LABEL: &str = "Me";

/// Label for turns written by the contact.
const CONTACT_LABEL: &str = "Contact";

/// Builds the prompts sent to the generation backend.
///
/// Layout of the system directive:
/// ```text
/// You are replying on WhatsApp on behalf of a human user.
/// Personality style: {type}
/// Style rules: {description}
/// Special persona instructions: {custom_instructions}   (if any)
///
/// MANDATORY RULES:
/// - Reply ONLY with the message content.
/// ...
/// ```
pub struct ReplyPromptBuilder;

impl ReplyPromptBuilder {
    /// Build the system directive for the given personality.
    pub fn system_directive(personality: &Personality) -> String {
        let mut sections = Vec::with_capacity(3);

        sections.push(
            "You are replying on WhatsApp on behalf of a human user. \
            The contact believes they are talking to that person directly."
                .to_string(),
        );

        let mut style = format!(
            "Personality style: {}\nStyle rules: {}",
            personality.personality_type,
            personality.description.trim()
        );
        if let Some(custom) = personality
            .custom_instructions
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            style.push_str(&format!("\nSpecial persona instructions: {custom}"));
        }
        sections.push(style);

        sections.push(
            "MANDATORY RULES:\n\
            - Reply ONLY with the message content, no labels or quotes.\n\
            - Be brief and conversational (1-2 sentences usually).\n\
            - NEVER mention or hint that you are an AI or an assistant.\n\
            - Match the contact's linguistic register, punctuation, and emoji habits."
                .to_string(),
        );

        sections.join("\n\n")
    }

    /// Render turns as `{label}: {text}` lines, newest last.
    ///
    /// Only the most recent [`MAX_CONTEXT_TURNS`] turns are included.
    pub fn context_block(history: &[Turn]) -> String {
        let start = history.len().saturating_sub(MAX_CONTEXT_TURNS);
        history[start..]
            .iter()
            .map(|turn| format!("{}: {}", Self::label(turn.sender), turn.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the user prompt: the context block plus the reply cue.
    pub fn reply_prompt(history: &[Turn]) -> String {
        format!(
            "CHAT CONTEXT:\n{}\n\nREPLY NOW AS ME TO THE LAST MESSAGE:",
            Self::context_block(history)
        )
    }

    /// Build the prompt asking the backend to profile a writing sample.
    pub fn analysis_prompt(sample_text: &str) -> String {
        format!(
            "Examine these messages written by one person and define their persona: \
            the overall tone, the phrases they use often, and a directive another \
            writer could follow to mimic this voice.\n\nMESSAGES:\n\"{}\"",
            sample_text.trim()
        )
    }

    fn label(sender: Sender) -> &'static str {
        match sender {
            Sender::Me => SELF_LABEL,
            Sender::Them => CONTACT_LABEL,
        }
    }
}
