//! Conversation types: contacts, turns, and inbound transport messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// JID suffix WhatsApp uses for group conversations.
const GROUP_SUFFIX: &str = "@g.us";

/// WhatsApp contact identifier (a JID such as `15551234567@c.us`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this JID addresses a group conversation.
    pub fn is_group(&self) -> bool {
        self.0.ends_with(GROUP_SUFFIX)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Which side of the conversation produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The account owner (or the bot acting for them).
    Me,
    /// The contact on the other end.
    Them,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::Me => write!(f, "me"),
            Sender::Them => write!(f, "them"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "me" => Ok(Sender::Me),
            "them" => Ok(Sender::Them),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// One message exchanged in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub text: String,
    pub sender: Sender,
}

impl Turn {
    pub fn me(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Me,
        }
    }

    pub fn them(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Them,
        }
    }
}

/// A chat message delivered by the WhatsApp transport.
///
/// Field names follow the bridge wire format (camelCase).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessage {
    /// Transport-assigned message id, used to quote the message in the reply.
    #[serde(default)]
    pub id: Option<String>,
    /// The chat the message arrived in.
    #[serde(rename = "from")]
    pub contact_id: ContactId,
    #[serde(default)]
    pub body: String,
    /// Sent from the linked account itself.
    #[serde(default)]
    pub from_me: bool,
    /// Arrived in a group conversation.
    #[serde(default)]
    pub is_group: bool,
}

impl InboundMessage {
    /// Whether the message came from a group, either flagged by the
    /// transport or inferred from the JID.
    pub fn from_group(&self) -> bool {
        self.is_group || self.contact_id.is_group()
    }
}
