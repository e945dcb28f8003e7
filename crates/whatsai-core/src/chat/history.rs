//! Bounded per-contact conversation history.
//!
//! Every contact gets a [`ContactSession`] on first contact. Sessions are
//! never destroyed; they live for the life of the process. Each sits behind
//! its own async mutex so one contact's reply pipeline can hold it across
//! the generation call without blocking any other contact.

use std::collections::VecDeque;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use whatsai_types::chat::{ContactId, Turn};

/// Ordered turn history for one contact, trimmed FIFO to `max_len`.
#[derive(Debug, Clone)]
pub struct ContactSession {
    turns: VecDeque<Turn>,
    max_len: usize,
}

impl ContactSession {
    /// Create an empty session. A `max_len` of zero is treated as one.
    pub fn new(max_len: usize) -> Self {
        let max_len = max_len.max(1);
        Self {
            turns: VecDeque::with_capacity(max_len + 1),
            max_len,
        }
    }

    /// Append a turn, then evict from the front until within bounds.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.max_len {
            self.turns.pop_front();
        }
    }

    /// Snapshot of the turns, oldest first.
    pub fn turns(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Map of contact sessions keyed by contact id.
#[derive(Debug)]
pub struct ConversationStore {
    sessions: DashMap<ContactId, Arc<Mutex<ContactSession>>>,
    max_history: usize,
}

impl ConversationStore {
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_history: max_history.max(1),
        }
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// The session for `contact`, created on first use.
    ///
    /// Lock the returned mutex for the duration of a reply so that turns
    /// for the same contact are handled one at a time.
    pub fn session(&self, contact: &ContactId) -> Arc<Mutex<ContactSession>> {
        let entry = self
            .sessions
            .entry(contact.clone())
            .or_insert_with(|| Arc::new(Mutex::new(ContactSession::new(self.max_history))));
        Arc::clone(entry.value())
    }

    /// Append a turn to `contact`'s history, trimming the oldest turns.
    pub async fn append_turn(&self, contact: &ContactId, turn: Turn) {
        let session = self.session(contact);
        session.lock().await.push(turn);
    }

    /// Current history for `contact`; empty for an unseen contact.
    ///
    /// Does not create a session.
    pub async fn history(&self, contact: &ContactId) -> Vec<Turn> {
        let session = match self.sessions.get(contact) {
            Some(entry) => Arc::clone(entry.value()),
            None => return Vec::new(),
        };
        let guard = session.lock().await;
        guard.turns()
    }

    /// Number of contacts seen so far.
    pub fn contact_count(&self) -> usize {
        self.sessions.len()
    }
}
