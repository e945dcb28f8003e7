//! Bot status counters and the dashboard activity log.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use whatsai_types::status::{BotStatus, LogEntry, LogLevel};

/// Default number of activity lines kept.
pub const DEFAULT_LOG_CAPACITY: usize = 20;

/// Lock-free bot status flags and counters.
///
/// The reply counter only ever increases; increments from concurrent
/// contacts commute.
#[derive(Debug)]
pub struct BotStatusTracker {
    active: AtomicBool,
    connected: AtomicBool,
    replies_sent: AtomicU64,
    last_active: Mutex<Option<DateTime<Utc>>>,
}

impl BotStatusTracker {
    pub fn new(active: bool) -> Self {
        Self {
            active: AtomicBool::new(active),
            connected: AtomicBool::new(false),
            replies_sent: AtomicU64::new(0),
            last_active: Mutex::new(None),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Set the auto-reply flag, returning the previous value.
    pub fn set_active(&self, active: bool) -> bool {
        self.active.swap(active, Ordering::SeqCst)
    }

    /// Flip the auto-reply flag, returning the new value.
    pub fn toggle(&self) -> bool {
        !self.active.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Count a delivered reply and stamp the last-active time.
    pub fn record_reply(&self) -> u64 {
        let count = self.replies_sent.fetch_add(1, Ordering::SeqCst) + 1;
        *self
            .last_active
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Utc::now());
        count
    }

    pub fn replies_sent(&self) -> u64 {
        self.replies_sent.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> BotStatus {
        BotStatus {
            is_active: self.is_active(),
            connected: self.is_connected(),
            replies_sent: self.replies_sent(),
            last_active: *self
                .last_active
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }
}

/// Bounded activity log, newest entry first.
#[derive(Debug)]
pub struct ActivityLog {
    entries: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn record(&self, level: LogLevel, message: impl Into<String>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push_front(LogEntry::new(level, message));
        entries.truncate(self.capacity);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.record(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.record(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.record(LogLevel::Error, message);
    }

    /// All retained entries, newest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}
