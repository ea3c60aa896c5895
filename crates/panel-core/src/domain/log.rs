//! Log stream: bounded, append-only, client-stamped.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::ports::TimeSource;

/// Display severity of a log entry.
///
/// Levels outside the known four are kept verbatim and rendered neutral.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    Unknown(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Unknown(level) => level,
        }
    }
}

impl From<&str> for Severity {
    fn from(level: &str) -> Self {
        match level {
            "info" => Severity::Info,
            "success" => Severity::Success,
            "warning" => Severity::Warning,
            "error" => Severity::Error,
            other => Severity::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Severity {
    fn from(level: String) -> Self {
        Severity::from(level.as_str())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line in the log view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Client wall-clock time at append.
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub severity: Severity,
}

impl LogEntry {
    /// `[HH:MM:SS] message`
    pub fn line(&self) -> String {
        format!("[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// Default number of entries kept before the oldest are evicted.
pub const DEFAULT_LOG_CAPACITY: usize = 500;

/// Append-only log with a retention cap.
pub struct LogStream {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    evicted: u64,
    clock: Arc<dyn TimeSource>,
}

impl LogStream {
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize, clock: Arc<dyn TimeSource>) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_LOG_CAPACITY)),
            capacity,
            evicted: 0,
            clock,
        }
    }

    /// Stamp and append an entry, evicting the oldest when full.
    pub fn append(&mut self, message: impl Into<String>, severity: Severity) -> &LogEntry {
        let entry = LogEntry {
            timestamp: self.clock.now(),
            message: message.into(),
            severity,
        };

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
            self.evicted += 1;
        }
        self.entries.push_back(entry);

        // Non-empty after push_back
        &self.entries[self.entries.len() - 1]
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.append(message, Severity::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.append(message, Severity::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.append(message, Severity::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.append(message, Severity::Error);
    }

    /// Oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries dropped by the retention cap so far.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

impl fmt::Debug for LogStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogStream")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("evicted", &self.evicted)
            .finish()
    }
}
