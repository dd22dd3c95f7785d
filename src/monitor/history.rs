//! Timestamped batches accumulated by the monitor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Batch;

// ---

/// One poll result as persisted: `{ "timestamp": "...", "data": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub data: Batch,
}

/// Append-only log with an optional rolling cap.
///
/// When a cap is set the oldest entries are evicted on push, so the log always
/// holds the most recent `cap` polls.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    cap: Option<usize>,
}

impl HistoryLog {
    // ---
    pub fn new(cap: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            cap,
        }
    }

    /// Rebuild from persisted entries, keeping only the newest `cap`.
    pub fn from_entries(entries: Vec<HistoryEntry>, cap: Option<usize>) -> Self {
        // ---
        let mut log = Self { entries, cap };
        log.evict();
        log
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
        self.evict();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict(&mut self) {
        // ---
        if let Some(cap) = self.cap {
            if self.entries.len() > cap {
                let excess = self.entries.len() - cap;
                self.entries.drain(0..excess);
            }
        }
    }
}
