//! Connection history
//!
//! Append-only log of connect/disconnect events, newest first. The only
//! way to drop entries is a full clear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Number of entries returned when the client gives no usable limit
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Parse a `limit` query value
///
/// Missing, non-numeric and zero values fall back to
/// [`DEFAULT_HISTORY_LIMIT`]. The whole value must be digits, so `5abc`
/// falls back too.
pub fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
}

/// Event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Connect,
    Disconnect,
}

/// One logged event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    /// Server display name at the time of the event
    pub server: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Most-recent-first event log
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an event and return it
    pub fn record(
        &mut self,
        kind: HistoryKind,
        server: Option<String>,
        at: DateTime<Utc>,
    ) -> &HistoryEntry {
        self.entries.push_front(HistoryEntry {
            id: Uuid::new_v4().to_string(),
            kind,
            server,
            timestamp: at,
        });
        &self.entries[0]
    }

    /// Up to `limit` most recent entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries.iter().take(limit).cloned().collect()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
