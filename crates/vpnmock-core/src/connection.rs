//! Connection record
//!
//! The single record describing the current (mock) tunnel. It is never
//! edited field by field: connect and disconnect replace it wholesale.

use crate::model::Server;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Traffic counters
///
/// Always zero: no traffic flows through a mock tunnel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficStats {
    /// Bytes received through tunnel
    pub bytes_in: u64,
    /// Bytes sent through tunnel
    pub bytes_out: u64,
}

/// Current connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub connected: bool,
    pub server_id: Option<String>,
    pub server_name: Option<String>,
    pub connected_at: Option<DateTime<Utc>>,
    pub stats: TrafficStats,
}

impl Connection {
    /// The disconnected record: no server, no timestamp, zeroed stats
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            server_id: None,
            server_name: None,
            connected_at: None,
            stats: TrafficStats::default(),
        }
    }

    /// A fresh connected record for `server`
    pub fn established(server: &Server, at: DateTime<Utc>) -> Self {
        Self {
            connected: true,
            server_id: Some(server.id.clone()),
            server_name: server.name.clone(),
            connected_at: Some(at),
            stats: TrafficStats::default(),
        }
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::disconnected()
    }
}
