//! vpnmock core - In-memory state for the mock VPN management API
//!
//! Holds the servers, routing rules, profiles, the single connection
//! record and the connection history that the HTTP layer exposes.
//! Nothing here opens a tunnel: "connecting" only rewrites the
//! connection record and appends a history entry.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      VpnStore                        │
//! │                                                      │
//! │  ┌──────────┐  ┌─────────┐  ┌──────────┐             │
//! │  │ servers  │  │  rules  │  │ profiles │  (seeded)   │
//! │  └────┬─────┘  └─────────┘  └──────────┘             │
//! │       │ connect(server_id)                           │
//! │       ▼                                              │
//! │  ┌────────────┐   record    ┌────────────┐           │
//! │  │ Connection │────────────▶│ HistoryLog │           │
//! │  └────────────┘             └────────────┘           │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Semantics
//!
//! - **Permissive records**: request bodies are shallow-merged over the
//!   stored record, unknown fields are kept verbatim
//! - **Weak references**: `Rule::server_id` and `Profile::default_server`
//!   are never checked against the server list
//! - **Two-state connection**: connect overwrites, disconnect resets
//! - **Most-recent-first history**: unbounded until cleared

mod connection;
mod history;
mod model;
mod seed;
mod store;

pub use connection::{Connection, TrafficStats};
pub use history::{parse_limit, HistoryEntry, HistoryKind, HistoryLog, DEFAULT_HISTORY_LIMIT};
pub use model::{Profile, Protocol, Resource, Rule, Server};
pub use seed::{SeedData, SeedError};
pub use store::{StatusCounters, StatusSnapshot, StoreError, VpnStore};
