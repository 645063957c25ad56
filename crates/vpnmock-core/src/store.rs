//! State store
//!
//! Owns every collection the API serves. Methods are synchronous and take
//! `&mut self` for mutations; callers sharing a store across tasks wrap
//! it in a single lock and hold the guard for the whole operation.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut store = VpnStore::default();
//!
//! let conn = store.connect("1")?;
//! assert!(conn.connected);
//!
//! store.disconnect();
//! assert_eq!(store.history(2).len(), 2);
//! ```

use crate::connection::Connection;
use crate::history::{HistoryEntry, HistoryKind, HistoryLog};
use crate::model::{Profile, Resource, Rule, Server};
use crate::seed::SeedData;
use chrono::Utc;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(Resource),

    #[error("Invalid {resource} fields: {source}")]
    InvalidRecord {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
}

/// Derived counters reported by [`VpnStore::status`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounters {
    pub total_servers: usize,
    pub enabled_rules: usize,
    pub history_count: usize,
}

/// Read-only view of the whole store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub connection: Connection,
    pub servers: Vec<Server>,
    pub rules: Vec<Rule>,
    pub profiles: Vec<Profile>,
    pub stats: StatusCounters,
}

/// In-memory state for the mock VPN client
///
/// Lives for the lifetime of the process; nothing is persisted.
#[derive(Debug, Clone)]
pub struct VpnStore {
    servers: Vec<Server>,
    rules: Vec<Rule>,
    profiles: Vec<Profile>,
    connection: Connection,
    history: HistoryLog,
}

impl VpnStore {
    /// Create a store from seed fixtures, disconnected, with empty history
    pub fn new(seed: SeedData) -> Self {
        Self {
            servers: seed.servers,
            rules: seed.rules,
            profiles: seed.profiles,
            connection: Connection::disconnected(),
            history: HistoryLog::new(),
        }
    }

    // ---- Servers ----

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// Find a server by id
    pub fn server(&self, id: &str) -> Result<&Server, StoreError> {
        self.servers.iter().find(|s| s.id == id).ok_or_else(|| {
            debug!("Server lookup missed: {}", id);
            StoreError::NotFound(Resource::Server)
        })
    }

    /// Add a server built from `body` over `{id, status: "online"}`
    ///
    /// Body fields win, including `id` and `status`.
    pub fn create_server(&mut self, body: Value) -> Result<Server, StoreError> {
        let body = object_body(Resource::Server, body)?;

        let mut defaults = Map::new();
        defaults.insert("id".to_string(), Value::String(new_id()));
        defaults.insert("status".to_string(), Value::String("online".to_string()));
        let server: Server = merge_fields(Resource::Server, defaults, body)?;

        info!(
            "Created server {} ({})",
            server.id,
            server.name.as_deref().unwrap_or("unnamed")
        );
        self.servers.push(server.clone());
        Ok(server)
    }

    /// Shallow-merge `body` over an existing server
    pub fn update_server(&mut self, id: &str, body: Value) -> Result<Server, StoreError> {
        let slot = self
            .servers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound(Resource::Server))?;
        let body = object_body(Resource::Server, body)?;

        let current = fields_of(Resource::Server, &*slot)?;
        let merged: Server = merge_fields(Resource::Server, current, body)?;
        *slot = merged.clone();

        info!("Updated server {}", id);
        Ok(merged)
    }

    /// Remove every server with `id`; returns whether anything was removed
    pub fn delete_server(&mut self, id: &str) -> bool {
        let before = self.servers.len();
        self.servers.retain(|s| s.id != id);
        let removed = self.servers.len() != before;
        if removed {
            info!("Deleted server {}", id);
        }
        removed
    }

    // ---- Rules ----

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Add a rule built from `body` over `{id, enabled: true}`
    pub fn create_rule(&mut self, body: Value) -> Result<Rule, StoreError> {
        let body = object_body(Resource::Rule, body)?;

        let mut defaults = Map::new();
        defaults.insert("id".to_string(), Value::String(new_id()));
        defaults.insert("enabled".to_string(), Value::Bool(true));
        let rule: Rule = merge_fields(Resource::Rule, defaults, body)?;

        info!(
            "Created rule {} ({})",
            rule.id,
            rule.pattern.as_deref().unwrap_or("no pattern")
        );
        self.rules.push(rule.clone());
        Ok(rule)
    }

    /// Remove every rule with `id`; returns whether anything was removed
    pub fn delete_rule(&mut self, id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.id != id);
        let removed = self.rules.len() != before;
        if removed {
            info!("Deleted rule {}", id);
        }
        removed
    }

    /// Flip `enabled` on a rule
    pub fn toggle_rule(&mut self, id: &str) -> Result<Rule, StoreError> {
        let rule = self.rules.iter_mut().find(|r| r.id == id).ok_or_else(|| {
            debug!("Rule lookup missed: {}", id);
            StoreError::NotFound(Resource::Rule)
        })?;
        rule.enabled = !rule.enabled;

        info!("Rule {} is now {}", id, if rule.enabled { "enabled" } else { "disabled" });
        Ok(rule.clone())
    }

    // ---- Profiles ----

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// The active profile is always the first one
    pub fn active_profile(&self) -> Option<&Profile> {
        self.profiles.first()
    }

    // ---- Connection ----

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Connect to a server
    ///
    /// Replaces the connection record even when already connected, and
    /// logs a `connect` event. An unknown id leaves everything untouched.
    pub fn connect(&mut self, server_id: &str) -> Result<&Connection, StoreError> {
        let server = self.servers.iter().find(|s| s.id == server_id).ok_or_else(|| {
            debug!("Connect to unknown server: {}", server_id);
            StoreError::NotFound(Resource::Server)
        })?;

        let now = Utc::now();
        self.connection = Connection::established(server, now);
        self.history.record(HistoryKind::Connect, server.name.clone(), now);

        info!(
            "Connected to {} ({})",
            server.id,
            server.name.as_deref().unwrap_or("unnamed")
        );
        Ok(&self.connection)
    }

    /// Reset to the disconnected record
    ///
    /// A `disconnect` event is logged only if a connection existed.
    pub fn disconnect(&mut self) -> &Connection {
        if self.connection.is_connected() {
            let server = self.connection.server_name.take();
            info!("Disconnected from {}", server.as_deref().unwrap_or("unnamed"));
            self.history.record(HistoryKind::Disconnect, server, Utc::now());
        }

        self.connection = Connection::disconnected();
        &self.connection
    }

    // ---- History ----

    /// Up to `limit` most recent events, newest first
    pub fn history(&self, limit: usize) -> Vec<HistoryEntry> {
        self.history.recent(limit)
    }

    /// Drop all events; returns how many were dropped
    pub fn clear_history(&mut self) -> usize {
        let count = self.history.len();
        self.history.clear();
        info!("Cleared {} history entries", count);
        count
    }

    // ---- Status ----

    /// Snapshot of every collection plus derived counters
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            connection: self.connection.clone(),
            servers: self.servers.clone(),
            rules: self.rules.clone(),
            profiles: self.profiles.clone(),
            stats: StatusCounters {
                total_servers: self.servers.len(),
                enabled_rules: self.rules.iter().filter(|r| r.enabled).count(),
                history_count: self.history.len(),
            },
        }
    }
}

impl Default for VpnStore {
    fn default() -> Self {
        Self::new(SeedData::default())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Require a JSON object body
fn object_body(resource: Resource, body: Value) -> Result<Map<String, Value>, StoreError> {
    match body {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::InvalidRecord {
            resource,
            source: serde_json::Error::custom(format!(
                "request body must be a JSON object, found {}",
                json_type(&other)
            )),
        }),
    }
}

/// A record's JSON fields
fn fields_of<T: Serialize>(
    resource: Resource,
    record: &T,
) -> Result<Map<String, Value>, StoreError> {
    let value = serde_json::to_value(record)
        .map_err(|source| StoreError::InvalidRecord { resource, source })?;
    object_body(resource, value)
}

/// Shallow merge: every key in `body` replaces the same key in `base`
fn merge_fields<T: DeserializeOwned>(
    resource: Resource,
    mut base: Map<String, Value>,
    body: Map<String, Value>,
) -> Result<T, StoreError> {
    base.extend(body);
    serde_json::from_value(Value::Object(base))
        .map_err(|source| StoreError::InvalidRecord { resource, source })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
