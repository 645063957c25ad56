//! Resource records
//!
//! Servers, routing rules and profiles as stored and served. Every record
//! keeps unknown JSON fields in `extra`, so whatever a client posts comes
//! back out unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Resource kinds, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Server,
    Rule,
}

impl Resource {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Server => "Server",
            Resource::Rule => "Rule",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Tunnel protocol advertised by a server
///
/// Known protocols get their own variant; anything else is carried
/// through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Protocol {
    OpenVpn,
    WireGuard,
    Ikev2,
    Other(String),
}

impl Protocol {
    /// Wire name
    pub fn as_str(&self) -> &str {
        match self {
            Protocol::OpenVpn => "OpenVPN",
            Protocol::WireGuard => "WireGuard",
            Protocol::Ikev2 => "IKEv2",
            Protocol::Other(name) => name,
        }
    }
}

impl From<String> for Protocol {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OpenVPN" => Protocol::OpenVpn,
            "WireGuard" => Protocol::WireGuard,
            "IKEv2" => Protocol::Ikev2,
            _ => Protocol::Other(s),
        }
    }
}

impl From<Protocol> for String {
    fn from(p: Protocol) -> Self {
        match p {
            Protocol::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// VPN endpoint record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Reported status, "online" on creation
    pub status: String,
    /// Fields the client sent that the record has no slot for
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Routing preference: traffic matching `pattern` prefers `server_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Glob-like traffic pattern, e.g. `*.netflix.com`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Not checked against the server list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Named bundle of connection defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_server: Option<String>,
    #[serde(default)]
    pub kill_switch: bool,
    #[serde(default)]
    pub dns: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
