//! Seed fixtures
//!
//! The store starts from these records on every launch. A JSON file with
//! the same shape can replace the built-in set; it is only ever read.

use crate::model::{Profile, Protocol, Rule, Server};
use serde::Deserialize;
use serde_json::Map;
use std::path::Path;

/// Initial servers, rules and profiles
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl SeedData {
    /// Load from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SeedError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Load from JSON string
    pub fn from_json(content: &str) -> Result<Self, SeedError> {
        serde_json::from_str(content).map_err(|e| SeedError::Parse(e.to_string()))
    }

    fn server(
        id: &str,
        name: &str,
        host: &str,
        port: u16,
        protocol: Protocol,
        country: &str,
    ) -> Server {
        Server {
            id: id.to_string(),
            name: Some(name.to_string()),
            host: Some(host.to_string()),
            port: Some(port),
            protocol: Some(protocol),
            country: Some(country.to_string()),
            status: "online".to_string(),
            extra: Map::new(),
        }
    }

    fn default_servers() -> Vec<Server> {
        [
            ("1", "US Server 1", "us1.vpn.example.com", 1194, Protocol::OpenVpn, "US"),
            ("2", "UK Server 1", "uk1.vpn.example.com", 51820, Protocol::WireGuard, "UK"),
            ("3", "Germany Server 1", "de1.vpn.example.com", 500, Protocol::Ikev2, "DE"),
            ("4", "Japan Server 1", "jp1.vpn.example.com", 51820, Protocol::WireGuard, "JP"),
        ]
        .into_iter()
        .map(|(id, name, host, port, protocol, country)| {
            Self::server(id, name, host, port, protocol, country)
        })
        .collect()
    }

    fn default_rules() -> Vec<Rule> {
        vec![
            Rule {
                id: "1".to_string(),
                name: Some("Streaming via US".to_string()),
                pattern: Some("*.netflix.com".to_string()),
                server_id: Some("1".to_string()),
                priority: Some(1),
                enabled: true,
                extra: Map::new(),
            },
            Rule {
                id: "2".to_string(),
                name: Some("Work via Germany".to_string()),
                pattern: Some("*.corp.example.com".to_string()),
                server_id: Some("3".to_string()),
                priority: Some(2),
                enabled: false,
                extra: Map::new(),
            },
        ]
    }

    fn default_profiles() -> Vec<Profile> {
        vec![
            Profile {
                id: "1".to_string(),
                name: "Default".to_string(),
                default_server: Some("1".to_string()),
                kill_switch: true,
                dns: "1.1.1.1".to_string(),
                extra: Map::new(),
            },
            Profile {
                id: "2".to_string(),
                name: "Gaming".to_string(),
                default_server: Some("4".to_string()),
                kill_switch: false,
                dns: "8.8.8.8".to_string(),
                extra: Map::new(),
            },
        ]
    }
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            servers: Self::default_servers(),
            rules: Self::default_rules(),
            profiles: Self::default_profiles(),
        }
    }
}

/// Seed loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum SeedError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
