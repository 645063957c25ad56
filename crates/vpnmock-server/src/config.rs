//! Server configuration
//!
//! Defaults, optionally overlaid by a TOML file named in `VPNMOCK_CONFIG`,
//! with the listen port finally overridable through `PORT`.
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 8080
//! log_filter = "vpnmock_server=info"
//! seed_file = "fixtures/seed.json"
//! ```

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Environment variable naming the optional TOML config file
pub const CONFIG_ENV: &str = "VPNMOCK_CONFIG";

/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "PORT";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_FILTER: &str = "vpnmock_server=debug,vpnmock_core=debug,tower_http=debug";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub host: IpAddr,
    /// Listen port
    pub port: u16,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Seed fixtures replacing the built-in set
    pub seed_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            seed_file: None,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let port = std::env::var(PORT_ENV).ok();
        Self::resolve(path.as_deref(), port.as_deref())
    }

    /// Build from an optional config file and an optional port override
    pub fn resolve(path: Option<&Path>, port: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };

        if let Some(raw) = port {
            config.port = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.to_string()))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Load from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port.to_string()));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),
}
