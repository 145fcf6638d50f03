//! Configuration loading.
//!
//! minircd takes a single optional TOML file:
//!
//! ```toml
//! [server]
//! name = "server"
//!
//! [listen]
//! address = "0.0.0.0:6667"
//! ```
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working relay on port 6667 announcing itself as `server`.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server identity.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
}

/// Server identity settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Name used as the source of numeric replies.
    #[serde(default = "default_server_name")]
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> ServerConfig {
        ServerConfig {
            name: default_server_name(),
        }
    }
}

/// Network listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "0.0.0.0:6667").
    #[serde(default = "default_listen_address")]
    pub address: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> ListenConfig {
        ListenConfig {
            address: default_listen_address(),
        }
    }
}

fn default_server_name() -> String {
    "server".to_string()
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 6667))
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
