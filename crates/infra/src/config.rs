//! Configuration loading and representation.
//!
//! Everything comes from environment variables; `main` loads a `.env` file
//! first when one is present.

use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable '{0}'")]
    Missing(&'static str),

    #[error("invalid value for '{name}': {message}")]
    Invalid { name: &'static str, message: String },
}

/// Which persistence adapter backs the services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let use_persistent = match lookup("USE_PERSISTENT_STORES") {
            Some(raw) => raw.parse::<bool>().map_err(|e| ConfigError::Invalid {
                name: "USE_PERSISTENT_STORES",
                message: e.to_string(),
            })?,
            None => false,
        };

        let store = if use_persistent {
            let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let max_connections = match lookup("DB_MAX_CONNECTIONS") {
                Some(raw) => raw.parse::<u32>().map_err(|e| ConfigError::Invalid {
                    name: "DB_MAX_CONNECTIONS",
                    message: e.to_string(),
                })?,
                None => DEFAULT_MAX_CONNECTIONS,
            };
            StoreBackend::Postgres {
                database_url,
                max_connections,
            }
        } else {
            StoreBackend::InMemory
        };

        Ok(Self { bind_addr, store })
    }
}
