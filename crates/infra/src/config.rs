//! Configuration loading and representation.
//!
//! Everything comes from the process environment. The connection string and database
//! name are mandatory; the rest have defaults.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_PHARMACIES_COLLECTION: &str = "pharmacies";
pub const DEFAULT_CUSTOMERS_COLLECTION: &str = "customers";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Where the document store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub pharmacies_collection: String,
    pub customers_collection: String,
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let store = StoreConfig {
            uri: required("MONGO_URI")?,
            database: required("DB_NAME")?,
            pharmacies_collection: get("PHARMACIES_COLLECTION")
                .unwrap_or_else(|| DEFAULT_PHARMACIES_COLLECTION.to_string()),
            customers_collection: get("CUSTOMERS_COLLECTION")
                .unwrap_or_else(|| DEFAULT_CUSTOMERS_COLLECTION.to_string()),
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            name: "BIND_ADDR",
            reason: format!("{bind_raw:?}: {e}"),
        })?;

        Ok(Self { store, bind_addr })
    }
}
