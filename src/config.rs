//! Global configuration parsing and validation.

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::store::search::SearchKey;
use crate::{AppError, Result};

/// Record store behaviour.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct StoreConfig {
    /// Simulated backend delay applied before every listing returns.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Number of sample deals generated at startup.
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            seed_count: default_seed_count(),
        }
    }
}

/// Fuzzy search settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Deal fields the query is matched against.
    #[serde(default = "default_search_keys")]
    pub keys: Vec<SearchKey>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keys: default_search_keys(),
        }
    }
}

fn default_latency_ms() -> u64 {
    500
}

fn default_seed_count() -> usize {
    100
}

fn default_search_keys() -> Vec<SearchKey> {
    vec![SearchKey::Title]
}

fn default_bind_address() -> String {
    "127.0.0.1".into()
}

fn default_http_port() -> u16 {
    3000
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// IP address the HTTP listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// HTTP port; `0` lets the OS choose.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Record store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            http_port: default_http_port(),
            store: StoreConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read, and
    /// `AppError::Config` if it contains invalid TOML or fails validation.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Socket address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `bind_address` is not an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|err| AppError::Config(format!("bind_address invalid: {err}")))?;
        Ok(SocketAddr::new(ip, self.http_port))
    }

    /// Simulated listing latency.
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.store.latency_ms)
    }

    fn validate(&self) -> Result<()> {
        self.socket_addr()?;

        if self.search.keys.is_empty() {
            return Err(AppError::Config("search.keys must not be empty".into()));
        }

        Ok(())
    }
}
