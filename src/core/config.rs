//! Configuration management for the catalog viewer.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::HttpConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{info, warn};

use crate::domains::catalog::resolver::DEFAULT_MAX_CONCURRENT_FETCHES;

/// Main configuration structure.
///
/// Organized by concern: server identity, upstream catalog access,
/// logging, and the HTTP transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Upstream catalog API configuration.
    pub catalog: CatalogConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP transport configuration.
    pub transport: HttpConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server, shown in logs and the page footer.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Upstream catalog API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the species API, without trailing slash.
    pub base_url: String,

    /// Number of records requested by the bulk index call.
    pub index_limit: u32,

    /// Per-request timeout.
    pub request_timeout_secs: u64,

    /// Retries on transient failure (timeouts, 429, 5xx).
    pub max_retries: u32,

    /// Detail fetches allowed in flight during one resolution.
    pub max_concurrent_fetches: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            index_limit: 10250,
            request_timeout_secs: 10,
            max_retries: 1,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "pokedex-web".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            catalog: CatalogConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `POKEDEX_`.
    /// For example: `POKEDEX_API_BASE_URL`, `POKEDEX_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("POKEDEX_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("POKEDEX_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(base_url) = std::env::var("POKEDEX_API_BASE_URL") {
            config.catalog.base_url = base_url.trim_end_matches('/').to_string();
            info!("Upstream API base URL: {}", config.catalog.base_url);
        }

        config.catalog.index_limit = parsed_env("POKEDEX_INDEX_LIMIT", config.catalog.index_limit);
        config.catalog.request_timeout_secs = parsed_env(
            "POKEDEX_REQUEST_TIMEOUT_SECS",
            config.catalog.request_timeout_secs,
        );
        config.catalog.max_retries = parsed_env("POKEDEX_MAX_RETRIES", config.catalog.max_retries);
        config.catalog.max_concurrent_fetches = parsed_env(
            "POKEDEX_MAX_CONCURRENT_FETCHES",
            config.catalog.max_concurrent_fetches,
        );

        // Load transport configuration from environment
        config.transport = HttpConfig::from_env();

        config
    }
}

/// Read and parse an environment variable, keeping `default` when it is
/// unset or malformed.
fn parsed_env<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring {}={:?}: not a valid value, using {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
