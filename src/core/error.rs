//! Error types and handling for the catalog viewer.
//!
//! This module defines a unified error type that can represent errors from
//! the catalog domain, the transport, and startup configuration.

use thiserror::Error;

/// A specialized Result type for crate-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the catalog domain.
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::domains::catalog::CatalogError),

    /// Error from the HTTP transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
