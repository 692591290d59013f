//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the catalog
//! viewer, including error handling, configuration, the shared server state,
//! and the HTTP transport.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{CatalogConfig, Config};
pub use error::{Error, Result};
pub use server::CatalogServer;
pub use transport::{HttpConfig, TransportService};
