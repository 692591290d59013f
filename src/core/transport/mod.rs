//! Transport layer.
//!
//! The viewer is served over HTTP only:
//! - **config**: bind address and CORS settings
//! - **http**: axum router with the HTML screens and JSON endpoints
//! - **service**: starts the transport for a [`CatalogServer`](crate::core::CatalogServer)

mod config;
mod error;
pub mod http;
mod service;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
