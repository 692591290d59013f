//! Transport service - starts the HTTP transport.

use tracing::info;

use super::http::HttpTransport;
use super::{HttpConfig, TransportResult};
use crate::core::CatalogServer;

/// Transport service - manages the transport layer for the viewer.
pub struct TransportService {
    config: HttpConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Start serving. Blocks until the transport is shut down.
    pub async fn run(self, server: CatalogServer) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());
        HttpTransport::new(self.config).run(server).await
    }
}
