//! Catalog server: shared state behind every HTTP handler.
//!
//! The server owns the configuration and the [`CategoryResolver`]. Handlers
//! in `core/transport/http.rs` hold a cheap clone of it.

use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::{Error, Result};
use crate::domains::catalog::{
    CatalogResult, CatalogSource, CategoryResolver, CategorySelection, Entry, PokeApiSource,
};

/// The catalog viewer's application core.
#[derive(Clone)]
pub struct CatalogServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Resolver over the upstream source.
    resolver: Arc<CategoryResolver>,
}

impl CatalogServer {
    /// Create a server talking to the configured upstream API.
    pub fn new(config: Config) -> Result<Self> {
        if config.catalog.max_concurrent_fetches == 0 {
            return Err(Error::config("max_concurrent_fetches must be at least 1"));
        }

        let source = PokeApiSource::new(&config.catalog)?;
        info!("Upstream catalog: {}", source.base_url());
        Ok(Self::with_source(config, Arc::new(source)))
    }

    /// Create a server over an arbitrary source.
    pub fn with_source(config: Config, source: Arc<dyn CatalogSource>) -> Self {
        let resolver =
            CategoryResolver::new(source).with_max_concurrent(config.catalog.max_concurrent_fetches);

        Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Resolve a parsed category selection.
    #[instrument(skip(self))]
    pub async fn browse(&self, selection: &CategorySelection) -> CatalogResult<Vec<Entry>> {
        self.resolver.resolve_selection(selection).await
    }

    /// Resolve a raw (category key, filter) pair.
    pub async fn resolve_category(&self, category: &str, filter: &str) -> CatalogResult<Vec<Entry>> {
        self.resolver.resolve_category(category, filter).await
    }

    /// Fetch one entry for the detail screen.
    pub async fn entry(&self, id: u32) -> CatalogResult<Entry> {
        self.resolver.resolve_entry(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::CatalogError;
    use crate::domains::catalog::testing::{StaticSource, entry};
    use tokio_test::{assert_err, assert_ok};

    fn server() -> CatalogServer {
        let source = StaticSource::new(vec![entry(1, "bulbasaur"), entry(2, "ivysaur")]);
        CatalogServer::with_source(Config::default(), Arc::new(source))
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.catalog.max_concurrent_fetches = 0;
        assert!(matches!(CatalogServer::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_identity() {
        let server = server();
        assert_eq!(server.name(), server.config().server.name);
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_delegates_to_resolver() {
        let server = server();

        let entries = assert_ok!(server.resolve_category("number", "1-2").await);
        assert_eq!(entries.len(), 2);

        let selection = assert_ok!(CategorySelection::parse("letter", "A-G"));
        let entries = assert_ok!(server.browse(&selection).await);
        assert_eq!(entries[0].name, "bulbasaur");

        let err = assert_err!(server.entry(3).await);
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}
