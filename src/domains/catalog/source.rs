//! Upstream data source.
//!
//! [`CatalogSource`] is the seam between the resolver and the outside
//! world. [`PokeApiSource`] is the production implementation; tests plug
//! in an in-memory source instead.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::error::{CatalogError, CatalogResult};
use super::models::{Entry, EntryRef, IndexItem};
use super::wire::{GenerationDto, IndexPageDto, PokemonDto, TypeDto};
use crate::core::config::CatalogConfig;

/// Base delay before a retry; doubles on each further attempt.
const BASE_DELAY_MS: u64 = 250;

/// Ceiling for a single retry delay.
const MAX_DELAY_MS: u64 = 30_000;

/// Delay before retry number `attempt` (starting at 1).
fn backoff_delay(attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_millis(BASE_DELAY_MS.saturating_mul(factor).min(MAX_DELAY_MS))
}

/// Read-only access to the species dataset.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch full detail for one entry.
    async fn entry(&self, reference: &EntryRef) -> CatalogResult<Entry>;

    /// Fetch the complete name index in one bulk call.
    async fn index(&self) -> CatalogResult<Vec<IndexItem>>;

    /// Fetch the species listed in a generation, by upstream generation id.
    async fn generation(&self, upstream_id: u32) -> CatalogResult<Vec<IndexItem>>;

    /// Fetch the entries listed under an elemental type.
    async fn type_members(&self, type_name: &str) -> CatalogResult<Vec<IndexItem>>;
}

/// Outcome of a single failed request attempt.
enum AttemptError {
    /// Worth trying again (timeouts, 429, 5xx).
    Retryable(String),
    /// Retrying will not help.
    Final(CatalogError),
}

/// PokeAPI over HTTP.
#[derive(Debug, Clone)]
pub struct PokeApiSource {
    client: reqwest::Client,
    base_url: String,
    index_limit: u32,
    max_retries: u32,
}

impl PokeApiSource {
    /// Build a source from the catalog configuration.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("pokedex_web/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            index_limit: config.index_limit,
            max_retries: config.max_retries,
        })
    }

    /// Get the upstream base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn entry_url(&self, reference: &EntryRef) -> String {
        match reference {
            EntryRef::Id(id) => format!("{}/pokemon/{}", self.base_url, id),
            EntryRef::Name(name) => format!("{}/pokemon/{}", self.base_url, name),
            EntryRef::Url(url) => url.clone(),
        }
    }

    /// GET a JSON document, retrying transient failures.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> CatalogResult<T> {
        let mut attempt = 0u32;

        loop {
            match self.try_get(url, what).await {
                Ok(value) => return Ok(value),
                Err(AttemptError::Final(e)) => return Err(e),
                Err(AttemptError::Retryable(msg)) => {
                    if attempt >= self.max_retries {
                        return Err(CatalogError::network(format!("{}: {}", what, msg)));
                    }
                    attempt = attempt.saturating_add(1);
                    let delay = backoff_delay(attempt);
                    warn!(
                        "Request for {} failed ({}), retry {}/{} in {}ms",
                        what,
                        msg,
                        attempt,
                        self.max_retries,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Attempt a single request.
    async fn try_get<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, AttemptError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AttemptError::Retryable("request timed out".to_string())
            } else if e.is_connect() {
                AttemptError::Retryable("connection failed".to_string())
            } else {
                AttemptError::Final(CatalogError::network(e.to_string()))
            }
        })?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(AttemptError::Final(CatalogError::not_found(what)));
        }

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(AttemptError::Retryable(format!("upstream returned {}", status)));
        }

        if !status.is_success() {
            return Err(AttemptError::Final(CatalogError::network(format!(
                "{}: upstream returned {}",
                what, status
            ))));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AttemptError::Retryable(e.to_string()))?;

        debug!("Fetched {} ({} bytes)", what, body.len());

        serde_json::from_slice(&body).map_err(|e| {
            AttemptError::Final(CatalogError::network(format!(
                "{}: JSON parse error: {}",
                what, e
            )))
        })
    }
}

#[async_trait]
impl CatalogSource for PokeApiSource {
    #[instrument(skip(self, reference), fields(reference = %reference))]
    async fn entry(&self, reference: &EntryRef) -> CatalogResult<Entry> {
        let url = self.entry_url(reference);
        let dto: PokemonDto = self
            .get_json(&url, &format!("pokemon {}", reference))
            .await?;
        Ok(dto.into())
    }

    #[instrument(skip(self))]
    async fn index(&self) -> CatalogResult<Vec<IndexItem>> {
        let url = format!("{}/pokemon?limit={}", self.base_url, self.index_limit);
        let page: IndexPageDto = self.get_json(&url, "pokemon index").await?;
        Ok(page.into_items())
    }

    #[instrument(skip(self))]
    async fn generation(&self, upstream_id: u32) -> CatalogResult<Vec<IndexItem>> {
        let url = format!("{}/generation/{}", self.base_url, upstream_id);
        let generation: GenerationDto = self
            .get_json(&url, &format!("generation {}", upstream_id))
            .await?;
        Ok(generation.into_items())
    }

    #[instrument(skip(self))]
    async fn type_members(&self, type_name: &str) -> CatalogResult<Vec<IndexItem>> {
        let url = format!("{}/type/{}", self.base_url, type_name);
        let kind: TypeDto = self
            .get_json(&url, &format!("type {}", type_name))
            .await?;
        Ok(kind.into_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> PokeApiSource {
        let config = CatalogConfig {
            base_url: "https://pokeapi.example/api/v2/".to_string(),
            ..CatalogConfig::default()
        };
        PokeApiSource::new(&config).unwrap()
    }

    #[test]
    fn test_backoff_doubles_and_saturates() {
        assert_eq!(backoff_delay(1), Duration::from_millis(250));
        assert_eq!(backoff_delay(2), Duration::from_millis(500));
        assert_eq!(backoff_delay(4), Duration::from_millis(2000));
        assert_eq!(backoff_delay(80), Duration::from_millis(MAX_DELAY_MS));
        assert_eq!(backoff_delay(u32::MAX), Duration::from_millis(MAX_DELAY_MS));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(source().base_url(), "https://pokeapi.example/api/v2");
    }

    #[test]
    fn test_entry_urls() {
        let source = source();
        assert_eq!(
            source.entry_url(&EntryRef::Id(25)),
            "https://pokeapi.example/api/v2/pokemon/25"
        );
        assert_eq!(
            source.entry_url(&EntryRef::Name("mew".to_string())),
            "https://pokeapi.example/api/v2/pokemon/mew"
        );
        assert_eq!(
            source.entry_url(&EntryRef::Url("https://other/pokemon/1/".to_string())),
            "https://other/pokemon/1/"
        );
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_network_error() {
        let config = CatalogConfig {
            // Port 9 on loopback is reserved for discard and normally closed.
            base_url: "http://127.0.0.1:9/api/v2".to_string(),
            request_timeout_secs: 2,
            max_retries: 0,
            ..CatalogConfig::default()
        };
        let source = PokeApiSource::new(&config).unwrap();

        let err = source.entry(&EntryRef::Id(1)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }
}
