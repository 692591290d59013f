//! Category resolution.
//!
//! Turns a category selection into an ordered list of entries by picking a
//! query strategy and fanning out detail fetches against the source.
//!
//! All strategies are fail-fast: if any single detail fetch fails, the
//! whole resolution fails and no partial list is returned.

use futures::stream::{self, StreamExt, TryStreamExt};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

use super::category::{CategorySelection, GenerationMap, StatisticKey};
use super::error::{CatalogError, CatalogResult};
use super::models::{Entry, EntryRef};
use super::source::CatalogSource;

/// Default number of detail fetches allowed in flight at once.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 32;

/// Resolves category selections and single entries against a source.
#[derive(Clone)]
pub struct CategoryResolver {
    source: Arc<dyn CatalogSource>,
    generations: GenerationMap,
    max_concurrent: usize,
}

impl CategoryResolver {
    /// Create a resolver over the given source.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            generations: GenerationMap::default(),
            max_concurrent: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    /// Limit how many detail fetches run concurrently.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Replace the generation label mapping.
    pub fn with_generation_map(mut self, generations: GenerationMap) -> Self {
        self.generations = generations;
        self
    }

    /// Fetch exactly one entry by id.
    #[instrument(skip(self))]
    pub async fn resolve_entry(&self, id: u32) -> CatalogResult<Entry> {
        if id == 0 {
            return Err(CatalogError::not_found("pokemon #0"));
        }
        self.source.entry(&EntryRef::Id(id)).await
    }

    /// Resolve a raw (category key, sub-filter) pair from the URL.
    pub async fn resolve_category(
        &self,
        category: &str,
        filter: &str,
    ) -> CatalogResult<Vec<Entry>> {
        let selection = CategorySelection::parse(category, filter)?;
        self.resolve_selection(&selection).await
    }

    /// Resolve a parsed selection.
    #[instrument(skip(self), fields(category = %selection.key()))]
    pub async fn resolve_selection(
        &self,
        selection: &CategorySelection,
    ) -> CatalogResult<Vec<Entry>> {
        let started = Instant::now();

        let entries = match selection {
            CategorySelection::Number(range) => {
                debug!("Fetching {} entries by id", range.len());
                self.fetch_all(range.ids().map(EntryRef::Id)).await?
            }
            CategorySelection::Letter(range) => {
                let index = self.source.index().await?;
                let refs: Vec<EntryRef> = index
                    .into_iter()
                    .filter(|item| range.matches(&item.name))
                    .map(|item| item.reference)
                    .collect();
                debug!(
                    "{} index entries start within {}-{}",
                    refs.len(),
                    range.start,
                    range.end
                );
                self.fetch_all(refs).await?
            }
            CategorySelection::Generation(label) => {
                let upstream_id = self.generations.upstream_id(*label).ok_or_else(|| {
                    CatalogError::invalid_filter(
                        "generation",
                        label.0.to_string(),
                        "no upstream generation for this label",
                    )
                })?;
                let species = self.source.generation(upstream_id).await?;
                self.fetch_all(species.into_iter().map(|s| s.reference))
                    .await?
            }
            CategorySelection::Type(name) => {
                let members = self.source.type_members(&name.0).await?;
                let mut seen = HashSet::new();
                let refs: Vec<EntryRef> = members
                    .into_iter()
                    .map(|m| m.reference)
                    .filter(|r| seen.insert(r.clone()))
                    .collect();
                self.fetch_all(refs).await?
            }
            CategorySelection::Statistics(stat) => {
                let index = self.source.index().await?;
                let mut entries = self
                    .fetch_all(index.into_iter().map(|item| item.reference))
                    .await?;
                rank_by_statistic(&mut entries, stat);
                entries
            }
        };

        info!(
            "Resolved {} entries in {}ms",
            entries.len(),
            started.elapsed().as_millis()
        );

        Ok(entries)
    }

    /// Fetch detail for every reference concurrently, keeping input order.
    /// `refs` is pulled lazily, so a failure stops further dispatch.
    async fn fetch_all<I>(&self, refs: I) -> CatalogResult<Vec<Entry>>
    where
        I: IntoIterator<Item = EntryRef>,
        I::IntoIter: Send,
    {
        let source = &self.source;
        stream::iter(refs)
            .map(|reference| async move { source.entry(&reference).await })
            .buffered(self.max_concurrent)
            .try_collect()
            .await
    }
}

/// Sort descending by a statistic. The sort is stable, so ties keep their
/// incoming order. Entries lacking the statistic go last.
pub fn rank_by_statistic(entries: &mut [Entry], stat: &StatisticKey) {
    entries.sort_by_key(|entry| {
        Reverse(match stat {
            StatisticKey::Named(name) => entry.stat(name),
            StatisticKey::Total => Some(entry.total_stats()),
        })
    });
}
