//! In-memory catalog source for tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::error::{CatalogError, CatalogResult};
use super::models::{Entry, EntryRef, IndexItem, Stat};
use super::source::CatalogSource;
use super::wire::trailing_id;

const TEST_BASE: &str = "https://pokeapi.test/api/v2";

/// Build an entry with default stats.
pub fn entry(id: u32, name: &str) -> Entry {
    entry_with_stats(
        id,
        name,
        &[("hp", 45), ("attack", 49), ("defense", 49), ("speed", 45)],
    )
}

/// Build an entry with the given stats and a single `normal` type.
pub fn entry_with_stats(id: u32, name: &str, stats: &[(&str, u32)]) -> Entry {
    Entry {
        id,
        name: name.to_string(),
        image_url: Some(format!("https://img.test/{}.png", id)),
        stats: stats
            .iter()
            .map(|(n, v)| Stat {
                name: n.to_string(),
                base_value: *v,
            })
            .collect(),
        types: vec!["normal".to_string()],
    }
}

/// A fixed dataset served from memory.
#[derive(Clone, Default)]
pub struct StaticSource {
    entries: Vec<Entry>,
    generations: HashMap<u32, Vec<IndexItem>>,
    types: HashMap<String, Vec<IndexItem>>,
    failing: HashSet<u32>,
    panicking: HashSet<u32>,
    delays: HashMap<u32, u64>,
    calls: Arc<AtomicUsize>,
}

impl StaticSource {
    /// Serve `entries`; the bulk index lists them in the given order.
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Upstream-style URL for an entry id.
    pub fn url_for(id: u32) -> EntryRef {
        EntryRef::Url(format!("{}/pokemon/{}/", TEST_BASE, id))
    }

    pub fn with_generation(mut self, upstream_id: u32, species: Vec<IndexItem>) -> Self {
        self.generations.insert(upstream_id, species);
        self
    }

    pub fn with_type(mut self, name: &str, members: Vec<IndexItem>) -> Self {
        self.types.insert(name.to_string(), members);
        self
    }

    /// Make detail fetches for `id` fail with a network error.
    pub fn failing(mut self, id: u32) -> Self {
        self.failing.insert(id);
        self
    }

    /// Make detail fetches for `id` panic.
    pub fn panicking(mut self, id: u32) -> Self {
        self.panicking.insert(id);
        self
    }

    /// Delay detail fetches per id, in milliseconds.
    pub fn with_delays(mut self, delays: impl IntoIterator<Item = (u32, u64)>) -> Self {
        self.delays.extend(delays);
        self
    }

    /// Shared counter of every call made against this source.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    fn find(&self, reference: &EntryRef) -> Option<&Entry> {
        match reference {
            EntryRef::Id(id) => self.entries.iter().find(|e| e.id == *id),
            EntryRef::Name(name) => self.entries.iter().find(|e| &e.name == name),
            EntryRef::Url(url) => trailing_id(url).and_then(|id| self.find(&EntryRef::Id(id))),
        }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn entry(&self, reference: &EntryRef) -> CatalogResult<Entry> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let found = self
            .find(reference)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(format!("pokemon {}", reference)))?;

        if let Some(ms) = self.delays.get(&found.id) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }

        if self.panicking.contains(&found.id) {
            panic!("pokemon {}: corrupt record", reference);
        }

        if self.failing.contains(&found.id) {
            return Err(CatalogError::network(format!(
                "pokemon {}: connection reset",
                reference
            )));
        }

        Ok(found)
    }

    async fn index(&self) -> CatalogResult<Vec<IndexItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .entries
            .iter()
            .map(|e| IndexItem::new(e.name.clone(), Self::url_for(e.id)))
            .collect())
    }

    async fn generation(&self, upstream_id: u32) -> CatalogResult<Vec<IndexItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.generations
            .get(&upstream_id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(format!("generation {}", upstream_id)))
    }

    async fn type_members(&self, type_name: &str) -> CatalogResult<Vec<IndexItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.types
            .get(type_name)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(format!("type {}", type_name)))
    }
}
