//! Normalized catalog records.
//!
//! These are the shapes the rest of the crate works with. Upstream JSON is
//! decoded in `wire.rs` and converted into these types at the source
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One base statistic of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub base_value: u32,
}

/// A single catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u32,
    pub name: String,
    /// Front sprite URL. Some upstream records have none.
    pub image_url: Option<String>,
    pub stats: Vec<Stat>,
    pub types: Vec<String>,
}

impl Entry {
    /// Look up a statistic's base value by exact name.
    pub fn stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.base_value)
    }

    /// Sum of every base statistic.
    pub fn total_stats(&self) -> u32 {
        self.stats.iter().map(|s| s.base_value).sum()
    }

    /// Type names joined for display.
    pub fn type_list(&self) -> String {
        self.types.join(", ")
    }
}

/// How to address a single entry upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryRef {
    Id(u32),
    Name(String),
    /// Absolute URL as handed out by listing endpoints.
    Url(String),
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{}", id),
            Self::Name(name) => f.write_str(name),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// A named pointer returned by listing calls (index, generation, type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexItem {
    pub name: String,
    pub reference: EntryRef,
}

impl IndexItem {
    pub fn new(name: impl Into<String>, reference: EntryRef) -> Self {
        Self {
            name: name.into(),
            reference,
        }
    }
}
