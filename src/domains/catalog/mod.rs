//! Catalog domain: category resolution over the upstream species API.
//!
//! This module provides:
//! - Typed category selections parsed from URL strings
//! - The [`CatalogSource`] seam and its PokeAPI implementation
//! - The [`CategoryResolver`] that runs one query strategy per category

pub mod category;
pub mod error;
pub mod models;
pub mod resolver;
pub mod source;
mod wire;

#[cfg(test)]
pub(crate) mod testing;

pub use category::{
    CategoryKey, CategorySelection, GenerationLabel, GenerationMap, IdRange, LetterRange,
    StatisticKey, TypeName,
};
pub use error::{CatalogError, CatalogResult};
pub use models::{Entry, EntryRef, IndexItem, Stat};
pub use resolver::{CategoryResolver, rank_by_statistic};
pub use source::{CatalogSource, PokeApiSource};
