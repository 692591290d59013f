//! Catalog-specific error types.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while resolving catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The category key is not one of the known categories.
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// The sub-filter value does not fit the category's shape.
    #[error("Invalid filter '{value}' for category {category}: {reason}")]
    InvalidFilter {
        category: String,
        value: String,
        reason: String,
    },

    /// The upstream source has no such record.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport or response parsing failure.
    #[error("Network error: {0}")]
    Network(String),
}

impl CatalogError {
    /// Create a new "invalid category" error.
    pub fn invalid_category(key: impl Into<String>) -> Self {
        Self::InvalidCategory(key.into())
    }

    /// Create a new "invalid filter" error.
    pub fn invalid_filter(
        category: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFilter {
            category: category.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "not found" error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a new network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}
