//! Domains module containing business logic organized by bounded contexts.
//!
//! - **catalog**: category resolution against the upstream species API
//! - **views**: the screens that present catalog data

pub mod catalog;
pub mod views;
