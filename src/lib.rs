//! Pokédex Catalog Viewer
//!
//! A server-rendered viewer for the public PokeAPI species catalog. Entries
//! can be browsed by national number range, initial letter, generation,
//! elemental type, or ranked by a base statistic.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the shared server, and the HTTP transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **catalog**: Category parsing, the upstream source, and the resolver
//!   - **views**: HTML screens, screen state, and the render boundary
//!
//! # Example
//!
//! ```rust,no_run
//! use pokedex_web::core::{CatalogServer, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = CatalogServer::new(config)?;
//!     let fire = server.resolve_category("type", "fire").await?;
//!     println!("{} fire types", fire.len());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{CatalogServer, Config, Error, Result};
