//! View layer: HTML screens, screen state, and the render boundary.
//!
//! Screens are rendered on the server with maud. Route handlers live in
//! `core/transport/http.rs` and call into this module.

pub mod boundary;
pub mod error;
pub mod menus;
pub mod pages;
pub mod state;

pub use boundary::{FALLBACK_MESSAGE, render_boundary};
pub use error::ViewError;
pub use pages::{CategoryView, render_page};
pub use state::{Phase, RequestToken, Screen, ScreenState};
