//! Render boundary.
//!
//! Wraps a fallible render function so that a failure inside it degrades
//! to a fallback block instead of taking the surrounding page down with it.

use maud::{Markup, html};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::error;

use super::error::ViewError;

/// Message shown in place of content that failed to render.
pub const FALLBACK_MESSAGE: &str = "Something went wrong.";

/// Render `child`, substituting [`fallback`] if it returns an error or
/// panics.
pub fn render_boundary<F>(child: F) -> Markup
where
    F: FnOnce() -> Result<Markup, ViewError>,
{
    match panic::catch_unwind(AssertUnwindSafe(child)) {
        Ok(Ok(markup)) => markup,
        Ok(Err(e)) => {
            error!("Render failed: {}", e);
            fallback()
        }
        Err(payload) => {
            error!("Render panicked: {}", panic_message(payload.as_ref()));
            fallback()
        }
    }
}

/// The fallback block.
pub fn fallback() -> Markup {
    html! {
        div.fallback role="alert" {
            h2 { (FALLBACK_MESSAGE) }
        }
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_through_success() {
        let markup = render_boundary(|| Ok(html! { p { "fine" } }));
        assert_eq!(markup.into_string(), "<p>fine</p>");
    }

    #[test]
    fn test_error_renders_fallback() {
        let markup = render_boundary(|| Err(ViewError::render("broken")));
        let page = markup.into_string();
        assert!(page.contains(FALLBACK_MESSAGE));
        assert!(!page.contains("broken"));
    }

    #[test]
    fn test_panic_renders_fallback() {
        let markup = render_boundary(|| -> Result<Markup, ViewError> {
            let stats: Vec<u32> = Vec::new();
            Ok(html! { p { (stats[3]) } })
        });
        assert!(markup.into_string().contains(FALLBACK_MESSAGE));
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
    }
}
