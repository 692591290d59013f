//! View-specific error types.

use thiserror::Error;

/// Errors raised while rendering a screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The screen state does not describe anything renderable.
    #[error("Inconsistent screen state: {0}")]
    InconsistentState(String),

    /// Any other rendering failure.
    #[error("Render failed: {0}")]
    Render(String),
}

impl ViewError {
    /// Create a new "inconsistent state" error.
    pub fn inconsistent(msg: impl Into<String>) -> Self {
        Self::InconsistentState(msg.into())
    }

    /// Create a new render error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
