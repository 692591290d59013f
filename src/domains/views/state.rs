//! Screen state and stale-result guarding.
//!
//! A screen moves `Idle -> Loading -> Loaded`. Every `begin()` issues a new
//! request token, and a result is only accepted when it settles with the
//! token that is still current. A slow, older request that finishes after
//! a newer one has started is dropped instead of overwriting the display.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Lifecycle phase of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing selected yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The current request settled, with a result or an error.
    Loaded,
}

/// Identifies one in-flight request on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Per-screen UI state.
#[derive(Debug, Clone)]
pub struct ScreenState<T> {
    phase: Phase,
    result: Option<T>,
    error: Option<String>,
    token: RequestToken,
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            result: None,
            error: None,
            token: RequestToken(0),
        }
    }
}

impl<T> ScreenState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any in flight.
    pub fn begin(&mut self) -> RequestToken {
        self.token = RequestToken(self.token.0 + 1);
        self.phase = Phase::Loading;
        self.result = None;
        self.error = None;
        self.token
    }

    /// Settle a request. Returns `false` and leaves the state untouched if
    /// `token` is not the current one.
    pub fn settle<E: Display>(&mut self, token: RequestToken, outcome: Result<T, E>) -> bool {
        if token != self.token || self.phase != Phase::Loading {
            debug!(
                "Discarding stale result for request {:?} (current {:?})",
                token, self.token
            );
            return false;
        }

        match outcome {
            Ok(value) => self.result = Some(value),
            Err(e) => self.error = Some(e.to_string()),
        }
        self.phase = Phase::Loaded;
        true
    }

    /// Return to `Idle`, invalidating any request in flight.
    pub fn reset(&mut self) {
        self.token = RequestToken(self.token.0 + 1);
        self.phase = Phase::Idle;
        self.result = None;
        self.error = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn token(&self) -> RequestToken {
        self.token
    }
}

/// A screen shared between the code that starts loads and the code that
/// renders it.
#[derive(Debug)]
pub struct Screen<T> {
    state: Arc<Mutex<ScreenState<T>>>,
}

impl<T> Clone for Screen<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> Default for Screen<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(ScreenState::new())),
        }
    }
}

impl<T: Clone + Send> Screen<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `request` as the screen's current load. The lock is not held
    /// while the request is pending, so a later `load` can supersede it.
    /// Returns whether the outcome was applied.
    pub async fn load<F, E>(&self, request: F) -> bool
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let token = self.state.lock().await.begin();
        let outcome = request.await;
        self.state.lock().await.settle(token, outcome)
    }

    /// Copy of the current state for rendering.
    pub async fn snapshot(&self) -> ScreenState<T> {
        self.state.lock().await.clone()
    }

    pub async fn reset(&self) {
        self.state.lock().await.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_idle_to_loading_to_loaded() {
        let mut state: ScreenState<u32> = ScreenState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.result().is_none());

        let token = state.begin();
        assert_eq!(state.phase(), Phase::Loading);

        assert!(state.settle::<String>(token, Ok(7)));
        assert_eq!(state.phase(), Phase::Loaded);
        assert_eq!(state.result(), Some(&7));
        assert!(state.error().is_none());
    }

    #[test]
    fn test_failure_is_loaded_with_error() {
        let mut state: ScreenState<u32> = ScreenState::new();
        let token = state.begin();
        assert!(state.settle(token, Err("upstream down")));
        assert_eq!(state.phase(), Phase::Loaded);
        assert_eq!(state.error(), Some("upstream down"));
    }

    #[test]
    fn test_stale_token_is_discarded() {
        let mut state: ScreenState<&str> = ScreenState::new();
        let first = state.begin();
        let second = state.begin();

        assert!(state.settle::<String>(second, Ok("new")));
        assert!(!state.settle::<String>(first, Ok("old")));
        assert_eq!(state.result(), Some(&"new"));
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let mut state: ScreenState<u32> = ScreenState::new();
        let token = state.begin();
        state.reset();
        assert!(!state.settle::<String>(token, Ok(1)));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_slow_older_load_does_not_overwrite_newer() {
        let screen: Screen<&str> = Screen::new();

        let slow = {
            let screen = screen.clone();
            tokio::spawn(async move {
                screen
                    .load(async {
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok::<_, String>("old")
                    })
                    .await
            })
        };

        // Let the slow load take its token first.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(screen.load(async { Ok::<_, String>("new") }).await);

        assert!(!slow.await.unwrap());
        let state = screen.snapshot().await;
        assert_eq!(state.phase(), Phase::Loaded);
        assert_eq!(state.result(), Some(&"new"));
    }
}
