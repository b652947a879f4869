//! Reference-counted busy-state tracking.
//!
//! Any asynchronous workflow runs under an activity scope; the visible
//! busy indicator appears on the 0→1 transition of the scope count and
//! disappears when the count returns to 0. Scopes release on every exit
//! path (success, error, or the future being dropped) because the
//! release lives in `Drop`.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

/// The visible busy affordance the tracker drives.
///
/// Implementations are called exactly once per busy episode: `show` on
/// the 0→1 transition, `hide` when the count returns to 0.
pub trait ActivityIndicator: Send + Sync {
    /// The indicator becomes visible with the given message.
    fn show(&self, message: &str);

    /// The indicator is removed.
    fn hide(&self);
}

/// Indicator that reports busy transitions to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogIndicator;

impl ActivityIndicator for LogIndicator {
    fn show(&self, message: &str) {
        debug!(text = message, "busy indicator shown");
    }

    fn hide(&self) {
        debug!("busy indicator hidden");
    }
}

/// Reference-counted "work in progress" tracker.
///
/// Cloning shares the counter, so nested scopes on clones compose.
#[derive(Clone)]
pub struct ActivityTracker {
    inner: Arc<TrackerInner>,
}

struct TrackerInner {
    count: Mutex<usize>,
    indicator: Box<dyn ActivityIndicator>,
}

impl ActivityTracker {
    /// Creates a tracker driving the given indicator.
    pub fn new(indicator: impl ActivityIndicator + 'static) -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                count: Mutex::new(0),
                indicator: Box::new(indicator),
            }),
        }
    }

    /// Increments the count; shows the indicator on the 0→1 transition.
    pub fn show(&self, message: &str) {
        let mut count = self.lock_count();
        *count += 1;
        if *count == 1 {
            self.inner.indicator.show(message);
        }
    }

    /// Decrements the count, clamped at 0; hides the indicator on the
    /// transition to 0.
    pub fn hide(&self) {
        let mut count = self.lock_count();
        let before = *count;
        *count = before.saturating_sub(1);
        if before > 0 && *count == 0 {
            self.inner.indicator.hide();
        }
    }

    /// Opens a scope that holds the busy state until dropped.
    pub fn scope(&self, message: &str) -> ActivityScope {
        self.show(message);
        ActivityScope {
            tracker: self.clone(),
        }
    }

    /// Runs `operation` under a scope; the scope is released however the
    /// operation completes.
    pub async fn with_scope<F: Future>(&self, message: &str, operation: F) -> F::Output {
        let _scope = self.scope(message);
        operation.await
    }

    /// Number of currently open scopes.
    pub fn active_count(&self) -> usize {
        *self.lock_count()
    }

    /// Whether any scope is open.
    pub fn is_busy(&self) -> bool {
        self.active_count() > 0
    }

    fn lock_count(&self) -> MutexGuard<'_, usize> {
        self.inner.count.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// An open busy scope; dropping it releases the busy state.
pub struct ActivityScope {
    tracker: ActivityTracker,
}

impl Drop for ActivityScope {
    fn drop(&mut self) {
        self.tracker.hide();
    }
}
