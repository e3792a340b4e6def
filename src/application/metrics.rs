//! Observability metrics for pacing and notifications.
//!
//! Provides counters for monitoring how often handlers run and how
//! notifications come and go.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking pacing and notification statistics.
///
/// All metrics use atomic operations for thread-safe updates and reads.
/// A single `Metrics` can be shared between several wrappers and a queue
/// by cloning it; clones share the same counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Wrapped function invocations
    calls_invoked: AtomicU64,
    /// Debounced calls replaced by a later call
    calls_coalesced: AtomicU64,
    /// Throttled calls discarded during a lock window
    calls_dropped: AtomicU64,
    /// Notifications rendered on a surface
    notifications_shown: AtomicU64,
    /// Notifications that could not be shown
    notifications_skipped: AtomicU64,
    /// Dismissals started by the auto-dismiss timer
    dismissed_by_timeout: AtomicU64,
    /// Dismissals started by `dismiss` or `dismiss_all`
    dismissed_manually: AtomicU64,
    /// Notifications that finished their exit transition
    notifications_removed: AtomicU64,
    /// Errors or panics reported by the render surface
    surface_failures: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                calls_invoked: AtomicU64::new(0),
                calls_coalesced: AtomicU64::new(0),
                calls_dropped: AtomicU64::new(0),
                notifications_shown: AtomicU64::new(0),
                notifications_skipped: AtomicU64::new(0),
                dismissed_by_timeout: AtomicU64::new(0),
                dismissed_manually: AtomicU64::new(0),
                notifications_removed: AtomicU64::new(0),
                surface_failures: AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn record_invoked(&self) {
        self.inner.calls_invoked.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_coalesced(&self) {
        self.inner.calls_coalesced.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.inner.calls_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_shown(&self) {
        self.inner
            .notifications_shown
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_skipped(&self) {
        self.inner
            .notifications_skipped
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_timeout_dismissal(&self) {
        self.inner
            .dismissed_by_timeout
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_manual_dismissal(&self) {
        self.inner.dismissed_manually.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_removed(&self) {
        self.inner
            .notifications_removed
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_surface_failure(&self) {
        self.inner.surface_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the number of wrapped function invocations.
    pub fn calls_invoked(&self) -> u64 {
        self.inner.calls_invoked.load(Ordering::Relaxed)
    }

    /// Get the number of debounced calls replaced before running.
    pub fn calls_coalesced(&self) -> u64 {
        self.inner.calls_coalesced.load(Ordering::Relaxed)
    }

    /// Get the number of throttled calls dropped.
    pub fn calls_dropped(&self) -> u64 {
        self.inner.calls_dropped.load(Ordering::Relaxed)
    }

    /// Get the number of notifications shown.
    pub fn notifications_shown(&self) -> u64 {
        self.inner.notifications_shown.load(Ordering::Relaxed)
    }

    /// Get the number of notifications that could not be shown.
    pub fn notifications_skipped(&self) -> u64 {
        self.inner.notifications_skipped.load(Ordering::Relaxed)
    }

    /// Get the number of notifications removed.
    pub fn notifications_removed(&self) -> u64 {
        self.inner.notifications_removed.load(Ordering::Relaxed)
    }

    /// Get the number of render surface failures.
    pub fn surface_failures(&self) -> u64 {
        self.inner.surface_failures.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calls_invoked: self.calls_invoked(),
            calls_coalesced: self.calls_coalesced(),
            calls_dropped: self.calls_dropped(),
            notifications_shown: self.notifications_shown(),
            notifications_skipped: self.notifications_skipped(),
            dismissed_by_timeout: self.inner.dismissed_by_timeout.load(Ordering::Relaxed),
            dismissed_manually: self.inner.dismissed_manually.load(Ordering::Relaxed),
            notifications_removed: self.notifications_removed(),
            surface_failures: self.surface_failures(),
        }
    }

    /// Reset all metrics to zero.
    ///
    /// Useful for testing or when starting a new monitoring period.
    pub fn reset(&self) {
        let inner = &self.inner;
        for counter in [
            &inner.calls_invoked,
            &inner.calls_coalesced,
            &inner.calls_dropped,
            &inner.notifications_shown,
            &inner.notifications_skipped,
            &inner.dismissed_by_timeout,
            &inner.dismissed_manually,
            &inner.notifications_removed,
            &inner.surface_failures,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    /// Handler invocations that actually ran
    pub calls_invoked: u64,
    /// Debounced calls replaced by a later call
    pub calls_coalesced: u64,
    /// Throttled calls discarded inside the window
    pub calls_dropped: u64,
    /// Notifications rendered on the surface
    pub notifications_shown: u64,
    /// Notifications not shown (blank text, no surface, surface unavailable or circuit open)
    pub notifications_skipped: u64,
    /// Dismissals started by the auto-dismiss timer
    pub dismissed_by_timeout: u64,
    /// Dismissals started by `dismiss` or `dismiss_all`
    pub dismissed_manually: u64,
    /// Notifications whose exit transition finished
    pub notifications_removed: u64,
    /// Surface errors and panics
    pub surface_failures: u64,
}

impl MetricsSnapshot {
    /// Total calls that reached a wrapper (invoked + coalesced + dropped).
    pub fn total_calls(&self) -> u64 {
        self.calls_invoked
            .saturating_add(self.calls_coalesced)
            .saturating_add(self.calls_dropped)
    }

    /// Fraction of calls that did not run (0.0 to 1.0).
    ///
    /// Returns 0.0 if no calls have been made. Debounced calls still pending
    /// are not counted.
    pub fn suppression_rate(&self) -> f64 {
        let total = self.total_calls();
        if total == 0 {
            0.0
        } else {
            (self.calls_coalesced + self.calls_dropped) as f64 / total as f64
        }
    }

    /// Notifications currently on the surface, as seen by these counters.
    pub fn notifications_in_flight(&self) -> u64 {
        self.notifications_shown
            .saturating_sub(self.notifications_removed)
    }
}
