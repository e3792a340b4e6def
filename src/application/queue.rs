//! Transient notification queue.
//!
//! The queue owns every notification it shows: the entry, its timers and its
//! rendered representation on the [`RenderSurface`]. Callers only hold the
//! [`NotificationHandle`] returned by `notify`.
//!
//! Each notification moves through
//!
//! ```text
//! Visible --(auto_dismiss_after OR dismiss)--> Dismissing --(exit_duration)--> Removed
//! ```
//!
//! exactly once. Whichever of the auto-dismiss timer and `dismiss` comes first
//! wins; the other becomes a no-op.
//!
//! Showing a notification is best-effort. A missing or failing surface never
//! makes `notify` panic or return an error; the caller gets a detached handle.

use crate::application::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use crate::application::lock;
use crate::application::metrics::Metrics;
use crate::application::ports::{RenderSurface, Scheduler, SurfaceError, TimerToken};
use crate::domain::lifecycle::{DismissReason, NotificationState};
use crate::domain::notification::{
    DisplayOrder, Notification, NotificationHandle, NotificationId, NotificationSnapshot,
    SeedMessage, DEFAULT_AUTO_DISMISS, DEFAULT_EXIT_DURATION,
};
use crate::domain::severity::Severity;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

/// Error returned when building a NotificationQueue fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Auto-dismiss duration must be greater than zero
    ZeroAutoDismiss,
    /// Circuit breaker failure threshold must be greater than zero
    ZeroFailureThreshold,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::ZeroAutoDismiss => {
                write!(f, "auto_dismiss_after must be greater than 0")
            }
            BuildError::ZeroFailureThreshold => {
                write!(f, "circuit breaker failure_threshold must be greater than 0")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Configuration for a notification queue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QueueConfig {
    /// How long a notification stays visible before dismissing itself
    pub auto_dismiss_after: Duration,
    /// Length of the exit transition before removal
    pub exit_duration: Duration,
    /// Where new notifications are placed
    pub display_order: DisplayOrder,
    /// Consecutive surface failures before the queue stops rendering
    pub failure_threshold: u32,
    /// How long to skip the surface after it starts failing
    pub recovery_timeout: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        let breaker = CircuitBreakerConfig::default();
        Self {
            auto_dismiss_after: DEFAULT_AUTO_DISMISS,
            exit_duration: DEFAULT_EXIT_DURATION,
            display_order: DisplayOrder::default(),
            failure_threshold: breaker.failure_threshold,
            recovery_timeout: breaker.recovery_timeout,
        }
    }
}

impl QueueConfig {
    /// Check the configuration for values the queue cannot work with.
    ///
    /// # Errors
    /// Returns `BuildError` describing the first invalid field.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.auto_dismiss_after.is_zero() {
            return Err(BuildError::ZeroAutoDismiss);
        }
        if self.failure_threshold == 0 {
            return Err(BuildError::ZeroFailureThreshold);
        }
        Ok(())
    }

    fn circuit_breaker_config(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_threshold: self.failure_threshold,
            recovery_timeout: self.recovery_timeout,
        }
    }
}

/// Builder for constructing a `NotificationQueue`.
#[derive(Debug, Default)]
pub struct NotificationQueueBuilder {
    config: QueueConfig,
    surface: Option<Arc<dyn RenderSurface>>,
    metrics: Option<Metrics>,
}

impl NotificationQueueBuilder {
    /// Replace the whole configuration.
    pub fn with_config(mut self, config: QueueConfig) -> Self {
        self.config = config;
        self
    }

    /// Set how long notifications stay visible (default 5s).
    pub fn with_auto_dismiss_after(mut self, duration: Duration) -> Self {
        self.config.auto_dismiss_after = duration;
        self
    }

    /// Set the exit transition length (default 300ms).
    pub fn with_exit_duration(mut self, duration: Duration) -> Self {
        self.config.exit_duration = duration;
        self
    }

    /// Set where new notifications are placed (default newest last).
    pub fn with_display_order(mut self, order: DisplayOrder) -> Self {
        self.config.display_order = order;
        self
    }

    /// Attach the surface notifications render into.
    ///
    /// Without a surface every `notify` is a silent no-op.
    pub fn with_surface(mut self, surface: Arc<dyn RenderSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Configure when the queue gives up on a failing surface.
    pub fn with_circuit_breaker_config(mut self, config: CircuitBreakerConfig) -> Self {
        self.config.failure_threshold = config.failure_threshold;
        self.config.recovery_timeout = config.recovery_timeout;
        self
    }

    /// Report into a shared metrics tracker.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the queue on top of `scheduler`.
    ///
    /// # Errors
    /// Returns `BuildError` if the configuration is invalid.
    pub fn build(self, scheduler: Arc<dyn Scheduler>) -> Result<NotificationQueue, BuildError> {
        self.config.validate()?;

        let breaker = Arc::new(CircuitBreaker::with_config(
            self.config.circuit_breaker_config(),
        ));

        Ok(NotificationQueue {
            shared: Arc::new(Shared {
                config: self.config,
                scheduler,
                surface: self.surface,
                breaker,
                metrics: self.metrics.unwrap_or_default(),
                state: Mutex::new(QueueState::default()),
            }),
        })
    }
}

#[derive(Debug)]
struct Entry {
    notification: Notification,
    state: NotificationState,
    /// Auto-dismiss timer while visible, exit timer while dismissing
    timer: Option<TimerToken>,
}

#[derive(Debug, Default)]
struct QueueState {
    last_id: u64,
    /// In insertion order, oldest first
    entries: VecDeque<Entry>,
}

impl QueueState {
    fn find_mut(&mut self, id: NotificationId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.notification.id == id)
    }

    fn issued(&self, id: NotificationId) -> bool {
        id.get() != 0 && id.get() <= self.last_id
    }
}

#[derive(Debug)]
struct Shared {
    config: QueueConfig,
    scheduler: Arc<dyn Scheduler>,
    surface: Option<Arc<dyn RenderSurface>>,
    breaker: Arc<CircuitBreaker>,
    metrics: Metrics,
    state: Mutex<QueueState>,
}

/// Manages the visible lifetime of transient notifications.
///
/// Cloning is cheap; clones share the same queue.
///
/// # Example
/// ```
/// use ui_pacing::{NotificationQueue, Severity, TimerQueue, TracingSurface};
/// use std::sync::Arc;
///
/// let timers = Arc::new(TimerQueue::new());
/// let queue = NotificationQueue::builder()
///     .with_surface(Arc::new(TracingSurface::new()))
///     .build(timers.clone())
///     .unwrap();
///
/// let handle = queue.notify("Inquiry sent", Severity::Success);
/// assert_eq!(queue.len(), 1);
///
/// assert!(queue.dismiss(handle));
/// assert!(!queue.dismiss(handle)); // already dismissing
/// ```
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    shared: Arc<Shared>,
}

impl NotificationQueue {
    /// Create a builder with default configuration.
    pub fn builder() -> NotificationQueueBuilder {
        NotificationQueueBuilder::default()
    }

    /// Show a notification and start its auto-dismiss timer.
    ///
    /// Returns a detached handle, without raising, when the text is blank,
    /// no surface is attached, or the surface is unavailable or failing.
    pub fn notify(&self, text: impl Into<String>, severity: Severity) -> NotificationHandle {
        self.shared.notify(text.into(), severity)
    }

    /// Show a notification with the default severity ([`Severity::Info`]).
    pub fn notify_info(&self, text: impl Into<String>) -> NotificationHandle {
        self.notify(text, Severity::default())
    }

    /// Show server-rendered messages, e.g. flash messages present at page load.
    ///
    /// Level tags are mapped with [`Severity::from_tag_lossy`].
    pub fn seed<I>(&self, messages: I) -> Vec<NotificationHandle>
    where
        I: IntoIterator<Item = SeedMessage>,
    {
        messages
            .into_iter()
            .map(|message| {
                let severity = message.severity();
                self.notify(message.text, severity)
            })
            .collect()
    }

    /// Start dismissing a notification.
    ///
    /// Idempotent: returns false, and does nothing, if the notification is
    /// already dismissing, removed, detached or unknown to this queue.
    pub fn dismiss(&self, handle: NotificationHandle) -> bool {
        if handle.is_detached() {
            return false;
        }
        self.shared.begin_dismiss(handle.id(), DismissReason::User)
    }

    /// Dismiss every visible notification, e.g. before navigating away.
    ///
    /// # Returns
    /// The number of notifications this call started dismissing
    pub fn dismiss_all(&self) -> usize {
        let ids: Vec<NotificationId> = lock(&self.shared.state)
            .entries
            .iter()
            .filter(|e| e.state == NotificationState::Visible)
            .map(|e| e.notification.id)
            .collect();

        ids.into_iter()
            .filter(|id| self.shared.begin_dismiss(*id, DismissReason::Cleared))
            .count()
    }

    /// Current lifecycle state of a notification.
    ///
    /// Returns `None` for detached handles and handles this queue never issued.
    pub fn state(&self, handle: NotificationHandle) -> Option<NotificationState> {
        let state = lock(&self.shared.state);
        if !state.issued(handle.id()) {
            return None;
        }
        let found = state
            .entries
            .iter()
            .find(|e| e.notification.id == handle.id())
            .map(|e| e.state);
        // Issued ids are only ever missing after removal
        Some(found.unwrap_or(NotificationState::Removed))
    }

    /// Notifications still on the surface, in display order.
    pub fn visible(&self) -> Vec<NotificationSnapshot> {
        let state = lock(&self.shared.state);
        let snapshots = state.entries.iter().map(|e| NotificationSnapshot {
            notification: e.notification.clone(),
            state: e.state,
        });
        match self.shared.config.display_order {
            DisplayOrder::NewestLast => snapshots.collect(),
            DisplayOrder::NewestFirst => snapshots.rev().collect(),
        }
    }

    /// Number of notifications still on the surface (visible or dismissing).
    pub fn len(&self) -> usize {
        lock(&self.shared.state).entries.len()
    }

    /// Check if no notification is on the surface.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the queue configuration.
    pub fn config(&self) -> &QueueConfig {
        &self.shared.config
    }

    /// Get metrics for this queue.
    pub fn metrics(&self) -> &Metrics {
        &self.shared.metrics
    }

    /// Get the circuit breaker guarding the surface.
    pub fn circuit_breaker(&self) -> &Arc<CircuitBreaker> {
        &self.shared.breaker
    }
}

impl Shared {
    fn notify(self: &Arc<Self>, text: String, severity: Severity) -> NotificationHandle {
        if text.trim().is_empty() {
            tracing::debug!("empty notification text, nothing to show");
            self.metrics.record_skipped();
            return NotificationHandle::detached();
        }

        let Some(surface) = self.surface.as_ref() else {
            tracing::warn!(%severity, "no render surface attached, notification skipped");
            self.metrics.record_skipped();
            return NotificationHandle::detached();
        };

        let now = self.scheduler.now();
        if !self.breaker.allow_request(now) {
            tracing::debug!(%severity, "render surface circuit open, notification skipped");
            self.metrics.record_skipped();
            return NotificationHandle::detached();
        }

        if !surface.is_available() {
            tracing::warn!(%severity, "render surface unavailable, notification skipped");
            self.metrics.record_skipped();
            return NotificationHandle::detached();
        }

        let id = {
            let mut state = lock(&self.state);
            state.last_id += 1;
            NotificationId::new(state.last_id)
        };

        let notification = Notification {
            id,
            text,
            severity,
            created_at: now,
            auto_dismiss_after: self.config.auto_dismiss_after,
        };

        let order = self.config.display_order;
        let rendered = panic::catch_unwind(AssertUnwindSafe(|| {
            surface.append(&notification, order)
        }));

        match rendered {
            Ok(Ok(())) => self.breaker.record_success(),
            // Container gone is a page state, not a surface fault
            Ok(Err(SurfaceError::Unavailable)) => {
                tracing::warn!(%id, %severity, "render surface unavailable, notification skipped");
                self.metrics.record_skipped();
                return NotificationHandle::detached();
            }
            Ok(Err(error)) => {
                tracing::warn!(%id, %error, "failed to render notification");
                self.record_surface_failure();
                return NotificationHandle::detached();
            }
            Err(_) => {
                tracing::warn!(%id, "render surface panicked while appending notification");
                self.record_surface_failure();
                return NotificationHandle::detached();
            }
        }

        let mut state = lock(&self.state);
        let weak = Arc::downgrade(self);
        let timer = self.scheduler.schedule_after(
            self.config.auto_dismiss_after,
            Box::new(move || {
                if let Some(shared) = Weak::upgrade(&weak) {
                    shared.begin_dismiss(id, DismissReason::Timeout);
                }
            }),
        );
        state.entries.push_back(Entry {
            notification,
            state: NotificationState::Visible,
            timer: Some(timer),
        });
        drop(state);

        self.metrics.record_shown();
        tracing::debug!(%id, %severity, "notification shown");
        NotificationHandle::new(id)
    }

    fn begin_dismiss(self: &Arc<Self>, id: NotificationId, reason: DismissReason) -> bool {
        {
            let mut state = lock(&self.state);
            let Some(entry) = state.find_mut(id) else {
                return false;
            };
            if !entry.state.can_transition_to(NotificationState::Dismissing) {
                tracing::trace!(%id, state = %entry.state, %reason, "dismiss ignored");
                return false;
            }
            entry.state = NotificationState::Dismissing;
            if let Some(timer) = entry.timer.take() {
                // The timeout path is running inside its own timer
                if reason != DismissReason::Timeout {
                    self.scheduler.cancel(timer);
                }
            }
        }

        match reason {
            DismissReason::Timeout => self.metrics.record_timeout_dismissal(),
            DismissReason::User | DismissReason::Cleared => {
                self.metrics.record_manual_dismissal()
            }
        }
        tracing::debug!(%id, %reason, "notification dismissing");

        if let Some(surface) = self.surface.as_ref() {
            if panic::catch_unwind(AssertUnwindSafe(|| surface.begin_exit(id, reason))).is_err() {
                tracing::warn!(%id, "render surface panicked while starting exit transition");
                self.record_surface_failure();
            }
        }

        // Only the exit timer moves an entry out of Dismissing, so it is still there
        let mut state = lock(&self.state);
        let weak = Arc::downgrade(self);
        let timer = self.scheduler.schedule_after(
            self.config.exit_duration,
            Box::new(move || {
                if let Some(shared) = Weak::upgrade(&weak) {
                    shared.finish_removal(id);
                }
            }),
        );
        if let Some(entry) = state.find_mut(id) {
            entry.timer = Some(timer);
        }
        true
    }

    fn finish_removal(&self, id: NotificationId) {
        {
            let mut state = lock(&self.state);
            let Some(index) = state
                .entries
                .iter()
                .position(|e| e.notification.id == id)
            else {
                return;
            };
            if !state.entries[index]
                .state
                .can_transition_to(NotificationState::Removed)
            {
                return;
            }
            state.entries.remove(index);
        }

        self.metrics.record_removed();
        tracing::debug!(%id, "notification removed");

        if let Some(surface) = self.surface.as_ref() {
            if panic::catch_unwind(AssertUnwindSafe(|| surface.remove(id))).is_err() {
                tracing::warn!(%id, "render surface panicked while removing notification");
                self.record_surface_failure();
            }
        }
    }

    fn record_surface_failure(&self) {
        self.metrics.record_surface_failure();
        self.breaker.record_failure(self.scheduler.now());
    }
}
