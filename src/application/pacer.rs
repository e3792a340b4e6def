//! Debounce and throttle wrappers for event handlers.
//!
//! Both wrappers keep the handler's argument type and only change *when* the
//! handler runs. Multiple arguments are passed as a tuple.
//!
//! - [`Debounced`] defers every call by its wait and only runs the last call
//!   of a burst (trailing edge).
//! - [`Throttled`] runs the first call immediately and drops every call that
//!   arrives before its window has elapsed (leading edge).
//!
//! Each wrapper owns exactly one timer slot. Clones share that slot, so a
//! wrapper can be handed to several event sources and still behave as one
//! logical handler.

use crate::application::lock;
use crate::application::metrics::Metrics;
use crate::application::ports::{Scheduler, TimerToken};
use crate::domain::policy::{CallDecision, Pacing};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync + 'static>;

#[derive(Debug, Default)]
struct TimerSlot {
    /// Bumped whenever the pending timer is replaced or cancelled
    generation: u64,
    pending: Option<TimerToken>,
}

/// Wrap `f` so it only runs after `wait` has passed without another call.
///
/// # Example
/// ```
/// use ui_pacing::{debounce, TimerQueue};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// let timers = Arc::new(TimerQueue::new());
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let search = debounce(
///     move |query: String| sink.lock().unwrap().push(query),
///     Duration::ZERO,
///     timers.clone(),
/// );
/// search.call("ap".to_string());
/// search.call("apartment".to_string());
///
/// timers.run_due();
/// assert_eq!(*seen.lock().unwrap(), vec!["apartment".to_string()]);
/// ```
pub fn debounce<A, F>(f: F, wait: Duration, scheduler: Arc<dyn Scheduler>) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced::new(f, wait, scheduler)
}

/// Wrap `f` so it runs at most once per `limit`, dropping excess calls.
pub fn throttle<A, F>(f: F, limit: Duration, scheduler: Arc<dyn Scheduler>) -> Throttled<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Throttled::new(f, limit, scheduler)
}

/// Wrap `f` according to a [`Pacing`] policy.
pub fn pace<A, F>(f: F, pacing: Pacing, scheduler: Arc<dyn Scheduler>) -> Paced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    match pacing {
        Pacing::Debounce(wait) => Paced::Debounced(Debounced::new(f, wait, scheduler)),
        Pacing::Throttle(limit) => Paced::Throttled(Throttled::new(f, limit, scheduler)),
    }
}

/// A debounced handler (trailing edge, last call wins).
pub struct Debounced<A> {
    f: Callback<A>,
    wait: Duration,
    scheduler: Arc<dyn Scheduler>,
    slot: Arc<Mutex<TimerSlot>>,
    metrics: Metrics,
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
            wait: self.wait,
            scheduler: Arc::clone(&self.scheduler),
            slot: Arc::clone(&self.slot),
            metrics: self.metrics.clone(),
        }
    }
}

impl<A> std::fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.wait)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl<A: Send + 'static> Debounced<A> {
    /// Create a debounced wrapper.
    pub fn new<F>(f: F, wait: Duration, scheduler: Arc<dyn Scheduler>) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            f: Arc::new(f),
            wait,
            scheduler,
            slot: Arc::new(Mutex::new(TimerSlot::default())),
            metrics: Metrics::new(),
        }
    }

    /// Report into a shared metrics tracker.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Schedule `f(args)` for `wait` from now, discarding any pending call.
    ///
    /// Always returns [`CallDecision::Scheduled`].
    pub fn call(&self, args: A) -> CallDecision {
        let mut slot = lock(&self.slot);

        if let Some(previous) = slot.pending.take() {
            self.scheduler.cancel(previous);
            self.metrics.record_coalesced();
            tracing::trace!(timer = previous.get(), "debounced call replaced");
        }

        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;

        let f = Arc::clone(&self.f);
        let shared = Arc::clone(&self.slot);
        let metrics = self.metrics.clone();

        let token = self.scheduler.schedule_after(
            self.wait,
            Box::new(move || {
                {
                    let mut slot = lock(&shared);
                    // A newer call or a cancel got here first
                    if slot.generation != generation || slot.pending.is_none() {
                        return;
                    }
                    slot.pending = None;
                }
                metrics.record_invoked();
                f(args);
            }),
        );
        slot.pending = Some(token);

        tracing::trace!(
            timer = token.get(),
            wait_ms = self.wait.as_millis() as u64,
            "debounced call scheduled"
        );
        CallDecision::Scheduled
    }

    /// Drop the pending call, if any.
    ///
    /// # Returns
    /// True if a call was pending
    pub fn cancel(&self) -> bool {
        let mut slot = lock(&self.slot);
        slot.generation = slot.generation.wrapping_add(1);
        match slot.pending.take() {
            Some(token) => {
                self.scheduler.cancel(token);
                tracing::trace!(timer = token.get(), "debounced call cancelled");
                true
            }
            None => false,
        }
    }

    /// Check if a call is waiting to run.
    pub fn is_pending(&self) -> bool {
        lock(&self.slot).pending.is_some()
    }

    /// The quiet period required before the handler runs.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// The metrics this wrapper reports into.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/// A throttled handler (leading edge, excess calls dropped).
pub struct Throttled<A> {
    f: Callback<A>,
    limit: Duration,
    scheduler: Arc<dyn Scheduler>,
    slot: Arc<Mutex<TimerSlot>>,
    metrics: Metrics,
}

impl<A> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
            limit: self.limit,
            scheduler: Arc::clone(&self.scheduler),
            slot: Arc::clone(&self.slot),
            metrics: self.metrics.clone(),
        }
    }
}

impl<A> std::fmt::Debug for Throttled<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttled")
            .field("limit", &self.limit)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl<A: Send + 'static> Throttled<A> {
    /// Create a throttled wrapper.
    pub fn new<F>(f: F, limit: Duration, scheduler: Arc<dyn Scheduler>) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            f: Arc::new(f),
            limit,
            scheduler,
            slot: Arc::new(Mutex::new(TimerSlot::default())),
            metrics: Metrics::new(),
        }
    }

    /// Report into a shared metrics tracker.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Run `f(args)` now unless the window from a previous run is still open.
    ///
    /// A zero limit never locks, so every call is invoked.
    pub fn call(&self, args: A) -> CallDecision {
        if !self.limit.is_zero() {
            let mut slot = lock(&self.slot);
            if slot.pending.is_some() {
                self.metrics.record_dropped();
                tracing::trace!("throttled call dropped");
                return CallDecision::Dropped;
            }

            slot.generation = slot.generation.wrapping_add(1);
            let generation = slot.generation;
            let shared = Arc::clone(&self.slot);

            let token = self.scheduler.schedule_after(
                self.limit,
                Box::new(move || {
                    let mut slot = lock(&shared);
                    if slot.generation == generation {
                        slot.pending = None;
                    }
                }),
            );
            slot.pending = Some(token);
        }

        // Lock released before running so `f` may call back into the wrapper
        self.metrics.record_invoked();
        (self.f)(args);
        CallDecision::Invoked
    }

    /// Check if the throttle window is currently open.
    pub fn is_locked(&self) -> bool {
        lock(&self.slot).pending.is_some()
    }

    /// The minimum spacing between runs.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// The metrics this wrapper reports into.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/// A handler paced by either strategy, chosen at runtime.
pub enum Paced<A> {
    Debounced(Debounced<A>),
    Throttled(Throttled<A>),
}

impl<A> Clone for Paced<A> {
    fn clone(&self) -> Self {
        match self {
            Paced::Debounced(d) => Paced::Debounced(d.clone()),
            Paced::Throttled(t) => Paced::Throttled(t.clone()),
        }
    }
}

impl<A> std::fmt::Debug for Paced<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Paced::Debounced(d) => d.fmt(f),
            Paced::Throttled(t) => t.fmt(f),
        }
    }
}

impl<A: Send + 'static> Paced<A> {
    /// Forward a call to the underlying wrapper.
    pub fn call(&self, args: A) -> CallDecision {
        match self {
            Paced::Debounced(d) => d.call(args),
            Paced::Throttled(t) => t.call(args),
        }
    }

    /// Report into a shared metrics tracker.
    pub fn with_metrics(self, metrics: Metrics) -> Self {
        match self {
            Paced::Debounced(d) => Paced::Debounced(d.with_metrics(metrics)),
            Paced::Throttled(t) => Paced::Throttled(t.with_metrics(metrics)),
        }
    }

    /// The policy this wrapper implements.
    pub fn pacing(&self) -> Pacing {
        match self {
            Paced::Debounced(d) => Pacing::Debounce(d.wait()),
            Paced::Throttled(t) => Pacing::Throttle(t.limit()),
        }
    }
}
