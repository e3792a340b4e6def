//! # ui-pacing
//!
//! Timing primitives for UI event loops: debounce/throttle wrappers for event
//! handlers, and a queue of transient notifications that dismiss themselves.
//!
//! Both components take their timers from a [`Scheduler`] port and, for
//! notifications, render into a [`RenderSurface`] port. Nothing reads
//! ambient globals, so everything runs deterministically under the
//! fake-clock [`MockScheduler`](infrastructure::mocks::MockScheduler).
//!
//! ## Quick Start
//!
//! ```rust
//! use ui_pacing::{debounce, throttle, NotificationQueue, Severity, TimerQueue, TracingSurface};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! // The host event loop pumps this queue with `timers.run_due()`
//! let timers = Arc::new(TimerQueue::new());
//!
//! let on_scroll = throttle(
//!     |offset: f64| println!("navbar scrolled: {}", offset > 100.0),
//!     Duration::from_millis(16),
//!     timers.clone(),
//! );
//! let on_resize = debounce(
//!     |(width, _height): (u32, u32)| println!("close mobile menu: {}", width >= 1024),
//!     Duration::from_millis(250),
//!     timers.clone(),
//! );
//! on_scroll.call(120.0);
//! on_resize.call((1280, 720));
//!
//! let messages = NotificationQueue::builder()
//!     .with_surface(Arc::new(TracingSurface::new()))
//!     .build(timers.clone())
//!     .expect("valid config");
//! let handle = messages.notify("Your inquiry was sent", Severity::Success);
//! messages.dismiss(handle);
//! ```
//!
//! ## Rate Limiting
//!
//! - [`debounce`]: trailing edge. Every call replaces the pending one; the
//!   handler runs once the calls have been quiet for the wait, with the last
//!   call's arguments.
//! - [`throttle`]: leading edge. The first call runs immediately; calls
//!   during the following window are dropped, not replayed.
//! - [`pace`]: choose either from a [`Pacing`] value.
//!
//! Handlers with several arguments take a tuple. Handler results are not
//! returned; use a channel or shared cell if a result is needed.
//!
//! ```rust
//! use ui_pacing::infrastructure::mocks::MockScheduler;
//! use ui_pacing::debounce;
//! use std::sync::{Arc, Mutex};
//! use std::time::{Duration, Instant};
//!
//! let scheduler = MockScheduler::new(Instant::now());
//! let last = Arc::new(Mutex::new(None));
//! let sink = Arc::clone(&last);
//! let search = debounce(
//!     move |query: &'static str| *sink.lock().unwrap() = Some(query),
//!     Duration::from_millis(100),
//!     scheduler.shared(),
//! );
//!
//! search.call("a");
//! scheduler.advance(Duration::from_millis(30));
//! search.call("ap");
//! scheduler.advance(Duration::from_millis(30));
//! search.call("apt");
//! scheduler.advance(Duration::from_millis(100));
//!
//! assert_eq!(*last.lock().unwrap(), Some("apt"));
//! ```
//!
//! ## Notifications
//!
//! Each notification moves `Visible -> Dismissing -> Removed` exactly once.
//! The auto-dismiss timer (5s by default) and [`NotificationQueue::dismiss`]
//! race; whichever comes first wins and the other is a no-op. The
//! `Dismissing` state lasts for the exit transition (300ms by default).
//!
//! Notifications are best-effort. Without a surface, with an unavailable
//! surface, or while the surface's circuit breaker is open, `notify` returns
//! a detached handle and logs a warning instead of failing.
//!
//! ```rust
//! use ui_pacing::infrastructure::mocks::{MockScheduler, MockSurface};
//! use ui_pacing::{NotificationQueue, NotificationState, SeedMessage};
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//!
//! let scheduler = MockScheduler::new(Instant::now());
//! let queue = NotificationQueue::builder()
//!     .with_surface(Arc::new(MockSurface::new()))
//!     .build(scheduler.shared())
//!     .unwrap();
//!
//! // Flash messages rendered by the server at page load
//! let handles = queue.seed([SeedMessage::new("Welcome back", "success")]);
//!
//! scheduler.advance(Duration::from_secs(5));
//! assert_eq!(queue.state(handles[0]), Some(NotificationState::Dismissing));
//! scheduler.advance(Duration::from_millis(300));
//! assert_eq!(queue.state(handles[0]), Some(NotificationState::Removed));
//! ```
//!
//! ## Schedulers
//!
//! - [`TimerQueue`]: pumped by the host event loop, single-threaded.
//! - `TokioScheduler` (feature `async`, on by default): one sleeping task per
//!   timer.
//! - `MockScheduler` (feature `test-helpers`): fake clock for tests.
//!
//! ## Observability
//!
//! All components log through `tracing` and count into a shared [`Metrics`]:
//!
//! ```rust
//! # use ui_pacing::{throttle, Metrics, TimerQueue};
//! # use std::sync::Arc;
//! # use std::time::Duration;
//! let metrics = Metrics::new();
//! let timers = Arc::new(TimerQueue::new());
//! let handler =
//!     throttle(|_: ()| {}, Duration::from_secs(1), timers).with_metrics(metrics.clone());
//! handler.call(());
//! handler.call(());
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.calls_invoked, 1);
//! assert_eq!(snapshot.calls_dropped, 1);
//! ```

// Domain layer - pure types
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    lifecycle::{DismissReason, NotificationState},
    notification::{
        DisplayOrder, Notification, NotificationHandle, NotificationId, NotificationSnapshot,
        SeedMessage, DEFAULT_AUTO_DISMISS, DEFAULT_EXIT_DURATION,
    },
    policy::{CallDecision, Pacing},
    severity::{ParseSeverityError, Severity},
};

pub use application::{
    circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState},
    metrics::{Metrics, MetricsSnapshot},
    pacer::{debounce, pace, throttle, Debounced, Paced, Throttled},
    ports::{Clock, RenderSurface, Scheduler, SurfaceError, TimerCallback, TimerToken},
    queue::{BuildError, NotificationQueue, NotificationQueueBuilder, QueueConfig},
};

pub use infrastructure::{clock::SystemClock, surface::TracingSurface, timer_queue::TimerQueue};

#[cfg(feature = "async")]
pub use infrastructure::tokio_scheduler::{SchedulerError, TokioScheduler};
