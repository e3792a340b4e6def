//! Deterministic scheduler for testing.

use crate::application::ports::{Clock, Scheduler, TimerCallback, TimerToken};
use crate::infrastructure::mocks::clock::MockClock;
use crate::infrastructure::timer_queue::TimerQueue;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fake-clock scheduler.
///
/// Time stands still until [`MockScheduler::advance`] is called. Advancing
/// steps through every timer whose deadline falls inside the interval, in
/// deadline order, with the clock set to that timer's deadline while it runs.
/// Timers scheduled by a callback are picked up by the same advance if they
/// fall inside the interval.
///
/// # Examples
///
/// ```
/// use ui_pacing::infrastructure::mocks::MockScheduler;
/// use ui_pacing::throttle;
/// use std::time::{Duration, Instant};
///
/// let scheduler = MockScheduler::new(Instant::now());
/// let scroll = throttle(|_y: u32| {}, Duration::from_millis(16), scheduler.shared());
///
/// assert!(scroll.call(0).is_invoked());
/// assert!(scroll.call(4).is_dropped());
///
/// scheduler.advance(Duration::from_millis(16));
/// assert!(scroll.call(20).is_invoked());
/// ```
#[derive(Debug, Clone)]
pub struct MockScheduler {
    clock: MockClock,
    timers: Arc<TimerQueue<MockClock>>,
}

impl MockScheduler {
    /// Create a mock scheduler whose clock starts at `start`.
    pub fn new(start: Instant) -> Self {
        let clock = MockClock::new(start);
        Self {
            timers: Arc::new(TimerQueue::with_clock(clock.clone())),
            clock,
        }
    }

    /// A shareable handle to pass where a `Scheduler` is expected.
    pub fn shared(&self) -> Arc<dyn Scheduler> {
        Arc::new(self.clone())
    }

    /// Move time forward by `duration`, running every timer that comes due.
    ///
    /// # Returns
    /// The number of callbacks run
    pub fn advance(&self, duration: Duration) -> usize {
        let target = self.clock.now() + duration;
        let mut ran = 0;

        while let Some(deadline) = self.timers.next_deadline() {
            if deadline > target {
                break;
            }
            self.clock.set(deadline);
            ran += self.timers.run_due();
        }

        self.clock.set(target);
        ran
    }

    /// The instant the clock started at.
    pub fn start(&self) -> Instant {
        self.clock.start()
    }

    /// Time advanced since creation.
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }
}

impl Clock for MockScheduler {
    fn now(&self) -> Instant {
        self.clock.now()
    }
}

impl Scheduler for MockScheduler {
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerToken {
        self.timers.schedule_after(delay, callback)
    }

    fn cancel(&self, token: TimerToken) -> bool {
        self.timers.cancel(token)
    }
}
