//! Scheduler pumped by the host's event loop.
//!
//! `TimerQueue` never spawns threads or tasks. The host calls
//! [`TimerQueue::run_due`] from its own loop (a frame callback, an idle
//! handler, a `select!` arm) and uses [`TimerQueue::next_deadline`] to decide
//! how long it may sleep. This matches the single-threaded, cooperative model
//! of a UI thread: every callback runs on the thread that pumps the queue.

use crate::application::lock;
use crate::application::ports::{Clock, Scheduler, TimerCallback, TimerToken};
use crate::infrastructure::clock::SystemClock;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Default)]
struct Timers {
    next_seq: u64,
    /// Ordered by deadline, then by scheduling order
    by_deadline: BTreeMap<(Instant, u64), TimerCallback>,
    deadlines: HashMap<u64, Instant>,
}

/// A scheduler whose timers run when the host pumps it.
pub struct TimerQueue<C: Clock = SystemClock> {
    clock: C,
    timers: Mutex<Timers>,
}

impl TimerQueue<SystemClock> {
    /// Create a timer queue on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for TimerQueue<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimerQueue<C> {
    /// Create a timer queue reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            timers: Mutex::new(Timers::default()),
        }
    }

    /// Run every timer whose deadline has passed, earliest first.
    ///
    /// Timers scheduled by the callbacks themselves wait for the next pump,
    /// so a callback that keeps rescheduling itself cannot starve the host.
    ///
    /// # Returns
    /// The number of callbacks run
    pub fn run_due(&self) -> usize {
        let now = self.clock.now();
        let limit = lock(&self.timers).next_seq;
        let mut ran = 0;

        loop {
            let callback = {
                let mut timers = lock(&self.timers);
                let key = timers
                    .by_deadline
                    .keys()
                    .take_while(|(deadline, _)| *deadline <= now)
                    .find(|(_, seq)| *seq < limit)
                    .copied();
                match key {
                    Some(key) => {
                        timers.deadlines.remove(&key.1);
                        timers.by_deadline.remove(&key)
                    }
                    None => None,
                }
            };

            // Lock released: callbacks may schedule or cancel
            match callback {
                Some(callback) => {
                    callback();
                    ran += 1;
                }
                None => break,
            }
        }

        if ran > 0 {
            tracing::trace!(ran, "timer queue pumped");
        }
        ran
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        lock(&self.timers)
            .by_deadline
            .keys()
            .next()
            .map(|(deadline, _)| *deadline)
    }

    /// Time until the earliest pending deadline (zero if already due).
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(self.clock.now()))
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        lock(&self.timers).by_deadline.len()
    }

    /// Check if no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: Clock> fmt::Debug for TimerQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("clock", &self.clock)
            .field("pending", &self.len())
            .finish()
    }
}

impl<C: Clock> Clock for TimerQueue<C> {
    fn now(&self) -> Instant {
        self.clock.now()
    }
}

impl<C: Clock> Scheduler for TimerQueue<C> {
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerToken {
        let deadline = self.clock.now() + delay;
        let mut timers = lock(&self.timers);
        let seq = timers.next_seq;
        timers.next_seq += 1;
        timers.by_deadline.insert((deadline, seq), callback);
        timers.deadlines.insert(seq, deadline);
        TimerToken::new(seq)
    }

    fn cancel(&self, token: TimerToken) -> bool {
        let mut timers = lock(&self.timers);
        match timers.deadlines.remove(&token.get()) {
            Some(deadline) => timers
                .by_deadline
                .remove(&(deadline, token.get()))
                .is_some(),
            None => false,
        }
    }
}
