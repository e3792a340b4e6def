//! Scheduler backed by Tokio timers.
//!
//! Each scheduled callback becomes a task that sleeps on the runtime's timer
//! and then runs the callback. Time is read from `tokio::time::Instant`, so a
//! paused test runtime drives both timers and `now()`.

use crate::application::lock;
use crate::application::ports::{Clock, Scheduler, TimerCallback, TimerToken};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// Error returned when a scheduler cannot be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Called outside the context of a Tokio runtime
    NoRuntime,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::NoRuntime => write!(f, "no Tokio runtime is running"),
        }
    }
}

impl std::error::Error for SchedulerError {}

#[derive(Debug, Default)]
struct Tasks {
    next_token: AtomicU64,
    pending: Mutex<HashMap<TimerToken, AbortHandle>>,
}

/// A scheduler that spawns one sleeping task per timer.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
    tasks: Arc<Tasks>,
}

impl TokioScheduler {
    /// Create a scheduler spawning onto `handle`.
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            tasks: Arc::new(Tasks::default()),
        }
    }

    /// Create a scheduler on the runtime the caller is running in.
    ///
    /// # Errors
    /// Returns `SchedulerError::NoRuntime` outside a Tokio runtime.
    pub fn current() -> Result<Self, SchedulerError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| SchedulerError::NoRuntime)
    }

    /// Number of timers that have not fired or been cancelled yet.
    pub fn pending(&self) -> usize {
        lock(&self.tasks.pending).len()
    }
}

impl Clock for TokioScheduler {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerToken {
        let token = TimerToken::new(self.tasks.next_token.fetch_add(1, Ordering::Relaxed));
        let tasks = Arc::clone(&self.tasks);

        // Held across spawn so the task cannot finish before it is registered
        let mut pending = lock(&self.tasks.pending);
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if lock(&tasks.pending).remove(&token).is_some() {
                callback();
            }
        });
        pending.insert(token, task.abort_handle());
        token
    }

    fn cancel(&self, token: TimerToken) -> bool {
        match lock(&self.tasks.pending).remove(&token) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }
}
