//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the domain types with time and rendering:
//! - Pacer (debounce/throttle wrappers)
//! - Notification queue (lifecycle and timers of transient messages)
//! - Metrics and the surface circuit breaker
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod circuit_breaker;
pub mod metrics;
pub mod pacer;
pub mod ports;
pub mod queue;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a panicking callback poisoned it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
