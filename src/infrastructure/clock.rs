//! Clock adapters for time operations.
//!
//! Provides SystemClock implementation for production use.
//!
//! # Testing
//!
//! See `MockClock` and `MockScheduler` (in `crate::infrastructure::mocks`)
//! for controllable test doubles. Available with the `test-helpers` feature
//! or in test builds:
//!
//! ```toml
//! [dev-dependencies]
//! ui-pacing = { version = "*", features = ["test-helpers"] }
//! ```

use crate::application::ports::Clock;
use std::time::Instant;

/// System clock implementation using `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let t1 = clock.now();
        std::thread::sleep(Duration::from_millis(2));
        assert!(clock.now() > t1);
    }
}
