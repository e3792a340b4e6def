//! Mock clock for testing.

use crate::application::lock;
use crate::application::ports::Clock;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Clock whose time only moves when a test says so.
///
/// All clones share the same underlying time value, so a clock handed to a
/// [`TimerQueue`](crate::TimerQueue) can still be advanced from the test.
///
/// # Examples
///
/// ```
/// use ui_pacing::infrastructure::mocks::MockClock;
/// use ui_pacing::Clock;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let clock = MockClock::new(start);
/// assert_eq!(clock.now(), start);
///
/// clock.advance(Duration::from_millis(16));
/// assert_eq!(clock.elapsed(), Duration::from_millis(16));
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    current_time: Arc<Mutex<Instant>>,
}

impl MockClock {
    /// Create a mock clock starting at a specific instant.
    pub fn new(start: Instant) -> Self {
        Self {
            start,
            current_time: Arc::new(Mutex::new(start)),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, duration: Duration) {
        *lock(&self.current_time) += duration;
    }

    /// Set the clock to a specific instant.
    ///
    /// Instants before the current time are ignored; time never runs backwards.
    pub fn set(&self, instant: Instant) {
        let mut time = lock(&self.current_time);
        if instant > *time {
            *time = instant;
        }
    }

    /// The instant this clock was created with.
    pub fn start(&self) -> Instant {
        self.start
    }

    /// Time advanced since creation.
    pub fn elapsed(&self) -> Duration {
        self.now() - self.start
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        *lock(&self.current_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_clock() {
        let start = Instant::now();
        let clock = MockClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_secs(10));
        assert_eq!(clock.now(), start + Duration::from_secs(10));

        clock.set(start + Duration::from_secs(100));
        assert_eq!(clock.elapsed(), Duration::from_secs(100));
    }

    #[test]
    fn test_set_never_rewinds() {
        let start = Instant::now();
        let clock = MockClock::new(start);
        clock.advance(Duration::from_secs(5));
        clock.set(start);
        assert_eq!(clock.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn test_clones_share_time() {
        let clock = MockClock::new(Instant::now());
        let other = clock.clone();
        other.advance(Duration::from_millis(30));
        assert_eq!(clock.elapsed(), Duration::from_millis(30));
    }
}
