//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports.

use crate::domain::lifecycle::DismissReason;
use crate::domain::notification::{DisplayOrder, Notification, NotificationId};
use std::fmt::{self, Debug};
use std::time::{Duration, Instant};

/// Port for obtaining current time.
///
/// This abstraction allows the application layer to work with time
/// without depending on system clock implementation details.
/// Infrastructure provides concrete implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}

/// Identifies a scheduled callback so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Create a token from a scheduler-assigned sequence number.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw sequence number.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// A deferred unit of work.
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Port for deferring work.
///
/// Schedulers must never run a callback synchronously from inside
/// `schedule_after` or `cancel`. Callers rely on this to hold their own locks
/// while scheduling.
///
/// Infrastructure provides concrete implementations (TimerQueue,
/// TokioScheduler, MockScheduler).
pub trait Scheduler: Clock {
    /// Run `callback` once, `delay` from now.
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerToken;

    /// Cancel a pending callback.
    ///
    /// # Returns
    /// True if the callback was pending and will no longer run
    fn cancel(&self, token: TimerToken) -> bool;
}

/// Error reported by a render surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The host container is missing or detached
    Unavailable,
    /// The surface refused to render the notification
    Rejected(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Unavailable => write!(f, "render surface is unavailable"),
            SurfaceError::Rejected(reason) => {
                write!(f, "render surface rejected notification: {}", reason)
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Port for the region of the page that displays notifications.
///
/// Implementations must tolerate `begin_exit` and `remove` for ids they
/// never rendered.
pub trait RenderSurface: Send + Sync + Debug {
    /// Check whether the host container currently exists.
    fn is_available(&self) -> bool {
        true
    }

    /// Render a new notification at the position given by `order`.
    ///
    /// # Errors
    /// Returns `SurfaceError` if the notification could not be rendered.
    fn append(&self, notification: &Notification, order: DisplayOrder) -> Result<(), SurfaceError>;

    /// Start the exit transition for a notification.
    fn begin_exit(&self, _id: NotificationId, _reason: DismissReason) {}

    /// Remove a notification from the surface.
    fn remove(&self, id: NotificationId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_token_ordering() {
        assert!(TimerToken::new(1) < TimerToken::new(2));
        assert_eq!(TimerToken::new(9).get(), 9);
    }

    #[test]
    fn test_surface_error_display() {
        assert_eq!(
            SurfaceError::Unavailable.to_string(),
            "render surface is unavailable"
        );
        assert!(SurfaceError::Rejected("full".into())
            .to_string()
            .ends_with("full"));
    }
}
