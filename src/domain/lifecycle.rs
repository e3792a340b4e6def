//! Notification lifecycle state machine.
//!
//! ```text
//! Visible --(timeout OR dismiss)--> Dismissing --(exit transition)--> Removed
//! ```
//!
//! Transitions only move forward. Re-entering `Dismissing` or acting on a
//! `Removed` notification is rejected by [`NotificationState::can_transition_to`].

use std::fmt;

/// Lifecycle states of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationState {
    /// Rendered and waiting for its auto-dismiss timer or a user close
    Visible,
    /// Exit transition running; removal is already scheduled
    Dismissing,
    /// Gone from the surface and the queue
    Removed,
}

impl NotificationState {
    /// Check whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: NotificationState) -> bool {
        matches!(
            (self, next),
            (NotificationState::Visible, NotificationState::Dismissing)
                | (NotificationState::Dismissing, NotificationState::Removed)
        )
    }

    /// Check whether the notification is still on the surface.
    pub fn is_on_surface(self) -> bool {
        !matches!(self, NotificationState::Removed)
    }
}

impl fmt::Display for NotificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationState::Visible => "visible",
            NotificationState::Dismissing => "dismissing",
            NotificationState::Removed => "removed",
        };
        f.write_str(name)
    }
}

/// What started a notification's dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// The auto-dismiss timer elapsed
    Timeout,
    /// The user (or calling code) closed it explicitly
    User,
    /// The whole queue was cleared, e.g. on navigation
    Cleared,
}

impl fmt::Display for DismissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DismissReason::Timeout => "timeout",
            DismissReason::User => "user",
            DismissReason::Cleared => "cleared",
        };
        f.write_str(name)
    }
}
