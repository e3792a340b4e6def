//! Notification model.

use crate::domain::lifecycle::NotificationState;
use crate::domain::severity::Severity;
use std::fmt;
use std::time::{Duration, Instant};

/// Default time a notification stays visible before dismissing itself.
pub const DEFAULT_AUTO_DISMISS: Duration = Duration::from_millis(5000);

/// Default length of the exit transition between `Dismissing` and `Removed`.
pub const DEFAULT_EXIT_DURATION: Duration = Duration::from_millis(300);

/// Unique identifier of a notification within one queue.
///
/// Identifiers start at 1; 0 is reserved for detached handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    pub(crate) const DETACHED: NotificationId = NotificationId(0);

    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value, suitable for DOM ids or data attributes.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

/// Opaque reference returned by `notify`, used to request dismissal.
///
/// A handle is *detached* when the notification could not be shown (no
/// surface, surface failure, empty text). Dismissing a detached handle is
/// a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationHandle {
    id: NotificationId,
}

impl NotificationHandle {
    pub(crate) fn new(id: NotificationId) -> Self {
        Self { id }
    }

    /// The sentinel handle for notifications that were never shown.
    pub fn detached() -> Self {
        Self {
            id: NotificationId::DETACHED,
        }
    }

    /// Check whether this handle refers to a notification that was never shown.
    pub fn is_detached(&self) -> bool {
        self.id == NotificationId::DETACHED
    }

    /// The notification's identifier.
    pub fn id(&self) -> NotificationId {
        self.id
    }
}

/// A transient UI message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identifier assigned by the queue
    pub id: NotificationId,
    /// Message shown to the user
    pub text: String,
    /// Visual style, `Info` unless the caller chose otherwise
    pub severity: Severity,
    /// When `notify` was called, on the scheduler's clock
    pub created_at: Instant,
    /// Delay before the notification dismisses itself
    pub auto_dismiss_after: Duration,
}

impl Notification {
    /// When the auto-dismiss timer fires for this notification.
    pub fn dismiss_deadline(&self) -> Instant {
        self.created_at + self.auto_dismiss_after
    }
}

/// Point-in-time view of a queued notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSnapshot {
    /// The notification as it was queued
    pub notification: Notification,
    /// Lifecycle state when the snapshot was taken
    pub state: NotificationState,
}

/// Where new notifications go relative to existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DisplayOrder {
    /// Append below existing notifications
    #[default]
    NewestLast,
    /// Insert above existing notifications
    NewestFirst,
}

/// A server-rendered message to adopt at page load.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedMessage {
    /// Message text as rendered by the server
    pub text: String,
    /// Level tag as emitted by the server, mapped with [`Severity::from_tag_lossy`]
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: String,
}

impl SeedMessage {
    /// Create a seed message from its text and level tag.
    pub fn new(text: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: level.into(),
        }
    }

    /// The severity this message renders with.
    pub fn severity(&self) -> Severity {
        Severity::from_tag_lossy(&self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_handle() {
        let handle = NotificationHandle::detached();
        assert!(handle.is_detached());
        assert_eq!(handle.id().get(), 0);

        let handle = NotificationHandle::new(NotificationId::new(7));
        assert!(!handle.is_detached());
        assert_eq!(handle.id().to_string(), "notification-7");
    }

    #[test]
    fn test_dismiss_deadline() {
        let now = Instant::now();
        let n = Notification {
            id: NotificationId::new(1),
            text: "Saved".to_string(),
            severity: Severity::Success,
            created_at: now,
            auto_dismiss_after: DEFAULT_AUTO_DISMISS,
        };
        assert_eq!(n.dismiss_deadline(), now + Duration::from_secs(5));
    }

    #[test]
    fn test_seed_message_severity() {
        assert_eq!(SeedMessage::new("ok", "success").severity(), Severity::Success);
        assert_eq!(SeedMessage::new("hm", "warning").severity(), Severity::Info);
        assert_eq!(SeedMessage::new("bad", "").severity(), Severity::Info);
    }
}
