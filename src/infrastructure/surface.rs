//! Headless render surface that writes notifications to `tracing`.
//!
//! Useful for server-side rendering, CLIs and tests, or as a fallback when
//! the page has no notification container. Every notification becomes one
//! event on the `ui_pacing::surface` target, with the level chosen by
//! severity.

use crate::application::ports::{RenderSurface, SurfaceError};
use crate::domain::lifecycle::DismissReason;
use crate::domain::notification::{DisplayOrder, Notification, NotificationId};
use crate::domain::severity::Severity;

/// Render surface that logs instead of drawing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSurface;

impl TracingSurface {
    /// Create a new tracing surface.
    pub fn new() -> Self {
        Self
    }
}

impl RenderSurface for TracingSurface {
    fn append(
        &self,
        notification: &Notification,
        _order: DisplayOrder,
    ) -> Result<(), SurfaceError> {
        let id = notification.id;
        let text = notification.text.as_str();
        match notification.severity {
            Severity::Error => {
                tracing::error!(target: "ui_pacing::surface", %id, severity = "error", "{}", text)
            }
            Severity::Success => {
                tracing::info!(target: "ui_pacing::surface", %id, severity = "success", "{}", text)
            }
            Severity::Info => {
                tracing::info!(target: "ui_pacing::surface", %id, severity = "info", "{}", text)
            }
        }
        Ok(())
    }

    fn begin_exit(&self, id: NotificationId, reason: DismissReason) {
        tracing::debug!(target: "ui_pacing::surface", %id, %reason, "notification closing");
    }

    fn remove(&self, id: NotificationId) {
        tracing::debug!(target: "ui_pacing::surface", %id, "notification closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mocks::MockCaptureLayer;
    use std::time::{Duration, Instant};
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    fn notification(severity: Severity, text: &str) -> Notification {
        Notification {
            id: NotificationId::new(3),
            text: text.to_string(),
            severity,
            created_at: Instant::now(),
            auto_dismiss_after: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_level_follows_severity() {
        let capture = MockCaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let surface = TracingSurface::new();

        tracing::subscriber::with_default(subscriber, || {
            surface
                .append(&notification(Severity::Error, "Upload failed"), DisplayOrder::NewestLast)
                .unwrap();
            surface
                .append(&notification(Severity::Success, "Saved"), DisplayOrder::NewestLast)
                .unwrap();
        });

        let events = capture.get_captured();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].level, Level::ERROR);
        assert_eq!(events[0].message, "Upload failed");
        assert_eq!(events[0].field("severity"), Some("error"));
        assert_eq!(events[1].level, Level::INFO);
        assert_eq!(events[1].target, "ui_pacing::surface");
    }
}
