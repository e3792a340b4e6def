//! Mock tracing layer for testing log output.

use crate::application::lock;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::Layer;

/// Layer that captures events so tests can assert on what was logged.
#[derive(Clone, Default)]
pub struct MockCaptureLayer {
    captured: Arc<Mutex<Vec<CapturedEvent>>>,
}

/// Captured event information.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    /// Look up a recorded field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl MockCaptureLayer {
    /// Create a new mock capture layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured events.
    pub fn get_captured(&self) -> Vec<CapturedEvent> {
        lock(&self.captured).clone()
    }

    /// Get the count of captured events.
    pub fn count(&self) -> usize {
        lock(&self.captured).len()
    }

    /// Captured events at exactly `level`.
    pub fn at_level(&self, level: Level) -> Vec<CapturedEvent> {
        lock(&self.captured)
            .iter()
            .filter(|event| event.level == level)
            .cloned()
            .collect()
    }

    /// Clear all captured events.
    pub fn clear(&self) {
        lock(&self.captured).clear();
    }
}

impl<S> Layer<S> for MockCaptureLayer
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        lock(&self.captured).push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: BTreeMap<String, String>,
}

impl tracing::field::Visit for EventVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .insert(field.name().to_string(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields
                .insert(field.name().to_string(), format!("{:?}", value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{info, warn};
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_mock_capture_layer() {
        let capture = MockCaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        tracing::subscriber::with_default(subscriber, || {
            info!(handler = "scroll", "test message");
            warn!("second");
        });

        assert_eq!(capture.count(), 2);
        let events = capture.get_captured();
        assert_eq!(events[0].level, Level::INFO);
        assert_eq!(events[0].message, "test message");
        assert_eq!(events[0].field("handler"), Some("scroll"));
        assert_eq!(capture.at_level(Level::WARN).len(), 1);

        capture.clear();
        assert_eq!(capture.count(), 0);
    }
}
