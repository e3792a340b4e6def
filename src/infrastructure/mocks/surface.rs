//! Mock render surface for testing.

use crate::application::lock;
use crate::application::ports::{RenderSurface, SurfaceError};
use crate::domain::lifecycle::DismissReason;
use crate::domain::notification::{DisplayOrder, Notification, NotificationId};
use crate::domain::severity::Severity;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A call the queue made into the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Append(NotificationId, Severity),
    BeginExit(NotificationId, DismissReason),
    Remove(NotificationId),
}

/// How the next `append` calls should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Render normally
    #[default]
    None,
    /// Return `SurfaceError::Rejected`
    Reject,
    /// Return `SurfaceError::Unavailable`, as if the container vanished mid-render
    Unavailable,
    /// Panic inside `append`
    Panic,
}

#[derive(Debug, Default)]
struct SurfaceState {
    calls: Vec<SurfaceCall>,
    /// Rendered notifications in on-screen order, top first
    rendered: VecDeque<(NotificationId, String)>,
    unavailable: bool,
    failure: FailureMode,
}

/// Surface that records every call and keeps an in-memory "DOM".
///
/// Clones share state, so a test can keep one clone and give the other to a
/// queue.
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl MockSurface {
    /// Create an available, well-behaved surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the host container disappearing (or coming back).
    pub fn set_available(&self, available: bool) {
        lock(&self.state).unavailable = !available;
    }

    /// Make subsequent `append` calls fail in the given way.
    pub fn set_failure(&self, failure: FailureMode) {
        lock(&self.state).failure = failure;
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<SurfaceCall> {
        lock(&self.state).calls.clone()
    }

    /// Ids currently rendered, top first.
    pub fn rendered_ids(&self) -> Vec<NotificationId> {
        lock(&self.state).rendered.iter().map(|(id, _)| *id).collect()
    }

    /// Texts currently rendered, top first.
    pub fn texts(&self) -> Vec<String> {
        lock(&self.state)
            .rendered
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// How many times `remove` was called for `id`.
    pub fn count_removes(&self, id: NotificationId) -> usize {
        lock(&self.state)
            .calls
            .iter()
            .filter(|call| **call == SurfaceCall::Remove(id))
            .count()
    }
}

impl RenderSurface for MockSurface {
    fn is_available(&self) -> bool {
        !lock(&self.state).unavailable
    }

    fn append(&self, notification: &Notification, order: DisplayOrder) -> Result<(), SurfaceError> {
        let mut state = lock(&self.state);
        match state.failure {
            FailureMode::None => {}
            FailureMode::Reject => {
                return Err(SurfaceError::Rejected("mock rejection".to_string()))
            }
            FailureMode::Unavailable => return Err(SurfaceError::Unavailable),
            FailureMode::Panic => {
                drop(state);
                panic!("mock surface panic");
            }
        }

        state
            .calls
            .push(SurfaceCall::Append(notification.id, notification.severity));
        let entry = (notification.id, notification.text.clone());
        match order {
            DisplayOrder::NewestLast => state.rendered.push_back(entry),
            DisplayOrder::NewestFirst => state.rendered.push_front(entry),
        }
        Ok(())
    }

    fn begin_exit(&self, id: NotificationId, reason: DismissReason) {
        lock(&self.state).calls.push(SurfaceCall::BeginExit(id, reason));
    }

    fn remove(&self, id: NotificationId) {
        let mut state = lock(&self.state);
        state.calls.push(SurfaceCall::Remove(id));
        state.rendered.retain(|(rendered, _)| *rendered != id);
    }
}
