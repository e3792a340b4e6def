//! Mock implementations for testing.
//!
//! This module provides test doubles for infrastructure adapters,
//! enabling deterministic testing of pacing and notification lifecycles.

pub mod clock;
pub mod layer;
pub mod scheduler;
pub mod surface;

pub use clock::MockClock;
pub use layer::{CapturedEvent, MockCaptureLayer};
pub use scheduler::MockScheduler;
pub use surface::{FailureMode, MockSurface, SurfaceCall};
