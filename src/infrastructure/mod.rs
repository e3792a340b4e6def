//! Infrastructure layer - external adapters and integrations.
//!
//! This layer provides adapters for:
//! - Clock abstraction (system time vs mock)
//! - Schedulers (host-pumped timer queue, Tokio timers)
//! - A headless render surface that writes to `tracing`

pub mod clock;
pub mod surface;
pub mod timer_queue;

#[cfg(feature = "async")]
pub mod tokio_scheduler;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds. It provides a fake-clock scheduler and a recording
/// render surface for deterministic tests.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// ui-pacing = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
