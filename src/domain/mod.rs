//! Domain layer - pure types with no I/O or timers.
//!
//! This layer contains the core concepts of UI pacing:
//! - Pacing policies and call decisions for rate-limited handlers
//! - Notification severity
//! - Notification model and its lifecycle state machine
//!
//! All types in this layer are plain data and easily testable.

pub mod lifecycle;
pub mod notification;
pub mod policy;
pub mod severity;
