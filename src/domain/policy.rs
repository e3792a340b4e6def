//! Pacing policies for event handlers.
//!
//! A [`Pacing`] describes how a handler's invocations are spread over time.
//! It is plain data so hosts can keep per-handler pacing in configuration
//! (scroll handlers throttled at 16ms, resize handlers debounced at 250ms)
//! and turn it into a wrapper with [`crate::application::pacer::pace`].

use std::time::Duration;

/// Outcome of a single call to a rate-limited wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallDecision {
    /// The underlying function ran synchronously during this call
    Invoked,
    /// The call was deferred; it replaces any earlier deferred call
    Scheduled,
    /// The call was discarded and will never run
    Dropped,
}

impl CallDecision {
    /// Check if this decision is Invoked.
    pub fn is_invoked(&self) -> bool {
        matches!(self, CallDecision::Invoked)
    }

    /// Check if this decision is Scheduled.
    pub fn is_scheduled(&self) -> bool {
        matches!(self, CallDecision::Scheduled)
    }

    /// Check if this decision is Dropped.
    pub fn is_dropped(&self) -> bool {
        matches!(self, CallDecision::Dropped)
    }
}

/// How a handler should be paced.
///
/// # Example
/// ```
/// use ui_pacing::Pacing;
/// use std::time::Duration;
///
/// let scroll = Pacing::throttle_ms(16);
/// let resize = Pacing::debounce_ms(250);
///
/// assert_eq!(scroll.window(), Duration::from_millis(16));
/// assert!(resize.is_debounce());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Pacing {
    /// Run once the handler has been quiet for the given duration (trailing edge)
    Debounce(Duration),
    /// Run at most once per window, dropping excess calls (leading edge)
    Throttle(Duration),
}

impl Pacing {
    /// Create a debounce policy with a wait in milliseconds.
    pub fn debounce_ms(wait_ms: u64) -> Self {
        Pacing::Debounce(Duration::from_millis(wait_ms))
    }

    /// Create a throttle policy with a limit in milliseconds.
    pub fn throttle_ms(limit_ms: u64) -> Self {
        Pacing::Throttle(Duration::from_millis(limit_ms))
    }

    /// The time window of this policy.
    pub fn window(&self) -> Duration {
        match self {
            Pacing::Debounce(wait) => *wait,
            Pacing::Throttle(limit) => *limit,
        }
    }

    /// Check if this is a debounce policy.
    pub fn is_debounce(&self) -> bool {
        matches!(self, Pacing::Debounce(_))
    }

    /// Check if this is a throttle policy.
    pub fn is_throttle(&self) -> bool {
        matches!(self, Pacing::Throttle(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacing_constructors() {
        assert_eq!(
            Pacing::debounce_ms(250),
            Pacing::Debounce(Duration::from_millis(250))
        );
        assert_eq!(
            Pacing::throttle_ms(16),
            Pacing::Throttle(Duration::from_millis(16))
        );
    }

    #[test]
    fn test_pacing_window() {
        assert_eq!(Pacing::debounce_ms(100).window(), Duration::from_millis(100));
        assert_eq!(Pacing::throttle_ms(0).window(), Duration::ZERO);
        assert!(Pacing::throttle_ms(16).is_throttle());
        assert!(!Pacing::throttle_ms(16).is_debounce());
    }

    #[test]
    fn test_call_decision_predicates() {
        assert!(CallDecision::Invoked.is_invoked());
        assert!(CallDecision::Scheduled.is_scheduled());
        assert!(CallDecision::Dropped.is_dropped());
        assert!(!CallDecision::Dropped.is_invoked());
    }
}
