//! Circuit breaker for the notification render surface.
//!
//! Notifications are best-effort. When a surface keeps failing, the breaker
//! opens and the queue stops calling it for a while; `notify` then returns a
//! detached handle immediately instead of hitting the broken surface again.
//!
//! All methods take the current instant explicitly so the breaker follows the
//! same clock as the scheduler driving the queue.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Circuit breaker states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Circuit is closed, surface calls go through
    Closed = 0,
    /// Circuit is open due to failures, surface calls are skipped
    Open = 1,
    /// Circuit is letting a trial call through to test recovery
    HalfOpen = 2,
}

impl From<u8> for CircuitState {
    fn from(value: u8) -> Self {
        match value {
            0 => CircuitState::Closed,
            1 => CircuitState::Open,
            2 => CircuitState::HalfOpen,
            _ => CircuitState::Closed,
        }
    }
}

/// Configuration for circuit breaker behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Number of consecutive failures before opening circuit
    pub failure_threshold: u32,
    /// Duration to wait before attempting recovery
    pub recovery_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(30),
        }
    }
}

/// Circuit breaker guarding calls into a render surface.
#[derive(Debug)]
pub struct CircuitBreaker {
    state: AtomicU8,
    consecutive_failures: AtomicU64,
    last_failure: Mutex<Option<Instant>>,
    config: CircuitBreakerConfig,
}

impl CircuitBreaker {
    /// Create a new circuit breaker with default configuration.
    pub fn new() -> Self {
        Self::with_config(CircuitBreakerConfig::default())
    }

    /// Create a new circuit breaker with custom configuration.
    pub fn with_config(config: CircuitBreakerConfig) -> Self {
        Self {
            state: AtomicU8::new(CircuitState::Closed as u8),
            consecutive_failures: AtomicU64::new(0),
            last_failure: Mutex::new(None),
            config,
        }
    }

    /// Get the current circuit state.
    pub fn state(&self) -> CircuitState {
        CircuitState::from(self.state.load(Ordering::Acquire))
    }

    /// Get the breaker configuration.
    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Check if a surface call should be attempted at `now`.
    pub fn allow_request(&self, now: Instant) -> bool {
        match self.state() {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let elapsed = self
                    .last_failure_time()
                    .map(|last| now.saturating_duration_since(last))
                    .unwrap_or(Duration::MAX);

                if elapsed >= self.config.recovery_timeout {
                    // Only one caller moves Open -> HalfOpen
                    let result = self.state.compare_exchange(
                        CircuitState::Open as u8,
                        CircuitState::HalfOpen as u8,
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    );
                    result.is_ok() || self.state() == CircuitState::HalfOpen
                } else {
                    false
                }
            }
        }
    }

    /// Record a successful surface call.
    pub fn record_success(&self) {
        match self.state() {
            CircuitState::HalfOpen => {
                self.consecutive_failures.store(0, Ordering::Release);
                self.state
                    .store(CircuitState::Closed as u8, Ordering::Release);
            }
            CircuitState::Closed => {
                self.consecutive_failures.store(0, Ordering::Release);
            }
            CircuitState::Open => {}
        }
    }

    /// Record a failed surface call at `now`.
    pub fn record_failure(&self, now: Instant) {
        let failures = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
        *self
            .last_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(now);

        match self.state() {
            CircuitState::HalfOpen => {
                self.state
                    .store(CircuitState::Open as u8, Ordering::Release);
            }
            CircuitState::Closed => {
                if failures >= self.config.failure_threshold as u64 {
                    self.state
                        .store(CircuitState::Open as u8, Ordering::Release);
                }
            }
            CircuitState::Open => {}
        }
    }

    fn last_failure_time(&self) -> Option<Instant> {
        *self
            .last_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get the number of consecutive failures.
    pub fn consecutive_failures(&self) -> u64 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }

    /// Reset the circuit breaker to closed state.
    pub fn reset(&self) {
        self.state
            .store(CircuitState::Closed as u8, Ordering::Release);
        self.consecutive_failures.store(0, Ordering::Release);
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new()
    }
}
