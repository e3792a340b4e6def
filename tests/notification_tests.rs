use std::sync::Arc;
use std::time::{Duration, Instant};
use ui_pacing::infrastructure::mocks::{FailureMode, MockScheduler, MockSurface, SurfaceCall};
use ui_pacing::{
    CircuitBreakerConfig, CircuitState, DismissReason, DisplayOrder, NotificationQueue,
    NotificationState, QueueConfig, SeedMessage, Severity,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn setup() -> (MockScheduler, MockSurface, NotificationQueue) {
    let scheduler = MockScheduler::new(Instant::now());
    let surface = MockSurface::new();
    let queue = NotificationQueue::builder()
        .with_surface(Arc::new(surface.clone()))
        .build(scheduler.shared())
        .unwrap();
    (scheduler, surface, queue)
}

#[test]
fn test_full_lifecycle_on_default_timings() {
    let (scheduler, surface, queue) = setup();

    let handle = queue.notify("Inquiry sent", Severity::Success);
    assert!(!handle.is_detached());

    scheduler.advance(ms(5000));
    assert_eq!(queue.state(handle), Some(NotificationState::Dismissing));
    assert_eq!(surface.rendered_ids(), vec![handle.id()]);

    scheduler.advance(ms(300));
    assert_eq!(queue.state(handle), Some(NotificationState::Removed));
    assert_eq!(
        surface.calls(),
        vec![
            SurfaceCall::Append(handle.id(), Severity::Success),
            SurfaceCall::BeginExit(handle.id(), DismissReason::Timeout),
            SurfaceCall::Remove(handle.id()),
        ]
    );
}

#[test]
fn test_dismiss_after_timeout_is_noop() {
    let (scheduler, surface, queue) = setup();

    let handle = queue.notify("x", Severity::Info);
    scheduler.advance(ms(5100));
    assert!(!queue.dismiss(handle));

    scheduler.advance(ms(1000));
    assert_eq!(surface.count_removes(handle.id()), 1);
    let snapshot = queue.metrics().snapshot();
    assert_eq!(snapshot.dismissed_by_timeout, 1);
    assert_eq!(snapshot.dismissed_manually, 0);
}

#[test]
fn test_dismiss_just_before_timeout_wins() {
    let (scheduler, surface, queue) = setup();

    let handle = queue.notify("x", Severity::Info);
    scheduler.advance(ms(4999));
    assert!(queue.dismiss(handle));
    scheduler.advance(ms(10_000));

    assert_eq!(surface.count_removes(handle.id()), 1);
    assert!(!surface
        .calls()
        .contains(&SurfaceCall::BeginExit(handle.id(), DismissReason::Timeout)));
}

#[test]
fn test_many_dismisses_remove_once() {
    let (scheduler, surface, queue) = setup();

    let handle = queue.notify("x", Severity::Error);
    let started: Vec<bool> = (0..5).map(|_| queue.dismiss(handle)).collect();
    assert_eq!(started, vec![true, false, false, false, false]);

    scheduler.advance(ms(300));
    assert_eq!(surface.count_removes(handle.id()), 1);
    assert!(queue.is_empty());
}

#[test]
fn test_each_notification_has_its_own_timer() {
    let (scheduler, _surface, queue) = setup();

    let first = queue.notify("first", Severity::Info);
    scheduler.advance(ms(2000));
    let second = queue.notify("second", Severity::Info);

    scheduler.advance(ms(3000));
    assert_eq!(queue.state(first), Some(NotificationState::Dismissing));
    assert_eq!(queue.state(second), Some(NotificationState::Visible));

    scheduler.advance(ms(2300));
    assert_eq!(queue.state(first), Some(NotificationState::Removed));
    assert_eq!(queue.state(second), Some(NotificationState::Removed));
}

#[test]
fn test_handles_are_distinct() {
    let (_scheduler, _surface, queue) = setup();

    let a = queue.notify("same", Severity::Info);
    let b = queue.notify("same", Severity::Info);
    assert_ne!(a.id(), b.id());
    assert_eq!(queue.len(), 2);
}

#[test]
fn test_unavailable_surface_skips_without_tripping() {
    let (scheduler, surface, queue) = setup();
    surface.set_available(false);

    let handle = queue.notify("x", Severity::Error);
    assert!(handle.is_detached());
    assert_eq!(queue.state(handle), None);
    assert_eq!(queue.circuit_breaker().consecutive_failures(), 0);
    assert_eq!(scheduler.pending(), 0);

    surface.set_available(true);
    assert!(!queue.notify("x", Severity::Error).is_detached());
}

#[test]
fn test_failing_surface_opens_circuit_then_recovers() {
    let scheduler = MockScheduler::new(Instant::now());
    let surface = MockSurface::new();
    let queue = NotificationQueue::builder()
        .with_surface(Arc::new(surface.clone()))
        .with_circuit_breaker_config(CircuitBreakerConfig {
            failure_threshold: 2,
            recovery_timeout: ms(1000),
        })
        .build(scheduler.shared())
        .unwrap();

    surface.set_failure(FailureMode::Reject);
    assert!(queue.notify("a", Severity::Info).is_detached());
    assert!(queue.notify("b", Severity::Info).is_detached());
    assert_eq!(queue.circuit_breaker().state(), CircuitState::Open);

    // Surface is healthy again, but the circuit is still open
    surface.set_failure(FailureMode::None);
    assert!(queue.notify("c", Severity::Info).is_detached());
    assert!(surface.calls().is_empty());

    scheduler.advance(ms(1000));
    let handle = queue.notify("d", Severity::Info);
    assert!(!handle.is_detached());
    assert_eq!(queue.circuit_breaker().state(), CircuitState::Closed);
    assert_eq!(surface.texts(), vec!["d"]);

    let snapshot = queue.metrics().snapshot();
    assert_eq!(snapshot.surface_failures, 2);
    assert_eq!(snapshot.notifications_skipped, 1);
    assert_eq!(snapshot.notifications_shown, 1);
}

#[test]
fn test_container_missing_during_append_does_not_trip_circuit() {
    let (scheduler, surface, queue) = setup();
    surface.set_failure(FailureMode::Unavailable);

    for _ in 0..5 {
        assert!(queue.notify("x", Severity::Info).is_detached());
    }
    assert_eq!(queue.circuit_breaker().state(), CircuitState::Closed);
    assert_eq!(queue.circuit_breaker().consecutive_failures(), 0);

    // Container back: the next notification renders right away
    surface.set_failure(FailureMode::None);
    scheduler.advance(ms(1000));
    let handle = queue.notify("container is back", Severity::Info);
    assert!(!handle.is_detached());
    assert_eq!(surface.texts(), vec!["container is back"]);

    let snapshot = queue.metrics().snapshot();
    assert_eq!(snapshot.notifications_skipped, 5);
    assert_eq!(snapshot.surface_failures, 0);
}

#[test]
fn test_panicking_surface_is_contained() {
    let (scheduler, surface, queue) = setup();
    surface.set_failure(FailureMode::Panic);

    let handle = queue.notify("x", Severity::Error);
    assert!(handle.is_detached());
    assert_eq!(queue.metrics().surface_failures(), 1);
    assert_eq!(scheduler.pending(), 0);

    // Queue still usable afterwards
    surface.set_failure(FailureMode::None);
    let handle = queue.notify("y", Severity::Error);
    assert_eq!(queue.state(handle), Some(NotificationState::Visible));
}

#[test]
fn test_seed_maps_flash_levels() {
    let (_scheduler, surface, queue) = setup();

    let handles = queue.seed([
        SeedMessage::new("Saved", "success"),
        SeedMessage::new("Invalid email", "error"),
        SeedMessage::new("Blocked", "danger"),
        SeedMessage::new("Heads up", "warning"),
        SeedMessage::new("Trace", "debug"),
    ]);

    assert_eq!(handles.len(), 5);
    let severities: Vec<Severity> = surface
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            SurfaceCall::Append(_, severity) => Some(severity),
            _ => None,
        })
        .collect();
    assert_eq!(
        severities,
        vec![
            Severity::Success,
            Severity::Error,
            Severity::Error,
            Severity::Info,
            Severity::Info,
        ]
    );
}

#[test]
fn test_dismiss_all_clears_visible_only() {
    let (scheduler, surface, queue) = setup();

    let a = queue.notify("a", Severity::Info);
    let b = queue.notify("b", Severity::Info);
    let c = queue.notify("c", Severity::Info);
    queue.dismiss(b);

    assert_eq!(queue.dismiss_all(), 2);
    assert_eq!(queue.dismiss_all(), 0);
    assert!(surface
        .calls()
        .contains(&SurfaceCall::BeginExit(a.id(), DismissReason::Cleared)));
    assert!(surface
        .calls()
        .contains(&SurfaceCall::BeginExit(c.id(), DismissReason::Cleared)));

    scheduler.advance(ms(300));
    assert!(queue.is_empty());
    assert!(surface.rendered_ids().is_empty());
}

#[test]
fn test_visible_follows_display_order() {
    let scheduler = MockScheduler::new(Instant::now());
    let surface = MockSurface::new();
    let config = QueueConfig {
        display_order: DisplayOrder::NewestFirst,
        ..QueueConfig::default()
    };
    let queue = NotificationQueue::builder()
        .with_config(config)
        .with_surface(Arc::new(surface.clone()))
        .build(scheduler.shared())
        .unwrap();

    queue.notify("older", Severity::Info);
    queue.notify("newer", Severity::Info);

    let texts: Vec<String> = queue
        .visible()
        .into_iter()
        .map(|snapshot| snapshot.notification.text)
        .collect();
    assert_eq!(texts, vec!["newer", "older"]);
    assert_eq!(surface.texts(), texts);
}

#[test]
fn test_custom_timings() {
    let scheduler = MockScheduler::new(Instant::now());
    let surface = MockSurface::new();
    let queue = NotificationQueue::builder()
        .with_surface(Arc::new(surface.clone()))
        .with_auto_dismiss_after(ms(1000))
        .with_exit_duration(Duration::ZERO)
        .build(scheduler.shared())
        .unwrap();

    let handle = queue.notify("x", Severity::Info);
    assert_eq!(
        queue.visible()[0].notification.dismiss_deadline(),
        scheduler.start() + ms(1000)
    );

    scheduler.advance(ms(1000));
    assert_eq!(queue.state(handle), Some(NotificationState::Removed));
}

#[test]
fn test_queue_clones_share_state() {
    let (_scheduler, _surface, queue) = setup();
    let other = queue.clone();

    let handle = queue.notify("x", Severity::Info);
    assert!(other.dismiss(handle));
    assert_eq!(queue.state(handle), Some(NotificationState::Dismissing));
}
