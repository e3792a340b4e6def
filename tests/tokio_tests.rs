#![cfg(feature = "async")]

use std::sync::{Arc, Mutex};
use std::time::Duration;
use ui_pacing::infrastructure::mocks::MockSurface;
use ui_pacing::{debounce, throttle, NotificationQueue, NotificationState, Severity, TokioScheduler};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn test_notification_lifecycle_on_tokio_timers() {
    let scheduler = TokioScheduler::current().unwrap();
    let surface = MockSurface::new();
    let queue = NotificationQueue::builder()
        .with_surface(Arc::new(surface.clone()))
        .build(Arc::new(scheduler.clone()))
        .unwrap();

    let handle = queue.notify("Message sent", Severity::Success);
    assert_eq!(scheduler.pending(), 1);

    tokio::time::sleep(ms(4999)).await;
    assert_eq!(queue.state(handle), Some(NotificationState::Visible));

    tokio::time::sleep(ms(2)).await;
    assert_eq!(queue.state(handle), Some(NotificationState::Dismissing));

    tokio::time::sleep(ms(300)).await;
    assert_eq!(queue.state(handle), Some(NotificationState::Removed));
    assert!(surface.rendered_ids().is_empty());
    assert_eq!(scheduler.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_manual_dismiss_aborts_timeout_task() {
    let scheduler = TokioScheduler::current().unwrap();
    let surface = MockSurface::new();
    let queue = NotificationQueue::builder()
        .with_surface(Arc::new(surface.clone()))
        .build(Arc::new(scheduler.clone()))
        .unwrap();

    let handle = queue.notify("x", Severity::Info);
    assert!(queue.dismiss(handle));
    // Timeout task aborted, exit task scheduled
    assert_eq!(scheduler.pending(), 1);

    tokio::time::sleep(ms(6000)).await;
    assert_eq!(surface.count_removes(handle.id()), 1);
    assert_eq!(queue.metrics().snapshot().dismissed_by_timeout, 0);
}

#[tokio::test(start_paused = true)]
async fn test_debounce_and_throttle_on_tokio_timers() {
    let scheduler: Arc<TokioScheduler> = Arc::new(TokioScheduler::current().unwrap());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let search = debounce(
        move |query: &'static str| sink.lock().unwrap().push(query),
        ms(100),
        scheduler.clone(),
    );
    let scroll = throttle(|_: u32| {}, ms(16), scheduler.clone());

    search.call("ap");
    tokio::time::sleep(ms(50)).await;
    search.call("apt");
    assert!(scroll.call(0).is_invoked());
    assert!(scroll.call(1).is_dropped());

    tokio::time::sleep(ms(101)).await;
    assert_eq!(*seen.lock().unwrap(), vec!["apt"]);
    assert!(scroll.call(2).is_invoked());
}
