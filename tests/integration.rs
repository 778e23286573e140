//! End-to-end tests: a shared service with several syncing clients.

use rclip::{
    ClipConfig, ClipValue, ClipboardService, GraceOutcome, MemoryClipboard, Syncer, SyncerHandle,
};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn fast_config() -> ClipConfig {
    ClipConfig {
        history_size: 5,
        poll_interval: Duration::from_millis(5),
        ..Default::default()
    }
}

fn start_client(service: &Arc<ClipboardService>, clipboard: &Arc<MemoryClipboard>) -> SyncerHandle {
    Syncer::new(service.clone(), clipboard.clone(), fast_config())
        .start()
        .unwrap()
}

fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

// --- Propagation ---

#[test]
fn test_local_copy_reaches_other_client() {
    init_tracing();
    let service = Arc::new(ClipboardService::new(&fast_config()));
    let alice = Arc::new(MemoryClipboard::new());
    let bob = Arc::new(MemoryClipboard::new());

    let a = start_client(&service, &alice);
    let b = start_client(&service, &bob);

    alice.set("hello from alice");
    assert!(wait_until(|| bob.contents() == ClipValue::from("hello from alice")));

    bob.set("reply from bob");
    assert!(wait_until(|| alice.contents() == ClipValue::from("reply from bob")));

    a.cancel();
    b.cancel();
    a.wait();
    b.wait();

    assert_eq!(
        service.hist(),
        vec![ClipValue::from("reply from bob"), ClipValue::from("hello from alice")]
    );
}

#[test]
fn test_existing_value_written_on_connect() {
    init_tracing();
    let service = Arc::new(ClipboardService::new(&fast_config()));
    service.push(ClipValue::from("already there"));

    let clipboard = Arc::new(MemoryClipboard::new());
    let handle = start_client(&service, &clipboard);

    assert!(wait_until(|| clipboard.contents() == ClipValue::from("already there")));

    handle.cancel();
    handle.wait();

    // The echo of the written value is suppressed by dedup.
    assert_eq!(service.hist(), vec![ClipValue::from("already there")]);
}

#[test]
fn test_server_push_reaches_all_clients() {
    init_tracing();
    let service = Arc::new(ClipboardService::new(&fast_config()));
    let clipboards: Vec<_> = (0..3).map(|_| Arc::new(MemoryClipboard::new())).collect();
    let handles: Vec<_> = clipboards.iter().map(|c| start_client(&service, c)).collect();

    assert!(wait_until(|| service.stats().subscribers == 3));
    service.push(ClipValue::from("broadcast"));

    for clipboard in &clipboards {
        assert!(wait_until(|| clipboard.contents() == ClipValue::from("broadcast")));
    }

    for handle in handles {
        handle.cancel();
        handle.wait();
    }
    assert_eq!(service.stats().subscribers, 0);
}

#[test]
fn test_unchanged_clipboard_pushes_once() {
    init_tracing();
    let service = Arc::new(ClipboardService::new(&fast_config()));
    let clipboard = Arc::new(MemoryClipboard::with_contents("steady"));
    let handle = start_client(&service, &clipboard);

    assert!(wait_until(|| service.get() == Some(ClipValue::from("steady"))));
    // Let the watcher poll the unchanged value many times.
    thread::sleep(Duration::from_millis(100));

    handle.cancel();
    handle.wait();

    assert_eq!(service.stats().total_pushed, 1);
    assert_eq!(clipboard.write_count(), 0);
}

// --- Shutdown ---

#[test]
fn test_graceful_shutdown_completes() {
    init_tracing();
    let service = Arc::new(ClipboardService::new(&fast_config()));
    let handle = start_client(&service, &Arc::new(MemoryClipboard::new()));
    assert!(wait_until(|| service.stats().subscribers == 1));

    let (terminate, requests) = crossbeam_channel::unbounded();
    terminate.send(()).unwrap();

    let outcome = handle.into_grace(Duration::from_secs(5)).run(&requests);
    assert_eq!(outcome, GraceOutcome::Done);
    assert_eq!(service.stats().subscribers, 0);
}
