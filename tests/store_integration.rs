// SPDX-License-Identifier: MPL-2.0
//! End-to-end lifecycle tests against the real Tokio-backed scheduler.
//!
//! Tokio's paused clock makes the timer tests deterministic: virtual
//! time only advances while every task is idle, so a sleep past a
//! toast's deadline is guaranteed to run the expiry first.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;
use toastops::{
    config, StoreConfig, ToastDuration, ToastKind, ToastOptions, ToastStore, TokioScheduler,
};

fn tokio_store() -> ToastStore {
    ToastStore::new(Arc::new(TokioScheduler::new()))
}

#[tokio::test(start_paused = true)]
async fn toast_expires_and_is_removed_on_the_real_scheduler() {
    let store = tokio_store();
    store.create(
        "temporary",
        ToastKind::Info,
        ToastOptions::new().with_duration(Duration::from_millis(100)),
    );
    assert_eq!(store.len(), 1);

    // Past the duration, inside the grace window: invisible but present.
    tokio::time::sleep(Duration::from_millis(150)).await;
    let toasts = store.toasts();
    assert_eq!(toasts.len(), 1);
    assert!(!toasts[0].is_visible());

    // Past duration + grace: gone.
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn subscriber_observes_create_fade_and_removal() {
    let store = tokio_store();
    let states: Arc<Mutex<Vec<(usize, usize)>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&states);
    let subscription = store.subscribe(move |toasts| {
        let visible = toasts.iter().filter(|t| t.is_visible()).count();
        sink.lock().unwrap().push((toasts.len(), visible));
    });

    let id = store.success("saved");
    store.dismiss(&id);
    tokio::time::sleep(Duration::from_millis(500)).await;

    let states = states.lock().unwrap();
    assert_eq!(
        states.as_slice(),
        &[(1, 1), (1, 0), (0, 0)],
        "create, fade, and removal are three distinct transitions"
    );
    drop(states);
    subscription.cancel();
}

#[tokio::test(start_paused = true)]
async fn loading_toast_outlives_every_timer() {
    let store = tokio_store();
    store.loading("crunching…");
    store.success("done with something else");

    tokio::time::sleep(Duration::from_secs(60)).await;

    let toasts = store.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind(), ToastKind::Loading);
    assert!(toasts[0].is_visible());
}

#[tokio::test(start_paused = true)]
async fn capacity_and_expiry_interact_cleanly() {
    let store = tokio_store();
    for i in 0..10 {
        store.create(
            format!("burst {i}"),
            ToastKind::Blank,
            ToastOptions::new().with_duration(Duration::from_millis(200)),
        );
    }
    assert_eq!(store.len(), 5);

    // All five survivors expire; the five evicted toasts' timers were
    // cancelled and must not panic or resurrect anything.
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn store_built_from_config_file_honors_its_values() {
    let dir = tempdir().expect("failed to create temporary directory");
    let path = dir.path().join("toasts.toml");

    let written = StoreConfig {
        capacity: 2,
        default_duration_ms: 100,
        dismiss_grace_ms: 50,
    };
    config::save_to_path(&written, &path).expect("failed to write config");

    let loaded = config::load_from_path(&path).expect("failed to load config");
    assert_eq!(loaded, written);

    let store = ToastStore::with_config(loaded, Arc::new(TokioScheduler::new()));
    store.blank("a");
    store.blank("b");
    store.blank("c");
    assert_eq!(store.len(), 2, "configured capacity");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(store.is_empty(), "configured duration and grace elapsed");
}

#[tokio::test(start_paused = true)]
async fn mixed_explicit_and_infinite_durations() {
    let store = tokio_store();
    store.create(
        "short",
        ToastKind::Info,
        ToastOptions::new().with_duration(Duration::from_millis(100)),
    );
    store.create(
        "pinned",
        ToastKind::Info,
        ToastOptions::new().with_duration(ToastDuration::Infinite),
    );

    tokio::time::sleep(Duration::from_secs(5)).await;

    let toasts = store.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].content(), "pinned");
    assert!(toasts[0].is_visible());
}

#[tokio::test(start_paused = true)]
async fn dismiss_all_then_new_toast_during_grace() {
    let store = tokio_store();
    store.error("old failure");
    store.error("older failure");
    store.dismiss_all();

    tokio::time::sleep(Duration::from_millis(100)).await;
    store.info("fresh news");

    tokio::time::sleep(Duration::from_millis(350)).await;
    let toasts = store.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].content(), "fresh news");
    assert!(toasts[0].is_visible());
}
