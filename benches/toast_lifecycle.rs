// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;
use toastops::{ManualScheduler, Scheduler, ToastStore};

fn toast_lifecycle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("toast_lifecycle");

    group.bench_function("create_with_eviction", |b| {
        let scheduler = Arc::new(ManualScheduler::new());
        let store = ToastStore::new(Arc::clone(&scheduler) as Arc<dyn Scheduler>);
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            // Past capacity, every create also evicts and cancels a timer.
            black_box(store.blank(format!("message {n}")));
        });
    });

    group.bench_function("dismiss_all_and_sweep", |b| {
        b.iter(|| {
            let scheduler = Arc::new(ManualScheduler::new());
            let store = ToastStore::new(Arc::clone(&scheduler) as Arc<dyn Scheduler>);
            for i in 0..5 {
                store.blank(format!("message {i}"));
            }
            store.dismiss_all();
            scheduler.advance(Duration::from_millis(400));
            black_box(store.is_empty());
        });
    });

    group.bench_function("snapshot_fanout_to_subscribers", |b| {
        let scheduler = Arc::new(ManualScheduler::new());
        let store = ToastStore::new(Arc::clone(&scheduler) as Arc<dyn Scheduler>);
        let subscriptions: Vec<_> = (0..8)
            .map(|_| store.subscribe(|toasts| {
                black_box(toasts.len());
            }))
            .collect();
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            store.blank(format!("fanout {n}"));
        });
        for subscription in &subscriptions {
            subscription.cancel();
        }
    });

    group.finish();
}

criterion_group!(benches, toast_lifecycle_benchmark);
criterion_main!(benches);
