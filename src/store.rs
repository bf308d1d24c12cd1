// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! [`ToastStore`] is the sole owner of toast state. It enforces the
//! capacity bound, arms and cancels auto-expiry timers, and fans out
//! snapshots to subscribers on every state change.
//!
//! Each toast moves through a strictly forward lifecycle:
//! active (`visible = true`) → fading (`visible = false`, still present,
//! so a renderer can run its exit animation) → gone (absent from the
//! collection). The fading → gone step happens one grace delay after the
//! visibility flip, driven by the store's [`Scheduler`].
//!
//! # Concurrency
//!
//! All mutations — `create`, `dismiss`, `dismiss_all`, and every timer
//! callback — serialize through one internal lock, so no subscriber ever
//! observes a torn state: the collection never exceeds capacity, ids are
//! never duplicated, and a timer never fires twice. Snapshots are built
//! under the lock but delivered after it is released, so a listener may
//! call back into the store. Each armed timer carries a generation
//! number checked under the lock when it fires; a timer superseded by a
//! later `create` or `dismiss` is a no-op even if its callback races
//! past the cancel flag.

use crate::config::StoreConfig;
use crate::scheduler::{Scheduler, Task, TimerHandle};
use crate::types::{Toast, ToastDuration, ToastId, ToastKind, ToastOptions};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::{Duration, Instant};

type Listener = Arc<dyn Fn(&[Toast]) + Send + Sync>;

/// In-memory, subscription-based toast queue.
///
/// `ToastStore` is a cheaply cloneable handle; clones share the same
/// state. Construct one per application (or per surface) and hand it to
/// whichever components raise or render toasts.
#[derive(Clone)]
pub struct ToastStore {
    shared: Arc<Shared>,
}

struct Shared {
    config: StoreConfig,
    scheduler: Arc<dyn Scheduler>,
    next_toast_id: AtomicU64,
    next_listener_id: AtomicU64,
    next_timer_generation: AtomicU64,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    /// Active and fading toasts, most recent first.
    toasts: Vec<Toast>,
    /// The single pending timer per toast id (expiry or removal).
    timers: HashMap<ToastId, PendingTimer>,
    listeners: Vec<(u64, Listener)>,
}

struct PendingTimer {
    generation: u64,
    handle: TimerHandle,
}

/// Snapshot plus recipients, captured under the lock and delivered
/// outside it.
struct Delivery {
    snapshot: Vec<Toast>,
    listeners: Vec<Listener>,
}

impl Delivery {
    fn capture(state: &State) -> Self {
        Self {
            snapshot: state.toasts.clone(),
            listeners: state.listeners.iter().map(|(_, l)| Arc::clone(l)).collect(),
        }
    }

    fn deliver(self) {
        for listener in &self.listeners {
            listener(&self.snapshot);
        }
    }
}

impl ToastStore {
    /// Creates a store with the default configuration.
    #[must_use]
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self::with_config(StoreConfig::default(), scheduler)
    }

    /// Creates a store with an explicit configuration.
    ///
    /// The configuration is normalized first: degenerate values (zero
    /// capacity, zero default duration) clamp to the crate defaults.
    #[must_use]
    pub fn with_config(config: StoreConfig, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            shared: Arc::new(Shared {
                config: config.normalized(),
                scheduler,
                next_toast_id: AtomicU64::new(0),
                next_listener_id: AtomicU64::new(0),
                next_timer_generation: AtomicU64::new(0),
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Returns the store's (normalized) configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.shared.config
    }

    /// Registers a listener invoked with a snapshot on every state
    /// change. Past states are not replayed; use [`ToastStore::toasts`]
    /// to read the current state at subscription time.
    pub fn subscribe(&self, listener: impl Fn(&[Toast]) + Send + Sync + 'static) -> Subscription {
        let id = self.shared.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.shared
            .lock_state()
            .listeners
            .push((id, Arc::new(listener)));
        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Creates a toast and returns its id.
    ///
    /// The toast is prepended to the collection; the oldest entries are
    /// evicted (with their timers cancelled) if the capacity bound would
    /// be exceeded. Unless the kind is [`ToastKind::Loading`] or the
    /// effective duration is [`ToastDuration::Infinite`], a one-shot
    /// expiry timer dismisses the toast after its duration. A zero
    /// finite duration clamps to the configured default.
    ///
    /// Supplying the id of a live toast replaces that toast: the old
    /// record and its pending timer are dropped, and the new toast gets
    /// a fresh timer.
    pub fn create(
        &self,
        content: impl Into<String>,
        kind: ToastKind,
        options: ToastOptions,
    ) -> ToastId {
        let shared = &self.shared;
        let id = options.id.unwrap_or_else(|| shared.generate_id());
        let duration = shared.config.effective_duration(options.duration);
        let toast = Toast {
            id: id.clone(),
            kind,
            content: content.into(),
            created_at: Instant::now(),
            visible: true,
            duration,
            pause_accumulated: Duration::ZERO,
            class_name: options.class_name,
            style_hints: options.style_hints,
            variant: options.variant,
        };

        let delivery = {
            let mut state = shared.lock_state();

            // Latest create with a given id wins: the old record and its
            // pending timer go away before the new record lands.
            if let Some(prev) = state.timers.remove(&id) {
                prev.handle.cancel();
                log::trace!("toast {id}: pending timer superseded by re-create");
            }
            state.toasts.retain(|t| t.id != id);

            state.toasts.insert(0, toast);
            while state.toasts.len() > shared.config.capacity {
                if let Some(evicted) = state.toasts.pop() {
                    if let Some(prev) = state.timers.remove(&evicted.id) {
                        prev.handle.cancel();
                    }
                    log::debug!(
                        "toast {}: evicted over capacity {}",
                        evicted.id,
                        shared.config.capacity
                    );
                }
            }

            if kind.auto_dismisses() {
                if let ToastDuration::Finite(after) = duration {
                    Shared::arm_expiry(shared, &mut state, &id, after);
                }
            }

            Delivery::capture(&state)
        };
        delivery.deliver();
        id
    }

    /// Dismisses one toast: flips it invisible, notifies, and removes it
    /// after the grace delay. Unknown ids are a silent no-op.
    pub fn dismiss(&self, id: &ToastId) {
        Shared::dismiss_one(&self.shared, id, None);
    }

    /// Dismisses every toast currently present.
    ///
    /// All of them flip invisible in one transition; after the grace
    /// delay, exactly the set captured here is removed in a second
    /// transition. Toasts created (or re-created under a reused id)
    /// during the grace window are unaffected.
    pub fn dismiss_all(&self) {
        let shared = &self.shared;
        let delivery = {
            let mut state = shared.lock_state();
            if state.toasts.is_empty() {
                return;
            }

            let swept: HashSet<ToastId> = state.toasts.iter().map(|t| t.id.clone()).collect();
            for toast in &mut state.toasts {
                toast.visible = false;
            }
            for (_, pending) in state.timers.drain() {
                pending.handle.cancel();
            }

            let weak = Arc::downgrade(shared);
            let task: Task = Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    Shared::sweep_removal(&shared, &swept);
                }
            });
            // The sweep handle is deliberately dropped: re-created ids are
            // protected by the visibility check when the sweep fires, so
            // nothing ever needs to cancel it.
            let _ = shared
                .scheduler
                .schedule(shared.config.dismiss_grace(), task);

            Delivery::capture(&state)
        };
        delivery.deliver();
    }

    /// Creates a `Success` toast with default options.
    pub fn success(&self, content: impl Into<String>) -> ToastId {
        self.create(content, ToastKind::Success, ToastOptions::default())
    }

    /// Creates an `Error` toast with default options.
    pub fn error(&self, content: impl Into<String>) -> ToastId {
        self.create(content, ToastKind::Error, ToastOptions::default())
    }

    /// Creates an `Info` toast with default options.
    pub fn info(&self, content: impl Into<String>) -> ToastId {
        self.create(content, ToastKind::Info, ToastOptions::default())
    }

    /// Creates a `Loading` toast with default options. It stays until
    /// dismissed (or replaced via its id).
    pub fn loading(&self, content: impl Into<String>) -> ToastId {
        self.create(content, ToastKind::Loading, ToastOptions::default())
    }

    /// Creates a `Blank` toast with default options.
    pub fn blank(&self, content: impl Into<String>) -> ToastId {
        self.create(content, ToastKind::Blank, ToastOptions::default())
    }

    /// Returns a snapshot of the current collection, most recent first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.shared.lock_state().toasts.clone()
    }

    /// Returns the number of toasts currently present (visible or
    /// fading).
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.lock_state().toasts.len()
    }

    /// Returns whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.lock_state().toasts.is_empty()
    }
}

impl std::fmt::Debug for ToastStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.lock_state();
        f.debug_struct("ToastStore")
            .field("toasts", &state.toasts.len())
            .field("listeners", &state.listeners.len())
            .field("capacity", &self.shared.config.capacity)
            .finish()
    }
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("toast store lock poisoned")
    }

    fn generate_id(&self) -> ToastId {
        let n = self.next_toast_id.fetch_add(1, Ordering::Relaxed) + 1;
        ToastId::new(n.to_string())
    }

    /// Arms a timer for `id`, replacing (and cancelling) any pending
    /// one, preserving the one-pending-timer-per-id invariant.
    fn arm(
        shared: &Arc<Self>,
        state: &mut State,
        id: &ToastId,
        after: Duration,
        on_fire: fn(&Arc<Shared>, &ToastId, u64),
    ) {
        let generation = shared.next_timer_generation.fetch_add(1, Ordering::Relaxed);
        let weak = Arc::downgrade(shared);
        let task_id = id.clone();
        let task: Task = Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                on_fire(&shared, &task_id, generation);
            }
        });
        let handle = shared.scheduler.schedule(after, task);
        if let Some(prev) = state.timers.insert(id.clone(), PendingTimer { generation, handle }) {
            prev.handle.cancel();
        }
    }

    fn arm_expiry(shared: &Arc<Self>, state: &mut State, id: &ToastId, after: Duration) {
        log::trace!("toast {id}: expiry armed in {after:?}");
        Self::arm(shared, state, id, after, |shared, id, generation| {
            Shared::dismiss_one(shared, id, Some(generation));
        });
    }

    fn arm_removal(shared: &Arc<Self>, state: &mut State, id: &ToastId) {
        Self::arm(
            shared,
            state,
            id,
            shared.config.dismiss_grace(),
            Shared::timed_removal,
        );
    }

    /// Checks that `generation` is still the pending timer for `id`.
    /// Performed under the lock, so a superseded or cancelled timer that
    /// races past the scheduler's cancel flag still has no effect.
    fn timer_is_current(state: &State, id: &ToastId, generation: u64) -> bool {
        state
            .timers
            .get(id)
            .is_some_and(|p| p.generation == generation)
    }

    /// The dismiss transition: flip invisible, swap the pending timer
    /// for a removal timer, notify. `required_generation` is set when
    /// invoked by an expiry timer.
    fn dismiss_one(shared: &Arc<Self>, id: &ToastId, required_generation: Option<u64>) {
        let delivery = {
            let mut state = shared.lock_state();
            if let Some(generation) = required_generation {
                if !Self::timer_is_current(&state, id, generation) {
                    return;
                }
            }
            let Some(toast) = state.toasts.iter_mut().find(|t| t.id == *id) else {
                log::trace!("toast {id}: dismiss for absent id ignored");
                return;
            };
            // Already-invisible toasts stay invisible; the flip itself is
            // a no-op but the grace window restarts below.
            toast.visible = false;
            Self::arm_removal(shared, &mut state, id);
            Delivery::capture(&state)
        };
        delivery.deliver();
    }

    /// Second phase of removal for a single dismissed toast.
    fn timed_removal(shared: &Arc<Self>, id: &ToastId, generation: u64) {
        let delivery = {
            let mut state = shared.lock_state();
            if !Self::timer_is_current(&state, id, generation) {
                return;
            }
            state.timers.remove(id);
            let Some(pos) = state.toasts.iter().position(|t| t.id == *id && !t.visible) else {
                return;
            };
            state.toasts.remove(pos);
            Delivery::capture(&state)
        };
        delivery.deliver();
    }

    /// Second phase of `dismiss_all`: removes the captured set, skipping
    /// any id that was re-created (visible again) during the grace
    /// window.
    fn sweep_removal(shared: &Arc<Self>, swept: &HashSet<ToastId>) {
        let delivery = {
            let mut state = shared.lock_state();
            let mut removed = Vec::new();
            state.toasts.retain(|t| {
                let gone = !t.visible && swept.contains(&t.id);
                if gone {
                    removed.push(t.id.clone());
                }
                !gone
            });
            if removed.is_empty() {
                return;
            }
            for id in &removed {
                if let Some(pending) = state.timers.remove(id) {
                    pending.handle.cancel();
                }
            }
            Delivery::capture(&state)
        };
        delivery.deliver();
    }
}

/// Capability returned by [`ToastStore::subscribe`].
///
/// Cancelling deregisters the listener exactly once; repeat calls are
/// no-ops. Dropping the subscription does not unsubscribe.
#[must_use = "dropping a Subscription does not unsubscribe; call cancel()"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    shared: Weak<Shared>,
    cancelled: AtomicBool,
}

impl Subscription {
    /// Deregisters the listener. Idempotent.
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(shared) = self.shared.upgrade() {
            shared.lock_state().listeners.retain(|(id, _)| *id != self.id);
        }
    }

    /// Returns whether [`Subscription::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
