// SPDX-License-Identifier: MPL-2.0
//! Timer scheduling abstraction.
//!
//! The store never talks to a clock directly; it asks a [`Scheduler`]
//! to run a task after a delay and holds on to the returned
//! [`TimerHandle`] for cancellation. Two implementations ship with the
//! crate:
//!
//! - [`TokioScheduler`] — production implementation on `tokio::time`.
//! - [`ManualScheduler`] — virtual clock for deterministic tests; time
//!   only moves when [`ManualScheduler::advance`] is called.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A task to run once after a delay.
pub type Task = Box<dyn FnOnce() + Send>;

/// Schedules one-shot deferred tasks.
pub trait Scheduler: Send + Sync {
    /// Arms a one-shot timer that runs `task` once `after` has elapsed,
    /// unless the returned handle is cancelled first.
    fn schedule(&self, after: Duration, task: Task) -> TimerHandle;
}

/// Cancellation capability for a scheduled task.
///
/// Cancelling is idempotent and safe from within the task itself.
/// Dropping a handle detaches it; the task still runs.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub(crate) fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Prevents the task from running if it has not fired yet.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns whether this timer has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Production scheduler backed by `tokio::time`.
///
/// Captures a runtime handle at construction, so timers may be armed
/// from non-async code as long as the runtime outlives them. The cancel
/// flag is checked immediately before the task runs; store callbacks
/// additionally re-validate state under the store lock, so a timer that
/// loses the race and fires anyway is still a no-op.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
}

impl TokioScheduler {
    /// Creates a scheduler on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime context; use
    /// [`TokioScheduler::from_handle`] in that case.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runtime: tokio::runtime::Handle::current(),
        }
    }

    /// Creates a scheduler on an explicit runtime handle.
    #[must_use]
    pub fn from_handle(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, after: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let flag = handle.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(after).await;
            if !flag.is_cancelled() {
                task();
            }
        });
        handle
    }
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Tasks run inside [`ManualScheduler::advance`], on the caller's
/// thread, in (due time, submission order). The internal lock is
/// released around each task, so a task may re-enter the store and the
/// store may arm further timers on this scheduler.
#[derive(Default)]
pub struct ManualScheduler {
    inner: Mutex<ManualInner>,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_seq: u64,
    entries: Vec<Entry>,
}

struct Entry {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    task: Task,
}

impl ManualScheduler {
    /// Creates a scheduler with its clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.lock().expect("scheduler lock poisoned").now
    }

    /// Returns the number of pending (not yet fired, not cancelled)
    /// timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        let inner = self.inner.lock().expect("scheduler lock poisoned");
        inner
            .entries
            .iter()
            .filter(|e| !e.handle.is_cancelled())
            .count()
    }

    /// Moves the clock forward and runs every task that comes due.
    ///
    /// The clock steps to each task's due time before the task runs, so
    /// a follow-up timer armed by a firing task is measured from that
    /// task's due time and may itself fire within the same `advance`.
    pub fn advance(&self, by: Duration) {
        let target = self.inner.lock().expect("scheduler lock poisoned").now + by;

        loop {
            let next = {
                let mut inner = self.inner.lock().expect("scheduler lock poisoned");
                inner.entries.retain(|e| !e.handle.is_cancelled());
                let idx = inner
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.due <= target)
                    .min_by_key(|(_, e)| (e.due, e.seq))
                    .map(|(idx, _)| idx);
                match idx {
                    Some(idx) => {
                        let entry = inner.entries.swap_remove(idx);
                        inner.now = inner.now.max(entry.due);
                        Some(entry)
                    }
                    None => {
                        inner.now = target;
                        None
                    }
                }
            };

            match next {
                // Run outside the lock: the task may re-enter the store,
                // which may schedule on this scheduler again.
                Some(entry) => (entry.task)(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, after: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let mut inner = self.inner.lock().expect("scheduler lock poisoned");
        inner.entries.retain(|e| !e.handle.is_cancelled());
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let due = inner.now + after;
        inner.entries.push(Entry {
            due,
            seq,
            handle: handle.clone(),
            task,
        });
        handle
    }
}
