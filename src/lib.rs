// SPDX-License-Identifier: MPL-2.0
//! `toastops` is an in-memory toast notification store: a bounded,
//! subscription-based queue managing the lifecycle of transient UI
//! notifications. Rendering is left entirely to the consumer — the store
//! owns state and timing, nothing else.
//!
//! # Components
//!
//! - [`types`] - The `Toast` record, its kind, id, and creation options
//! - [`store`] - `ToastStore`: capacity enforcement, expiry timers, and
//!   snapshot fan-out to subscribers
//! - [`scheduler`] - Pluggable timer facility (`TokioScheduler` for
//!   production, `ManualScheduler` for deterministic tests)
//! - [`config`] - Capacity/duration/grace tuning, optionally from TOML
//! - [`global`] - Optional process-wide default store with a free
//!   function API
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use toastops::{ToastStore, TokioScheduler};
//!
//! let store = ToastStore::new(Arc::new(TokioScheduler::new()));
//!
//! // A renderer subscribes once and redraws from each snapshot.
//! let subscription = store.subscribe(|toasts| {
//!     for toast in toasts {
//!         println!("[{}] {:?}: {}", toast.id(), toast.kind(), toast.content());
//!     }
//! });
//!
//! store.success("profile saved");
//! let id = store.loading("uploading…");
//! // later: flip it invisible, then gone after the grace delay
//! store.dismiss(&id);
//!
//! subscription.cancel();
//! ```
//!
//! # Design Considerations
//!
//! - At most 5 toasts by default; the oldest are evicted first
//! - Default lifetime 4 s; `Loading` toasts never expire on their own
//! - Removal is two-phase: invisible-but-present for 400 ms so the
//!   renderer can run an exit animation, then gone
//! - All mutations are serialized; subscribers receive defensive
//!   snapshot copies

pub mod config;
pub mod error;
pub mod global;
pub mod scheduler;
pub mod store;
pub mod types;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
pub use store::{Subscription, ToastStore};
pub use types::{Toast, ToastDuration, ToastId, ToastKind, ToastOptions};
