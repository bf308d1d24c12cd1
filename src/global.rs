// SPDX-License-Identifier: MPL-2.0
//! Process-wide default store.
//!
//! The core of the crate is the explicit, constructible
//! [`ToastStore`] — compose one into your application and pass it where
//! it is needed. This module is the thin convenience layer over a single
//! shared instance for applications that want a `toast`-style free
//! function API at their outermost edge.
//!
//! The default store is created lazily on first use with a
//! [`TokioScheduler`], which requires a Tokio runtime to be current at
//! that moment. Call [`install`] first to supply a store built with a
//! different scheduler or configuration.
//!
//! ```no_run
//! toastops::global::success("profile saved");
//! let id = toastops::global::loading("uploading…");
//! // later
//! toastops::global::dismiss(&id);
//! ```

use crate::scheduler::TokioScheduler;
use crate::store::{Subscription, ToastStore};
use crate::types::{Toast, ToastId, ToastKind, ToastOptions};
use std::sync::{Arc, OnceLock};

static DEFAULT_STORE: OnceLock<ToastStore> = OnceLock::new();

/// Installs `store` as the process-wide default.
///
/// Returns `false` (and leaves the existing default in place) if one was
/// already installed or lazily created.
pub fn install(store: ToastStore) -> bool {
    DEFAULT_STORE.set(store).is_ok()
}

fn store() -> &'static ToastStore {
    DEFAULT_STORE.get_or_init(|| ToastStore::new(Arc::new(TokioScheduler::new())))
}

/// Shows a toast of the default kind (`Blank`).
pub fn show(content: impl Into<String>) -> ToastId {
    store().blank(content)
}

/// Shows a `Success` toast.
pub fn success(content: impl Into<String>) -> ToastId {
    store().success(content)
}

/// Shows an `Error` toast.
pub fn error(content: impl Into<String>) -> ToastId {
    store().error(content)
}

/// Shows an `Info` toast.
pub fn info(content: impl Into<String>) -> ToastId {
    store().info(content)
}

/// Shows a `Loading` toast; it stays until dismissed or replaced.
pub fn loading(content: impl Into<String>) -> ToastId {
    store().loading(content)
}

/// Shows a `Blank` toast.
pub fn blank(content: impl Into<String>) -> ToastId {
    store().blank(content)
}

/// Full-control creation on the default store.
pub fn create(content: impl Into<String>, kind: ToastKind, options: ToastOptions) -> ToastId {
    store().create(content, kind, options)
}

/// Dismisses one toast on the default store.
pub fn dismiss(id: &ToastId) {
    store().dismiss(id);
}

/// Dismisses every toast on the default store.
pub fn dismiss_all() {
    store().dismiss_all();
}

/// Subscribes to the default store.
pub fn subscribe(listener: impl Fn(&[Toast]) + Send + Sync + 'static) -> Subscription {
    store().subscribe(listener)
}
