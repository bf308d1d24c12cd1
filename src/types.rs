// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Toast` record and its supporting types:
//! `ToastId`, `ToastKind`, `ToastDuration`, and the `ToastOptions`
//! accepted by [`crate::store::ToastStore::create`].

use std::fmt;
use std::time::{Duration, Instant};

/// Unique identifier for a toast.
///
/// Ids are opaque strings. The store generates monotonically increasing
/// decimal ids when the caller does not supply one; callers may supply
/// their own ids to update a live toast in place (the latest `create`
/// with a given id wins). Uniqueness of caller-supplied ids is the
/// caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(String);

impl ToastId {
    /// Creates an id from an arbitrary string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToastId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ToastId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Semantic category of a toast.
///
/// The kind affects only auto-expiry policy; the store never interprets
/// it for content. `Loading` marks an in-progress operation and stays on
/// screen until dismissed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastKind {
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Error,
    /// Informational message.
    Info,
    /// In-progress operation; never auto-expires.
    Loading,
    /// Unclassified message.
    #[default]
    Blank,
}

impl ToastKind {
    /// Returns whether toasts of this kind are eligible for auto-expiry.
    ///
    /// `Loading` toasts are not; every other kind expires according to
    /// its duration.
    #[must_use]
    pub fn auto_dismisses(self) -> bool {
        !matches!(self, ToastKind::Loading)
    }
}

/// Requested lifetime of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastDuration {
    /// Auto-expire after the given interval.
    ///
    /// A zero interval is treated as unspecified and clamps to the
    /// store's default duration, never to [`ToastDuration::Infinite`].
    Finite(Duration),
    /// Never auto-expire, regardless of kind.
    Infinite,
}

impl ToastDuration {
    /// Convenience constructor from milliseconds.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        ToastDuration::Finite(Duration::from_millis(ms))
    }

    /// Returns whether this duration ever elapses.
    #[must_use]
    pub fn is_finite(self) -> bool {
        matches!(self, ToastDuration::Finite(_))
    }
}

impl From<Duration> for ToastDuration {
    fn from(d: Duration) -> Self {
        ToastDuration::Finite(d)
    }
}

/// Options accepted by `create`.
///
/// All fields are optional; anything unspecified degrades to a default
/// rather than failing.
#[derive(Debug, Clone, Default)]
pub struct ToastOptions {
    pub(crate) id: Option<ToastId>,
    pub(crate) duration: Option<ToastDuration>,
    pub(crate) class_name: Option<String>,
    pub(crate) style_hints: Vec<(String, String)>,
    pub(crate) variant: Option<String>,
}

impl ToastOptions {
    /// Creates an empty option set (all defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies an explicit id, replacing any live toast carrying it.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the auto-expiry duration.
    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<ToastDuration>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Disables auto-expiry for this toast.
    #[must_use]
    pub fn sticky(mut self) -> Self {
        self.duration = Some(ToastDuration::Infinite);
        self
    }

    /// Attaches an opaque CSS-class-like hint for the renderer.
    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Adds an opaque style hint key/value pair for the renderer.
    #[must_use]
    pub fn with_style_hint(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style_hints.push((key.into(), value.into()));
        self
    }

    /// Tags the toast with an opaque variant label.
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }
}

/// A toast notification record.
///
/// Owned exclusively by the store once created; subscribers receive
/// clones. The `content`, `class_name`, `style_hints`, and `variant`
/// fields are opaque payloads for the rendering layer — the store never
/// inspects them.
#[derive(Debug, Clone)]
pub struct Toast {
    pub(crate) id: ToastId,
    pub(crate) kind: ToastKind,
    pub(crate) content: String,
    pub(crate) created_at: Instant,
    pub(crate) visible: bool,
    pub(crate) duration: ToastDuration,
    pub(crate) pause_accumulated: Duration,
    pub(crate) class_name: Option<String>,
    pub(crate) style_hints: Vec<(String, String)>,
    pub(crate) variant: Option<String>,
}

impl Toast {
    /// Returns the toast's unique id.
    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    /// Returns the semantic kind.
    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    /// Returns the opaque content payload.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when this toast was inserted (monotonic clock).
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns the age of this toast.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Returns whether the toast is still in its visible phase.
    ///
    /// Once false, the toast is fading out and will be removed after the
    /// grace delay; it never becomes visible again.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the effective auto-expiry duration.
    #[must_use]
    pub fn duration(&self) -> ToastDuration {
        self.duration
    }

    /// Time the expiry countdown has spent paused.
    ///
    /// Reserved for a future pause/resume of the countdown; currently
    /// always zero.
    #[must_use]
    pub fn pause_accumulated(&self) -> Duration {
        self.pause_accumulated
    }

    /// Returns the opaque class-name hint, if any.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Returns the opaque style hints.
    #[must_use]
    pub fn style_hints(&self) -> &[(String, String)] {
        &self.style_hints
    }

    /// Returns the opaque variant label, if any.
    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }
}
