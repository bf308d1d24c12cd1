// SPDX-License-Identifier: MPL-2.0
//! Store configuration.
//!
//! Tuning knobs for a [`crate::store::ToastStore`]: how many toasts stay
//! on screen, how long a toast lives by default, and how long the fading
//! phase lasts before removal. Values can be set in code or loaded from
//! a TOML file:
//!
//! ```toml
//! capacity = 3
//! default_duration_ms = 2500
//! dismiss_grace_ms = 250
//! ```
//!
//! Missing fields fall back to the crate defaults and unknown fields are
//! ignored, so a config file shared with a larger application can carry
//! extra sections without breaking this crate.

use crate::error::Result;
use crate::types::ToastDuration;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Maximum number of toasts present at once (active or fading).
pub const DEFAULT_CAPACITY: usize = 5;

/// Auto-expiry duration applied when a toast does not specify one.
pub const DEFAULT_DURATION_MS: u64 = 4_000;

/// Delay between the visibility flip and full removal, reserved for the
/// renderer's exit animation.
pub const DISMISS_GRACE_MS: u64 = 400;

/// Configuration consumed by [`crate::store::ToastStore::with_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Capacity bound; the oldest toasts are evicted beyond it.
    pub capacity: usize,
    /// Default auto-expiry duration in milliseconds.
    pub default_duration_ms: u64,
    /// Grace delay in milliseconds between dismiss and removal.
    pub dismiss_grace_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_duration_ms: DEFAULT_DURATION_MS,
            dismiss_grace_ms: DISMISS_GRACE_MS,
        }
    }
}

impl StoreConfig {
    /// Clamps degenerate values to usable ones: a zero capacity becomes
    /// one, a zero default duration becomes the crate default. A zero
    /// grace delay is legal (removal happens on the next scheduler
    /// tick).
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.capacity == 0 {
            self.capacity = 1;
        }
        if self.default_duration_ms == 0 {
            self.default_duration_ms = DEFAULT_DURATION_MS;
        }
        self
    }

    /// Returns the default auto-expiry duration.
    #[must_use]
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    /// Returns the dismiss grace delay.
    #[must_use]
    pub fn dismiss_grace(&self) -> Duration {
        Duration::from_millis(self.dismiss_grace_ms)
    }

    /// Resolves a requested duration against this configuration.
    ///
    /// Unspecified and zero finite durations clamp to the default;
    /// an explicit `Infinite` passes through.
    #[must_use]
    pub fn effective_duration(&self, requested: Option<ToastDuration>) -> ToastDuration {
        match requested {
            None => ToastDuration::Finite(self.default_duration()),
            Some(ToastDuration::Finite(d)) if d.is_zero() => {
                ToastDuration::Finite(self.default_duration())
            }
            Some(d) => d,
        }
    }
}

/// Loads a configuration from a TOML file at an explicit path.
pub fn load_from_path(path: &Path) -> Result<StoreConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config: StoreConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Saves a configuration as TOML to an explicit path.
pub fn save_to_path(config: &StoreConfig, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_the_named_constants() {
        let config = StoreConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.default_duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(config.dismiss_grace_ms, DISMISS_GRACE_MS);
    }

    #[test]
    fn normalized_clamps_zero_capacity_and_duration() {
        let config = StoreConfig {
            capacity: 0,
            default_duration_ms: 0,
            dismiss_grace_ms: 0,
        }
        .normalized();

        assert_eq!(config.capacity, 1);
        assert_eq!(config.default_duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(config.dismiss_grace_ms, 0);
    }

    #[test]
    fn effective_duration_clamps_zero_to_default_never_infinite() {
        let config = StoreConfig::default();

        assert_eq!(
            config.effective_duration(None),
            ToastDuration::Finite(config.default_duration())
        );
        assert_eq!(
            config.effective_duration(Some(ToastDuration::Finite(Duration::ZERO))),
            ToastDuration::Finite(config.default_duration())
        );
        assert_eq!(
            config.effective_duration(Some(ToastDuration::from_millis(1500))),
            ToastDuration::from_millis(1500)
        );
        assert_eq!(
            config.effective_duration(Some(ToastDuration::Infinite)),
            ToastDuration::Infinite
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: StoreConfig = toml::from_str("capacity = 3").unwrap();
        assert_eq!(config.capacity, 3);
        assert_eq!(config.default_duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(config.dismiss_grace_ms, DISMISS_GRACE_MS);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let config: StoreConfig =
            toml::from_str("capacity = 2\n\n[renderer]\nposition = \"bottom-right\"\n").unwrap();
        assert_eq!(config.capacity, 2);
    }

    #[test]
    fn toml_round_trip_preserves_values() {
        let config = StoreConfig {
            capacity: 7,
            default_duration_ms: 2_000,
            dismiss_grace_ms: 150,
        };
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: StoreConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
