//! Key-press filtering: auto-repeat suppression and burst throttling.
//!
//! A held key is reported once until it is released. Presses are counted in
//! a fixed window; more than `max_presses` in one window is treated as a
//! cheating attempt and rejected.

use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Rate limit settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Presses allowed per window.
    pub max_presses: u32,

    /// Window length.
    #[serde(with = "crate::core::config::millis")]
    pub window: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_presses: 10,
            window: Duration::from_millis(1000),
        }
    }
}

/// Result of feeding one key-down into the guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyVerdict {
    /// Forward the key to the engine.
    Accepted,
    /// The key is still held from an earlier press.
    Repeat,
    /// Too many presses in the current window.
    Throttled,
}

/// Stateful key filter. One per keyboard.
#[derive(Clone, Debug, Default)]
pub struct InputGuard {
    config: GuardConfig,
    held: FxHashSet<char>,
    window_start: Duration,
    presses: u32,
}

impl InputGuard {
    #[must_use]
    pub fn new(config: GuardConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Register a key-down at time `now`.
    pub fn key_down(&mut self, key: char, now: Duration) -> KeyVerdict {
        let key = key.to_ascii_lowercase();
        if !self.held.insert(key) {
            return KeyVerdict::Repeat;
        }

        if now.saturating_sub(self.window_start) > self.config.window {
            self.presses = 0;
            self.window_start = now;
        }

        self.presses += 1;

        if self.presses > self.config.max_presses {
            warn!(
                presses = self.presses,
                window_ms = u64::try_from(self.config.window.as_millis()).unwrap_or(u64::MAX),
                "excessive key presses detected"
            );
            return KeyVerdict::Throttled;
        }

        KeyVerdict::Accepted
    }

    /// Register a key-up. Unknown keys are ignored.
    pub fn key_up(&mut self, key: char) {
        self.held.remove(&key.to_ascii_lowercase());
    }

    /// Forget held keys and counters.
    pub fn reset(&mut self) {
        self.held.clear();
        self.presses = 0;
        self.window_start = Duration::ZERO;
    }
}
