// src/config.rs

//! Watcher options.
//!
//! There is no configuration file and no flags: `init()` always runs with
//! [`WatchOptions::from_env`]. The struct exists so the lower-level entry
//! points can be driven with a different quiet window in tests.

use std::time::Duration;

use crate::watch::Diagnostics;

/// Quiet period that must elapse after the last change before restarting.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Environment variable that enables diagnostic output when non-empty.
pub const DIAGNOSTICS_ENV: &str = "RELOADER_DEBUG";

#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    /// Sliding quiet window applied to change events.
    pub debounce: Duration,
    /// Whether raw watch events and backend errors are logged.
    pub diagnostics: Diagnostics,
}

impl WatchOptions {
    /// Defaults, with the diagnostic toggle read from [`DIAGNOSTICS_ENV`].
    pub fn from_env() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            diagnostics: Diagnostics::from_env(),
        }
    }
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self::from_env()
    }
}
