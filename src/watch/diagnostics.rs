// src/watch/diagnostics.rs

//! Opt-in diagnostic output.
//!
//! When the toggle is off every method returns before building a `tracing`
//! event, so disabled diagnostics cost a branch and nothing else.

use std::ffi::OsStr;
use std::path::Path;

use tracing::info;

use crate::config::DIAGNOSTICS_ENV;

/// `tracing` target used for every diagnostic event.
pub const DIAGNOSTICS_TARGET: &str = "devrestart::diagnostics";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    enabled: bool,
}

impl Diagnostics {
    /// Read the toggle from the process environment.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var_os(DIAGNOSTICS_ENV).as_deref())
    }

    /// Enabled iff `value` is present and non-empty.
    pub fn from_value(value: Option<&OsStr>) -> Self {
        Self {
            enabled: value.is_some_and(|v| !v.is_empty()),
        }
    }

    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn watch_target(&self, path: &Path) {
        if !self.enabled {
            return;
        }
        info!(target: DIAGNOSTICS_TARGET, "reloader: {}", path.display());
    }

    pub fn file_event(&self, event: &notify::Event) {
        if !self.enabled {
            return;
        }
        info!(target: DIAGNOSTICS_TARGET, "watcher event: {:?}", event);
    }

    pub fn backend_error(&self, err: &notify::Error) {
        if !self.enabled {
            return;
        }
        info!(target: DIAGNOSTICS_TARGET, "watcher error: {}", err);
    }
}
