// src/engine/mod.rs

//! Debounce-and-restart engine.
//!
//! The pure state machine lives in [`core`]; the async/IO shell that waits on
//! the timer and the notify event stream is implemented in [`runtime`].

use std::path::PathBuf;

use tokio::time::Instant;

/// Events fed into the core, already stripped of backend specifics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// One or more watched paths changed at `at`.
    FileChanged { paths: Vec<PathBuf>, at: Instant },
    /// The notification backend reported an error.
    BackendError,
    /// The debounce timer expired at `at`.
    TimerFired { at: Instant },
}

/// Command produced by the core, to be executed by the IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// (Re)arm the single debounce timer for `deadline`, replacing any
    /// pending one.
    ArmTimer(Instant),
    /// Register `path` with the notification backend.
    Rewatch(PathBuf),
    /// Replace the process image with the executable at `path`.
    Restart(PathBuf),
}

/// Result of handling a single [`WatchEvent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
}

pub mod core;
pub mod runtime;

pub use self::core::RestartCore;
pub use runtime::Runtime;
