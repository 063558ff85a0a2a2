// src/watch/mod.rs

//! File watching.
//!
//! This module is responsible for:
//! - Resolving the running executable on the search path.
//! - Wiring up a filesystem watcher (`notify`) and forwarding its events into
//!   the async world.
//! - Gating diagnostic output behind the `RELOADER_DEBUG` toggle.
//!
//! It does **not** decide when to restart; that is the engine's job.

pub mod diagnostics;
pub mod target;
pub mod watcher;

pub use diagnostics::{Diagnostics, DIAGNOSTICS_TARGET};
pub use target::resolve_executable;
pub use watcher::{subscribe, NotifyRegistry, WatchRegistry};
