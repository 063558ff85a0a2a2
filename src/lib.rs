// src/lib.rs

//! Restart a running binary in place when it is rebuilt.
//!
//! Call [`init`] once (or as often as convenient) early in `main`. A
//! background task watches the executable the process was started from;
//! when it changes and then stays quiet for 500ms, the process `exec`s the
//! new binary with the same arguments and environment.
//!
//! Set `RELOADER_DEBUG` to any non-empty value to log every raw watch event.
//! Output goes through `tracing`; install a subscriber to see it.

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod init;
pub mod logging;
pub mod watch;

use std::convert::Infallible;
use std::ffi::OsStr;

use crate::config::WatchOptions;
use crate::engine::{RestartCore, Runtime};
use crate::errors::Result;
use crate::exec::{ExecRestarter, Restarter};
use crate::watch::{resolve_executable, subscribe, WatchRegistry};

pub use crate::init::init;

/// Watch the current executable and `exec` it on change.
///
/// Only returns on a fatal error.
pub async fn watch(options: WatchOptions) -> Result<Infallible> {
    let argv0 = std::env::args_os().next();
    watch_executable(argv0.as_deref(), options, ExecRestarter).await
}

/// Like [`watch`], with argument zero and the restart backend supplied by
/// the caller.
///
/// Start-up order: create the subscription, resolve `argv0`, register the
/// resolved path. Each step is fatal on failure.
pub async fn watch_executable<R: Restarter>(
    argv0: Option<&OsStr>,
    options: WatchOptions,
    restarter: R,
) -> Result<Infallible> {
    let (mut registry, events) = subscribe()?;

    let target = resolve_executable(argv0)?;
    options.diagnostics.watch_target(&target);
    registry.watch(&target)?;

    let core = RestartCore::new(target, options.debounce);
    Runtime::new(core, events, registry, restarter, options.diagnostics)
        .run()
        .await
}
