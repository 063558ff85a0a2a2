// src/init.rs

//! Process-wide start-up of the background watcher.

use std::convert::Infallible;
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use tokio::runtime::Builder;
use tracing::error;

use crate::config::WatchOptions;
use crate::errors::{RestartError, Result};

/// Runs a start-up closure at most once, however many callers race on it.
#[derive(Debug)]
pub struct InitGuard {
    once: Once,
    starts: AtomicUsize,
}

impl InitGuard {
    pub const fn new() -> Self {
        Self {
            once: Once::new(),
            starts: AtomicUsize::new(0),
        }
    }

    /// Call `start` if no earlier call on this guard has.
    ///
    /// Concurrent callers block until the winning call has returned.
    pub fn run(&self, start: impl FnOnce()) {
        self.once.call_once(|| {
            self.starts.fetch_add(1, Ordering::SeqCst);
            start();
        });
    }

    /// How many times a start closure has actually run (0 or 1).
    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }
}

impl Default for InitGuard {
    fn default() -> Self {
        Self::new()
    }
}

static WATCHER: InitGuard = InitGuard::new();

/// Start watching the running executable and restart it when it changes.
///
/// Idempotent and non-blocking: the first call schedules the background
/// watch loop, later calls do nothing. The loop always runs on its own
/// `devrestart` thread with a current-thread runtime, so it outlives any
/// runtime the caller happens to be in.
///
/// Any failure of the watcher terminates the process.
pub fn init() {
    WATCHER.run(spawn_watcher_task);
}

/// Number of background watchers started by [`init`] in this process.
pub fn watcher_starts() -> usize {
    WATCHER.starts()
}

fn spawn_watcher_task() {
    let options = WatchOptions::from_env();

    let spawned = thread::Builder::new()
        .name("devrestart".to_string())
        .spawn(move || {
            if let Err(err) = run_on_own_runtime(options) {
                fatal(err);
            }
        });

    if let Err(err) = spawned {
        fatal(RestartError::Background(err));
    }
}

fn run_on_own_runtime(options: WatchOptions) -> Result<Infallible> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(RestartError::Background)?;
    runtime.block_on(crate::watch(options))
}

/// A dead watcher must not go unnoticed: report and end the process.
fn fatal(err: RestartError) -> ! {
    error!(error = %err, "devrestart watcher failed");
    eprintln!("devrestart: fatal: {err:?}");
    std::process::exit(1);
}
