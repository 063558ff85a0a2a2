pub mod fakes;
pub mod logs;

use std::path::Path;
use std::sync::Once;

use notify::event::{AccessKind, ModifyKind};
use notify::{Event, EventKind};
use tracing_subscriber::{fmt, EnvFilter};

pub use fakes::{FakeRegistry, FakeRestarter, RecordedRestart};
pub use logs::{capture_logs, LogCapture};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// A content modification of `path`, as notify would report it.
pub fn modify_event(path: impl AsRef<Path>) -> notify::Result<Event> {
    Ok(Event::new(EventKind::Modify(ModifyKind::Any)).add_path(path.as_ref().to_path_buf()))
}

/// A read-only access of `path`.
pub fn access_event(path: impl AsRef<Path>) -> notify::Result<Event> {
    Ok(Event::new(EventKind::Access(AccessKind::Any)).add_path(path.as_ref().to_path_buf()))
}

/// A backend error with the given message.
pub fn backend_error(msg: &str) -> notify::Result<Event> {
    Err(notify::Error::generic(msg))
}
