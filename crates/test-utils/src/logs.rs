use std::io;
use std::sync::{Arc, Mutex};

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt;

/// In-memory sink for a scoped fmt subscriber.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn recording_subscriber(buf: SharedBuf) -> impl tracing::Subscriber + Send + Sync {
    fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_target(true)
        .with_writer(move || buf.clone())
        .finish()
}

/// Thread-local log recorder, active until dropped.
///
/// Covers async code polled on the creating thread, e.g. everything inside a
/// current-thread `#[tokio::test]`, spawned tasks included.
pub struct LogCapture {
    buf: SharedBuf,
    _guard: DefaultGuard,
}

impl LogCapture {
    pub fn start() -> Self {
        let buf = SharedBuf::default();
        let guard = tracing::subscriber::set_default(recording_subscriber(buf.clone()));
        Self { buf, _guard: guard }
    }

    /// Everything formatted so far.
    pub fn contents(&self) -> String {
        let bytes = self.buf.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Lines whose target is `target`.
    pub fn lines_for(&self, target: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(&format!(" {target}:")))
            .map(str::to_string)
            .collect()
    }
}

/// Run `f` under a fresh [`LogCapture`] and return its result with the
/// formatted output.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let capture = LogCapture::start();
    let out = f();
    (out, capture.contents())
}
