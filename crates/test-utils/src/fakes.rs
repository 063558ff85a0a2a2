use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::time::Instant;

use devrestart::errors::{RestartError, Result};
use devrestart::exec::{ProcessImage, Restarter};
use devrestart::watch::WatchRegistry;

/// A registry that records registered paths instead of watching them.
///
/// Registering the path given to [`FakeRegistry::failing_on`] fails the way
/// a vanished file would.
#[derive(Debug, Clone, Default)]
pub struct FakeRegistry {
    watched: Arc<Mutex<Vec<PathBuf>>>,
    fail_on: Option<PathBuf>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(path: impl Into<PathBuf>) -> Self {
        Self {
            fail_on: Some(path.into()),
            ..Self::default()
        }
    }

    /// Shared handle to the paths registered so far.
    pub fn watched(&self) -> Arc<Mutex<Vec<PathBuf>>> {
        Arc::clone(&self.watched)
    }
}

impl WatchRegistry for FakeRegistry {
    fn watch(&mut self, path: &Path) -> Result<()> {
        if self.fail_on.as_deref() == Some(path) {
            return Err(RestartError::Watch {
                path: path.to_path_buf(),
                source: notify::Error::path_not_found(),
            });
        }
        self.watched.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// One restart the fake was asked to perform.
#[derive(Debug, Clone)]
pub struct RecordedRestart {
    pub at: Instant,
    pub image: ProcessImage,
}

/// A restarter that:
/// - records the image and the (Tokio) time of every restart
/// - returns without replacing the process, or fails if built with
///   [`FakeRestarter::failing`].
#[derive(Debug, Clone, Default)]
pub struct FakeRestarter {
    restarts: Arc<Mutex<Vec<RecordedRestart>>>,
    fail: bool,
}

impl FakeRestarter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Shared handle to the restarts recorded so far.
    pub fn restarts(&self) -> Arc<Mutex<Vec<RecordedRestart>>> {
        Arc::clone(&self.restarts)
    }
}

impl Restarter for FakeRestarter {
    fn restart(&mut self, image: &ProcessImage) -> Result<()> {
        self.restarts.lock().unwrap().push(RecordedRestart {
            at: Instant::now(),
            image: image.clone(),
        });

        if self.fail {
            return Err(RestartError::Exec {
                path: image.program.clone(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        Ok(())
    }
}
