// src/watch/watcher.rs

use std::fmt;
use std::path::Path;

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::engine::runtime::NotifyMessage;
use crate::errors::{RestartError, Result};

/// Something paths can be registered with for change notification.
pub trait WatchRegistry: Send {
    fn watch(&mut self, path: &Path) -> Result<()>;
}

/// Registry backed by the platform's recommended `notify` watcher.
///
/// Dropping it stops all watches and closes the event stream returned by
/// [`subscribe`].
pub struct NotifyRegistry {
    inner: RecommendedWatcher,
}

impl fmt::Debug for NotifyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyRegistry").finish()
    }
}

impl WatchRegistry for NotifyRegistry {
    fn watch(&mut self, path: &Path) -> Result<()> {
        self.inner
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| RestartError::Watch {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Create a watcher with no paths registered yet.
///
/// Events and backend errors arrive, unfiltered, on the returned receiver.
/// The notify callback runs on the backend's own thread, so it only forwards.
pub fn subscribe() -> Result<(NotifyRegistry, mpsc::UnboundedReceiver<NotifyMessage>)> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<NotifyMessage>();

    let inner = RecommendedWatcher::new(
        move |res: NotifyMessage| {
            if let Err(err) = event_tx.send(res) {
                // Receiver gone: the watch loop has already ended.
                eprintln!("devrestart: failed to forward notify event: {err}");
            }
        },
        Config::default(),
    )
    .map_err(RestartError::Subscribe)?;

    Ok((NotifyRegistry { inner }, event_rx))
}
