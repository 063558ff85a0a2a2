// src/engine/runtime.rs

use std::convert::Infallible;
use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::info;

use crate::errors::{RestartError, Result};
use crate::exec::{ProcessImage, Restarter};
use crate::watch::{Diagnostics, WatchRegistry};

use super::core::RestartCore;
use super::{CoreCommand, WatchEvent};

/// Raw message delivered by the notification backend.
pub type NotifyMessage = notify::Result<notify::Event>;

/// Drives the [`RestartCore`] from the notify event stream and a single
/// debounce timer, and carries out the commands it returns.
///
/// The shell owns everything the loop touches; nothing is shared with the
/// host program. Registration and restart go through the [`WatchRegistry`]
/// and [`Restarter`] traits so tests can observe them without touching the
/// filesystem or replacing the test process.
pub struct Runtime<W: WatchRegistry, R: Restarter> {
    core: RestartCore,
    events: mpsc::UnboundedReceiver<NotifyMessage>,
    registry: W,
    restarter: R,
    diagnostics: Diagnostics,
}

impl<W: WatchRegistry, R: Restarter> fmt::Debug for Runtime<W, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl<W: WatchRegistry, R: Restarter> Runtime<W, R> {
    pub fn new(
        core: RestartCore,
        events: mpsc::UnboundedReceiver<NotifyMessage>,
        registry: W,
        restarter: R,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            core,
            events,
            registry,
            restarter,
            diagnostics,
        }
    }

    /// Main event loop.
    ///
    /// Waits on whichever comes first of: the debounce timer, a file event,
    /// or a backend error. Only returns on a fatal error; a successful exec
    /// never comes back.
    pub async fn run(mut self) -> Result<Infallible> {
        let timer = time::sleep(Duration::ZERO);
        tokio::pin!(timer);
        let mut armed = false;

        loop {
            let event = tokio::select! {
                () = &mut timer, if armed => {
                    armed = false;
                    WatchEvent::TimerFired { at: timer.deadline() }
                }
                received = self.events.recv() => match received {
                    Some(Ok(event)) => {
                        self.diagnostics.file_event(&event);
                        // Reads of the binary (including by the replacement
                        // image itself) are not changes.
                        if event.kind.is_access() {
                            continue;
                        }
                        WatchEvent::FileChanged {
                            paths: event.paths,
                            at: Instant::now(),
                        }
                    }
                    Some(Err(err)) => {
                        self.diagnostics.backend_error(&err);
                        WatchEvent::BackendError
                    }
                    None => return Err(RestartError::EventStreamClosed),
                },
            };

            for command in self.core.step(event).commands {
                match command {
                    CoreCommand::ArmTimer(deadline) => {
                        timer.as_mut().reset(deadline);
                        armed = true;
                    }
                    CoreCommand::Rewatch(path) => self.registry.watch(&path)?,
                    CoreCommand::Restart(path) => {
                        info!("Restarting {}", path.display());
                        let image = ProcessImage::capture(path);
                        self.restarter.restart(&image)?;
                    }
                }
            }
        }
    }
}
