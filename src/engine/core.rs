// src/engine/core.rs

//! Pure debounce state machine.
//!
//! `RestartCore` consumes [`WatchEvent`]s and answers with the commands the
//! shell should run. It owns the watch target and at most one pending
//! deadline. It performs no IO and never reads the clock itself: every event
//! carries its own timestamp, so the sliding window can be tested with
//! synthetic instants.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::Instant;

use crate::engine::{CoreCommand, CoreStep, WatchEvent};

#[derive(Debug)]
pub struct RestartCore {
    target: PathBuf,
    debounce: Duration,
    deadline: Option<Instant>,
}

impl RestartCore {
    pub fn new(target: impl Into<PathBuf>, debounce: Duration) -> Self {
        Self {
            target: target.into(),
            debounce,
            deadline: None,
        }
    }

    /// The executable that will be re-executed.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// When the pending restart fires, if one is scheduled.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn step(&mut self, event: WatchEvent) -> CoreStep {
        match event {
            WatchEvent::FileChanged { paths, at } => self.on_change(paths, at),
            WatchEvent::BackendError => CoreStep::default(),
            WatchEvent::TimerFired { at } => self.on_timer(at),
        }
    }

    fn on_change(&mut self, paths: Vec<PathBuf>, at: Instant) -> CoreStep {
        let deadline = at + self.debounce;
        self.deadline = Some(deadline);

        let mut commands = Vec::with_capacity(paths.len() + 1);
        commands.push(CoreCommand::ArmTimer(deadline));
        commands.extend(paths.into_iter().map(CoreCommand::Rewatch));
        CoreStep { commands }
    }

    fn on_timer(&mut self, at: Instant) -> CoreStep {
        match self.deadline {
            Some(deadline) if at >= deadline => {
                self.deadline = None;
                CoreStep {
                    commands: vec![CoreCommand::Restart(self.target.clone())],
                }
            }
            // Stale expiry of a timer that has since been re-armed, or a
            // spurious wake with nothing pending.
            _ => CoreStep::default(),
        }
    }
}
