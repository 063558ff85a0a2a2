#![allow(dead_code)]

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use devrestart::engine::runtime::NotifyMessage;
use devrestart::engine::{RestartCore, Runtime};
use devrestart::errors::Result;
use devrestart::watch::Diagnostics;

pub use devrestart_test_utils::*;

pub const WINDOW: Duration = Duration::from_millis(500);
pub const APP: &str = "/tmp/app";

/// A runtime watching [`APP`] with fakes on both ends, spawned on the
/// current test runtime.
pub struct Harness {
    pub events: mpsc::UnboundedSender<NotifyMessage>,
    pub restarts: Arc<Mutex<Vec<RecordedRestart>>>,
    pub watched: Arc<Mutex<Vec<PathBuf>>>,
    pub started: Instant,
    pub handle: JoinHandle<Result<Infallible>>,
}

impl Harness {
    pub fn spawn(diagnostics: Diagnostics) -> Self {
        Self::spawn_with(FakeRegistry::new(), FakeRestarter::new(), diagnostics)
    }

    pub fn spawn_with(
        registry: FakeRegistry,
        restarter: FakeRestarter,
        diagnostics: Diagnostics,
    ) -> Self {
        let (events, rx) = mpsc::unbounded_channel();
        let restarts = restarter.restarts();
        let watched = registry.watched();

        let core = RestartCore::new(APP, WINDOW);
        let runtime = Runtime::new(core, rx, registry, restarter, diagnostics);

        Self {
            events,
            restarts,
            watched,
            started: Instant::now(),
            handle: tokio::spawn(runtime.run()),
        }
    }

    pub fn send(&self, msg: NotifyMessage) {
        self.events.send(msg).expect("runtime dropped its receiver");
    }

    /// Sleep until `offset` after the harness started.
    pub async fn at(&self, offset: Duration) {
        tokio::time::sleep_until(self.started + offset).await;
    }

    /// Restart times relative to the start of the harness.
    pub fn restart_offsets(&self) -> Vec<Duration> {
        self.restarts
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.at - self.started)
            .collect()
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Tokio's timer wheel has millisecond resolution; allow a few ticks.
pub fn assert_near(actual: Duration, expected: Duration) {
    let slack = ms(3);
    assert!(
        actual + ms(1) >= expected && actual <= expected + slack,
        "expected ~{expected:?}, got {actual:?}"
    );
}
