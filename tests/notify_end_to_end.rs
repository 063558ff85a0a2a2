// tests/notify_end_to_end.rs
//
// Uses the real notify backend on a temporary "binary" and a fake restarter.

#![cfg(unix)]

mod common;
use crate::common::*;

use std::fs;
use std::os::unix::fs::PermissionsExt;

use devrestart::config::WatchOptions;
use devrestart::watch::Diagnostics;
use devrestart::watch_executable;

#[tokio::test]
async fn rewriting_the_binary_triggers_a_restart() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("app");
    fs::write(&bin, b"#!/bin/sh\necho v1\n").unwrap();
    fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

    let restarter = FakeRestarter::new();
    let restarts = restarter.restarts();
    let options = WatchOptions {
        debounce: ms(100),
        diagnostics: Diagnostics::enabled(),
    };

    let task = tokio::spawn({
        let bin = bin.clone();
        async move { watch_executable(Some(bin.as_os_str()), options, restarter).await }
    });

    // Let start-up register the watch before touching the file.
    tokio::time::sleep(ms(200)).await;
    assert!(!task.is_finished(), "watcher failed to start");
    assert!(restarts.lock().unwrap().is_empty());

    fs::write(&bin, b"#!/bin/sh\necho v2\n").unwrap();

    with_timeout(async {
        while restarts.lock().unwrap().is_empty() {
            tokio::time::sleep(ms(20)).await;
        }
    })
    .await;

    let recorded = restarts.lock().unwrap().clone();
    assert!(
        recorded[0].image.program.ends_with("app"),
        "restarted {:?}",
        recorded[0].image.program
    );
    task.abort();
}

/// Build tools usually write a fresh file and rename it over the old binary.
fn replace_by_rename(bin: &std::path::Path, contents: &[u8]) {
    let tmp = bin.with_extension("tmp");
    fs::write(&tmp, contents).unwrap();
    fs::set_permissions(&tmp, fs::Permissions::from_mode(0o755)).unwrap();
    fs::rename(&tmp, bin).unwrap();
}

async fn wait_for_restarts(
    restarts: &std::sync::Arc<std::sync::Mutex<Vec<RecordedRestart>>>,
    count: usize,
) {
    with_timeout(async {
        while restarts.lock().unwrap().len() < count {
            tokio::time::sleep(ms(20)).await;
        }
    })
    .await;
}

#[tokio::test]
async fn repeated_rename_replace_keeps_triggering_restarts() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("app");
    fs::write(&bin, b"#!/bin/sh\necho v1\n").unwrap();
    fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

    let restarter = FakeRestarter::new();
    let restarts = restarter.restarts();
    let options = WatchOptions {
        debounce: ms(100),
        diagnostics: Diagnostics::enabled(),
    };

    let task = tokio::spawn({
        let bin = bin.clone();
        async move { watch_executable(Some(bin.as_os_str()), options, restarter).await }
    });
    tokio::time::sleep(ms(200)).await;

    replace_by_rename(&bin, b"#!/bin/sh\necho v2\n");
    wait_for_restarts(&restarts, 1).await;

    // Let the first burst settle before the next rebuild.
    tokio::time::sleep(ms(300)).await;
    let after_first = restarts.lock().unwrap().len();

    replace_by_rename(&bin, b"#!/bin/sh\necho v3\n");
    wait_for_restarts(&restarts, after_first + 1).await;

    assert!(!task.is_finished(), "watch loop ended after rename-replace");
    task.abort();
}
