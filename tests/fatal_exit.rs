// tests/fatal_exit.rs
//
// Runs the demo binary under an argument zero that cannot be found on the
// search path: the background watcher must take the whole process down.

#![cfg(unix)]

use std::ffi::OsStr;
use std::io::Read;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::process::CommandExt;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Run the demo with `argv0` and wait (bounded) for it to exit.
fn run_demo_as(argv0: &OsStr) -> (ExitStatus, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_devrestart-demo"))
        .arg0(argv0)
        .env_remove("RELOADER_DEBUG")
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break status;
        }
        if Instant::now() > deadline {
            child.kill().unwrap();
            panic!("demo kept running without a watcher");
        }
        thread::sleep(Duration::from_millis(20));
    };

    let mut stderr = String::new();
    child
        .stderr
        .take()
        .unwrap()
        .read_to_string(&mut stderr)
        .unwrap();

    (status, stderr)
}

#[test]
fn unresolvable_argv0_terminates_the_process() {
    let (status, stderr) = run_demo_as(OsStr::new("devrestart-no-such-binary"));

    assert_eq!(status.code(), Some(1), "stderr:\n{stderr}");
    assert!(stderr.contains("devrestart: fatal"), "stderr:\n{stderr}");
    assert!(
        stderr.contains("devrestart-no-such-binary"),
        "error should name argument zero:\n{stderr}"
    );
}

#[test]
fn non_utf8_argv0_is_reported_not_panicked_on() {
    let (status, stderr) = run_demo_as(OsStr::from_bytes(b"devrestart-\xff-missing"));

    assert_eq!(status.code(), Some(1), "stderr:\n{stderr}");
    assert!(stderr.contains("devrestart: fatal"), "stderr:\n{stderr}");
    assert!(!stderr.contains("panicked"), "stderr:\n{stderr}");
}
