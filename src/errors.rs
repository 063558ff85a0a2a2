// src/errors.rs

//! Crate-wide error type.
//!
//! Every variant is fatal for the watch loop: a watcher that cannot watch, or
//! cannot restart, has no useful degraded mode. Transient backend errors are
//! never turned into a `RestartError`; they only show up as diagnostics.

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestartError {
    #[error("failed to create filesystem watcher: {0}")]
    Subscribe(#[source] notify::Error),

    #[error("process has no argument zero to resolve")]
    MissingArgv0,

    #[error("failed to resolve executable {argv0:?} on the search path: {source}")]
    ResolveExecutable {
        argv0: OsString,
        #[source]
        source: which::Error,
    },

    #[error("failed to make executable path {path:?} absolute: {source}")]
    AbsolutePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to watch {path:?}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("failed to re-execute {path:?}: {source}")]
    Exec {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("filesystem event stream closed")]
    EventStreamClosed,

    #[error("failed to start background watcher: {0}")]
    Background(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RestartError>;
