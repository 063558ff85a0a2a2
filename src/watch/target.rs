// src/watch/target.rs

use std::ffi::OsStr;
use std::path::PathBuf;

use crate::errors::{RestartError, Result};

/// Resolve the executable named by `argv0` the way a shell would.
///
/// A bare name is looked up on `PATH`; a name containing a separator is
/// taken relative to the current directory. The result is made absolute but
/// symlinks are left alone, so a rebuilt link target is still the file being
/// watched.
pub fn resolve_executable(argv0: Option<&OsStr>) -> Result<PathBuf> {
    let argv0 = argv0.ok_or(RestartError::MissingArgv0)?;

    let found = which::which(argv0).map_err(|source| RestartError::ResolveExecutable {
        argv0: argv0.to_os_string(),
        source,
    })?;

    std::path::absolute(&found).map_err(|source| RestartError::AbsolutePath {
        path: found,
        source,
    })
}
