// src/exec/backend.rs

//! Pluggable restart backend.
//!
//! The runtime hands a captured [`ProcessImage`] to a `Restarter` instead of
//! calling `exec` directly. Production code uses [`ExecRestarter`]; tests
//! provide an implementation that records the image and returns.

use crate::errors::{RestartError, Result};

use super::image::ProcessImage;

/// Trait abstracting how the process is replaced.
pub trait Restarter: Send {
    /// Replace the running process with `image`.
    ///
    /// A real implementation does not return on success. Returning `Ok`
    /// means the implementation chose to keep the current process alive
    /// (fakes), and the watch loop carries on.
    fn restart(&mut self, image: &ProcessImage) -> Result<()>;
}

/// Replaces the process image in place with `execve`, passing argv and the
/// environment exactly as captured.
///
/// The process keeps its pid, open descriptors without close-on-exec, and
/// its parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecRestarter;

impl Restarter for ExecRestarter {
    #[cfg(unix)]
    fn restart(&mut self, image: &ProcessImage) -> Result<()> {
        let exec_error = |source: std::io::Error| RestartError::Exec {
            path: image.program.clone(),
            source,
        };

        let args = image.exec_arguments().map_err(exec_error)?;

        // `execve` only returns on failure.
        let errno = match nix::unistd::execve(&args.path, &args.argv, &args.envp) {
            Ok(never) => match never {},
            Err(errno) => errno,
        };
        Err(exec_error(std::io::Error::from(errno)))
    }

    /// Without an exec-replace facility, run the new binary as a child, wait
    /// for it, and exit with its status. The pid changes.
    #[cfg(not(unix))]
    fn restart(&mut self, image: &ProcessImage) -> Result<()> {
        let status = image
            .command()
            .status()
            .map_err(|source| RestartError::Exec {
                path: image.program.clone(),
                source,
            })?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn exec_of_missing_binary_reports_path() {
        let image = ProcessImage {
            program: PathBuf::from("/nonexistent/devrestart-missing-binary"),
            args: vec!["app".into()],
            env: Vec::new(),
        };

        let err = ExecRestarter.restart(&image).unwrap_err();
        match err {
            RestartError::Exec { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/devrestart-missing-binary"));
            }
            other => panic!("expected Exec error, got {other:?}"),
        }
    }
}
