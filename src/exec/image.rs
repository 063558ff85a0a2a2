// src/exec/image.rs

use std::ffi::{OsStr, OsString};
#[cfg(unix)]
use std::ffi::CString;
#[cfg(unix)]
use std::io;
use std::path::PathBuf;
use std::process::Command;

/// Everything needed to start the same program again.
///
/// `args` is the full argument vector including argument zero; `env` is the
/// full environment in the order the OS reported it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessImage {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub env: Vec<(OsString, OsString)>,
}

impl ProcessImage {
    /// Snapshot the current process's arguments and environment.
    ///
    /// Read at call time so anything the host changed after startup is
    /// carried over.
    pub fn capture(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: std::env::args_os().collect(),
            env: std::env::vars_os().collect(),
        }
    }

    /// The raw `execve` arguments: program path, argument vector and
    /// `KEY=VALUE` environment entries, all in captured order.
    ///
    /// Fails only if a value contains an interior NUL byte.
    #[cfg(unix)]
    pub fn exec_arguments(&self) -> io::Result<ExecArguments> {
        use std::os::unix::ffi::OsStrExt;

        let path = to_cstring(self.program.as_os_str().as_bytes().to_vec())?;
        let argv = self
            .args
            .iter()
            .map(|arg| to_cstring(arg.as_bytes().to_vec()))
            .collect::<io::Result<Vec<_>>>()?;
        let envp = self
            .env
            .iter()
            .map(|(key, value)| {
                let mut entry = key.as_bytes().to_vec();
                entry.push(b'=');
                entry.extend_from_slice(value.as_bytes());
                to_cstring(entry)
            })
            .collect::<io::Result<Vec<_>>>()?;

        Ok(ExecArguments { path, argv, envp })
    }

    /// Build a command that runs `program` with this argument vector and
    /// environment.
    ///
    /// `Command` keeps the environment in a sorted map, so variable order
    /// is not preserved; on unix the restart goes through
    /// [`exec_arguments`](Self::exec_arguments) instead.
    ///
    /// On unix argument zero is passed through untouched via `arg0`, so the
    /// new image sees the same `argv[0]` as the old one even though the
    /// program path is the resolved one.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);

        let mut args = self.args.iter();
        if let Some(argv0) = args.next() {
            set_arg0(&mut cmd, argv0);
        }
        cmd.args(args);
        cmd.env_clear();
        cmd.envs(self.env.iter().map(|(k, v)| (k, v)));
        cmd
    }
}

/// Arguments for a direct `execve` call.
#[cfg(unix)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecArguments {
    pub path: CString,
    pub argv: Vec<CString>,
    pub envp: Vec<CString>,
}

#[cfg(unix)]
fn to_cstring(bytes: Vec<u8>) -> io::Result<CString> {
    CString::new(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))
}

#[cfg(unix)]
fn set_arg0(cmd: &mut Command, argv0: &OsStr) {
    use std::os::unix::process::CommandExt;
    cmd.arg0(argv0);
}

#[cfg(not(unix))]
fn set_arg0(_cmd: &mut Command, _argv0: &OsStr) {}
