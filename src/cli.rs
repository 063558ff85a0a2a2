// src/cli.rs

//! CLI argument parsing for the `devrestart-demo` binary, using `clap`.
//!
//! The watcher itself takes no arguments; whatever the demo receives is
//! handed back unchanged to the restarted image.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `devrestart-demo`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "devrestart-demo",
    version,
    about = "Long-running demo that restarts itself whenever its binary is rebuilt.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DEVRESTART_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Seconds between heartbeat log lines.
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub heartbeat: u64,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
