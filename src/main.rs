// src/main.rs

use std::time::Duration;

use tracing::info;

use devrestart::{cli, logging};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("devrestart-demo error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;

    devrestart::init();

    let argv: Vec<std::ffi::OsString> = std::env::args_os().collect();
    info!(pid = std::process::id(), ?argv, "demo running; rebuild the binary to restart it");

    let mut ticker = tokio::time::interval(Duration::from_secs(args.heartbeat.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => info!("heartbeat"),
            res = tokio::signal::ctrl_c() => {
                res?;
                info!("ctrl-c received; exiting");
                return Ok(());
            }
        }
    }
}
