//! WatchProc - live process dashboard
//!
//! Shows a filtered, sorted table of running processes that refreshes in
//! place, with CPU and memory usage, creation time, uptime and owner.
//!
//! Controls:
//! - p / P / space: Pause (prints a static table) / resume
//! - q / Q / Ctrl+C: Quit

mod app;
mod constants;
mod system;
mod ui;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use app::Config;
use constants::APP_VERSION;
use system::{CrosstermConsole, SysinfoSource};

fn main() -> ExitCode {
    let config = Config::parse();

    // Reject bad settings before the terminal changes mode
    if let Err(err) = config.validate() {
        eprintln!("watchproc: {}", err);
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("watchproc: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    app::logging::init(config.log_file.as_deref(), config.log_level)?;
    info!(version = APP_VERSION, "starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let source = SysinfoSource::new();
    runtime.block_on(app::run(config, CrosstermConsole::stdout(), source))
}
