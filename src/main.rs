//! statfind - recursive file finder
//!
//! Entry point for the CLI application.

use anyhow::{anyhow, Context, Result};
use statfind::{Command, USAGE};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "fatal");
            eprintln!("statfind: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    setup_logging()?;

    // Argument errors end the program before any directory is opened
    let config = match Command::parse(std::env::args_os())? {
        Command::Usage => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Search(config) => config,
    };

    debug!(root = %config.root.display(), filter = ?config.filter, exec = ?config.exec, "starting walk");

    let results = statfind::search()
        .config(config)
        .run()
        .context("walk aborted")?;

    debug!(
        matches = results.matches,
        files = results.stats.files,
        dirs = results.stats.dirs,
        invocations = results.invocations,
        skipped = results.stats.skipped,
        "done"
    );

    Ok(())
}

/// Logs go to stderr; stdout carries only matched paths.
fn setup_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("statfind=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}
