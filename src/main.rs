//! Headless runner (default binary).
//!
//! Reads commands from stdin, one per line, and writes JSON lines to stdout.
//! Settings come from `BRICKS_*` environment variables; `RUST_LOG` controls
//! diagnostics on stderr.

use std::io;

use anyhow::{Context, Result};

use bricks::runner::{run, RunnerConfig};

fn main() -> Result<()> {
    env_logger::init();

    let config = RunnerConfig::from_env();
    log::info!(
        "runner starting: seed={:?} tick_ms={} policy={}",
        config.seed,
        config.tick_ms,
        config.grid_policy.as_str()
    );

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    run(config, stdin, stdout).context("headless runner failed")?;
    Ok(())
}
