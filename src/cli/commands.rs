//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use collatz_core::LockMode;

use crate::config::Config;
use crate::pipeline;
use crate::report::{self, Summary};

use super::{Cli, CliError, CliResult, ExitCode};

/// Compute, write and summarize per-item Collatz timings for `1..=N`.
///
/// ## Behavior
///
/// - `N <= 0`: returns success immediately. No file is touched and nothing is printed.
/// - A worker failure is a hard error (exit 1) and nothing is written.
/// - An unwritable output file is reported on stderr; the timings are dropped but the run still succeeds and
///   the summary is still printed.
pub fn compute_histogram(cli: &Cli) -> CliResult<ExitCode> {
    let Some(config) = Config::from_requested(cli.total, cli.workers) else {
        return Ok(ExitCode::SUCCESS);
    };
    let config = config
        .with_lock_mode(LockMode::from_enabled(!cli.no_lock))
        .with_output(&cli.output);

    let run = pipeline::compute(&config).map_err(|e| CliError::failure(format!("Error: {e}")))?;

    if run.timings.is_empty() {
        tracing::warn!(total = config.total, "result store is empty after the work phase");
        eprintln!("Warning: no computation times were stored; the result store is empty.");
    }

    if let Err(e) = report::write_timings(&config.output, &run.timings) {
        tracing::error!(error = %e, "timings discarded");
        eprintln!("Error: {e}");
    }

    println!("{}", Summary::new(&config, run.elapsed));
    Ok(ExitCode::SUCCESS)
}
