//! CLI module for mt-collatz
//!
//! ## Usage
//!
//! ```text
//! mt-collatz N T [-nolock] [--output PATH]
//! ```
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::config::DEFAULT_OUTPUT_FILE;
use crate::version::MT_COLLATZ_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Time the Collatz sequence of every integer in 1..=N across T threads
#[derive(Parser, Debug)]
#[command(name = "mt-collatz")]
#[command(version = MT_COLLATZ_VERSION)]
#[command(about = "Time the Collatz sequence of every integer in 1..=N across T threads", long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Number of sequences to compute (items 1..=N); N <= 0 does nothing
    #[arg(value_name = "N")]
    pub total: i64,

    /// Number of worker threads; clamped into 1..=N
    #[arg(value_name = "T")]
    pub workers: i64,

    /// Write results without taking the store lock (also accepted as `-nolock`)
    #[arg(long = "nolock")]
    pub no_lock: bool,

    /// File that receives one timing per line
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,
}

/// Spelling of the disable-locking flag kept for existing scripts.
const LEGACY_NOLOCK: &str = "-nolock";

/// Rewrite the single-dash `-nolock` into the `--nolock` long flag clap understands.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| if arg == LEGACY_NOLOCK { OsString::from("--nolock") } else { arg })
        .collect()
}

/// Parse a full argument list (program name first).
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Cli::try_parse_from(normalize_args(args))
}

/// Exit code for a clap parse outcome: `--help`/`--version` succeed, anything else is a usage error.
pub fn usage_exit_code(err: &clap::Error) -> ExitCode {
    if err.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = match parse_args(env::args_os()) {
        Ok(cli) => cli,
        Err(err) => {
            // clap routes help/version to stdout and usage errors to stderr
            let _ = err.print();
            process::exit(usage_exit_code(&err).0);
        }
    };

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute a parsed command line and return the exit code.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    commands::compute_histogram(&cli)
}

// ============================================================================
// Tests
// ============================================================================
