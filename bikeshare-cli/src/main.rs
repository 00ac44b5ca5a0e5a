//! CLI entry point for exploring US bikeshare trip data.
//!
//! Parses command-line arguments with clap, runs the interactive session (or a
//! single report) against stdin and stdout, and maps errors to exit codes.
//! Logging is initialised first so data-loading failures are reported through
//! `tracing` on stderr.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use bikeshare_cli::{
    cli::{Cli, CliError, SessionSummary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, info};

/// Parse CLI arguments and run the requested command on the console.
fn try_main() -> Result<SessionSummary> {
    let cli = Cli::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());
    run_cli(cli, stdin.lock(), writer).context("bikeshare session failed")
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match try_main() {
        Ok(summary) => {
            info!(reports = summary.reports, "exiting");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = err.downcast_ref::<CliError>().map(CliError::code);
            error!(error = %format_args!("{err:#}"), code, "command execution failed");
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
