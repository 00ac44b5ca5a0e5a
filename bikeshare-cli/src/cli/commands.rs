//! Argument parsing and command dispatch for the bikeshare CLI.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use bikeshare_core::{
    CityCatalog, CitySelection, DayFilter, FilterSelection, MonthFilter, StatsError, parse_cities,
    parse_day, parse_month,
};
use bikeshare_providers_csv::{CsvSourceError, CsvTripSource};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, instrument};

use super::session::{SessionSummary, run_session, write_report};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip statistics for Chicago, New York City and Washington."
)]
pub struct Cli {
    /// Location of the city data files.
    #[command(flatten)]
    pub data: DataArgs,

    /// Command to execute; defaults to `explore`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Choose filters interactively and print a report per round.
    Explore,
    /// Print one report for the filters given as flags.
    Report(ReportCommand),
}

/// Where the per-city CSV files live.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Directory holding `chicago.csv`, `new_york_city.csv` and `washington.csv`.
    #[arg(long = "data-dir", global = true, default_value = ".")]
    pub data_dir: PathBuf,
}

impl DataArgs {
    /// Builds the city catalog rooted at the data directory.
    #[must_use]
    pub fn catalog(&self) -> CityCatalog {
        CityCatalog::builder()
            .with_data_dir(self.data_dir.clone())
            .build()
    }
}

/// Options accepted by the `report` command.
#[derive(Debug, Args, Clone)]
pub struct ReportCommand {
    /// One city, or two separated by a comma to compare them.
    #[arg(long = "city", value_parser = parse_cities)]
    pub cities: CitySelection,

    /// `all` or a month from January to June.
    #[arg(long, default_value = "all", value_parser = parse_month)]
    pub month: MonthFilter,

    /// `all` or a full weekday name.
    #[arg(long, default_value = "all", value_parser = parse_day)]
    pub day: DayFilter,
}

impl ReportCommand {
    /// Returns the filters as a [`FilterSelection`].
    #[must_use]
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            cities: self.cities.clone(),
            month: self.month,
            day: self.day,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A city's trip file could not be read.
    #[error(transparent)]
    Source(#[from] CsvSourceError),
    /// A statistics routine rejected its input.
    #[error(transparent)]
    Stats(#[from] StatsError),
    /// Reading answers or writing the report failed.
    #[error("console i/o failed: {source}")]
    Console {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl CliError {
    /// Returns a stable machine-readable code for logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Source(_) => "CLI_SOURCE",
            Self::Stats(err) => err.code().as_str(),
            Self::Console { .. } => "CLI_CONSOLE",
        }
    }
}

/// Executes the command represented by `cli`, reading answers from `input`
/// and writing prompts and reports to `output`.
///
/// # Errors
/// Returns [`CliError`] when a data file cannot be read or the console fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use bikeshare_cli::cli::{Cli, DataArgs, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     data: DataArgs { data_dir: ".".into() },
///     command: None,
/// };
/// let mut output = Vec::new();
/// let summary = run_cli(cli, "".as_bytes(), &mut output)?;
/// assert_eq!(summary.reports, 0);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli, input, output),
    fields(command = field::Empty, data_dir = %cli.data.data_dir.display()),
)]
pub fn run_cli<R, W>(cli: Cli, input: R, mut output: W) -> Result<SessionSummary, CliError>
where
    R: BufRead,
    W: Write,
{
    let source = CsvTripSource::new(cli.data.catalog());
    match cli.command.unwrap_or(Command::Explore) {
        Command::Explore => {
            Span::current().record("command", field::display("explore"));
            run_session(&source, source.catalog(), input, output)
        }
        Command::Report(report) => {
            Span::current().record("command", field::display("report"));
            write_report(&source, source.catalog(), &report.selection(), &mut output)?;
            output.flush()?;
            Ok(SessionSummary { reports: 1 })
        }
    }
}
