//! Command-line interface for exploring bikeshare trip statistics.
//!
//! `explore` (the default) walks the user through the city, month and day
//! prompts and prints a report for each round until they decline to restart.
//! `report` prints one report for filters given as flags.

mod commands;
mod prompt;
mod report;
mod session;

pub use commands::{Cli, CliError, Command, DataArgs, ReportCommand, run_cli};
pub use prompt::select_filters;
pub use report::{
    render_comparison, render_duration, render_stations, render_time, render_users,
};
pub use session::{SessionSummary, run_session, write_report};

#[cfg(test)]
mod test_helpers;
