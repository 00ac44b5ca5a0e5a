//! Session driver: collect filters, print the report, offer a restart.

use std::io::{BufRead, Write};
use std::time::Instant;

use bikeshare_core::{
    CityCatalog, FilterSelection, StatsError, TripSource, TripTable, load_filtered,
    parse_restart,
    stats::{comparison_stats, duration_stats, station_stats, time_stats, user_stats},
};
use tracing::{Span, debug, field, info, instrument};

use super::commands::CliError;
use super::prompt::select_filters;
use super::report::{
    SEPARATOR, render_comparison, render_duration, render_stations, render_time, render_users,
};

const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

/// Outcome of an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Number of reports printed.
    pub reports: usize,
}

#[derive(Debug)]
enum SessionState {
    Collecting,
    Reporting(FilterSelection),
    AwaitingRestart,
    Finished,
}

/// A titled report section.
#[derive(Debug, Clone, Copy)]
struct Section {
    name: &'static str,
    heading: &'static str,
}

const TIME: Section = Section {
    name: "time",
    heading: "Calculating The Most Frequent Times of Travel...",
};
const STATIONS: Section = Section {
    name: "stations",
    heading: "Calculating The Most Popular Stations and Trip...",
};
const DURATION: Section = Section {
    name: "duration",
    heading: "Calculating Trip Duration...",
};
const USERS: Section = Section {
    name: "users",
    heading: "Calculating User Stats...",
};
const COMPARISON: Section = Section {
    name: "comparison",
    heading: "Calculating Comparison Stats...",
};

/// Runs prompt-report-restart rounds until the user stops or `input` ends.
///
/// Trips come from `source`; `catalog` supplies the populations used when two
/// cities are compared.
///
/// # Errors
/// Returns [`CliError`] when a data file cannot be read or the console fails.
/// Invalid answers are not errors; they are asked again.
#[instrument(name = "cli.session", err, skip_all, fields(reports = field::Empty))]
pub fn run_session<S, R, W>(
    source: &S,
    catalog: &CityCatalog,
    mut input: R,
    mut output: W,
) -> Result<SessionSummary, CliError>
where
    S: TripSource + ?Sized,
    S::Error: Into<CliError>,
    R: BufRead,
    W: Write,
{
    let mut summary = SessionSummary::default();
    let mut state = SessionState::Collecting;
    let mut answer = String::new();
    loop {
        state = match state {
            SessionState::Collecting => match select_filters(&mut input, &mut output)? {
                Some(selection) => SessionState::Reporting(selection),
                None => SessionState::Finished,
            },
            SessionState::Reporting(selection) => {
                write_report(source, catalog, &selection, &mut output)?;
                summary.reports += 1;
                SessionState::AwaitingRestart
            }
            SessionState::AwaitingRestart => {
                write!(output, "{RESTART_PROMPT}")?;
                output.flush()?;
                answer.clear();
                let read = input.read_line(&mut answer)?;
                if read > 0 && parse_restart(&answer) {
                    SessionState::Collecting
                } else {
                    SessionState::Finished
                }
            }
            SessionState::Finished => break,
        };
    }
    output.flush()?;
    Span::current().record("reports", summary.reports);
    info!(reports = summary.reports, "session finished");
    Ok(summary)
}

/// Loads the selected cities and writes either the four single-city sections
/// or the comparison section.
///
/// # Errors
/// Returns [`CliError::Source`] when a city's file cannot be read and
/// [`CliError::Console`] when writing fails.
#[instrument(
    name = "cli.report",
    skip(source, catalog, selection, output),
    fields(cities = %selection.cities, month = %selection.month, day = %selection.day),
)]
pub fn write_report<S, W>(
    source: &S,
    catalog: &CityCatalog,
    selection: &FilterSelection,
    output: &mut W,
) -> Result<(), CliError>
where
    S: TripSource + ?Sized,
    S::Error: Into<CliError>,
    W: Write + ?Sized,
{
    let tables = load_filtered(source, selection).map_err(Into::<CliError>::into)?;
    match tables.as_slice() {
        [table] => write_city_report(table, output),
        _ => timed_section(
            output,
            COMPARISON,
            || comparison_stats(&tables, catalog),
            render_comparison,
        ),
    }
}

fn write_city_report<W>(table: &TripTable, output: &mut W) -> Result<(), CliError>
where
    W: Write + ?Sized,
{
    if table.is_empty() {
        writeln!(
            output,
            "\nNo trips match the selected filters for {}.",
            table.city()
        )?;
        writeln!(output, "{SEPARATOR}")?;
        return Ok(());
    }
    timed_section(output, TIME, || time_stats(table), render_time)?;
    timed_section(output, STATIONS, || station_stats(table), render_stations)?;
    timed_section(output, DURATION, || duration_stats(table), render_duration)?;
    timed_section(output, USERS, || user_stats(table), |stats, writer| {
        render_users(table.city(), stats, writer)
    })
}

#[instrument(
    name = "cli.section",
    skip_all,
    fields(section = section.name, elapsed_secs = field::Empty),
)]
fn timed_section<W, T, C, F>(
    output: &mut W,
    section: Section,
    compute: C,
    render: F,
) -> Result<(), CliError>
where
    W: Write + ?Sized,
    C: FnOnce() -> Result<T, StatsError>,
    F: FnOnce(&T, &mut W) -> std::io::Result<()>,
{
    writeln!(output, "\n{}\n", section.heading)?;
    let started = Instant::now();
    let stats = compute()?;
    render(&stats, output)?;
    let elapsed = started.elapsed().as_secs_f64();
    Span::current().record("elapsed_secs", elapsed);
    debug!(elapsed_secs = elapsed, "section rendered");
    writeln!(output, "\nThis took {elapsed} seconds.")?;
    writeln!(output, "{SEPARATOR}")?;
    Ok(())
}
