//! Small helpers shared across CLI tests.
//!
//! Sessions run against CSV fixtures in a temporary data directory with
//! answers fed from a string, so every test sees the full console transcript.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use bikeshare_core::{City, TripSource, TripTable};
use bikeshare_providers_csv::CsvSourceError;
use bikeshare_test_support::fixtures::{DataDir, TripCsv};
use tempfile::TempDir;

use super::{Cli, CliError, DataArgs, SessionSummary, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// Three Chicago trips: two in January, one in March, all on Mondays.
pub(super) fn chicago_csv() -> TripCsv {
    TripCsv::with_demographics()
        .rider("2017-01-02 08:10:00", "Subscriber", "Female", "1990")
        .rider("2017-01-02 08:40:00", "Customer", "Male", "1985")
        .rider("2017-03-06 17:00:00", "Subscriber", "Male", "1990")
}

/// Two Washington trips without demographic columns.
pub(super) fn washington_csv() -> TripCsv {
    TripCsv::without_demographics()
        .trip("2017-01-03 09:00:00", "Lincoln Memorial", "Union Station", "300")
        .trip("2017-02-07 09:30:00", "Union Station", "Lincoln Memorial", "900")
}

pub(super) fn data_dir() -> DataDir {
    let dir = match DataDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create data dir: {err}"),
    };
    for (name, csv) in [
        ("chicago.csv", chicago_csv()),
        ("washington.csv", washington_csv()),
    ] {
        if let Err(err) = dir.write_csv(name, &csv) {
            panic!("failed to write {name}: {err}");
        }
    }
    dir
}

pub(super) fn cli_for(data_dir: &Path) -> Cli {
    Cli {
        data: DataArgs {
            data_dir: data_dir.to_path_buf(),
        },
        command: None,
    }
}

pub(super) fn run_transcript(cli: Cli, answers: &str) -> Result<(SessionSummary, String), CliError> {
    let mut output = Vec::new();
    let summary = run_cli(cli, answers.as_bytes(), &mut output)?;
    let transcript = match String::from_utf8(output) {
        Ok(text) => text,
        Err(err) => panic!("console output must be UTF-8: {err}"),
    };
    Ok((summary, transcript))
}

pub(super) fn run_cli_expecting_error(cli: Cli, answers: &str, panic_msg: &str) -> CliError {
    match run_transcript(cli, answers) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

/// In-memory trip source keyed by city. Cities without a table fail the way a
/// missing data file does.
#[derive(Debug, Default)]
pub(super) struct MemorySource {
    tables: HashMap<City, TripTable>,
}

impl MemorySource {
    pub(super) fn with_table(mut self, table: TripTable) -> Self {
        self.tables.insert(table.city(), table);
        self
    }
}

impl TripSource for MemorySource {
    type Error = CsvSourceError;

    fn name(&self) -> &str {
        "memory"
    }

    fn load_city(&self, city: City) -> Result<TripTable, Self::Error> {
        self.tables
            .get(&city)
            .cloned()
            .ok_or_else(|| CsvSourceError::Io {
                path: PathBuf::from(city.as_str()),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
    }
}
