//! Error type for reading city trip files.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures raised while reading a city's trip file.
#[derive(Debug, Error)]
pub enum CsvSourceError {
    /// The file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The header row lacks a column the statistics need.
    #[error("`{name}` is missing required column `{column}`")]
    MissingColumn {
        /// File or reader name.
        name: String,
        /// Header of the absent column.
        column: &'static str,
    },
    /// A start time did not match any supported timestamp layout.
    #[error("`{name}` line {line}: invalid start time `{value}`")]
    InvalidTimestamp {
        /// File or reader name.
        name: String,
        /// One-based line of the offending record.
        line: u64,
        /// Raw cell text.
        value: String,
        /// Parser failure for the last layout tried.
        #[source]
        source: chrono::ParseError,
    },
    /// A birth year was not a plausible calendar year.
    #[error("`{name}` line {line}: invalid birth year {value}")]
    InvalidBirthYear {
        /// File or reader name.
        name: String,
        /// One-based line of the offending record.
        line: u64,
        /// Parsed birth year.
        value: f64,
    },
    /// The CSV reader or field deserialisation failed.
    #[error("failed to read `{name}`: {source}")]
    Csv {
        /// File or reader name.
        name: String,
        /// Underlying reader error, including its position.
        #[source]
        source: csv::Error,
    },
}
