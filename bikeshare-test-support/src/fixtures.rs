//! Builders for small trip CSV files shaped like the published city data.
//!
//! Chicago and New York City files carry `Gender` and `Birth Year`;
//! Washington's do not. Both shapes start with the unnamed row-index column the
//! operators export.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const BASE_COLUMNS: [&str; 7] = [
    "",
    "Start Time",
    "End Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];
const DEMOGRAPHIC_COLUMNS: [&str; 2] = ["Gender", "Birth Year"];

#[derive(Debug, Clone)]
struct Row {
    start: String,
    duration: String,
    from: String,
    to: String,
    user_type: String,
    gender: String,
    birth_year: String,
}

/// In-memory CSV document of trips.
///
/// # Examples
/// ```
/// use bikeshare_test_support::fixtures::TripCsv;
///
/// let csv = TripCsv::without_demographics()
///     .trip("2017-01-02 08:00:00", "A", "B", "60")
///     .render()?;
/// assert!(csv.starts_with(",Start Time,End Time"));
/// assert_eq!(csv.lines().count(), 2);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TripCsv {
    demographics: bool,
    rows: Vec<Row>,
}

impl TripCsv {
    /// Starts a document with `Gender` and `Birth Year` columns.
    #[must_use]
    pub fn with_demographics() -> Self {
        Self {
            demographics: true,
            rows: Vec::new(),
        }
    }

    /// Starts a document without demographic columns.
    #[must_use]
    pub fn without_demographics() -> Self {
        Self {
            demographics: false,
            rows: Vec::new(),
        }
    }

    /// Appends a subscriber trip with empty demographic values.
    #[must_use]
    pub fn trip(self, start: &str, from: &str, to: &str, duration: &str) -> Self {
        self.row(start, from, to, duration, "Subscriber", "", "")
    }

    /// Appends a trip with explicit rider fields. Empty strings become empty
    /// cells.
    #[must_use]
    pub fn rider(self, start: &str, user_type: &str, gender: &str, birth_year: &str) -> Self {
        self.row(start, "Station A", "Station B", "600", user_type, gender, birth_year)
    }

    #[expect(clippy::too_many_arguments, reason = "mirrors the CSV column list")]
    fn row(
        mut self,
        start: &str,
        from: &str,
        to: &str,
        duration: &str,
        user_type: &str,
        gender: &str,
        birth_year: &str,
    ) -> Self {
        self.rows.push(Row {
            start: start.to_owned(),
            duration: duration.to_owned(),
            from: from.to_owned(),
            to: to.to_owned(),
            user_type: user_type.to_owned(),
            gender: gender.to_owned(),
            birth_year: birth_year.to_owned(),
        });
        self
    }

    /// Renders the header and rows as CSV text.
    ///
    /// # Errors
    /// Returns an error if the CSV writer fails to encode a record.
    pub fn render(&self) -> io::Result<String> {
        let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
        let mut header = BASE_COLUMNS.to_vec();
        if self.demographics {
            header.extend(DEMOGRAPHIC_COLUMNS);
        }
        writer.write_record(&header)?;
        for (index, row) in self.rows.iter().enumerate() {
            let index = index.to_string();
            let mut record = vec![
                index.as_str(),
                row.start.as_str(),
                row.start.as_str(),
                row.duration.as_str(),
                row.from.as_str(),
                row.to.as_str(),
                row.user_type.as_str(),
            ];
            if self.demographics {
                record.extend([row.gender.as_str(), row.birth_year.as_str()]);
            }
            writer.write_record(&record)?;
        }
        let bytes = writer.into_inner().map_err(|err| err.into_error())?;
        String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

/// Temporary directory holding city CSV files.
#[derive(Debug)]
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    /// Creates an empty temporary directory.
    ///
    /// # Errors
    /// Returns any I/O error raised while creating the directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `file_name` inside the directory.
    ///
    /// # Errors
    /// Returns any I/O error raised while writing.
    pub fn write(&self, file_name: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(file_name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Writes `csv` to `file_name` inside the directory.
    ///
    /// # Errors
    /// Returns any I/O error raised while writing.
    pub fn write_csv(&self, file_name: &str, csv: &TripCsv) -> io::Result<PathBuf> {
        self.write(file_name, &csv.render()?)
    }
}
