//! File-backed [`TripSource`] for the per-city CSV exports.

use std::{fs::File, io};

use bikeshare_core::{City, CityCatalog, TripSource, TripTable};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, instrument};

use crate::{
    errors::CsvSourceError,
    parse::{BIRTH_YEAR, GENDER, REQUIRED_COLUMNS, RawTrip, RowError},
};

/// Reads each city's trips from the file named in a [`CityCatalog`].
///
/// # Examples
/// ```no_run
/// use bikeshare_core::{City, CityCatalog, TripSource};
/// use bikeshare_providers_csv::CsvTripSource;
///
/// let catalog = CityCatalog::builder().with_data_dir("data").build();
/// let source = CsvTripSource::new(catalog);
/// let table = source.load_city(City::Chicago)?;
/// println!("{} trips", table.len());
/// # Ok::<(), bikeshare_providers_csv::CsvSourceError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CsvTripSource {
    catalog: CityCatalog,
}

impl CsvTripSource {
    /// Creates a source over `catalog`.
    #[must_use]
    pub fn new(catalog: CityCatalog) -> Self {
        Self { catalog }
    }

    /// Returns the catalog the source reads from.
    #[must_use]
    pub fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }
}

impl TripSource for CsvTripSource {
    type Error = CsvSourceError;

    fn name(&self) -> &str {
        "csv"
    }

    #[instrument(
        name = "csv.load_city",
        skip(self),
        fields(city = city.as_str(), path = %self.catalog.entry(city).file().display()),
    )]
    fn load_city(&self, city: City) -> Result<TripTable, Self::Error> {
        let path = self.catalog.entry(city).file();
        let file = File::open(path).map_err(|source| CsvSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path.display().to_string();
        let table = read_trip_table(city, &name, io::BufReader::new(file))?;
        debug!(rows = table.len(), demographics = table.has_demographics(), "loaded trip file");
        Ok(table)
    }
}

/// Parses a whole trip CSV document for `city`.
///
/// `name` labels the document in errors. Demographics are reported as
/// available when the header carries both `Gender` and `Birth Year`.
///
/// # Errors
/// Returns [`CsvSourceError::MissingColumn`] when a required header is absent,
/// [`CsvSourceError::InvalidTimestamp`] or [`CsvSourceError::InvalidBirthYear`]
/// for malformed cells, and [`CsvSourceError::Csv`] for any other read or
/// field failure.
///
/// # Examples
/// ```
/// use bikeshare_core::City;
/// use bikeshare_providers_csv::read_trip_table;
///
/// let data = ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n\
///             0,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St,Ashland Ave,Subscriber\n";
/// let table = read_trip_table(City::Washington, "inline", data.as_bytes())?;
/// assert_eq!(table.len(), 1);
/// assert!(!table.has_demographics());
/// # Ok::<(), bikeshare_providers_csv::CsvSourceError>(())
/// ```
pub fn read_trip_table<R: io::Read>(
    city: City,
    name: &str,
    reader: R,
) -> Result<TripTable, CsvSourceError> {
    let csv_error = |source: csv::Error| CsvSourceError::Csv {
        name: name.to_owned(),
        source,
    };
    let mut reader = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();
    for column in REQUIRED_COLUMNS {
        if !has_column(&headers, column) {
            return Err(CsvSourceError::MissingColumn {
                name: name.to_owned(),
                column,
            });
        }
    }
    let has_demographics = has_column(&headers, GENDER) && has_column(&headers, BIRTH_YEAR);

    let mut records = Vec::new();
    let mut row = StringRecord::new();
    while reader.read_record(&mut row).map_err(csv_error)? {
        let line = row.position().map_or(0, csv::Position::line);
        let raw: RawTrip = row.deserialize(Some(&headers)).map_err(csv_error)?;
        let record = raw
            .into_record(has_demographics)
            .map_err(|err| match err {
                RowError::Timestamp(value, source) => CsvSourceError::InvalidTimestamp {
                    name: name.to_owned(),
                    line,
                    value,
                    source,
                },
                RowError::BirthYear(value) => CsvSourceError::InvalidBirthYear {
                    name: name.to_owned(),
                    line,
                    value,
                },
            })?;
        records.push(record);
    }
    Ok(TripTable::new(city, has_demographics, records))
}

fn has_column(headers: &StringRecord, column: &str) -> bool {
    headers.iter().any(|header| header == column)
}
