//! Trip source abstraction and the filtered loading step.

use tracing::{debug, instrument};

use crate::{catalog::City, selection::FilterSelection, trip::TripTable};

/// Anything that can produce the full, unfiltered trip table for a city.
///
/// # Examples
/// ```
/// use std::convert::Infallible;
/// use bikeshare_core::{City, TripSource, TripTable};
///
/// struct Empty;
///
/// impl TripSource for Empty {
///     type Error = Infallible;
///
///     fn name(&self) -> &str { "empty" }
///
///     fn load_city(&self, city: City) -> Result<TripTable, Self::Error> {
///         Ok(TripTable::new(city, false, Vec::new()))
///     }
/// }
///
/// let table = Empty.load_city(City::Chicago)?;
/// assert!(table.is_empty());
/// # Ok::<(), Infallible>(())
/// ```
pub trait TripSource {
    /// Failure raised while reading a city's trips.
    type Error: std::error::Error;

    /// Returns a human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Reads every trip recorded for `city`.
    ///
    /// # Errors
    /// Implementations return their own error when the data cannot be read.
    fn load_city(&self, city: City) -> Result<TripTable, Self::Error>;
}

/// Loads every selected city and applies the month and day filters.
///
/// Tables come back in selection order.
///
/// # Errors
/// Propagates the first error raised by `source`.
#[instrument(
    name = "load_filtered",
    skip(source, selection),
    fields(source = source.name(), cities = %selection.cities, month = %selection.month, day = %selection.day),
)]
pub fn load_filtered<S>(source: &S, selection: &FilterSelection) -> Result<Vec<TripTable>, S::Error>
where
    S: TripSource + ?Sized,
{
    selection
        .cities
        .cities()
        .iter()
        .map(|&city| -> Result<TripTable, S::Error> {
            let table = source.load_city(city)?;
            let loaded = table.len();
            let filtered = table.filter(selection.month, selection.day);
            debug!(
                city = city.as_str(),
                loaded,
                kept = filtered.len(),
                "filtered trip table"
            );
            Ok(filtered)
        })
        .collect()
}
