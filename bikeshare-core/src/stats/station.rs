//! Most popular stations and trip.

use tracing::instrument;

use super::{mode::mode, non_empty};
use crate::{
    error::{Result, StatsError},
    trip::TripTable,
};

/// Most common start station, end station and start/end pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    /// Station most trips started from.
    pub start_station: String,
    /// Station most trips ended at.
    pub end_station: String,
    /// Most frequent `(start, end)` combination.
    pub trip: (String, String),
}

/// Computes the most popular stations and station pair.
///
/// # Errors
/// Returns [`StatsError::EmptyTable`] when `table` holds no trips.
#[instrument(
    name = "station_stats",
    skip(table),
    fields(city = table.city().as_str(), rows = table.len()),
)]
pub fn station_stats(table: &TripTable) -> Result<StationStats> {
    let records = non_empty(table)?;
    let start = mode(records.iter().map(|trip| trip.start_station()));
    let end = mode(records.iter().map(|trip| trip.end_station()));
    let pair = mode(
        records
            .iter()
            .map(|trip| (trip.start_station(), trip.end_station())),
    );
    let (Some(start), Some(end), Some((from, to))) = (start, end, pair) else {
        return Err(StatsError::EmptyTable { city: table.city() });
    };
    Ok(StationStats {
        start_station: start.to_owned(),
        end_station: end.to_owned(),
        trip: (from.to_owned(), to.to_owned()),
    })
}
