//! Statistics computed over filtered trip tables.
//!
//! Every routine is pure: it borrows one or two [`TripTable`]s and returns a
//! typed report. Rendering and timing belong to the caller.
//!
//! All modes share one tie-break: among equally frequent values the one that
//! appears first in table order wins, so repeated runs over the same file
//! always agree.

mod comparison;
mod duration;
mod mode;
mod station;
mod time;
mod user;

pub use comparison::{CityComparison, ComparisonStats, comparison_stats, trips_per_100k};
pub use duration::{DurationBreakdown, DurationStats, MeanDuration, duration_stats};
pub use mode::{mode, value_counts};
pub use station::{StationStats, station_stats};
pub use time::{TimeStats, time_stats};
pub use user::{BirthYearStats, Demographics, GenderCounts, UserStats, user_stats};

use crate::{
    error::{Result, StatsError},
    trip::{TripRecord, TripTable},
};

fn non_empty(table: &TripTable) -> Result<&[TripRecord]> {
    if table.is_empty() {
        return Err(StatsError::EmptyTable { city: table.city() });
    }
    Ok(table.records())
}
