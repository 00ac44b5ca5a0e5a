//! Most frequent times of travel.

use chrono::{Month, Weekday};
use tracing::instrument;

use super::{mode::mode, non_empty};
use crate::{
    error::{Result, StatsError},
    trip::TripTable,
};

/// Most common month, weekday and start hour of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStats {
    /// Month with the most trip starts.
    pub month: Month,
    /// Weekday with the most trip starts.
    pub weekday: Weekday,
    /// Hour (0-23) with the most trip starts.
    pub hour: u32,
}

impl TimeStats {
    /// Returns the busiest hour as a `(start, end)` window on a 24-hour clock.
    ///
    /// # Examples
    /// ```
    /// use bikeshare_core::stats::TimeStats;
    /// use chrono::{Month, Weekday};
    ///
    /// let stats = TimeStats { month: Month::May, weekday: Weekday::Tue, hour: 23 };
    /// assert_eq!(stats.hour_window(), (23, 0));
    /// ```
    #[must_use]
    pub const fn hour_window(&self) -> (u32, u32) {
        (self.hour, (self.hour + 1) % 24)
    }
}

/// Computes the most frequent month, weekday and start hour.
///
/// # Errors
/// Returns [`crate::StatsError::EmptyTable`] when `table` holds no trips.
#[instrument(
    name = "time_stats",
    skip(table),
    fields(city = table.city().as_str(), rows = table.len()),
)]
pub fn time_stats(table: &TripTable) -> Result<TimeStats> {
    let records = non_empty(table)?;
    let month = mode(records.iter().map(|trip| trip.calendar_month()));
    let weekday = mode(records.iter().map(|trip| trip.weekday()));
    let hour = mode(records.iter().map(|trip| trip.start_hour()));
    let (Some(month), Some(weekday), Some(hour)) = (month, weekday, hour) else {
        return Err(StatsError::EmptyTable { city: table.city() });
    };
    Ok(TimeStats {
        month,
        weekday,
        hour,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{catalog::City, test_utils::trip_at};

    #[test]
    fn reports_most_frequent_components() {
        let table = TripTable::new(
            City::Chicago,
            true,
            vec![
                trip_at("2017-03-06 08:10:00"),
                trip_at("2017-03-13 17:45:00"),
                trip_at("2017-01-07 17:05:00"),
                trip_at("2017-03-20 08:59:00"),
                trip_at("2017-02-14 17:30:00"),
            ],
        );
        let stats = time_stats(&table).expect("stats must compute");
        assert_eq!(stats.month, Month::March);
        assert_eq!(stats.weekday, Weekday::Mon);
        assert_eq!(stats.hour, 17);
    }

    #[test]
    fn ties_resolve_to_first_trip() {
        let table = TripTable::new(
            City::Washington,
            false,
            vec![trip_at("2017-06-02 09:00:00"), trip_at("2017-04-04 22:00:00")],
        );
        let stats = time_stats(&table).expect("stats must compute");
        assert_eq!(stats.month, Month::June);
        assert_eq!(stats.weekday, Weekday::Fri);
        assert_eq!(stats.hour, 9);
    }

    #[rstest]
    #[case(0, (0, 1))]
    #[case(22, (22, 23))]
    #[case(23, (23, 0))]
    fn hour_window_wraps_at_midnight(#[case] hour: u32, #[case] expected: (u32, u32)) {
        let stats = TimeStats {
            month: Month::January,
            weekday: Weekday::Sun,
            hour,
        };
        assert_eq!(stats.hour_window(), expected);
    }

    #[test]
    fn empty_table_is_rejected() {
        let table = TripTable::new(City::NewYorkCity, true, Vec::new());
        assert_eq!(
            time_stats(&table),
            Err(StatsError::EmptyTable {
                city: City::NewYorkCity
            })
        );
    }
}
