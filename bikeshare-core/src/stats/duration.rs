//! Total and mean trip duration.

use tracing::instrument;

use super::non_empty;
use crate::{
    error::Result,
    trip::{TripRecord, TripTable},
};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// A whole number of seconds split into days, hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationBreakdown {
    /// Whole days.
    pub days: u64,
    /// Remaining hours (0-23).
    pub hours: u64,
    /// Remaining minutes (0-59).
    pub minutes: u64,
    /// Remaining seconds (0-59).
    pub seconds: u64,
}

impl DurationBreakdown {
    /// Splits `floor(total_secs)` by successive floor division.
    ///
    /// Negative and non-finite inputs count as zero.
    ///
    /// # Examples
    /// ```
    /// use bikeshare_core::stats::DurationBreakdown;
    ///
    /// let split = DurationBreakdown::from_secs(90_061.9);
    /// assert_eq!((split.days, split.hours, split.minutes, split.seconds), (1, 1, 1, 1));
    /// assert_eq!(split.total_secs(), 90_061);
    /// ```
    #[must_use]
    pub fn from_secs(total_secs: f64) -> Self {
        let whole = whole_secs(total_secs);
        let (minutes, seconds) = (whole / SECS_PER_MINUTE, whole % SECS_PER_MINUTE);
        let (hours, minutes) = (minutes / 60, minutes % 60);
        let (days, hours) = (hours / 24, hours % 24);
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Reassembles the breakdown into seconds.
    #[must_use]
    pub const fn total_secs(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }
}

/// A mean duration as whole minutes plus rounded seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeanDuration {
    /// Whole minutes.
    pub minutes: u64,
    /// Seconds rounded to the nearest integer (0-59).
    pub seconds: u64,
}

impl MeanDuration {
    /// Splits `secs` into minutes and rounded seconds.
    ///
    /// A remainder that rounds up to a full minute carries over.
    ///
    /// # Examples
    /// ```
    /// use bikeshare_core::stats::MeanDuration;
    ///
    /// assert_eq!(MeanDuration::from_secs(754.4), MeanDuration { minutes: 12, seconds: 34 });
    /// assert_eq!(MeanDuration::from_secs(119.7), MeanDuration { minutes: 2, seconds: 0 });
    /// ```
    #[must_use]
    pub fn from_secs(secs: f64) -> Self {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        let minutes = (secs / 60.0).floor();
        let remainder = (secs - minutes * 60.0).round();
        let whole = whole_secs(minutes * 60.0 + remainder);
        Self {
            minutes: whole / SECS_PER_MINUTE,
            seconds: whole % SECS_PER_MINUTE,
        }
    }
}

/// Total and mean duration of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationStats {
    /// Sum of every trip duration.
    pub total: DurationBreakdown,
    /// Mean trip duration.
    pub mean: MeanDuration,
}

/// Computes total and mean trip duration.
///
/// # Errors
/// Returns [`crate::StatsError::EmptyTable`] when `table` holds no trips.
#[instrument(
    name = "duration_stats",
    skip(table),
    fields(city = table.city().as_str(), rows = table.len()),
)]
pub fn duration_stats(table: &TripTable) -> Result<DurationStats> {
    let records = non_empty(table)?;
    let total = total_secs(records);
    Ok(DurationStats {
        total: DurationBreakdown::from_secs(total),
        mean: mean_of(total, records),
    })
}

/// Returns the mean duration of `table`, or `None` when it is empty.
pub(crate) fn mean_duration(table: &TripTable) -> Option<MeanDuration> {
    let records = table.records();
    (!records.is_empty()).then(|| mean_of(total_secs(records), records))
}

fn total_secs(records: &[TripRecord]) -> f64 {
    records.iter().map(TripRecord::duration_secs).sum()
}

fn mean_of(total: f64, records: &[TripRecord]) -> MeanDuration {
    MeanDuration::from_secs(total / records.len() as f64)
}

fn whole_secs(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    }
}
