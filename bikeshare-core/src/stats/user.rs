//! Rider categories and demographics.

use tracing::instrument;

use super::{
    mode::{mode, value_counts},
    non_empty,
};
use crate::{
    error::Result,
    trip::{Gender, TripRecord, TripTable, UserType},
};

/// Trips per gender value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenderCounts {
    /// Trips by female riders.
    pub female: usize,
    /// Trips by male riders.
    pub male: usize,
    /// Trips with no gender recorded.
    pub unknown: usize,
}

impl GenderCounts {
    /// Tallies the gender of every trip in `records`.
    #[must_use]
    pub fn tally(records: &[TripRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut counts, trip| {
                match trip.gender() {
                    Some(Gender::Female) => counts.female += 1,
                    Some(Gender::Male) => counts.male += 1,
                    None => counts.unknown += 1,
                }
                counts
            })
    }

    /// Returns the percentage of female trips among trips with a known
    /// gender, rounded to two decimals.
    ///
    /// # Examples
    /// ```
    /// use bikeshare_core::stats::GenderCounts;
    ///
    /// let counts = GenderCounts { female: 1, male: 2, unknown: 7 };
    /// assert_eq!(counts.female_share(), Some(33.33));
    /// assert_eq!(GenderCounts::default().female_share(), None);
    /// ```
    #[must_use]
    pub fn female_share(&self) -> Option<f64> {
        let known = self.female + self.male;
        if known == 0 {
            return None;
        }
        let percent = self.female as f64 / known as f64 * 100.0;
        Some((percent * 100.0).round_ties_even() / 100.0)
    }
}

/// Earliest, most recent and most common birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    /// Smallest birth year.
    pub earliest: i32,
    /// Largest birth year.
    pub most_recent: i32,
    /// Most frequent birth year.
    pub most_common: i32,
}

impl BirthYearStats {
    /// Summarises the recorded birth years, or `None` when there are none.
    #[must_use]
    pub fn from_records(records: &[TripRecord]) -> Option<Self> {
        let years: Vec<i32> = records.iter().filter_map(TripRecord::birth_year).collect();
        let earliest = years.iter().copied().min()?;
        let most_recent = years.iter().copied().max()?;
        let most_common = mode(years)?;
        Some(Self {
            earliest,
            most_recent,
            most_common,
        })
    }
}

/// Gender and birth-year summary for cities that publish them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demographics {
    /// Trips per gender.
    pub genders: GenderCounts,
    /// Birth-year summary; `None` when every birth year is missing.
    pub birth_years: Option<BirthYearStats>,
}

/// Rider summary of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// Trips per rider category, most frequent first.
    pub user_types: Vec<(UserType, usize)>,
    /// Trips with no rider category recorded.
    pub missing_user_type: usize,
    /// Demographics; `None` when the city does not publish them.
    pub demographics: Option<Demographics>,
}

/// Computes rider category counts and, where published, demographics.
///
/// # Errors
/// Returns [`crate::StatsError::EmptyTable`] when `table` holds no trips.
#[instrument(
    name = "user_stats",
    skip(table),
    fields(
        city = table.city().as_str(),
        rows = table.len(),
        demographics = table.has_demographics(),
    ),
)]
pub fn user_stats(table: &TripTable) -> Result<UserStats> {
    let records = non_empty(table)?;
    let user_types: Vec<(UserType, usize)> =
        value_counts(records.iter().filter_map(TripRecord::user_type))
            .into_iter()
            .map(|(user_type, count)| (user_type.clone(), count))
            .collect();
    let categorised: usize = user_types.iter().map(|(_, count)| count).sum();
    let demographics = table.has_demographics().then(|| Demographics {
        genders: GenderCounts::tally(records),
        birth_years: BirthYearStats::from_records(records),
    });
    Ok(UserStats {
        user_types,
        missing_user_type: records.len() - categorised,
        demographics,
    })
}
