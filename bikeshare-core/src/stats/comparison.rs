//! Side-by-side statistics for two cities.

use tracing::instrument;

use super::{
    duration::{MeanDuration, mean_duration},
    user::GenderCounts,
};
use crate::{
    catalog::{City, CityCatalog},
    error::{Result, StatsError},
    trip::TripTable,
};

const PER_CAPITA_SCALE: f64 = 100_000.0;

/// Comparison figures for one city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityComparison {
    /// City the figures describe.
    pub city: City,
    /// Mean trip duration; `None` when no trips matched the filters.
    pub mean: Option<MeanDuration>,
    /// Number of trips after filtering.
    pub trip_count: usize,
    /// Trips per 100,000 inhabitants, rounded to the nearest integer.
    pub trips_per_100k: u64,
    /// Gender tallies; `None` when the city does not publish gender.
    pub genders: Option<GenderCounts>,
}

impl CityComparison {
    /// Returns the percentage of trips taken by women, when known.
    #[must_use]
    pub fn female_share(&self) -> Option<f64> {
        self.genders.and_then(|genders| genders.female_share())
    }
}

/// Comparison figures for both selected cities, in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonStats {
    /// One entry per city.
    pub cities: [CityComparison; 2],
}

/// Returns `round(trip_count / population * 100_000)`.
///
/// Halves round to the nearest even integer.
///
/// # Examples
/// ```
/// use std::num::NonZeroU64;
/// use bikeshare_core::stats::trips_per_100k;
///
/// let population = NonZeroU64::new(681_170).expect("non-zero");
/// assert_eq!(trips_per_100k(300_000, population), 44_042);
/// ```
#[must_use]
pub fn trips_per_100k(trip_count: usize, population: std::num::NonZeroU64) -> u64 {
    let rate = trip_count as f64 / population.get() as f64 * PER_CAPITA_SCALE;
    rate.round_ties_even() as u64
}

/// Compares mean duration, trip volume and gender split across two cities.
///
/// Empty tables are allowed: they report zero trips and no mean.
///
/// # Errors
/// Returns [`StatsError::ComparisonArity`] unless exactly two tables are given.
#[instrument(name = "comparison_stats", skip(tables, catalog), fields(tables = tables.len()))]
pub fn comparison_stats(tables: &[TripTable], catalog: &CityCatalog) -> Result<ComparisonStats> {
    let [first, second] = tables else {
        return Err(StatsError::ComparisonArity { got: tables.len() });
    };
    Ok(ComparisonStats {
        cities: [compare(first, catalog), compare(second, catalog)],
    })
}

fn compare(table: &TripTable, catalog: &CityCatalog) -> CityComparison {
    let population = catalog.entry(table.city()).population();
    CityComparison {
        city: table.city(),
        mean: mean_duration(table),
        trip_count: table.len(),
        trips_per_100k: trips_per_100k(table.len(), population),
        genders: table
            .has_demographics()
            .then(|| GenderCounts::tally(table.records())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::num::NonZeroU64;

    use proptest::{prop_assert_eq, proptest};

    use crate::{
        catalog::CityEntry,
        test_utils::{rider, trip_between},
        trip::Gender,
    };

    fn chicago_and_washington() -> Vec<TripTable> {
        vec![
            TripTable::new(
                City::Chicago,
                true,
                vec![
                    rider(Some(Gender::Female), Some(1980)),
                    rider(Some(Gender::Male), Some(1981)),
                    rider(Some(Gender::Male), None),
                    rider(None, None),
                ],
            ),
            TripTable::new(
                City::Washington,
                false,
                vec![
                    trip_between("2017-01-02 08:00:00", "A", "B", 600.0),
                    trip_between("2017-01-03 08:00:00", "B", "A", 661.0),
                ],
            ),
        ]
    }

    #[test]
    fn washington_has_no_gender_share() {
        let stats = comparison_stats(&chicago_and_washington(), &CityCatalog::default())
            .expect("comparison must compute");
        let [chicago, washington] = stats.cities;
        assert_eq!(chicago.city, City::Chicago);
        assert_eq!(chicago.female_share(), Some(33.33));
        assert_eq!(washington.city, City::Washington);
        assert_eq!(washington.genders, None);
        assert_eq!(washington.female_share(), None);
        assert_eq!(
            washington.mean,
            Some(MeanDuration {
                minutes: 10,
                seconds: 31,
            })
        );
    }

    #[test]
    fn per_capita_uses_catalog_population() {
        let population = NonZeroU64::new(200).expect("non-zero");
        let catalog = CityCatalog::builder()
            .with_entry(City::Chicago, CityEntry::new("c.csv", population))
            .build();
        let stats = comparison_stats(&chicago_and_washington(), &catalog)
            .expect("comparison must compute");
        let [chicago, washington] = stats.cities;
        assert_eq!(chicago.trip_count, 4);
        assert_eq!(chicago.trips_per_100k, 2_000);
        assert_eq!(washington.trips_per_100k, 0);
    }

    #[test]
    fn empty_city_reports_zero_trips() {
        let tables = vec![
            TripTable::new(City::NewYorkCity, true, Vec::new()),
            TripTable::new(City::Washington, false, Vec::new()),
        ];
        let stats =
            comparison_stats(&tables, &CityCatalog::default()).expect("comparison must compute");
        let [new_york, _] = stats.cities;
        assert_eq!(new_york.trip_count, 0);
        assert_eq!(new_york.mean, None);
        assert_eq!(new_york.female_share(), None);
    }

    #[test]
    fn single_table_is_rejected() {
        let tables = vec![TripTable::new(City::Chicago, true, Vec::new())];
        assert_eq!(
            comparison_stats(&tables, &CityCatalog::default()),
            Err(StatsError::ComparisonArity { got: 1 })
        );
    }

    proptest! {
        #[test]
        fn per_capita_matches_rounded_ratio(count in 0_usize..5_000_000, people in 1_u64..10_000_000) {
            let population = NonZeroU64::new(people).expect("strategy excludes zero");
            let expected = (count as f64 / people as f64 * 100_000.0).round_ties_even() as u64;
            prop_assert_eq!(trips_per_100k(count, population), expected);
        }
    }
}
