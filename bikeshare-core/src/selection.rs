//! Filter vocabulary and the pure validators behind the interactive prompts.
//!
//! Each `parse_*` function normalises raw user text (trim, lower-case) and
//! either returns a typed value or a [`SelectionError`]. None of them touch
//! the console, so the prompt loop can re-ask on error without the validators
//! knowing about it.

use std::fmt;

use chrono::{Month, Weekday};

use crate::{catalog::City, error::SelectionError};

/// Months covered by the published trip data.
pub const SUPPORTED_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const ALL: &str = "all";
/// Restart answer that starts another round. Compared after lower-casing and
/// removing the line terminator only, so surrounding spaces do not match.
const AFFIRMATIVE: &str = "yes";

/// Returns the full English name of `weekday`, e.g. `"Monday"`.
#[must_use]
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Month restriction applied while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    /// Keep every month.
    All,
    /// Keep only trips that started in the given month.
    Only(Month),
}

impl MonthFilter {
    /// Returns whether a trip starting in `month` (1-based) passes the filter.
    #[must_use]
    pub fn matches(self, month: u32) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected.number_from_month() == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(month) => f.write_str(&month.name().to_lowercase()),
        }
    }
}

/// Day-of-week restriction applied while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    /// Keep every day.
    All,
    /// Keep only trips that started on the given weekday.
    Only(Weekday),
}

impl DayFilter {
    /// Returns whether a trip starting on `weekday` passes the filter.
    #[must_use]
    pub fn matches(self, weekday: Weekday) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == weekday,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(day) => f.write_str(&weekday_name(*day).to_lowercase()),
        }
    }
}

/// One city to explore, or two to compare, in the order they were entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitySelection {
    cities: Vec<City>,
}

impl CitySelection {
    /// Deduplicates `cities` (keeping first appearance) and checks the count.
    ///
    /// # Errors
    /// Returns [`SelectionError::CityCount`] unless one or two distinct cities
    /// remain.
    pub fn new(cities: impl IntoIterator<Item = City>) -> Result<Self, SelectionError> {
        let mut distinct = Vec::new();
        for city in cities {
            if !distinct.contains(&city) {
                distinct.push(city);
            }
        }
        if distinct.is_empty() || distinct.len() > 2 {
            return Err(SelectionError::CityCount {
                count: distinct.len(),
            });
        }
        Ok(Self { cities: distinct })
    }

    /// Returns the cities in entry order.
    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Returns whether two cities were selected.
    #[must_use]
    pub fn is_comparison(&self) -> bool {
        self.cities.len() == 2
    }
}

impl fmt::Display for CitySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.cities.iter().map(|city| city.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}

/// Cities, month and day chosen for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    /// Cities to load.
    pub cities: CitySelection,
    /// Month restriction.
    pub month: MonthFilter,
    /// Day-of-week restriction.
    pub day: DayFilter,
}

/// Parses a comma-separated list of city names.
///
/// # Errors
/// Returns [`SelectionError::UnknownCity`] for the first unknown (or empty)
/// name and [`SelectionError::CityCount`] when the distinct count is not one
/// or two.
///
/// # Examples
/// ```
/// use bikeshare_core::{City, parse_cities};
///
/// let selection = parse_cities(" Washington ,CHICAGO").expect("valid cities");
/// assert_eq!(selection.cities(), &[City::Washington, City::Chicago]);
/// assert!(parse_cities("chicago, boston").is_err());
/// ```
pub fn parse_cities(raw: &str) -> Result<CitySelection, SelectionError> {
    let cities = raw
        .split(',')
        .map(str::parse::<City>)
        .collect::<Result<Vec<_>, _>>()?;
    CitySelection::new(cities)
}

/// Parses `all` or one of January through June.
///
/// # Errors
/// Returns [`SelectionError::UnknownMonth`] for anything else, including the
/// months the data set does not cover.
///
/// # Examples
/// ```
/// use bikeshare_core::{MonthFilter, parse_month};
///
/// assert_eq!(parse_month("ALL"), Ok(MonthFilter::All));
/// assert_eq!(parse_month("March").map(|m| m.to_string()), Ok("march".to_owned()));
/// assert!(parse_month("july").is_err());
/// ```
pub fn parse_month(raw: &str) -> Result<MonthFilter, SelectionError> {
    let normalised = raw.trim().to_lowercase();
    if normalised == ALL {
        return Ok(MonthFilter::All);
    }
    SUPPORTED_MONTHS
        .into_iter()
        .find(|month| month.name().to_lowercase() == normalised)
        .map(MonthFilter::Only)
        .ok_or(SelectionError::UnknownMonth {
            provided: normalised,
        })
}

/// Parses `all` or a full weekday name.
///
/// # Errors
/// Returns [`SelectionError::UnknownDay`] for anything else, abbreviations
/// included.
///
/// # Examples
/// ```
/// use bikeshare_core::{DayFilter, parse_day};
/// use chrono::Weekday;
///
/// assert_eq!(parse_day(" sunday"), Ok(DayFilter::Only(Weekday::Sun)));
/// assert!(parse_day("sun").is_err());
/// ```
pub fn parse_day(raw: &str) -> Result<DayFilter, SelectionError> {
    let normalised = raw.trim().to_lowercase();
    if normalised == ALL {
        return Ok(DayFilter::All);
    }
    WEEKDAYS
        .into_iter()
        .find(|day| weekday_name(*day).to_lowercase() == normalised)
        .map(DayFilter::Only)
        .ok_or(SelectionError::UnknownDay {
            provided: normalised,
        })
}

/// Returns whether the restart answer asks for another round.
///
/// Only `yes` in any case continues. A trailing `\n` or `\r\n` from the
/// console is ignored; any other character, including a space, ends the
/// session.
///
/// # Examples
/// ```
/// use bikeshare_core::parse_restart;
///
/// assert!(parse_restart("Yes\n"));
/// assert!(!parse_restart(" yes"));
/// ```
#[must_use]
pub fn parse_restart(raw: &str) -> bool {
    let answer = raw.strip_suffix('\n').unwrap_or(raw);
    let answer = answer.strip_suffix('\r').unwrap_or(answer);
    answer.to_lowercase() == AFFIRMATIVE
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::{prop_assert, prop_assert_eq, proptest, sample::select};
    use rstest::rstest;

    #[rstest]
    #[case("chicago", &[City::Chicago])]
    #[case("  New York City ", &[City::NewYorkCity])]
    #[case("chicago,washington", &[City::Chicago, City::Washington])]
    #[case("Washington , chicago", &[City::Washington, City::Chicago])]
    #[case("chicago, CHICAGO", &[City::Chicago])]
    fn parse_cities_accepts_one_or_two(#[case] raw: &str, #[case] expected: &[City]) {
        let selection = parse_cities(raw).expect("selection must parse");
        assert_eq!(selection.cities(), expected);
        assert_eq!(selection.is_comparison(), expected.len() == 2);
    }

    #[rstest]
    #[case("")]
    #[case("chicago,")]
    #[case("boston")]
    #[case("chicago; washington")]
    fn parse_cities_rejects_unknown_names(#[case] raw: &str) {
        let err = parse_cities(raw).expect_err("unknown city must fail");
        assert!(matches!(err, SelectionError::UnknownCity { .. }), "{err:?}");
    }

    #[test]
    fn parse_cities_rejects_three_cities() {
        let err = parse_cities("chicago, new york city, washington")
            .expect_err("three cities must fail");
        assert_eq!(err, SelectionError::CityCount { count: 3 });
    }

    #[test]
    fn city_selection_rejects_empty_input() {
        let err = CitySelection::new(Vec::new()).expect_err("no cities must fail");
        assert_eq!(err, SelectionError::CityCount { count: 0 });
    }

    #[rstest]
    #[case("all", MonthFilter::All)]
    #[case("January", MonthFilter::Only(Month::January))]
    #[case(" JUNE ", MonthFilter::Only(Month::June))]
    fn parse_month_accepts_supported_values(#[case] raw: &str, #[case] expected: MonthFilter) {
        assert_eq!(parse_month(raw), Ok(expected));
    }

    #[rstest]
    #[case("july")]
    #[case("december")]
    #[case("jan")]
    #[case("1")]
    fn parse_month_rejects_unsupported_values(#[case] raw: &str) {
        assert!(matches!(
            parse_month(raw),
            Err(SelectionError::UnknownMonth { .. })
        ));
    }

    #[rstest]
    #[case("ALL", DayFilter::All)]
    #[case("monday", DayFilter::Only(Weekday::Mon))]
    #[case("Saturday\n", DayFilter::Only(Weekday::Sat))]
    fn parse_day_accepts_supported_values(#[case] raw: &str, #[case] expected: DayFilter) {
        assert_eq!(parse_day(raw), Ok(expected));
    }

    #[rstest]
    #[case("mon")]
    #[case("weekend")]
    #[case("")]
    fn parse_day_rejects_unsupported_values(#[case] raw: &str) {
        assert!(matches!(
            parse_day(raw),
            Err(SelectionError::UnknownDay { .. })
        ));
    }

    #[rstest]
    #[case("yes", true)]
    #[case("YES\n", true)]
    #[case("Yes\r\n", true)]
    #[case(" yes", false)]
    #[case("yes \n", false)]
    #[case("yes\n\n", false)]
    #[case("y", false)]
    #[case("yes please", false)]
    #[case("", false)]
    fn parse_restart_requires_exact_affirmative(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(parse_restart(raw), expected);
    }

    #[test]
    fn month_filter_matches_one_based_index() {
        let march = MonthFilter::Only(Month::March);
        assert!(march.matches(3));
        assert!(!march.matches(1));
        assert!(MonthFilter::All.matches(12));
    }

    fn mixed_case(word: &str, mask: &[bool]) -> String {
        word.chars()
            .zip(mask.iter().cycle())
            .map(|(ch, upper)| {
                if *upper {
                    ch.to_ascii_uppercase()
                } else {
                    ch
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn month_round_trips_to_canonical_lowercase(
            word in select(vec!["all", "january", "february", "march", "april", "may", "june"]),
            mask in proptest::collection::vec(proptest::bool::ANY, 1..8),
            pad in "[ \t]{0,3}",
        ) {
            let raw = format!("{pad}{}{pad}", mixed_case(word, &mask));
            let parsed = parse_month(&raw);
            prop_assert!(parsed.is_ok());
            prop_assert_eq!(parsed.map(|m| m.to_string()), Ok(word.to_owned()));
        }

        #[test]
        fn day_round_trips_to_canonical_lowercase(
            word in select(vec![
                "all", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
            ]),
            mask in proptest::collection::vec(proptest::bool::ANY, 1..8),
        ) {
            let parsed = parse_day(&mixed_case(word, &mask));
            prop_assert_eq!(parsed.map(|d| d.to_string()), Ok(word.to_owned()));
        }

        #[test]
        fn city_pairs_round_trip_in_entry_order(
            first in select(City::ALL.to_vec()),
            second in select(City::ALL.to_vec()),
            mask in proptest::collection::vec(proptest::bool::ANY, 1..8),
        ) {
            let raw = format!(
                " {} ,{} ",
                mixed_case(first.as_str(), &mask),
                mixed_case(second.as_str(), &mask),
            );
            let selection = parse_cities(&raw).map_err(|err| {
                proptest::test_runner::TestCaseError::fail(err.to_string())
            })?;
            if first == second {
                prop_assert_eq!(selection.cities(), &[first][..]);
            } else {
                prop_assert_eq!(selection.cities(), &[first, second][..]);
            }
        }
    }
}
