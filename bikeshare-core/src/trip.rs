//! Trip records and the per-city tables the statistics consume.

use std::fmt;

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};

use crate::{
    catalog::City,
    selection::{DayFilter, MonthFilter},
};

/// Rider category recorded for each trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserType {
    /// Annual or monthly member.
    Subscriber,
    /// Casual single-ride or day-pass customer.
    Customer,
    /// Any other label found in the source, kept verbatim.
    Other(String),
}

impl UserType {
    /// Maps a raw source label onto a known category.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Subscriber" => Self::Subscriber,
            "Customer" => Self::Customer,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subscriber => f.write_str("Subscriber"),
            Self::Customer => f.write_str("Customer"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// Rider gender as published by the operators that collect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Female rider.
    Female,
    /// Male rider.
    Male,
}

/// One row of source data plus the calendar fields derived from its start.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    start_time: NaiveDateTime,
    end_time: Option<NaiveDateTime>,
    start_station: String,
    end_station: String,
    duration_secs: f64,
    user_type: Option<UserType>,
    gender: Option<Gender>,
    birth_year: Option<i32>,
    month: Month,
    weekday: Weekday,
}

impl TripRecord {
    /// Creates a record and derives its month and weekday from `start_time`.
    ///
    /// # Examples
    /// ```
    /// use bikeshare_core::TripRecord;
    /// use chrono::{NaiveDate, Weekday};
    ///
    /// let start = NaiveDate::from_ymd_opt(2017, 3, 6)
    ///     .and_then(|date| date.and_hms_opt(8, 15, 0))
    ///     .expect("valid timestamp");
    /// let trip = TripRecord::new(start, "Clark St", "State St", 420.0);
    /// assert_eq!(trip.month(), 3);
    /// assert_eq!(trip.weekday(), Weekday::Mon);
    /// assert_eq!(trip.start_hour(), 8);
    /// ```
    #[must_use]
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        duration_secs: f64,
    ) -> Self {
        Self {
            start_time,
            end_time: None,
            start_station: start_station.into(),
            end_station: end_station.into(),
            duration_secs,
            user_type: None,
            gender: None,
            birth_year: None,
            month: calendar_month(start_time.month()),
            weekday: start_time.weekday(),
        }
    }

    /// Sets the end timestamp.
    #[must_use]
    pub fn with_end_time(mut self, end_time: Option<NaiveDateTime>) -> Self {
        self.end_time = end_time;
        self
    }

    /// Sets the rider category.
    #[must_use]
    pub fn with_user_type(mut self, user_type: Option<UserType>) -> Self {
        self.user_type = user_type;
        self
    }

    /// Sets the demographic fields.
    #[must_use]
    pub fn with_demographics(mut self, gender: Option<Gender>, birth_year: Option<i32>) -> Self {
        self.gender = gender;
        self.birth_year = birth_year;
        self
    }

    /// Returns when the trip started.
    #[must_use]
    pub const fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Returns when the trip ended, if recorded.
    #[must_use]
    pub const fn end_time(&self) -> Option<NaiveDateTime> {
        self.end_time
    }

    /// Returns the start station name.
    #[must_use]
    pub fn start_station(&self) -> &str {
        &self.start_station
    }

    /// Returns the end station name.
    #[must_use]
    pub fn end_station(&self) -> &str {
        &self.end_station
    }

    /// Returns the trip length in seconds.
    #[must_use]
    pub const fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Returns the rider category, if recorded.
    #[must_use]
    pub const fn user_type(&self) -> Option<&UserType> {
        self.user_type.as_ref()
    }

    /// Returns the rider gender, if recorded.
    #[must_use]
    pub const fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// Returns the rider birth year, if recorded.
    #[must_use]
    pub const fn birth_year(&self) -> Option<i32> {
        self.birth_year
    }

    /// Returns the 1-based month the trip started in.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month.number_from_month()
    }

    /// Returns the month the trip started in.
    #[must_use]
    pub const fn calendar_month(&self) -> Month {
        self.month
    }

    /// Returns the weekday the trip started on.
    #[must_use]
    pub const fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Returns the hour (0-23) the trip started in.
    #[must_use]
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }
}

const fn calendar_month(number: u32) -> Month {
    match number {
        1 => Month::January,
        2 => Month::February,
        3 => Month::March,
        4 => Month::April,
        5 => Month::May,
        6 => Month::June,
        7 => Month::July,
        8 => Month::August,
        9 => Month::September,
        10 => Month::October,
        11 => Month::November,
        _ => Month::December,
    }
}

/// Trips for a single city, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    city: City,
    has_demographics: bool,
    records: Vec<TripRecord>,
}

impl TripTable {
    /// Creates a table. `has_demographics` states whether the source carried
    /// gender and birth-year columns at all.
    #[must_use]
    pub fn new(city: City, has_demographics: bool, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            has_demographics,
            records,
        }
    }

    /// Returns the city the trips belong to.
    #[must_use]
    pub const fn city(&self) -> City {
        self.city
    }

    /// Returns whether gender and birth year were published for this city.
    #[must_use]
    pub const fn has_demographics(&self) -> bool {
        self.has_demographics
    }

    /// Returns the trips in source order.
    #[must_use]
    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    /// Returns the number of trips.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the table holds no trips.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keeps only the trips that pass both filters, preserving order.
    ///
    /// # Examples
    /// ```
    /// use bikeshare_core::{City, DayFilter, MonthFilter, TripRecord, TripTable};
    /// use chrono::{Month, NaiveDate};
    ///
    /// let trip = |month| {
    ///     let start = NaiveDate::from_ymd_opt(2017, month, 2)
    ///         .and_then(|date| date.and_hms_opt(9, 0, 0))
    ///         .expect("valid timestamp");
    ///     TripRecord::new(start, "A", "B", 60.0)
    /// };
    /// let table = TripTable::new(City::Chicago, true, vec![trip(1), trip(1), trip(3)]);
    /// let january = table.filter(MonthFilter::Only(Month::January), DayFilter::All);
    /// assert_eq!(january.len(), 2);
    /// ```
    #[must_use]
    pub fn filter(mut self, month: MonthFilter, day: DayFilter) -> Self {
        self.records
            .retain(|trip| month.matches(trip.month()) && day.matches(trip.weekday()));
        self
    }
}
