//! Shared test utilities for `bikeshare-core`.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::{
    catalog::City,
    source::TripSource,
    trip::{Gender, TripRecord, TripTable, UserType},
};

/// Parses a `%Y-%m-%d %H:%M:%S` fixture timestamp.
pub(crate) fn timestamp(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|err| panic!("fixture timestamp `{raw}` must parse: {err}"))
}

/// Builds a one-minute trip between two placeholder stations.
pub(crate) fn trip_at(start: &str) -> TripRecord {
    TripRecord::new(timestamp(start), "Start", "End", 60.0)
}

/// Builds a trip with explicit stations and duration.
pub(crate) fn trip_between(start: &str, from: &str, to: &str, duration_secs: f64) -> TripRecord {
    TripRecord::new(timestamp(start), from, to, duration_secs)
}

/// Builds a subscriber trip carrying demographic fields.
pub(crate) fn rider(gender: Option<Gender>, birth_year: Option<i32>) -> TripRecord {
    trip_at("2017-01-02 08:00:00")
        .with_user_type(Some(UserType::Subscriber))
        .with_demographics(gender, birth_year)
}

/// Error raised by [`MemorySource`] for cities it does not hold.
#[derive(Debug, Error)]
#[error("no trips registered for {}", .city.as_str())]
pub(crate) struct MissingTable {
    city: City,
}

/// In-memory [`TripSource`] keyed by city.
#[derive(Debug, Default)]
pub(crate) struct MemorySource {
    tables: HashMap<City, TripTable>,
}

impl MemorySource {
    pub(crate) fn with_table(mut self, table: TripTable) -> Self {
        self.tables.insert(table.city(), table);
        self
    }
}

impl TripSource for MemorySource {
    type Error = MissingTable;

    fn name(&self) -> &str {
        "memory"
    }

    fn load_city(&self, city: City) -> Result<TripTable, Self::Error> {
        self.tables
            .get(&city)
            .cloned()
            .ok_or(MissingTable { city })
    }
}
