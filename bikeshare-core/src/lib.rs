//! Bikeshare core library.
//!
//! Holds the city catalog, the filter vocabulary with its validators, the
//! trip tables and the statistics computed over them. Reading files is left
//! to [`TripSource`] implementations in the provider crates.

mod catalog;
mod error;
mod selection;
mod source;
pub mod stats;
mod trip;

#[cfg(test)]
mod test_utils;

pub use crate::{
    catalog::{City, CityCatalog, CityCatalogBuilder, CityEntry},
    error::{Result, SelectionError, SelectionErrorCode, StatsError, StatsErrorCode},
    selection::{
        CitySelection, DayFilter, FilterSelection, MonthFilter, SUPPORTED_MONTHS, parse_cities,
        parse_day, parse_month, parse_restart, weekday_name,
    },
    source::{TripSource, load_filtered},
    trip::{Gender, TripRecord, TripTable, UserType},
};
