//! CSV trip source reading the per-city files published by the operators.

mod errors;
mod parse;
mod source;

pub use errors::CsvSourceError;
pub use source::{CsvTripSource, read_trip_table};
