//! Row-level parsing from CSV cells into [`TripRecord`]s.

use bikeshare_core::{Gender, TripRecord, UserType};
use chrono::NaiveDateTime;
use serde::Deserialize;

pub(crate) const START_TIME: &str = "Start Time";
pub(crate) const TRIP_DURATION: &str = "Trip Duration";
pub(crate) const START_STATION: &str = "Start Station";
pub(crate) const END_STATION: &str = "End Station";
pub(crate) const USER_TYPE: &str = "User Type";
pub(crate) const GENDER: &str = "Gender";
pub(crate) const BIRTH_YEAR: &str = "Birth Year";

pub(crate) const REQUIRED_COLUMNS: [&str; 5] = [
    START_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];

const TIMESTAMP_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";
const FRACTIONAL_TIMESTAMP_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.f";

const MIN_BIRTH_YEAR: f64 = 1800.0;
const MAX_BIRTH_YEAR: f64 = 2100.0;

/// One CSV row as published. Columns not named here (such as the leading
/// row index) are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTrip {
    #[serde(rename = "Start Time")]
    pub(crate) start_time: String,
    #[serde(rename = "End Time", default)]
    pub(crate) end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    pub(crate) trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub(crate) start_station: String,
    #[serde(rename = "End Station")]
    pub(crate) end_station: String,
    #[serde(rename = "User Type", default)]
    pub(crate) user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub(crate) gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub(crate) birth_year: Option<f64>,
}

/// Rejections raised while converting a [`RawTrip`]; the caller attaches the
/// file name and line.
#[derive(Debug)]
pub(crate) enum RowError {
    Timestamp(String, chrono::ParseError),
    BirthYear(f64),
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_LAYOUT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, FRACTIONAL_TIMESTAMP_LAYOUT))
}

fn parse_gender(raw: Option<&str>) -> Option<Gender> {
    match raw.map(str::trim) {
        Some("Female") => Some(Gender::Female),
        Some("Male") => Some(Gender::Male),
        _ => None,
    }
}

fn parse_birth_year(raw: Option<f64>) -> Result<Option<i32>, RowError> {
    match raw {
        None => Ok(None),
        Some(value) if (MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&value) => {
            Ok(Some(value.trunc() as i32))
        }
        Some(value) => Err(RowError::BirthYear(value)),
    }
}

impl RawTrip {
    pub(crate) fn into_record(self, with_demographics: bool) -> Result<TripRecord, RowError> {
        let start = parse_timestamp(&self.start_time)
            .map_err(|err| RowError::Timestamp(self.start_time.clone(), err))?;
        let end = self
            .end_time
            .as_deref()
            .and_then(|raw| parse_timestamp(raw).ok());
        let user_type = self
            .user_type
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(UserType::from_label);
        let record = TripRecord::new(start, self.start_station, self.end_station, self.trip_duration)
            .with_end_time(end)
            .with_user_type(user_type);
        if !with_demographics {
            return Ok(record);
        }
        let birth_year = parse_birth_year(self.birth_year)?;
        Ok(record.with_demographics(parse_gender(self.gender.as_deref()), birth_year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Datelike, Timelike};
    use rstest::rstest;

    #[rstest]
    #[case("2017-01-01 00:07:57", (2017, 1, 1, 0, 7, 57))]
    #[case(" 2017-06-21 08:36:34 ", (2017, 6, 21, 8, 36, 34))]
    #[case("2017-03-05 13:01:02.250", (2017, 3, 5, 13, 1, 2))]
    fn parse_timestamp_accepts_published_layouts(
        #[case] raw: &str,
        #[case] expected: (i32, u32, u32, u32, u32, u32),
    ) {
        let parsed = parse_timestamp(raw).expect("timestamp must parse");
        assert_eq!(
            (
                parsed.year(),
                parsed.month(),
                parsed.day(),
                parsed.hour(),
                parsed.minute(),
                parsed.second()
            ),
            expected
        );
    }

    #[rstest]
    #[case("")]
    #[case("01/02/2017 08:00")]
    #[case("2017-13-01 00:00:00")]
    fn parse_timestamp_rejects_other_layouts(#[case] raw: &str) {
        assert!(parse_timestamp(raw).is_err());
    }

    #[rstest]
    #[case(None, Ok(None))]
    #[case(Some(1992.0), Ok(Some(1992)))]
    #[case(Some(1899.0), Ok(Some(1899)))]
    fn parse_birth_year_accepts_calendar_years(
        #[case] raw: Option<f64>,
        #[case] expected: Result<Option<i32>, ()>,
    ) {
        assert_eq!(parse_birth_year(raw).map_err(|_| ()), expected);
    }

    #[test]
    fn parse_birth_year_rejects_implausible_values() {
        assert!(matches!(
            parse_birth_year(Some(-1.0)),
            Err(RowError::BirthYear(value)) if value == -1.0
        ));
        assert!(parse_birth_year(Some(f64::NAN)).is_err());
    }

    #[rstest]
    #[case(Some("Female"), Some(Gender::Female))]
    #[case(Some(" Male "), Some(Gender::Male))]
    #[case(Some("Other"), None)]
    #[case(None, None)]
    fn parse_gender_maps_published_values(
        #[case] raw: Option<&str>,
        #[case] expected: Option<Gender>,
    ) {
        assert_eq!(parse_gender(raw), expected);
    }
}
