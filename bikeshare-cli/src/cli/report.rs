//! Plain-text rendering of the statistics reports.
//!
//! Each renderer writes the body of one report section; headings, timing and
//! separators are added by the session driver.

use std::io::{self, Write};

use bikeshare_core::{
    City, UserType,
    stats::{CityComparison, ComparisonStats, DurationStats, StationStats, TimeStats, UserStats},
    weekday_name,
};

/// Line printed after every section and after the filter prompts.
pub(crate) const SEPARATOR: &str = "----------------------------------------";

/// Writes the busiest month, weekday and start hour.
///
/// # Errors
/// Returns any error raised by `writer`.
///
/// # Examples
/// ```
/// use bikeshare_cli::cli::render_time;
/// use bikeshare_core::stats::TimeStats;
/// use chrono::{Month, Weekday};
///
/// let stats = TimeStats { month: Month::June, weekday: Weekday::Wed, hour: 17 };
/// let mut out = Vec::new();
/// render_time(&stats, &mut out)?;
/// let text = String::from_utf8(out).expect("utf-8");
/// assert!(text.ends_with("The most common hour to start the trip was: 17:00 - 18:00\n"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_time<W: Write + ?Sized>(stats: &TimeStats, writer: &mut W) -> io::Result<()> {
    let (start, end) = stats.hour_window();
    writeln!(writer, "Most common month was: {}", stats.month.name())?;
    writeln!(
        writer,
        "The most common day of week was: {}",
        weekday_name(stats.weekday)
    )?;
    writeln!(
        writer,
        "The most common hour to start the trip was: {start}:00 - {end}:00"
    )
}

/// Writes the busiest start station, end station and trip.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn render_stations<W: Write + ?Sized>(stats: &StationStats, writer: &mut W) -> io::Result<()> {
    let (from, to) = &stats.trip;
    writeln!(writer, "Most common start station was: {}", stats.start_station)?;
    writeln!(writer, "Most common end station was: {}", stats.end_station)?;
    writeln!(writer, "The most frequent trip was from {from} to {to}")
}

/// Writes the total and mean trip duration.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn render_duration<W: Write + ?Sized>(stats: &DurationStats, writer: &mut W) -> io::Result<()> {
    let total = stats.total;
    writeln!(
        writer,
        "Total trip time was: {} days {} hours {} minutes and {} seconds",
        total.days, total.hours, total.minutes, total.seconds
    )?;
    writeln!(
        writer,
        "Mean trip time was: {} minutes and {} seconds",
        stats.mean.minutes, stats.mean.seconds
    )
}

/// Writes rider categories and, where `city` publishes them, demographics.
///
/// Subscribers always come before customers; other labels follow by
/// frequency.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn render_users<W: Write + ?Sized>(
    city: City,
    stats: &UserStats,
    writer: &mut W,
) -> io::Result<()> {
    let mut user_types: Vec<&(UserType, usize)> = stats.user_types.iter().collect();
    user_types.sort_by_key(|(user_type, _)| match user_type {
        UserType::Subscriber => 0,
        UserType::Customer => 1,
        UserType::Other(_) => 2,
    });
    for (user_type, count) in user_types {
        match user_type {
            UserType::Subscriber => writeln!(writer, "Subscribers: {count}")?,
            UserType::Customer => writeln!(writer, "Customers: {count}")?,
            UserType::Other(label) => writeln!(writer, "{label}: {count}")?,
        }
    }
    if stats.missing_user_type > 0 {
        writeln!(writer, "Unknown user type: {}", stats.missing_user_type)?;
    }
    writeln!(writer)?;

    let Some(demographics) = stats.demographics else {
        return writeln!(
            writer,
            "Gender and birth year data are not available for {city}."
        );
    };
    let genders = demographics.genders;
    writeln!(writer, "Gender breakdown:")?;
    writeln!(writer, "Female: {}", genders.female)?;
    writeln!(writer, "Male: {}", genders.male)?;
    if genders.unknown > 0 {
        writeln!(writer, "Unknown: {}", genders.unknown)?;
    }

    writeln!(writer)?;
    match demographics.birth_years {
        Some(years) => {
            writeln!(writer, "Birth year stats:")?;
            writeln!(writer, "Earliest: {}", years.earliest)?;
            writeln!(writer, "Most recent: {}", years.most_recent)?;
            writeln!(writer, "Most common: {}", years.most_common)
        }
        None => writeln!(writer, "No birth years were recorded for these trips."),
    }
}

/// Writes the side-by-side figures for two cities.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn render_comparison<W: Write + ?Sized>(
    stats: &ComparisonStats,
    writer: &mut W,
) -> io::Result<()> {
    for city in &stats.cities {
        match city.mean {
            Some(mean) => writeln!(
                writer,
                "Mean trip time for {} was: {} minutes and {} seconds",
                city.city, mean.minutes, mean.seconds
            )?,
            None => writeln!(
                writer,
                "No trips match the selected filters for {}.",
                city.city
            )?,
        }
    }
    writeln!(writer)?;

    for city in &stats.cities {
        writeln!(writer, "{} took {} total trips.", city.city, city.trip_count)?;
        writeln!(
            writer,
            "That is {} trips per 100.000 inhabitants!",
            city.trips_per_100k
        )?;
    }
    writeln!(writer)?;

    for city in &stats.cities {
        render_female_share(city, writer)?;
    }
    Ok(())
}

fn render_female_share<W: Write + ?Sized>(city: &CityComparison, writer: &mut W) -> io::Result<()> {
    match city.female_share() {
        Some(share) => writeln!(
            writer,
            "In {}, {share}% of trips were taken by women.",
            city.city
        ),
        None => writeln!(writer, "No gender data are available for {}.", city.city),
    }
}
