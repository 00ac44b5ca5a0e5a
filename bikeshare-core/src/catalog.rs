//! City catalog describing where each city's trips live and how many people
//! live there.
//!
//! The catalog is an explicit immutable value built once at start-up and
//! handed to whichever [`crate::TripSource`] reads the files. Use
//! [`CityCatalogBuilder`] to relocate the data directory or override an entry.

use std::{
    fmt,
    num::NonZeroU64,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::error::SelectionError;

/// Cities with published trip data.
///
/// # Examples
/// ```
/// use bikeshare_core::City;
///
/// let city: City = " New York City ".parse().expect("known city");
/// assert_eq!(city, City::NewYorkCity);
/// assert_eq!(city.as_str(), "new york city");
/// assert_eq!(city.to_string(), "New York City");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum City {
    /// Divvy trips in Chicago, IL.
    Chicago,
    /// Citi Bike trips in New York City, NY.
    NewYorkCity,
    /// Capital Bikeshare trips in Washington, DC.
    Washington,
}

impl City {
    /// Every supported city in catalog order.
    pub const ALL: [Self; 3] = [Self::Chicago, Self::NewYorkCity, Self::Washington];

    /// Returns the canonical lower-case identifier accepted at the prompt.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chicago => "chicago",
            Self::NewYorkCity => "new york city",
            Self::Washington => "washington",
        }
    }

    /// Returns the title-cased name used in reports.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Chicago => "Chicago",
            Self::NewYorkCity => "New York City",
            Self::Washington => "Washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for City {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalised = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|city| city.as_str() == normalised)
            .ok_or(SelectionError::UnknownCity {
                provided: normalised,
            })
    }
}

/// Source file and population registered for one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityEntry {
    file: PathBuf,
    population: NonZeroU64,
}

impl CityEntry {
    /// Creates an entry pointing at `file` for a city of `population` people.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, population: NonZeroU64) -> Self {
        Self {
            file: file.into(),
            population,
        }
    }

    /// Returns the trip file, already resolved against the data directory.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Returns the population used for per-capita comparisons.
    #[must_use]
    pub const fn population(&self) -> NonZeroU64 {
        self.population
    }
}

/// Immutable registry of [`City`] to [`CityEntry`].
///
/// # Examples
/// ```
/// use bikeshare_core::{City, CityCatalog};
///
/// let catalog = CityCatalog::builder().with_data_dir("/srv/bikeshare").build();
/// let chicago = catalog.entry(City::Chicago);
/// assert_eq!(chicago.file(), std::path::Path::new("/srv/bikeshare/chicago.csv"));
/// assert_eq!(chicago.population().get(), 2_704_958);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityCatalog {
    chicago: CityEntry,
    new_york_city: CityEntry,
    washington: CityEntry,
}

impl CityCatalog {
    /// Returns a builder seeded with the published files and populations.
    #[must_use]
    pub fn builder() -> CityCatalogBuilder {
        CityCatalogBuilder::default()
    }

    /// Returns the entry registered for `city`.
    #[must_use]
    pub const fn entry(&self, city: City) -> &CityEntry {
        match city {
            City::Chicago => &self.chicago,
            City::NewYorkCity => &self.new_york_city,
            City::Washington => &self.washington,
        }
    }
}

impl Default for CityCatalog {
    fn default() -> Self {
        CityCatalogBuilder::default().build()
    }
}

/// Configures and constructs [`CityCatalog`] instances.
///
/// Relative file names are joined onto the data directory when
/// [`CityCatalogBuilder::build`] runs; absolute overrides are kept verbatim.
#[derive(Debug, Clone)]
pub struct CityCatalogBuilder {
    data_dir: PathBuf,
    chicago: CityEntry,
    new_york_city: CityEntry,
    washington: CityEntry,
}

impl Default for CityCatalogBuilder {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            chicago: CityEntry::new("chicago.csv", population(2_704_958)),
            new_york_city: CityEntry::new("new_york_city.csv", population(8_537_673)),
            washington: CityEntry::new("washington.csv", population(681_170)),
        }
    }
}

impl CityCatalogBuilder {
    /// Sets the directory the trip files are resolved against.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Replaces the entry registered for `city`.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroU64;
    /// use bikeshare_core::{City, CityCatalog, CityEntry};
    ///
    /// let population = NonZeroU64::new(100_000).expect("non-zero");
    /// let catalog = CityCatalog::builder()
    ///     .with_entry(City::Washington, CityEntry::new("dc.csv", population))
    ///     .build();
    /// assert_eq!(catalog.entry(City::Washington).population().get(), 100_000);
    /// ```
    #[must_use]
    pub fn with_entry(mut self, city: City, entry: CityEntry) -> Self {
        match city {
            City::Chicago => self.chicago = entry,
            City::NewYorkCity => self.new_york_city = entry,
            City::Washington => self.washington = entry,
        }
        self
    }

    /// Returns the configured data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolves every entry against the data directory.
    #[must_use]
    pub fn build(self) -> CityCatalog {
        let resolve = |entry: CityEntry| CityEntry {
            file: self.data_dir.join(entry.file),
            population: entry.population,
        };
        CityCatalog {
            chicago: resolve(self.chicago),
            new_york_city: resolve(self.new_york_city),
            washington: resolve(self.washington),
        }
    }
}

const fn population(value: u64) -> NonZeroU64 {
    match NonZeroU64::new(value) {
        Some(value) => value,
        None => NonZeroU64::MIN,
    }
}
