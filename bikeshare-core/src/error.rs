//! Error types for the bikeshare core library.
//!
//! Defines the error enums exposed by the public API together with stable,
//! machine-readable codes for each variant.

use std::fmt;

use thiserror::Error;

use crate::catalog::City;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Rejection produced by the filter validators.
///
/// The interactive prompt treats every variant as recoverable and asks again.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SelectionError {
    /// A city name was not in the catalog.
    #[error("unknown city `{provided}`; choose from Chicago, New York City, Washington")]
    UnknownCity {
        /// Normalised name the user typed.
        provided: String,
    },
    /// Fewer than one or more than two distinct cities were requested.
    #[error("explore one city or compare two (got {count})")]
    CityCount {
        /// Number of distinct cities supplied.
        count: usize,
    },
    /// The month was neither `all` nor January through June.
    #[error("unknown month `{provided}`; choose all or January through June")]
    UnknownMonth {
        /// Normalised month the user typed.
        provided: String,
    },
    /// The day was neither `all` nor a full weekday name.
    #[error("unknown day `{provided}`; choose all or Monday through Sunday")]
    UnknownDay {
        /// Normalised day the user typed.
        provided: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`SelectionError`] variants.
    enum SelectionErrorCode for SelectionError {
        /// A city name was not in the catalog.
        UnknownCity => UnknownCity { .. } => "SELECTION_UNKNOWN_CITY",
        /// Fewer than one or more than two distinct cities were requested.
        CityCount => CityCount { .. } => "SELECTION_CITY_COUNT",
        /// The month was outside the supported vocabulary.
        UnknownMonth => UnknownMonth { .. } => "SELECTION_UNKNOWN_MONTH",
        /// The day was outside the supported vocabulary.
        UnknownDay => UnknownDay { .. } => "SELECTION_UNKNOWN_DAY",
    }
}

/// Error type produced by the statistics routines.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum StatsError {
    /// The filtered table had no trips to aggregate.
    #[error("no trips match the selected filters for {city}")]
    EmptyTable {
        /// City whose table was empty.
        city: City,
    },
    /// The comparison routine needs exactly two tables.
    #[error("comparison needs exactly two cities (got {got})")]
    ComparisonArity {
        /// Number of tables supplied.
        got: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`StatsError`] variants.
    enum StatsErrorCode for StatsError {
        /// The filtered table had no trips to aggregate.
        EmptyTable => EmptyTable { .. } => "STATS_EMPTY_TABLE",
        /// The comparison routine needs exactly two tables.
        ComparisonArity => ComparisonArity { .. } => "STATS_COMPARISON_ARITY",
    }
}

/// Convenient alias for results returned by the statistics routines.
pub type Result<T> = core::result::Result<T, StatsError>;
