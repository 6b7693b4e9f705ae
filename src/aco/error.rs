//! Error types for ACO runs.

use thiserror::Error;

/// Errors reported before an ACO run starts.
///
/// Every variant is produced by input validation; once the first
/// generation begins, the run always completes and returns a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// Fewer than two cities: no tour has a positive length.
    #[error("at least 2 cities are required, got {count}")]
    TooFewCities {
        /// Number of cities supplied.
        count: usize,
    },

    /// Population size of zero.
    #[error("num_ants must be at least 1")]
    InvalidPopulation,

    /// Generation count of zero.
    #[error("max_generations must be at least 1")]
    InvalidGenerations,

    /// Evaporation rate outside `[0, 1]`.
    #[error("evaporation_rate must be in [0, 1], got {0}")]
    InvalidEvaporationRate(f64),

    /// Any other out-of-range numeric parameter.
    #[error("{name} = {value} is invalid: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in [`super::AcoConfig`].
        name: &'static str,
        /// Offending value.
        value: f64,
        /// What the value must satisfy.
        reason: &'static str,
    },

    /// A city has a NaN or infinite coordinate.
    #[error("city {city} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending city.
        city: usize,
    },

    /// Two cities share the same coordinates, producing a zero-length edge.
    #[error("cities {first} and {second} have identical coordinates")]
    CoincidentCities {
        /// Lower city index.
        first: usize,
        /// Higher city index.
        second: usize,
    },
}
