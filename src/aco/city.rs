//! Cities and random instance generation.

use super::error::AcoError;
use rand::Rng;

/// A city in the plane.
///
/// A city's identifier is its index in the slice handed to the runner;
/// tours are sequences of those indices.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl City {
    /// Creates a city at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Generates `n` cities uniformly in the square `[0, max_extent)^2`.
///
/// # Panics
/// Panics if `max_extent` is not positive and finite. The runner checks this
/// through [`super::AcoConfig::validate`] before calling.
pub fn random_cities<R: Rng>(n: usize, max_extent: f64, rng: &mut R) -> Vec<City> {
    (0..n)
        .map(|_| {
            City::new(
                rng.random_range(0.0..max_extent),
                rng.random_range(0.0..max_extent),
            )
        })
        .collect()
}

/// Checks that a city set can be optimized.
///
/// Requires at least two cities, finite coordinates, and no two cities at
/// the same position. A coincident pair would create a zero-length edge,
/// whose inverse distance is infinite.
pub(crate) fn validate_cities(cities: &[City]) -> Result<(), AcoError> {
    if cities.len() < 2 {
        return Err(AcoError::TooFewCities {
            count: cities.len(),
        });
    }
    if let Some(city) = cities
        .iter()
        .position(|c| !c.x.is_finite() || !c.y.is_finite())
    {
        return Err(AcoError::NonFiniteCoordinate { city });
    }
    for (i, a) in cities.iter().enumerate() {
        for (j, b) in cities.iter().enumerate().skip(i + 1) {
            if a.x == b.x && a.y == b.y {
                return Err(AcoError::CoincidentCities {
                    first: i,
                    second: j,
                });
            }
        }
    }
    Ok(())
}
