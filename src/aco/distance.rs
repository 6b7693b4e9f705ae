//! Pairwise Euclidean distances.

use super::city::City;

/// Symmetric `N x N` table of Euclidean distances, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTable {
    n: usize,
    data: Vec<f64>,
}

impl DistanceTable {
    /// Builds the table from city coordinates.
    ///
    /// Only the upper triangle is computed; each value is mirrored into
    /// the lower triangle. The diagonal stays zero.
    pub fn new(cities: &[City]) -> Self {
        let n = cities.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` if the table has no cities.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between cities `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Length of the closed tour, including the edge from the last city
    /// back to the first.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        match tour.len() {
            0 | 1 => 0.0,
            len => (0..len).map(|k| self.get(tour[k], tour[(k + 1) % len])).sum(),
        }
    }
}
