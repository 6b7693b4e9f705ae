//! Pheromone trail matrix.

/// Symmetric `N x N` matrix of pheromone levels.
///
/// Every off-diagonal entry stays strictly positive: the matrix starts at a
/// positive level, evaporation clamps to a positive floor, and reinforcement
/// only adds. Diagonal entries keep their initial value and are never read
/// by tour construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PheromoneMatrix {
    n: usize,
    data: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates an `n x n` matrix with every entry set to `initial`.
    pub fn new(n: usize, initial: f64) -> Self {
        Self {
            n,
            data: vec![initial; n * n],
        }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` if the matrix has no cities.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Pheromone level on the edge `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Scales every off-diagonal entry by `1 - rate`, then clamps it to at
    /// least `floor`.
    pub fn evaporate(&mut self, rate: f64, floor: f64) {
        let keep = 1.0 - rate;
        let n = self.n;
        for i in 0..n {
            for j in (i + 1)..n {
                let level = (self.data[i * n + j] * keep).max(floor);
                self.data[i * n + j] = level;
                self.data[j * n + i] = level;
            }
        }
    }

    /// Deposits `q / length` on both directions of every edge of a closed
    /// tour, including the edge from the last city back to the first.
    ///
    /// Tours of non-positive or non-finite length deposit nothing.
    pub fn reinforce(&mut self, tour: &[usize], length: f64, q: f64) {
        if !(length > 0.0 && length.is_finite()) || tour.len() < 2 {
            return;
        }
        let deposit = q / length;
        let n = self.n;
        let len = tour.len();
        for k in 0..len {
            let a = tour[k];
            let b = tour[(k + 1) % len];
            self.data[a * n + b] += deposit;
            self.data[b * n + a] += deposit;
        }
    }

    /// Iterates over every undirected edge `(i, j, level)` with `i < j`.
    ///
    /// This is the view a graph renderer needs to draw trail intensity.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.n;
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j, self.get(i, j))))
    }

    /// Smallest off-diagonal level, or `None` for fewer than two cities.
    pub fn min_level(&self) -> Option<f64> {
        self.edges().map(|(_, _, level)| level).reduce(f64::min)
    }

    /// Largest off-diagonal level, or `None` for fewer than two cities.
    pub fn max_level(&self) -> Option<f64> {
        self.edges().map(|(_, _, level)| level).reduce(f64::max)
    }
}
