//! Tour construction by a single ant.
//!
//! An ant starts at a uniformly random city and repeatedly moves to an
//! unvisited city chosen by roulette-wheel selection, where city `c` has
//! weight `tau(cur, c)^alpha * (1 / d(cur, c))^beta`.
//!
//! # Reference
//!
//! Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//! Colony of Cooperating Agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use super::config::AcoConfig;
use super::distance::DistanceTable;
use super::pheromone::PheromoneMatrix;
use rand::Rng;

/// Outcome of one selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A city drawn from the weighted wheel.
    Chosen(usize),
    /// The wheel had no positive weight; the ant returns to its start city.
    Fallback(usize),
}

impl Step {
    /// The city this step moves to.
    pub fn city(self) -> usize {
        match self {
            Step::Chosen(c) | Step::Fallback(c) => c,
        }
    }
}

/// Per-ant construction state.
///
/// Holds the visited flags and the tour built so far. The state lives for
/// one generation; [`reset`](Ant::reset) clears it for the next one.
#[derive(Debug, Clone)]
pub struct Ant {
    visited: Vec<bool>,
    tour: Vec<usize>,
    length: f64,
    fallbacks: usize,
    scores: Vec<f64>,
}

impl Ant {
    /// Creates an idle ant for an `n`-city instance.
    pub fn new(n: usize) -> Self {
        Self {
            visited: vec![false; n],
            tour: Vec::with_capacity(n),
            length: 0.0,
            fallbacks: 0,
            scores: vec![0.0; n],
        }
    }

    /// The tour built so far.
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Length of the completed tour (0.0 before construction).
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Fallback steps taken while building the current tour.
    ///
    /// A tour with any fallback repeats its start city and is not a
    /// permutation.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }

    /// Whether the tour covers all cities.
    pub fn is_complete(&self) -> bool {
        !self.visited.is_empty() && self.tour.len() == self.visited.len()
    }

    /// Clears the visited set and tour.
    pub fn reset(&mut self) {
        self.visited.fill(false);
        self.tour.clear();
        self.length = 0.0;
        self.fallbacks = 0;
    }

    /// Builds a complete tour and records its closed length.
    ///
    /// Returns the number of fallback steps taken (zero in any run whose
    /// inputs passed validation, barring floating-point underflow).
    pub fn construct_tour<R: Rng>(
        &mut self,
        distances: &DistanceTable,
        pheromones: &PheromoneMatrix,
        config: &AcoConfig,
        rng: &mut R,
    ) -> usize {
        let n = distances.len();
        self.reset();
        if n == 0 {
            return 0;
        }

        let start = rng.random_range(0..n);
        self.visit(start);

        let mut current = start;
        while self.tour.len() < n {
            let step = self.select_next_city(current, distances, pheromones, config, rng);
            if let Step::Fallback(_) = step {
                self.fallbacks += 1;
            }
            current = step.city();
            self.visit(current);
        }

        if self.fallbacks > 0 {
            log::debug!(
                "ant fell back to its start city {} time(s); tour is not a permutation",
                self.fallbacks
            );
        }
        self.length = distances.tour_length(&self.tour);
        self.fallbacks
    }

    /// Picks the next city from `current` by roulette-wheel selection over
    /// the unvisited cities.
    pub fn select_next_city<R: Rng>(
        &mut self,
        current: usize,
        distances: &DistanceTable,
        pheromones: &PheromoneMatrix,
        config: &AcoConfig,
        rng: &mut R,
    ) -> Step {
        let mut total = 0.0;
        for city in 0..self.visited.len() {
            if self.visited[city] {
                continue;
            }
            let tau = pheromones.get(current, city);
            let eta = 1.0 / distances.get(current, city);
            let score = tau.powf(config.alpha) * eta.powf(config.beta);
            self.scores[city] = score;
            total += score;
        }

        // Also catches NaN.
        if !(total > 0.0) {
            return Step::Fallback(self.tour[0]);
        }

        if total.is_infinite() {
            return Step::Chosen(self.strongest_unvisited());
        }

        let mut remainder = rng.random_range(0.0..total);
        let mut last = current;
        for city in 0..self.visited.len() {
            if self.visited[city] {
                continue;
            }
            last = city;
            remainder -= self.scores[city];
            if remainder <= 0.0 {
                return Step::Chosen(city);
            }
        }
        // Rounding left a sliver of the wheel unclaimed.
        Step::Chosen(last)
    }

    fn visit(&mut self, city: usize) {
        self.visited[city] = true;
        self.tour.push(city);
    }

    /// First unvisited city with the highest score.
    fn strongest_unvisited(&self) -> usize {
        let mut best: Option<usize> = None;
        let mut best_score = f64::NEG_INFINITY;
        for city in 0..self.visited.len() {
            if self.visited[city] {
                continue;
            }
            if best.is_none() || self.scores[city] > best_score {
                best = Some(city);
                best_score = self.scores[city];
            }
        }
        best.unwrap_or(self.tour[0])
    }
}
