//! One generation of the colony.
//!
//! A generation runs in two phases separated by a barrier:
//!
//! 1. **Construction**: every ant builds a tour, reading the distance table
//!    and the pheromone matrix. Nothing shared is written, so ants may run
//!    in parallel.
//! 2. **Update**: the colony evaporates the whole matrix once, deposits
//!    every ant's contribution, and resets the ants.

use super::ant::Ant;
use super::config::AcoConfig;
use super::distance::DistanceTable;
use super::pheromone::PheromoneMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Summary of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    /// Shortest tour of the generation among ants that took no fallback
    /// step. Ties go to the lowest ant index. Empty if every ant fell back.
    pub best_tour: Vec<usize>,
    /// Length of `best_tour`, or infinity if it is empty.
    pub best_length: f64,
    /// Fallback selection steps taken across all ants.
    pub degenerate_selections: usize,
}

/// A fixed population of ants sharing one pheromone matrix.
#[derive(Debug, Clone)]
pub struct Colony {
    ants: Vec<Ant>,
    pheromones: PheromoneMatrix,
}

impl Colony {
    /// Creates `num_ants` idle ants over `n` cities with a uniform matrix.
    pub fn new(n: usize, num_ants: usize, initial_pheromone: f64) -> Self {
        debug_assert!(num_ants > 0, "a colony needs at least one ant");
        Self {
            ants: (0..num_ants).map(|_| Ant::new(n)).collect(),
            pheromones: PheromoneMatrix::new(n, initial_pheromone),
        }
    }

    /// Number of ants.
    pub fn size(&self) -> usize {
        self.ants.len()
    }

    /// Current pheromone matrix.
    pub fn pheromones(&self) -> &PheromoneMatrix {
        &self.pheromones
    }

    /// Consumes the colony, returning its pheromone matrix.
    pub fn into_pheromones(self) -> PheromoneMatrix {
        self.pheromones
    }

    /// Runs one generation: construction, evaporation, reinforcement, reset.
    ///
    /// Each ant draws from its own RNG, seeded from `rng` in ant order
    /// before construction starts, so sequential and parallel construction
    /// yield the same tours.
    ///
    /// Tours that used a fallback step still deposit pheromone but never
    /// become the generation best.
    pub fn run_generation<R: Rng>(
        &mut self,
        distances: &DistanceTable,
        config: &AcoConfig,
        rng: &mut R,
    ) -> GenerationOutcome {
        let seeds: Vec<u64> = (0..self.ants.len()).map(|_| rng.random()).collect();

        let degenerate_selections = self.construct_tours(distances, config, &seeds);

        let best = self
            .ants
            .iter()
            .filter(|ant| ant.fallbacks() == 0)
            .fold(None, |best: Option<&Ant>, ant| match best {
                Some(b) if b.length() <= ant.length() => Some(b),
                _ => Some(ant),
            });
        let outcome = match best {
            Some(ant) => GenerationOutcome {
                best_tour: ant.tour().to_vec(),
                best_length: ant.length(),
                degenerate_selections,
            },
            None => GenerationOutcome {
                best_tour: Vec::new(),
                best_length: f64::INFINITY,
                degenerate_selections,
            },
        };

        self.update_pheromones(config);
        for ant in &mut self.ants {
            ant.reset();
        }

        outcome
    }

    #[cfg(feature = "parallel")]
    fn construct_tours(
        &mut self,
        distances: &DistanceTable,
        config: &AcoConfig,
        seeds: &[u64],
    ) -> usize {
        if !config.parallel {
            return self.construct_sequential(distances, config, seeds);
        }
        let pheromones = &self.pheromones;
        self.ants
            .par_iter_mut()
            .zip(seeds.par_iter())
            .map(|(ant, &seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                ant.construct_tour(distances, pheromones, config, &mut rng)
            })
            .sum()
    }

    #[cfg(not(feature = "parallel"))]
    fn construct_tours(
        &mut self,
        distances: &DistanceTable,
        config: &AcoConfig,
        seeds: &[u64],
    ) -> usize {
        self.construct_sequential(distances, config, seeds)
    }

    fn construct_sequential(
        &mut self,
        distances: &DistanceTable,
        config: &AcoConfig,
        seeds: &[u64],
    ) -> usize {
        let pheromones = &self.pheromones;
        self.ants
            .iter_mut()
            .zip(seeds)
            .map(|(ant, &seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                ant.construct_tour(distances, pheromones, config, &mut rng)
            })
            .sum()
    }

    /// Evaporates once, then deposits every ant's tour.
    fn update_pheromones(&mut self, config: &AcoConfig) {
        self.pheromones
            .evaporate(config.evaporation_rate, config.pheromone_floor);
        for ant in &self.ants {
            self.pheromones.reinforce(ant.tour(), ant.length(), config.q);
        }
    }
}
