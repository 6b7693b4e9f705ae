//! ACO main loop.
//!
//! [`AcoRunner`] validates its inputs, builds the distance table, and runs
//! the colony for the configured number of generations while tracking the
//! best tour seen. Generations run strictly in sequence: a generation's
//! pheromone update completes before the next generation's ants read it.

use super::city::{random_cities, validate_cities, City};
use super::colony::Colony;
use super::config::AcoConfig;
use super::distance::DistanceTable;
use super::error::AcoError;
use super::observer::{GenerationObserver, GenerationReport, NoopObserver};
use super::pheromone::PheromoneMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of an ACO run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// Shortest closed tour found, as city indices.
    ///
    /// Always a permutation of the cities, or empty if no generation ran or
    /// every constructed tour used a fallback step.
    pub best_tour: Vec<usize>,

    /// Length of `best_tour`, including the edge back to the first city.
    pub best_length: f64,

    /// 1-based generation in which `best_tour` was found.
    pub best_generation: usize,

    /// Pheromone matrix after the last completed generation.
    pub pheromones: PheromoneMatrix,

    /// Number of generations completed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best length after each completed generation (non-increasing).
    pub length_history: Vec<f64>,

    /// Fallback selection steps taken over the whole run.
    pub degenerate_selections: usize,
}

/// Executes Ant Colony Optimization on a set of cities.
///
/// # Usage
///
/// ```
/// use u_aco::aco::{AcoConfig, AcoRunner, City};
///
/// let cities = vec![
///     City::new(0.0, 0.0),
///     City::new(0.0, 10.0),
///     City::new(10.0, 10.0),
///     City::new(10.0, 0.0),
/// ];
/// let config = AcoConfig::default()
///     .with_num_ants(10)
///     .with_max_generations(50)
///     .with_seed(42);
///
/// let result = AcoRunner::run(&cities, &config).unwrap();
/// assert!((result.best_length - 40.0).abs() < 1e-9);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs ACO with an RNG seeded from `config.seed`.
    pub fn run(cities: &[City], config: &AcoConfig) -> Result<AcoResult, AcoError> {
        Self::run_with_cancel(cities, config, None)
    }

    /// Runs ACO, reporting each generation to `observer`.
    pub fn run_observed<O: GenerationObserver>(
        cities: &[City],
        config: &AcoConfig,
        observer: &mut O,
    ) -> Result<AcoResult, AcoError> {
        let mut rng = create_rng(config.seed);
        Self::run_with(cities, config, &mut rng, observer, None)
    }

    /// Runs ACO with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next generation and returns the best tour found so far.
    /// A run cancelled before its first generation returns an empty tour
    /// with an infinite length, as does a run in which every tour used a
    /// fallback step.
    pub fn run_with_cancel(
        cities: &[City],
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult, AcoError> {
        let mut rng = create_rng(config.seed);
        Self::run_with(cities, config, &mut rng, &mut NoopObserver, cancel)
    }

    /// Generates `n` random cities in `[0, max_extent)^2` and runs ACO on
    /// them. The same seeded RNG drives both generation and optimization.
    pub fn run_random(
        n: usize,
        config: &AcoConfig,
    ) -> Result<(Vec<City>, AcoResult), AcoError> {
        config.validate()?;
        let mut rng = create_rng(config.seed);
        let cities = random_cities(n, config.max_extent, &mut rng);
        let result = Self::run_with(&cities, config, &mut rng, &mut NoopObserver, None)?;
        Ok((cities, result))
    }

    /// Runs ACO with a caller-supplied RNG and observer.
    ///
    /// `config.seed` is ignored; all randomness comes from `rng`.
    pub fn run_with<R: Rng, O: GenerationObserver>(
        cities: &[City],
        config: &AcoConfig,
        rng: &mut R,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult, AcoError> {
        config.validate()?;
        validate_cities(cities)?;

        let distances = DistanceTable::new(cities);
        let mut colony = Colony::new(cities.len(), config.num_ants, config.initial_pheromone);

        let mut best_tour = Vec::new();
        let mut best_length = f64::INFINITY;
        let mut best_generation = 0;
        let mut length_history = Vec::with_capacity(config.max_generations);
        let mut degenerate_selections = 0usize;
        let mut cancelled = false;

        for gen in 1..=config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let outcome = colony.run_generation(&distances, config, rng);
            degenerate_selections += outcome.degenerate_selections;

            // Strict improvement only: ties keep the earlier tour.
            if outcome.best_length < best_length {
                log::info!(
                    "generation {}: new best length {:.4} (was {:.4})",
                    gen,
                    outcome.best_length,
                    best_length
                );
                best_length = outcome.best_length;
                best_tour = outcome.best_tour;
                best_generation = gen;
            }
            length_history.push(best_length);

            log::debug!(
                "generation {}: generation_best={:.4}, best={:.4}",
                gen,
                outcome.best_length,
                best_length
            );
            if outcome.degenerate_selections > 0 {
                log::warn!(
                    "generation {}: {} degenerate selection(s)",
                    gen,
                    outcome.degenerate_selections
                );
            }

            observer.on_generation(&GenerationReport {
                generation: gen,
                generation_best: outcome.best_length,
                best_length,
                degenerate_selections: outcome.degenerate_selections,
            });
        }

        let generations = length_history.len();
        log::info!(
            "ACO finished after {} generation(s): best length {:.4}",
            generations,
            best_length
        );

        Ok(AcoResult {
            best_tour,
            best_length,
            best_generation,
            pheromones: colony.into_pheromones(),
            generations,
            cancelled,
            length_history,
            degenerate_selections,
        })
    }
}

fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(0.0, 10.0),
            City::new(10.0, 10.0),
            City::new(10.0, 0.0),
        ]
    }

    fn is_permutation(tour: &[usize], n: usize) -> bool {
        let mut sorted = tour.to_vec();
        sorted.sort_unstable();
        sorted == (0..n).collect::<Vec<_>>()
    }

    /// Rotations and reflections of the square perimeter.
    fn is_perimeter(tour: &[usize]) -> bool {
        (0..4).all(|k| {
            let a = tour[k] as i64;
            let b = tour[(k + 1) % 4] as i64;
            (a - b).rem_euclid(4) == 1 || (b - a).rem_euclid(4) == 1
        })
    }

    #[test]
    fn test_square_converges_to_perimeter() {
        let config = AcoConfig::default()
            .with_num_ants(10)
            .with_max_generations(50)
            .with_seed(42);

        let result = AcoRunner::run(&square(), &config).unwrap();

        assert!(
            (result.best_length - 40.0).abs() < 1e-9,
            "expected perimeter 40, got {}",
            result.best_length
        );
        assert!(is_perimeter(&result.best_tour), "{:?}", result.best_tour);
        assert_eq!(result.generations, 50);
        assert!(!result.cancelled);
        assert_eq!(result.degenerate_selections, 0);
    }

    #[test]
    fn test_single_ant_single_generation_three_cities() {
        let cities = vec![City::new(0.0, 0.0), City::new(6.0, 0.0), City::new(0.0, 8.0)];
        let config = AcoConfig::default()
            .with_num_ants(1)
            .with_max_generations(1)
            .with_seed(7);

        let result = AcoRunner::run(&cities, &config).unwrap();

        assert!(is_permutation(&result.best_tour, 3));
        let t = &result.best_tour;
        let edges = cities[t[0]].distance_to(&cities[t[1]])
            + cities[t[1]].distance_to(&cities[t[2]])
            + cities[t[2]].distance_to(&cities[t[0]]);
        assert!((result.best_length - edges).abs() < 1e-12);
        assert!((result.best_length - 24.0).abs() < 1e-12);
        assert_eq!(result.best_generation, 1);
    }

    #[test]
    fn test_deterministic_replay() {
        let config = AcoConfig::default()
            .with_num_ants(8)
            .with_max_generations(30)
            .with_seed(1234);
        let (cities, a) = AcoRunner::run_random(20, &config).unwrap();
        let b = AcoRunner::run(&cities, &config);
        let (cities2, c) = AcoRunner::run_random(20, &config).unwrap();

        assert_eq!(cities, cities2);
        assert_eq!(a, c);
        // `run` draws from a fresh RNG, so it differs from `run_random`
        // which consumed draws for city generation first; it must still
        // replay itself.
        assert_eq!(b, AcoRunner::run(&cities, &config));
    }

    #[test]
    fn test_history_non_increasing() {
        let config = AcoConfig::default()
            .with_num_ants(5)
            .with_max_generations(60)
            .with_seed(3);
        let (_, result) = AcoRunner::run_random(25, &config).unwrap();

        assert_eq!(result.length_history.len(), 60);
        for w in result.length_history.windows(2) {
            assert!(w[1] <= w[0], "history increased: {} > {}", w[1], w[0]);
        }
        assert_eq!(*result.length_history.last().unwrap(), result.best_length);
        assert_eq!(
            result.length_history[result.best_generation - 1],
            result.best_length
        );
    }

    #[test]
    fn test_random_cities_within_extent() {
        let config = AcoConfig::default()
            .with_max_extent(10.0)
            .with_max_generations(2)
            .with_seed(8);
        let (cities, result) = AcoRunner::run_random(7, &config).unwrap();
        assert_eq!(cities.len(), 7);
        assert!(cities
            .iter()
            .all(|c| (0.0..10.0).contains(&c.x) && (0.0..10.0).contains(&c.y)));
        assert!(is_permutation(&result.best_tour, 7));
        assert_eq!(result.pheromones.len(), 7);
    }

    #[test]
    fn test_pheromones_positive_after_run() {
        let config = AcoConfig::default()
            .with_evaporation_rate(0.9)
            .with_max_generations(200)
            .with_seed(5);
        let (_, result) = AcoRunner::run_random(10, &config).unwrap();
        assert!(result.pheromones.edges().all(|(_, _, level)| level > 0.0));
    }

    #[test]
    fn test_observer_called_each_generation() {
        let config = AcoConfig::default().with_max_generations(10).with_seed(2);
        let mut reports = Vec::new();
        let mut observer = |r: &GenerationReport| reports.push(*r);
        let result = AcoRunner::run_observed(&square(), &config, &mut observer).unwrap();

        assert_eq!(reports.len(), 10);
        for (i, r) in reports.iter().enumerate() {
            assert_eq!(r.generation, i + 1);
            assert!(r.best_length <= r.generation_best);
            assert_eq!(r.best_length, result.length_history[i]);
        }
    }

    #[test]
    fn test_injected_rng() {
        let config = AcoConfig::default().with_max_generations(15);
        let a = AcoRunner::run_with(
            &square(),
            &config,
            &mut StdRng::seed_from_u64(77),
            &mut NoopObserver,
            None,
        )
        .unwrap();
        let b = AcoRunner::run_with(
            &square(),
            &config,
            &mut StdRng::seed_from_u64(77),
            &mut NoopObserver,
            None,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cancellation() {
        let config = AcoConfig::default().with_seed(42);
        // Set before running so cancellation is deterministic.
        let cancel = Arc::new(AtomicBool::new(true));

        let result = AcoRunner::run_with_cancel(&square(), &config, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert!(result.best_tour.is_empty());
        assert!(result.best_length.is_infinite());
    }

    #[test]
    fn test_cancel_from_observer() {
        let config = AcoConfig::default().with_max_generations(100).with_seed(4);
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let mut stop_after_five = |r: &GenerationReport| {
            if r.generation == 5 {
                flag.store(true, Ordering::Relaxed);
            }
        };
        let result = AcoRunner::run_with(
            &square(),
            &config,
            &mut StdRng::seed_from_u64(4),
            &mut stop_after_five,
            Some(cancel),
        )
        .unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 5);
        assert!(is_permutation(&result.best_tour, 4));
    }

    #[test]
    fn test_degenerate_selections_reported() {
        // Passes validation, but alpha = 10 underflows every pheromone term.
        let config = AcoConfig::default()
            .with_alpha(10.0)
            .with_initial_pheromone(1e-300)
            .with_pheromone_floor(1e-300)
            .with_max_generations(3)
            .with_seed(1);
        assert!(config.validate().is_ok());

        let mut reports = Vec::new();
        let mut observer = |r: &GenerationReport| reports.push(*r);
        let result = AcoRunner::run_observed(&square(), &config, &mut observer).unwrap();

        // 5 ants, 3 fallback steps each, 3 generations
        assert_eq!(result.degenerate_selections, 45);
        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|r| r.degenerate_selections == 15));
        assert_eq!(
            reports.iter().map(|r| r.degenerate_selections).sum::<usize>(),
            result.degenerate_selections
        );

        assert!(
            result.best_tour.is_empty() || is_permutation(&result.best_tour, 4),
            "best tour {:?} is not a permutation",
            result.best_tour
        );
        assert!(result.best_tour.is_empty());
        assert!(result.best_length.is_infinite());
        assert_eq!(result.best_generation, 0);
        assert_eq!(result.generations, 3);
    }

    #[test]
    fn test_rejects_too_few_cities() {
        let err = AcoRunner::run(&[City::new(0.0, 0.0)], &AcoConfig::default()).unwrap_err();
        assert_eq!(err, AcoError::TooFewCities { count: 1 });
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = AcoConfig::default().with_evaporation_rate(-0.1);
        assert_eq!(
            AcoRunner::run(&square(), &config).unwrap_err(),
            AcoError::InvalidEvaporationRate(-0.1)
        );
        assert_eq!(
            AcoRunner::run_random(5, &AcoConfig::default().with_num_ants(0)).unwrap_err(),
            AcoError::InvalidPopulation
        );
    }

    #[test]
    fn test_rejects_coincident_cities() {
        let mut cities = square();
        cities.push(City::new(10.0, 10.0));
        assert_eq!(
            AcoRunner::run(&cities, &AcoConfig::default()).unwrap_err(),
            AcoError::CoincidentCities {
                first: 2,
                second: 4
            }
        );
    }

    #[test]
    fn test_two_cities() {
        let cities = vec![City::new(0.0, 0.0), City::new(3.0, 4.0)];
        let config = AcoConfig::default().with_max_generations(3).with_seed(0);
        let result = AcoRunner::run(&cities, &config).unwrap();
        assert!((result.best_length - 10.0).abs() < 1e-12);
        assert!(is_permutation(&result.best_tour, 2));
    }
}
