//! ACO configuration.
//!
//! [`AcoConfig`] holds the algorithm constants and run controls. It is a
//! plain value: the runner never mutates it, and two runs with the same
//! config and seed behave identically.

use super::error::AcoError;

/// Configuration for the Ant Colony Optimization runner.
///
/// # Defaults
///
/// ```
/// use u_aco::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.num_ants, 5);
/// assert!((config.beta - 2.0).abs() < 1e-12);
/// assert!((config.q - 100.0).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_aco::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_num_ants(20)
///     .with_max_generations(200)
///     .with_evaporation_rate(0.3)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Exponent on the pheromone level in the selection score.
    pub alpha: f64,

    /// Exponent on the inverse distance in the selection score.
    ///
    /// Higher values make ants greedier.
    pub beta: f64,

    /// Fraction of pheromone removed from every edge each generation (0.0–1.0).
    pub evaporation_rate: f64,

    /// Deposit constant. A tour of length `L` adds `q / L` to each of its edges.
    pub q: f64,

    /// Pheromone level of every edge before the first generation.
    pub initial_pheromone: f64,

    /// Number of ants constructing a tour each generation.
    pub num_ants: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Side length of the square `[0, max_extent)^2` used when cities are
    /// generated randomly.
    pub max_extent: f64,

    /// Lower bound applied to pheromone levels after evaporation.
    ///
    /// Keeps every level strictly positive even with `evaporation_rate = 1.0`
    /// or after long runs that would otherwise underflow to zero.
    pub pheromone_floor: f64,

    /// Whether to construct tours in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature. Results are identical
    /// either way for a given seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.5,
            q: 100.0,
            initial_pheromone: 1.0,
            num_ants: 5,
            max_generations: 100,
            max_extent: 1000.0,
            pheromone_floor: 1e-12,
            parallel: false,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the distance exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    ///
    /// Not clamped: out-of-range values are reported by [`validate`](Self::validate).
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    /// Sets the deposit constant.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Sets the initial pheromone level.
    pub fn with_initial_pheromone(mut self, level: f64) -> Self {
        self.initial_pheromone = level;
        self
    }

    /// Sets the number of ants.
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the extent of the random city square.
    pub fn with_max_extent(mut self, extent: f64) -> Self {
        self.max_extent = extent;
        self
    }

    /// Sets the pheromone floor.
    pub fn with_pheromone_floor(mut self, floor: f64) -> Self {
        self.pheromone_floor = floor;
        self
    }

    /// Enables or disables parallel tour construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// City-set checks happen separately when a run starts.
    pub fn validate(&self) -> Result<(), AcoError> {
        if self.num_ants == 0 {
            return Err(AcoError::InvalidPopulation);
        }
        if self.max_generations == 0 {
            return Err(AcoError::InvalidGenerations);
        }
        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err(AcoError::InvalidEvaporationRate(self.evaporation_rate));
        }
        non_negative("alpha", self.alpha)?;
        non_negative("beta", self.beta)?;
        positive("q", self.q)?;
        positive("initial_pheromone", self.initial_pheromone)?;
        positive("pheromone_floor", self.pheromone_floor)?;
        positive("max_extent", self.max_extent)?;
        if self.pheromone_floor > self.initial_pheromone {
            return Err(AcoError::InvalidParameter {
                name: "pheromone_floor",
                value: self.pheromone_floor,
                reason: "must not exceed initial_pheromone",
            });
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), AcoError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AcoError::InvalidParameter {
            name,
            value,
            reason: "must be non-negative and finite",
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), AcoError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AcoError::InvalidParameter {
            name,
            value,
            reason: "must be positive and finite",
        })
    }
}
