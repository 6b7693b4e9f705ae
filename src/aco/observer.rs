//! Per-generation progress reporting.

/// Snapshot passed to a [`GenerationObserver`] after each generation's
/// pheromone update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    /// 1-based generation index.
    pub generation: usize,
    /// Shortest tour length constructed in this generation.
    pub generation_best: f64,
    /// Shortest tour length found so far in the run.
    pub best_length: f64,
    /// Fallback selection steps taken by this generation's ants.
    pub degenerate_selections: usize,
}

/// Receives a [`GenerationReport`] after every generation.
///
/// Implemented for any `FnMut(&GenerationReport)`, so a closure can be
/// passed directly:
///
/// ```
/// use u_aco::aco::{AcoConfig, AcoRunner, City, GenerationReport};
///
/// let cities = vec![City::new(0.0, 0.0), City::new(1.0, 0.0), City::new(0.0, 1.0)];
/// let config = AcoConfig::default().with_max_generations(3).with_seed(1);
/// let mut seen = Vec::new();
/// let mut record = |r: &GenerationReport| seen.push(r.generation);
/// AcoRunner::run_observed(&cities, &config, &mut record).unwrap();
/// assert_eq!(seen, vec![1, 2, 3]);
/// ```
pub trait GenerationObserver {
    /// Called once per completed generation.
    fn on_generation(&mut self, report: &GenerationReport);
}

impl<F: FnMut(&GenerationReport)> GenerationObserver for F {
    fn on_generation(&mut self, report: &GenerationReport) {
        self(report)
    }
}

/// Observer that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {
    fn on_generation(&mut self, _report: &GenerationReport) {}
}
