//! Ant Colony Optimization (ACO) for the Euclidean TSP.
//!
//! A population of ants repeatedly builds closed tours, each step chosen
//! with probability proportional to `tau^alpha * (1 / d)^beta`. After every
//! generation the pheromone trail `tau` evaporates by a constant fraction
//! and each tour deposits `Q / length` on its edges, so edges of short tours
//! grow more attractive over time.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*, MIT Press

mod ant;
mod city;
mod colony;
mod config;
mod distance;
mod error;
mod observer;
mod pheromone;
mod runner;

pub use ant::{Ant, Step};
pub use city::{random_cities, City};
pub use colony::{Colony, GenerationOutcome};
pub use config::AcoConfig;
pub use distance::DistanceTable;
pub use error::AcoError;
pub use observer::{GenerationObserver, GenerationReport, NoopObserver};
pub use pheromone::PheromoneMatrix;
pub use runner::{AcoResult, AcoRunner};
