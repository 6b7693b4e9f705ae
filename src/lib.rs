//! Ant Colony Optimization for the Traveling Salesman Problem.
//!
//! Provides an Ant System solver for Euclidean TSP instances:
//!
//! - **Distance table**: pairwise Euclidean distances, computed once.
//! - **Pheromone matrix**: symmetric trail levels with evaporation and
//!   length-weighted reinforcement.
//! - **Ants**: roulette-wheel tour construction over unvisited cities.
//! - **Colony**: one generation of construction followed by a single
//!   pheromone update.
//! - **Runner**: the generation loop, best-tour tracking, cancellation,
//!   and per-generation observation.
//!
//! # Architecture
//!
//! The solver is a pure library: it takes coordinates and an immutable
//! [`aco::AcoConfig`] and returns an [`aco::AcoResult`] holding the best
//! tour and the final pheromone matrix. Input collection and rendering are
//! left to consumers. All randomness flows through an explicit RNG, so a
//! fixed seed replays a run exactly.

pub mod aco;
