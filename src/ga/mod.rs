//! Genetic algorithm over compressed-permutation tours.
//!
//! A generational GA with a fixed operator set: tournament selection,
//! midpoint one-point crossover, and single-gene uniform replacement
//! mutation. The population is replaced wholesale every generation.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, tournament size,
//!   mutation probability, stop conditions)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best tour found, its cost, and run statistics
//! - [`Observer`]: Progress hook called on every improvement
//!
//! # Submodules
//!
//! - [`operators`]: Initialization, crossover, and mutation
//! - [`selection`]: Tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Grefenstette et al. (1985), "Genetic Algorithms for the Traveling Salesman Problem"

mod config;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner, Termination};
pub use types::{Individual, NoopObserver, Observer, TracingObserver};
