//! Genetic algorithm for the Traveling Salesman Problem.
//!
//! Searches for a low-cost cycle that leaves a fixed start location,
//! visits every other location once, and returns. Candidate tours are
//! encoded as *compressed permutations*: each gene indexes into the list
//! of locations not yet visited, so every gene vector decodes to a valid
//! tour and the operators never need repair.
//!
//! - [`tour`]: cost tables, the location roster, decoding and tour cost
//! - [`ga`]: configuration, genetic operators, and the generation loop
//!
//! # Example
//!
//! ```
//! use tsp_ga::ga::{GaConfig, GaRunner, NoopObserver};
//! use tsp_ga::tour::CostTable;
//!
//! let mut table = CostTable::new();
//! table.insert_symmetric("depot", "a", 2.0);
//! table.insert_symmetric("depot", "b", 3.0);
//! table.insert_symmetric("a", "b", 4.0);
//!
//! let config = GaConfig::new("depot").with_population_size(8).with_seed(3);
//! let result = GaRunner::new(&table, config)?.run(&mut NoopObserver);
//! assert_eq!(result.best_fitness, 9.0);
//! # Ok::<(), tsp_ga::Error>(())
//! ```

mod error;
pub mod ga;
pub mod tour;

pub use error::{Error, Result};
