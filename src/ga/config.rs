//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{Error, Result};

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use tsp_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, Some(500));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_ga::ga::GaConfig;
///
/// let config = GaConfig::new("AMS")
///     .with_population_size(200)
///     .with_tournament_size(5)
///     .with_mutation_probability(0.2)
///     .with_fitness_threshold(1500.0)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals in every generation. Must be at least 1.
    pub population_size: usize,

    /// Tournament arena size `K`: contenders drawn per selected individual.
    ///
    /// Must satisfy `1 <= K <= population_size`. Higher `K` means
    /// stronger selection pressure.
    pub tournament_size: usize,

    /// Per-individual probability of replacing one gene (0.0–1.0).
    pub mutation_probability: f64,

    /// The run stops once a generation's best fitness is strictly below
    /// this value.
    ///
    /// The default of negative infinity never triggers, leaving
    /// `max_generations` as the only stop condition.
    pub fitness_threshold: f64,

    /// The fixed first and last location of every tour.
    pub start_location: String,

    /// Maximum number of evaluated generations.
    ///
    /// `None` runs until the threshold is met, which may never happen.
    pub max_generations: Option<usize>,

    /// Whether to evaluate individuals in parallel.
    ///
    /// Only takes effect with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from system entropy.
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked once per generation, after evaluation.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            tournament_size: 3,
            mutation_probability: 0.1,
            fitness_threshold: f64::NEG_INFINITY,
            start_location: String::new(),
            max_generations: Some(500),
            parallel: false,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Default configuration with the given start location.
    pub fn new(start_location: impl Into<String>) -> Self {
        Self {
            start_location: start_location.into(),
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the tournament arena size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the mutation probability, clamped to `[0, 1]`.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the fitness threshold.
    pub fn with_fitness_threshold(mut self, threshold: f64) -> Self {
        self.fitness_threshold = threshold;
        self
    }

    /// Sets the start location.
    pub fn with_start_location(mut self, start: impl Into<String>) -> Self {
        self.start_location = start.into();
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Removes the generation cap.
    pub fn without_generation_limit(mut self) -> Self {
        self.max_generations = None;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    ///
    /// Numeric parameters are checked here once so the generation loop
    /// never has to.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Error::InvalidConfig(msg.into()));

        if self.population_size == 0 {
            return invalid("population_size must be at least 1");
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1");
        }
        if self.tournament_size > self.population_size {
            return Err(Error::InvalidConfig(format!(
                "tournament_size ({}) must not exceed population_size ({})",
                self.tournament_size, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return invalid("mutation_probability must be within [0, 1]");
        }
        if self.fitness_threshold.is_nan() {
            return invalid("fitness_threshold must not be NaN");
        }
        if self.start_location.is_empty() {
            return invalid("start_location must be set");
        }
        if self.max_generations == Some(0) {
            return invalid("max_generations must be at least 1 or None");
        }
        if self.time_limit_ms == Some(0) {
            return invalid("time_limit_ms must be positive or None");
        }
        Ok(())
    }
}
