//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives the generational cycle:
//! evaluate → track best → check termination → select → cross → mutate.
//!
//! Each generation produces a fresh population; nothing survives into the
//! next generation except through selection (no elitism). The best-ever
//! individual is tracked separately from the current generation's best:
//! the former drives progress reporting, the latter the threshold check.

use super::config::GaConfig;
use super::operators::{initialize, mutate_population, pair_cross};
use super::selection::select;
use super::types::{Individual, Observer};
use crate::error::Result;
use crate::tour::{CostTable, Instance};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// A generation's best fitness fell below the configured threshold.
    ThresholdReached,
    /// The generation cap was hit without reaching the threshold.
    MaxGenerations,
    /// The wall-clock limit elapsed.
    TimeLimit,
    /// The cancellation flag was set.
    Cancelled,
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best individual seen over the whole run.
    pub best: Individual,

    /// `best` decoded into location names, start excluded.
    pub best_tour: Vec<String>,

    /// Tour cost of `best`.
    pub best_fitness: f64,

    /// Number of generations evaluated (the initial population counts).
    pub generations: usize,

    /// Why the run stopped.
    pub termination: Termination,

    /// Best fitness of each evaluated generation.
    pub fitness_history: Vec<f64>,
}

impl GaResult {
    /// Returns `true` if the run stopped because the threshold was met.
    pub fn reached_threshold(&self) -> bool {
        self.termination == Termination::ThresholdReached
    }
}

/// Executes the GA over a validated problem instance.
///
/// # Usage
///
/// ```
/// use tsp_ga::ga::{GaConfig, GaRunner, NoopObserver};
/// use tsp_ga::tour::CostTable;
///
/// let table: CostTable = "from to S A B\nS 0 1 2\nA 1 0 3\nB 2 3 0\n".parse()?;
/// let config = GaConfig::new("S")
///     .with_population_size(10)
///     .with_max_generations(5)
///     .with_seed(1);
/// let runner = GaRunner::new(&table, config)?;
/// let result = runner.run(&mut NoopObserver);
/// assert_eq!(result.best_fitness, 6.0);
/// # Ok::<(), tsp_ga::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct GaRunner {
    instance: Instance,
    config: GaConfig,
}

impl GaRunner {
    /// Validates `config` and builds the instance from `table`.
    ///
    /// # Errors
    /// Any configuration error from [`GaConfig::validate`] or
    /// [`Instance::new`].
    pub fn new(table: &CostTable, config: GaConfig) -> Result<Self> {
        config.validate()?;
        let instance = Instance::new(table, &config.start_location)?;
        Ok(Self { instance, config })
    }

    /// The validated instance.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The validated configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs with a generator seeded from [`GaConfig::seed`].
    pub fn run<O: Observer>(&self, observer: &mut O) -> GaResult {
        self.run_with_cancel(observer, None)
    }

    /// Like [`run`](Self::run) with an optional cancellation flag.
    ///
    /// Once the flag is set, the run stops after the current generation's
    /// evaluation and returns the best solution found so far.
    pub fn run_with_cancel<O: Observer>(
        &self,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> GaResult {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        self.run_with_rng(&mut rng, observer, cancel)
    }

    /// Runs the generation loop with a caller-supplied random source.
    #[tracing::instrument(skip_all, fields(
        population_size = self.config.population_size,
        roster = self.instance.roster().len(),
    ))]
    pub fn run_with_rng<R: Rng, O: Observer>(
        &self,
        rng: &mut R,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> GaResult {
        let config = &self.config;
        let roster_size = self.instance.roster().len();
        let deadline = config
            .time_limit_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));

        tracing::info!(
            start = self.instance.start(),
            tournament_size = config.tournament_size,
            mutation_probability = config.mutation_probability,
            fitness_threshold = config.fitness_threshold,
            max_generations = ?config.max_generations,
            "starting GA run"
        );

        let mut population = initialize(
            config.population_size,
            self.instance.individual_length(),
            rng,
        );
        let mut fitness = vec![f64::INFINITY; population.len()];
        let mut best = population[0].clone();
        let mut best_fitness = f64::INFINITY;
        let mut fitness_history = Vec::new();
        let mut generation = 0usize;

        let termination = loop {
            // Evaluating
            self.evaluate_population(&population, &mut fitness);
            let (current_idx, current_best) = argmin(&fitness);
            fitness_history.push(current_best);
            observer.on_generation(generation, current_best);

            if current_best < best_fitness {
                best = population[current_idx].clone();
                best_fitness = current_best;
                observer.on_improvement(generation, best_fitness);
            }

            tracing::debug!(generation, current_best, best_fitness, "generation evaluated");

            // Check termination
            if current_best < config.fitness_threshold {
                break Termination::ThresholdReached;
            }
            if config.max_generations.is_some_and(|max| generation + 1 >= max) {
                break Termination::MaxGenerations;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break Termination::TimeLimit;
            }
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                break Termination::Cancelled;
            }

            // Reproducing
            let selected = select(&population, &fitness, config.tournament_size, rng);
            let offspring = pair_cross(&selected, rng);
            population =
                mutate_population(offspring, roster_size, config.mutation_probability, rng);
            generation += 1;
        };

        let generations = generation + 1;
        tracing::info!(?termination, generations, best_fitness, "GA run finished");

        GaResult {
            best_tour: self
                .instance
                .decode(&best)
                .into_iter()
                .map(str::to_owned)
                .collect(),
            best,
            best_fitness,
            generations,
            termination,
            fitness_history,
        }
    }

    /// Writes the cost of `population[i]` into `fitness[i]`.
    fn evaluate_population(&self, population: &[Individual], fitness: &mut [f64]) {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                fitness
                    .par_iter_mut()
                    .zip(population.par_iter())
                    .for_each(|(slot, ind)| *slot = self.instance.evaluate(ind));
                return;
            }
        }

        for (slot, ind) in fitness.iter_mut().zip(population) {
            *slot = self.instance.evaluate(ind);
        }
    }
}

/// Index and value of the lowest fitness; ties go to the lowest index.
fn argmin(fitness: &[f64]) -> (usize, f64) {
    let mut best = (0, fitness[0]);
    for (i, &f) in fitness.iter().enumerate().skip(1) {
        if f < best.1 {
            best = (i, f);
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::NoopObserver;
    use crate::Error;

    /// Four locations on a rectangle: S(0,0) A(3,0) B(3,4) C(0,4).
    /// Optimal tour goes around the perimeter: 3 + 4 + 3 + 4 = 14.
    /// The crossing tours cost 5 + 4 + 5 + 4 = 18 or 3 + 5 + 3 + 5 = 16.
    fn rectangle() -> CostTable {
        let mut t = CostTable::new();
        t.insert_symmetric("S", "A", 3.0);
        t.insert_symmetric("S", "B", 5.0);
        t.insert_symmetric("S", "C", 4.0);
        t.insert_symmetric("A", "B", 4.0);
        t.insert_symmetric("A", "C", 5.0);
        t.insert_symmetric("B", "C", 3.0);
        t
    }

    /// Six points on a circle, listed under shuffled names. Edge cost is
    /// the squared number of steps around the circle.
    fn hexagon() -> CostTable {
        let names = ["S", "D", "B", "E", "A", "C"];
        let mut t = CostTable::new();
        for (i, a) in names.iter().enumerate() {
            for (j, b) in names.iter().enumerate() {
                let d = (i as i64 - j as i64).unsigned_abs() as usize;
                let steps = d.min(names.len() - d);
                t.insert(a, b, (steps * steps) as f64);
            }
        }
        t
    }

    fn config() -> GaConfig {
        GaConfig::new("S")
            .with_population_size(20)
            .with_tournament_size(3)
            .with_mutation_probability(0.2)
            .with_seed(42)
    }

    #[test]
    fn test_rectangle_converges_to_optimum() {
        let runner = GaRunner::new(
            &rectangle(),
            config().with_fitness_threshold(14.5).with_max_generations(200),
        )
        .unwrap();
        let result = runner.run(&mut NoopObserver);

        assert_eq!(result.best_fitness, 14.0);
        assert!(result.reached_threshold());
        assert_eq!(runner.instance().evaluate(&result.best), 14.0);
        assert!(
            result.best_tour == ["A", "B", "C"] || result.best_tour == ["C", "B", "A"],
            "unexpected tour {:?}",
            result.best_tour
        );
    }

    #[test]
    fn test_hexagon_converges() {
        // Walking the circle in order costs 6 * 1 = 6; any shortcut costs more.
        let runner = GaRunner::new(
            &hexagon(),
            config()
                .with_population_size(60)
                .with_fitness_threshold(6.5)
                .with_max_generations(500),
        )
        .unwrap();
        let result = runner.run(&mut NoopObserver);
        assert_eq!(result.best_fitness, 6.0, "stopped after {} generations", result.generations);
    }

    #[test]
    fn test_max_generations_is_normal_termination() {
        let runner = GaRunner::new(
            &rectangle(),
            config().with_fitness_threshold(0.0).with_max_generations(15),
        )
        .unwrap();
        let result = runner.run(&mut NoopObserver);

        assert_eq!(result.termination, Termination::MaxGenerations);
        assert_eq!(result.generations, 15);
        assert_eq!(result.fitness_history.len(), 15);
        assert!(result.best_fitness >= 14.0);
    }

    #[test]
    fn test_threshold_checked_on_initial_generation() {
        let runner = GaRunner::new(&rectangle(), config().with_fitness_threshold(1e9)).unwrap();
        let result = runner.run(&mut NoopObserver);
        assert_eq!(result.termination, Termination::ThresholdReached);
        assert_eq!(result.generations, 1);
    }

    #[test]
    fn test_best_is_global_minimum_of_history() {
        let runner = GaRunner::new(&hexagon(), config().with_max_generations(40)).unwrap();
        let result = runner.run(&mut NoopObserver);
        let min = result
            .fitness_history
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        assert_eq!(result.best_fitness, min);
        assert_eq!(runner.instance().evaluate(&result.best), result.best_fitness);
    }

    #[test]
    fn test_observer_reports_strict_improvements() {
        let runner = GaRunner::new(&hexagon(), config().with_max_generations(60)).unwrap();
        let mut events: Vec<(usize, f64)> = Vec::new();
        let result = runner.run(&mut |generation: usize, fitness: f64| {
            events.push((generation, fitness))
        });

        assert_eq!(events[0].0, 0, "initial generation always improves on infinity");
        for pair in events.windows(2) {
            assert!(pair[1].0 > pair[0].0);
            assert!(pair[1].1 < pair[0].1);
        }
        assert_eq!(events.last().map(|e| e.1), Some(result.best_fitness));
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = GaRunner::new(&hexagon(), config().with_max_generations(30))
            .unwrap()
            .run(&mut NoopObserver);
        let b = GaRunner::new(&hexagon(), config().with_max_generations(30))
            .unwrap()
            .run(&mut NoopObserver);
        assert_eq!(a.best, b.best);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_injected_rng() {
        let runner = GaRunner::new(&hexagon(), config().with_max_generations(10)).unwrap();
        let mut rng1 = StdRng::seed_from_u64(5);
        let mut rng2 = StdRng::seed_from_u64(5);
        let a = runner.run_with_rng(&mut rng1, &mut NoopObserver, None);
        let b = runner.run_with_rng(&mut rng2, &mut NoopObserver, None);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_cancellation() {
        let runner = GaRunner::new(&hexagon(), config().without_generation_limit()).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        let result = runner.run_with_cancel(&mut NoopObserver, Some(cancel));
        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.generations, 1);
    }

    #[test]
    fn test_time_limit() {
        let runner = GaRunner::new(
            &hexagon(),
            config().without_generation_limit().with_time_limit_ms(20),
        )
        .unwrap();
        let result = runner.run(&mut NoopObserver);
        assert_eq!(result.termination, Termination::TimeLimit);
    }

    #[test]
    fn test_single_roster_location() {
        let mut t = CostTable::new();
        t.insert("S", "A", 2.0);
        t.insert("A", "S", 5.0);
        let runner = GaRunner::new(&t, config().with_max_generations(3)).unwrap();
        let result = runner.run(&mut NoopObserver);
        assert_eq!(result.best_fitness, 7.0);
        assert_eq!(result.best_tour, vec!["A".to_string()]);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let err = GaRunner::new(&rectangle(), config().with_tournament_size(21)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = GaRunner::new(&rectangle(), config().with_start_location("Z")).unwrap_err();
        assert!(matches!(err, Error::UnknownStart(_)));
    }

    #[test]
    fn test_new_rejects_incomplete_table() {
        let mut t = rectangle();
        t.add_location("D");
        let err = GaRunner::new(&t, config()).unwrap_err();
        assert!(matches!(err, Error::MissingCost { .. }));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let seq = GaRunner::new(&hexagon(), config().with_max_generations(25))
            .unwrap()
            .run(&mut NoopObserver);
        let par = GaRunner::new(&hexagon(), config().with_max_generations(25).with_parallel(true))
            .unwrap()
            .run(&mut NoopObserver);
        assert_eq!(seq.fitness_history, par.fitness_history);
        assert_eq!(seq.best, par.best);
    }

    #[test]
    fn test_argmin_first_on_ties() {
        assert_eq!(argmin(&[3.0, 1.0, 1.0, 2.0]), (1, 1.0));
        assert_eq!(argmin(&[f64::INFINITY]), (0, f64::INFINITY));
    }
}
