//! Tournament selection.
//!
//! Builds the intermediate population that feeds crossover. Each slot is
//! filled by the best of `k` contenders drawn uniformly **with
//! replacement**, so strong individuals may appear many times and weak
//! ones not at all.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Individual;
use rand::Rng;

/// Selects `population.len()` individuals by tournament.
///
/// Contenders are compared through `fitness`, the cached cost of each
/// individual (lower wins).
///
/// # Panics
/// Panics if `population` is empty, if `fitness` has a different length,
/// or if `k` is zero. [`GaConfig::validate`](super::GaConfig::validate)
/// rules these out before a run.
pub fn select<R: Rng>(
    population: &[Individual],
    fitness: &[f64],
    k: usize,
    rng: &mut R,
) -> Vec<Individual> {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    assert_eq!(
        population.len(),
        fitness.len(),
        "population and fitness list must have equal length"
    );
    assert!(k > 0, "tournament size must be at least 1");

    (0..population.len())
        .map(|_| population[tournament(fitness, k, rng)].clone())
        .collect()
}

/// Runs one tournament of size `k` and returns the winner's index.
///
/// Ties go to the contender drawn first.
pub fn tournament<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    let n = fitness.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if fitness[idx] < fitness[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}
