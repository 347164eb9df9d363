//! Genetic operators for the compressed-permutation encoding.
//!
//! Because every gene is an index into the *remaining* roster, any gene
//! vector decodes to a valid tour. That lets the operators work gene by
//! gene without repair steps:
//!
//! - [`initialize`]: random individuals drawn uniformly over permutations
//! - [`cross`] / [`pair_cross`]: one-point crossover at the midpoint
//! - [`mutate`] / [`mutate_population`]: replace one gene with a uniform value
//!
//! All operators clone; parents are never modified.

use super::types::Individual;
use rand::Rng;

// ============================================================================
// Initialization
// ============================================================================

/// Creates `size` random individuals of `individual_length` genes.
///
/// Gene `j` is drawn uniformly from `[0, individual_length - j]`, the
/// number of roster entries still available at decode step `j`. This
/// samples tours uniformly without producing genes that only ever clamp.
pub fn initialize<R: Rng>(size: usize, individual_length: usize, rng: &mut R) -> Vec<Individual> {
    (0..size)
        .map(|_| random_individual(individual_length, rng))
        .collect()
}

/// Creates one random individual (see [`initialize`]).
pub fn random_individual<R: Rng>(individual_length: usize, rng: &mut R) -> Individual {
    let genes = (0..individual_length)
        .map(|j| rng.random_range(0..=individual_length - j))
        .collect();
    Individual::new(genes)
}

// ============================================================================
// Crossover
// ============================================================================

/// One-point crossover at `len / 2`.
///
/// `child1` takes the first half of `parent1` and the second half of
/// `parent2`; `child2` the reverse. For odd lengths the first half is the
/// shorter one.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn cross(parent1: &Individual, parent2: &Individual) -> (Individual, Individual) {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    let split = parent1.len() / 2;
    let (head1, tail1) = parent1.genes().split_at(split);
    let (head2, tail2) = parent2.genes().split_at(split);

    let child1 = Individual::new([head1, tail2].concat());
    let child2 = Individual::new([head2, tail1].concat());
    (child1, child2)
}

/// Recombines a whole population.
///
/// Parent pairs are drawn uniformly with replacement from all of
/// `population` and both children are kept. When the population size is
/// odd the final pair overshoots by one, and a uniformly chosen child is
/// dropped so the output matches the input size.
pub fn pair_cross<R: Rng>(population: &[Individual], rng: &mut R) -> Vec<Individual> {
    let n = population.len();
    let mut offspring = Vec::with_capacity(n + 1);
    if n == 0 {
        return offspring;
    }

    while offspring.len() < n {
        let p1 = &population[rng.random_range(0..n)];
        let p2 = &population[rng.random_range(0..n)];
        let (c1, c2) = cross(p1, p2);
        offspring.push(c1);
        offspring.push(c2);
    }

    if offspring.len() > n {
        let idx = rng.random_range(0..offspring.len());
        offspring.remove(idx);
    }
    offspring
}

// ============================================================================
// Mutation
// ============================================================================

/// With probability `probability`, replaces one uniformly chosen gene with
/// a value uniform in `[0, roster_size - 1]`.
///
/// Individuals without genes are returned unchanged.
///
/// # Panics
/// Panics if `probability` is NaN or outside `[0, 1]` and the individual
/// has genes. [`GaConfig::validate`](crate::ga::GaConfig::validate) rejects
/// such probabilities before a run starts.
pub fn mutate<R: Rng>(
    mut individual: Individual,
    roster_size: usize,
    probability: f64,
    rng: &mut R,
) -> Individual {
    if individual.is_empty() || roster_size == 0 || !rng.random_bool(probability) {
        return individual;
    }
    let pos = rng.random_range(0..individual.len());
    individual.genes_mut()[pos] = rng.random_range(0..roster_size);
    individual
}

/// Applies [`mutate`] independently to every individual.
///
/// # Panics
/// Same conditions as [`mutate`].
pub fn mutate_population<R: Rng>(
    population: Vec<Individual>,
    roster_size: usize,
    probability: f64,
    rng: &mut R,
) -> Vec<Individual> {
    population
        .into_iter()
        .map(|ind| mutate(ind, roster_size, probability, rng))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
