//! Core types shared by the GA operators and the runner.
//!
//! [`Individual`] is the encoded candidate tour; [`Observer`] is the hook
//! through which the generation loop reports progress.

/// An encoded candidate tour.
///
/// Holds `R = roster size - 1` gene indices forming a compressed
/// permutation (see [`crate::tour::decode`]). Gene values are not bounded
/// at creation time; decoding clamps them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    genes: Vec<usize>,
}

impl Individual {
    /// Wraps a gene vector.
    pub fn new(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    /// The genes, in decode order.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the individual has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub(crate) fn genes_mut(&mut self) -> &mut [usize] {
        &mut self.genes
    }

    /// Consumes the individual, returning its genes.
    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }
}

impl From<Vec<usize>> for Individual {
    fn from(genes: Vec<usize>) -> Self {
        Self::new(genes)
    }
}

/// Receives progress from the generation loop.
///
/// Closures `FnMut(usize, f64)` implement this trait and are called on
/// every improvement.
///
/// # Examples
///
/// ```
/// use tsp_ga::ga::Observer;
///
/// let mut improvements = Vec::new();
/// let mut observer = |generation: usize, fitness: f64| improvements.push((generation, fitness));
/// observer.on_improvement(3, 42.0);
/// assert_eq!(improvements, vec![(3, 42.0)]);
/// ```
pub trait Observer {
    /// Called when a generation's best fitness is strictly lower than
    /// every fitness seen before it.
    fn on_improvement(&mut self, generation: usize, best_fitness: f64);

    /// Called once per evaluated generation with that generation's best.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&mut self, _generation: usize, _current_best: f64) {}
}

impl<F: FnMut(usize, f64)> Observer for F {
    fn on_improvement(&mut self, generation: usize, best_fitness: f64) {
        self(generation, best_fitness)
    }
}

/// Observer that ignores all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_improvement(&mut self, _generation: usize, _best_fitness: f64) {}
}

/// Observer that reports improvements through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_improvement(&mut self, generation: usize, best_fitness: f64) {
        tracing::info!(generation, best_fitness, "new best tour");
    }

    fn on_generation(&mut self, generation: usize, current_best: f64) {
        tracing::trace!(generation, current_best, "generation evaluated");
    }
}
