//! Roster, decoding and tour cost.
//!
//! An [`Individual`] is a *compressed permutation*: gene `j` is an index
//! into the list of roster locations that have not been visited yet.
//! Decoding keeps a working copy of the roster and, for each gene, removes
//! the entry at `min(gene, remaining - 1)` and appends it to the tour. The
//! one location left after all genes are consumed closes the tour. Clamping
//! means any gene value decodes to a valid permutation.

use super::cost_table::CostTable;
use crate::error::{Error, Result};
use crate::ga::Individual;

/// The non-start locations, in a fixed lexicographic order.
///
/// The order defines what a gene index means for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    locations: Vec<String>,
}

impl Roster {
    /// Builds a roster from `locations`, excluding `start`.
    ///
    /// Locations are sorted and deduplicated.
    pub fn new<I, S>(locations: I, start: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut locations: Vec<String> = locations
            .into_iter()
            .map(Into::into)
            .filter(|name| name != start)
            .collect();
        locations.sort();
        locations.dedup();
        Self { locations }
    }

    /// Number of roster locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of genes an individual needs for this roster.
    pub fn individual_length(&self) -> usize {
        self.locations.len().saturating_sub(1)
    }

    /// Location at roster position `idx`.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.locations.get(idx).map(String::as_str)
    }

    /// Roster locations in order.
    pub fn as_slice(&self) -> &[String] {
        &self.locations
    }
}

/// Decodes `genes` into a visiting order of roster positions `0..roster_len`.
///
/// Every position appears exactly once in the result. Genes past the
/// point where a single location remains are ignored; if there are too
/// few genes, the unvisited locations follow in roster order.
pub fn decode(genes: &[usize], roster_len: usize) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..roster_len).collect();
    let mut tour = Vec::with_capacity(roster_len);

    for &gene in genes {
        if remaining.len() <= 1 {
            break;
        }
        let idx = gene.min(remaining.len() - 1);
        tour.push(remaining.remove(idx));
    }
    tour.extend(remaining);
    tour
}

/// Computes the full cyclic cost of `individual` straight from a cost table.
///
/// The tour starts and ends at `start`. Returns [`Error::MissingCost`] if
/// the decoded path needs a pair the table does not define. The generation
/// loop uses the pre-validated [`Instance::evaluate`] instead.
pub fn evaluate(
    individual: &Individual,
    start: &str,
    roster: &Roster,
    table: &CostTable,
) -> Result<f64> {
    let mut total = 0.0;
    let mut prev = start;
    for pos in decode(individual.genes(), roster.len()) {
        let next = roster.as_slice()[pos].as_str();
        total += table.require(prev, next)?;
        prev = next;
    }
    total += table.require(prev, start)?;
    Ok(total)
}

/// A validated problem: start location, roster, and a dense cost matrix.
///
/// Node `0` is the start location and node `i + 1` is roster position `i`.
/// Every pair between distinct nodes is checked when the instance is
/// built, so evaluation in the hot loop cannot fail.
#[derive(Debug, Clone)]
pub struct Instance {
    start: String,
    roster: Roster,
    costs: Vec<f64>,
    nodes: usize,
}

impl Instance {
    /// Builds an instance from `table` with `start` as the fixed endpoint.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownStart`] if `start` is not in the table
    /// - [`Error::EmptyRoster`] if the table has no other location
    /// - [`Error::MissingCost`] if any pair between distinct locations is absent
    /// - [`Error::InvalidCost`] if a cost is negative, NaN or infinite
    pub fn new(table: &CostTable, start: &str) -> Result<Self> {
        if !table.contains(start) {
            return Err(Error::UnknownStart(start.to_owned()));
        }
        let roster = Roster::new(table.locations().iter().cloned(), start);
        if roster.is_empty() {
            return Err(Error::EmptyRoster);
        }

        let names: Vec<&str> = std::iter::once(start)
            .chain(roster.as_slice().iter().map(String::as_str))
            .collect();
        let nodes = names.len();
        let mut costs = vec![0.0; nodes * nodes];

        for (i, from) in names.iter().enumerate() {
            for (j, to) in names.iter().enumerate() {
                if i == j {
                    continue;
                }
                let cost = table.require(from, to)?;
                if !cost.is_finite() || cost < 0.0 {
                    return Err(Error::InvalidCost {
                        from: (*from).to_owned(),
                        to: (*to).to_owned(),
                        cost,
                    });
                }
                costs[i * nodes + j] = cost;
            }
        }

        Ok(Self {
            start: start.to_owned(),
            roster,
            costs,
            nodes,
        })
    }

    /// The fixed start (and end) location.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The roster of non-start locations.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Number of genes per individual.
    pub fn individual_length(&self) -> usize {
        self.roster.individual_length()
    }

    #[inline]
    fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs[from * self.nodes + to]
    }

    /// Decodes `individual` into location names, start excluded.
    pub fn decode(&self, individual: &Individual) -> Vec<&str> {
        decode(individual.genes(), self.roster.len())
            .into_iter()
            .map(|pos| self.roster.as_slice()[pos].as_str())
            .collect()
    }

    /// Total cost of the cycle `start → tour… → start`.
    pub fn evaluate(&self, individual: &Individual) -> f64 {
        let mut total = 0.0;
        let mut prev = 0;
        for pos in decode(individual.genes(), self.roster.len()) {
            let node = pos + 1;
            total += self.cost(prev, node);
            prev = node;
        }
        total + self.cost(prev, 0)
    }
}
