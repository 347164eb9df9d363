//! Directional cost table between named locations.
//!
//! [`CostTable`] is the loaded form of a distance matrix. It can be built
//! programmatically with [`CostTable::insert`] or read from the
//! whitespace-delimited matrix text format with [`CostTable::parse`]:
//!
//! ```text
//! from to  A  B  C
//! A        0  4  7
//! B        4  0  2
//! C        7  2  0
//! ```
//!
//! Location names start at the third token of the header. Each following
//! line starts with a location name and lists its costs to every header
//! location, in header order.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// Mapping from ordered `(from, to)` location pairs to a travel cost.
///
/// Lookups are directional, so asymmetric tables are supported.
#[derive(Debug, Clone, Default)]
pub struct CostTable {
    locations: Vec<String>,
    costs: HashMap<String, HashMap<String, f64>>,
}

impl CostTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a location without adding any costs.
    ///
    /// Returns `false` if the location was already known.
    pub fn add_location(&mut self, name: &str) -> bool {
        if self.costs.contains_key(name) {
            return false;
        }
        self.locations.push(name.to_owned());
        self.costs.insert(name.to_owned(), HashMap::new());
        true
    }

    /// Sets the cost of travelling from `from` to `to`.
    ///
    /// Both locations are registered if they are not known yet.
    /// Costs are validated later, when an [`Instance`](super::Instance)
    /// is built from the table.
    pub fn insert(&mut self, from: &str, to: &str, cost: f64) {
        self.add_location(from);
        self.add_location(to);
        if let Some(row) = self.costs.get_mut(from) {
            row.insert(to.to_owned(), cost);
        }
    }

    /// Convenience for symmetric tables: sets both directions.
    pub fn insert_symmetric(&mut self, a: &str, b: &str, cost: f64) {
        self.insert(a, b, cost);
        self.insert(b, a, cost);
    }

    /// Returns the cost from `from` to `to`, if present.
    pub fn get(&self, from: &str, to: &str) -> Option<f64> {
        self.costs.get(from)?.get(to).copied()
    }

    /// Like [`get`](Self::get) but reports a missing entry as an error.
    pub fn require(&self, from: &str, to: &str) -> Result<f64> {
        self.get(from, to).ok_or_else(|| Error::MissingCost {
            from: from.to_owned(),
            to: to.to_owned(),
        })
    }

    /// All known locations, in insertion order.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Returns `true` if `name` is a known location.
    pub fn contains(&self, name: &str) -> bool {
        self.costs.contains_key(name)
    }

    /// Number of known locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if the table has no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Parses the matrix text format described in the module docs.
    ///
    /// Blank lines are skipped. Row `i` must be labeled with header
    /// location `i`. Tables with fewer rows than header locations are
    /// accepted here; the missing entries surface as
    /// [`Error::MissingCost`] when an instance is built.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) = lines.next().ok_or(Error::Parse {
            line: 1,
            message: "matrix is empty".into(),
        })?;

        let names: Vec<&str> = header.split_whitespace().skip(2).collect();
        if names.is_empty() {
            return Err(Error::Parse {
                line: header_line,
                message: "header lists no locations (names start at the third token)".into(),
            });
        }

        let mut table = CostTable::new();
        for name in &names {
            if !table.add_location(name) {
                return Err(Error::Parse {
                    line: header_line,
                    message: format!("duplicate location `{name}` in header"),
                });
            }
        }

        for (row, (line_no, line)) in lines.enumerate() {
            let mut tokens = line.split_whitespace();
            let label = tokens.next().unwrap_or_default();

            let expected = names.get(row).ok_or_else(|| Error::Parse {
                line: line_no,
                message: format!("more rows than the {} header locations", names.len()),
            })?;
            if label != *expected {
                return Err(Error::Parse {
                    line: line_no,
                    message: format!("row labeled `{label}`, expected `{expected}`"),
                });
            }

            let values: Vec<&str> = tokens.collect();
            if values.len() != names.len() {
                return Err(Error::Parse {
                    line: line_no,
                    message: format!(
                        "expected {} costs for `{label}`, found {}",
                        names.len(),
                        values.len()
                    ),
                });
            }

            for (to, token) in names.iter().zip(values) {
                let cost: f64 = token.parse().map_err(|_| Error::Parse {
                    line: line_no,
                    message: format!("invalid cost `{token}` from `{label}` to `{to}`"),
                })?;
                table.insert(label, to, cost);
            }
        }

        Ok(table)
    }

    /// Reads and parses a matrix file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

impl FromStr for CostTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATRIX: &str = "\
from to A B C
A 0 4 7
B 4 0 2
C 7 2 0
";

    #[test]
    fn test_parse_matrix() {
        let table = CostTable::parse(MATRIX).unwrap();
        assert_eq!(table.locations(), &["A", "B", "C"]);
        assert_eq!(table.get("A", "B"), Some(4.0));
        assert_eq!(table.get("C", "B"), Some(2.0));
        assert_eq!(table.get("B", "B"), Some(0.0));
        assert_eq!(table.get("A", "D"), None);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_extra_spaces() {
        let text = "\n  x  y   A    B\n\nA   0   1.5\nB 1.5 0\n\n";
        let table = CostTable::parse(text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("A", "B"), Some(1.5));
    }

    #[test]
    fn test_parse_partial_matrix() {
        let table = CostTable::parse("from to A B\nA 0 3\n").unwrap();
        assert_eq!(table.get("A", "B"), Some(3.0));
        assert!(table.require("B", "A").is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            CostTable::parse("   \n"),
            Err(Error::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_header_without_names() {
        assert!(matches!(
            CostTable::parse("from to\n"),
            Err(Error::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_wrong_row_label() {
        let err = CostTable::parse("from to A B\nB 0 1\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_parse_wrong_cost_count() {
        let err = CostTable::parse("from to A B\nA 0\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_parse_bad_number() {
        let err = CostTable::parse("from to A B\nA 0 far\n").unwrap_err();
        assert!(err.to_string().contains("far"), "{err}");
    }

    #[test]
    fn test_parse_too_many_rows() {
        let err = CostTable::parse("from to A\nA 0\nB 1\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_parse_duplicate_header() {
        assert!(CostTable::parse("from to A A\n").is_err());
    }

    #[test]
    fn test_insert_is_directional() {
        let mut table = CostTable::new();
        table.insert("A", "B", 1.0);
        assert_eq!(table.get("A", "B"), Some(1.0));
        assert_eq!(table.get("B", "A"), None);
        table.insert_symmetric("B", "C", 2.0);
        assert_eq!(table.get("C", "B"), Some(2.0));
        assert_eq!(table.locations(), &["A", "B", "C"]);
    }

    #[test]
    fn test_require_reports_pair() {
        let table = CostTable::new();
        match table.require("X", "Y") {
            Err(Error::MissingCost { from, to }) => {
                assert_eq!(from, "X");
                assert_eq!(to, "Y");
            }
            other => panic!("expected MissingCost, got {other:?}"),
        }
    }

    #[test]
    fn test_bundled_matrix() {
        let table = CostTable::parse(include_str!("../../data/distances.txt")).unwrap();
        assert_eq!(table.len(), 8);
        assert_eq!(table.locations()[0], "AMS");
        for a in table.locations() {
            assert_eq!(table.get(a, a), Some(0.0));
            for b in table.locations() {
                assert_eq!(table.get(a, b), table.get(b, a), "{a} <-> {b}");
            }
        }
    }

    #[test]
    fn test_from_str() {
        let table: CostTable = MATRIX.parse().unwrap();
        assert!(table.contains("C"));
    }
}
