//! Problem side of the engine: locations, costs, and tour decoding.
//!
//! - [`CostTable`]: directional `(from, to)` costs, with a reader for the
//!   whitespace-delimited matrix format
//! - [`Roster`]: the ordered non-start locations that gene indices refer to
//! - [`Instance`]: a validated start + roster + dense cost matrix used by
//!   the generation loop
//! - [`decode`] / [`evaluate`]: the compressed-permutation decoding rule
//!   and the cyclic tour cost

mod cost_table;
mod instance;

pub use cost_table::CostTable;
pub use instance::{decode, evaluate, Instance, Roster};
