//! Error type shared by the whole crate.

/// Errors raised while building a problem instance or validating a run.
///
/// All of these are configuration errors: they describe malformed input
/// data or parameters and are reported before the generation loop starts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("missing cost from `{from}` to `{to}`")]
    MissingCost { from: String, to: String },
    #[error("invalid cost {cost} from `{from}` to `{to}`: costs must be finite and non-negative")]
    InvalidCost { from: String, to: String, cost: f64 },
    #[error("start location `{0}` is not in the cost table")]
    UnknownStart(String),
    #[error("cost table has no locations besides the start")]
    EmptyRoster,
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
