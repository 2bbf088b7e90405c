use thiserror::Error;

/// Errors surfaced by window construction and mining.
///
/// Per-record issues (unknown items, empty transactions) never show up here;
/// they are absorbed with a zero weight when the transaction is resolved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FwpError {
    #[error("window size must be at least 1, got {0}")]
    InvalidWindowSize(usize),

    #[error("minimum weighted support must lie in [0, 1], got {0}")]
    InvalidMinSupport(f64),

    #[error("initial window needs {expected} transactions, got {actual}")]
    IncompleteWindow { expected: usize, actual: usize },

    #[error("mining pass cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, FwpError>;
