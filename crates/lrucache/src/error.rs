//! Error types for lrucache

use std::fmt;

/// Result type alias for lrucache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction and consistency checks
///
/// Misses and duplicate keys are not errors; they are reported through
/// the `bool`/`Option` returns of the cache operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cache constructed with a capacity of zero
    ZeroCapacity,

    /// Index and recency list disagree
    Invariant(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "Capacity must be greater than 0"),
            Error::Invariant(msg) => write!(f, "Invariant violated: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
