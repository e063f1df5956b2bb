//! Error types for the match crate.

use thiserror::Error;

/// Errors that can occur when building queries.
///
/// Evaluation itself never fails: malformed or unsatisfiable conditions
/// simply do not match.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Unknown name in a `$type` marker.
    #[error("unknown type predicate '{0}'")]
    UnknownType(String),

    /// A `$regex` or `$type` marker whose operand is not a string.
    #[error("marker '{marker}' expects a string operand")]
    InvalidMarker { marker: &'static str },
}

/// Result type for match operations.
pub type Result<T> = std::result::Result<T, MatchError>;
