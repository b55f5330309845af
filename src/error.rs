//! Error types for phrase location queries

use thiserror::Error;

/// Invalid arguments rejected by the matcher.
///
/// A query that finds nothing is not an error; it returns `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocateError {
    #[error("target is empty")]
    EmptyTarget,

    #[error("anchor must be either before, middle, or after (got {0:?})")]
    InvalidAnchor(String),

    #[error("confidence threshold must be in (0, 1] (got {0})")]
    InvalidThreshold(f64),
}

pub type LocateResult<T> = Result<T, LocateError>;
