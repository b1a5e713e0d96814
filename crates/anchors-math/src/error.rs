//! Error types for vector math.

use thiserror::Error;

/// Errors raised by vector constructions and rigid fits.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// An argument has the wrong shape (e.g. not exactly 3 components).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The input admits no well-defined answer (zero vector, collinear points).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

/// Result type for math operations.
pub type Result<T> = std::result::Result<T, MathError>;
