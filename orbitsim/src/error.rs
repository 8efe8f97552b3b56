//! Error types for the simulation core

use thiserror::Error;

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the engine. Failures are synchronous and never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Caller passed a value outside the accepted domain (non-positive duration, rate, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Engine state cannot be advanced (e.g. integrating a zero-mass body)
    #[error("invalid state: {0}")]
    InvalidState(String),
}
