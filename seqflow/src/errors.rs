//! Error types for the seqflow engine.
//!
//! Argument errors are raised at the point the offending combinator is
//! invoked (fail-fast). The one exception is the strict grouper shortfall,
//! which can only be detected once evaluation reaches the short chunk; it is
//! recorded in the pipeline's fault slot and surfaced by the terminal call.

use thiserror::Error;

/// The main error type for seqflow operations.
#[derive(Debug, Error)]
pub enum SeqflowError {
    /// A combinator received an invalid count, size, bound, or policy.
    #[error("{0}")]
    InvalidArgument(#[from] InvalidArgumentError),

    /// A value was extracted from an empty `Optional` with no fallback.
    #[error("{0}")]
    EmptyOptional(#[from] EmptyOptionalError),

    /// A must-be-present container was constructed from a null value.
    #[error("{0}")]
    NullValue(#[from] NullValueError),

    /// An error captured inside a failure `Outcome`, preserved unmodified.
    #[error(transparent)]
    Propagated(#[from] anyhow::Error),
}

impl SeqflowError {
    /// Creates an invalid-argument error with the given message.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(InvalidArgumentError::new(message))
    }
}

/// Error raised when a combinator receives an invalid argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidArgumentError {
    /// The error message.
    pub message: String,
}

impl InvalidArgumentError {
    /// Creates a new invalid-argument error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error raised when extracting a value from an empty `Optional`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("Optional is empty")]
pub struct EmptyOptionalError;

/// Error raised when a must-be-present `Optional` is built from a null value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("Value cannot be null")]
pub struct NullValueError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = SeqflowError::invalid_argument("Window size cannot be negative");
        assert_eq!(err.to_string(), "Window size cannot be negative");
    }

    #[test]
    fn test_empty_optional_message() {
        assert_eq!(EmptyOptionalError.to_string(), "Optional is empty");
    }

    #[test]
    fn test_null_value_message() {
        assert_eq!(NullValueError.to_string(), "Value cannot be null");
    }

    #[test]
    fn test_propagated_preserves_source_message() {
        let err = SeqflowError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.to_string(), "disk on fire");
    }
}
