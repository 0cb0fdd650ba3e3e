//! Success/failure container.
//!
//! Mirrors the shape of [`Optional`](crate::optional::Optional), with the
//! second variant carrying a captured error instead of plain absence. The
//! error object is preserved unmodified for later inspection, never
//! re-raised automatically.

use crate::errors::SeqflowError;

/// Container holding either a computed value or a captured error. Never
/// both, never neither.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The computation produced a value.
    Success(T),
    /// The computation failed; the original error is carried as-is.
    Failure(anyhow::Error),
}

impl<T> Outcome<T> {
    /// Creates a success outcome.
    #[must_use]
    pub fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Creates a failure outcome capturing the given error.
    #[must_use]
    pub fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    /// Returns whether this is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns whether this is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the value, or surfaces the captured error as
    /// [`SeqflowError::Propagated`].
    pub fn get(self) -> Result<T, SeqflowError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(SeqflowError::Propagated(error)),
        }
    }

    /// Returns the value if successful, or the provided default.
    pub fn or_else(self, default: T) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => default,
        }
    }

    /// Returns the value if successful, or computes a fallback from the
    /// captured error. The supplier runs only on failure.
    pub fn or_else_get(self, supplier: impl FnOnce(&anyhow::Error) -> T) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(error) => supplier(&error),
        }
    }

    /// A borrow of the captured error, if this is a failure.
    pub fn error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Runs the action with the value, if successful.
    pub fn if_success(&self, action: impl FnOnce(&T)) {
        if let Self::Success(value) = self {
            action(value);
        }
    }

    /// Runs the action with the value if successful, otherwise the failure
    /// action with the captured error.
    pub fn if_success_or_else(
        &self,
        action: impl FnOnce(&T),
        failure_action: impl FnOnce(&anyhow::Error),
    ) {
        match self {
            Self::Success(value) => action(value),
            Self::Failure(error) => failure_action(error),
        }
    }

    /// Transforms the value if successful; a failure propagates unchanged.
    pub fn map<U>(self, mapper: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(mapper(value)),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Like [`map`](Self::map), but the mapper already returns an outcome,
    /// which is passed through rather than double-wrapped.
    pub fn flat_map<U>(self, mapper: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Self::Success(value) => mapper(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Converts into a plain `Result`, preserving the captured error.
    pub fn into_result(self) -> Result<T, anyhow::Error> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }
}

impl<T> From<Result<T, anyhow::Error>> for Outcome<T> {
    fn from(result: Result<T, anyhow::Error>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<T: PartialEq> PartialEq for Outcome<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Success(a), Self::Success(b)) => a == b,
            // Error objects have no structural equality; compare renderings.
            (Self::Failure(a), Self::Failure(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success(value) => write!(f, "Outcome.success[{value}]"),
            Self::Failure(error) => write!(f, "Outcome.failure[{error}]"),
        }
    }
}
