//! Presence/absence container.
//!
//! A value wrapper that makes "holds no value" explicit instead of leaning
//! on null-like sentinels. The nullable boundary is modeled with
//! `Option<T>`: `of` rejects an absent input, `of_nullable` accepts it.

use serde::{Deserialize, Serialize};

use crate::errors::{EmptyOptionalError, NullValueError, SeqflowError};

/// Container holding zero or one value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Optional<T> {
    /// A value is present.
    Present(T),
    /// No value.
    Empty,
}

impl<T> Optional<T> {
    /// Creates a container describing a definitely-present value.
    ///
    /// Fails with [`NullValueError`] if the value is null-like (`None`).
    pub fn of(value: Option<T>) -> Result<Self, SeqflowError> {
        match value {
            Some(value) => Ok(Self::Present(value)),
            None => Err(NullValueError.into()),
        }
    }

    /// Creates a container from a possibly-null value; never fails.
    #[must_use]
    pub fn of_nullable(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Empty,
        }
    }

    /// Creates an empty container.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Returns whether a value is present.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns whether the container is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the value, or fails with [`EmptyOptionalError`] when absent.
    pub fn get(self) -> Result<T, SeqflowError> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Empty => Err(EmptyOptionalError.into()),
        }
    }

    /// Returns the value if present, or the provided default.
    pub fn or_else(self, default: T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Empty => default,
        }
    }

    /// Returns the value if present, or calls the supplier. The supplier is
    /// invoked only when the container is empty.
    pub fn or_else_get(self, supplier: impl FnOnce() -> T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Empty => supplier(),
        }
    }

    /// Returns the value if present, or fails with [`EmptyOptionalError`].
    pub fn or_else_raise(self) -> Result<T, SeqflowError> {
        self.get()
    }

    /// Returns the value if present, or fails with the supplied error.
    pub fn or_else_raise_with(
        self,
        error_supplier: impl FnOnce() -> SeqflowError,
    ) -> Result<T, SeqflowError> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Empty => Err(error_supplier()),
        }
    }

    /// Runs the action with the value, if present.
    pub fn if_present(&self, action: impl FnOnce(&T)) {
        if let Self::Present(value) = self {
            action(value);
        }
    }

    /// Runs the action with the value if present, otherwise the fallback.
    pub fn if_present_or_else(&self, action: impl FnOnce(&T), empty_action: impl FnOnce()) {
        match self {
            Self::Present(value) => action(value),
            Self::Empty => empty_action(),
        }
    }

    /// Transforms the value if present; absence propagates unchanged. The
    /// mapper is never invoked on an empty container.
    pub fn map<U>(self, mapper: impl FnOnce(T) -> U) -> Optional<U> {
        match self {
            Self::Present(value) => Optional::Present(mapper(value)),
            Self::Empty => Optional::Empty,
        }
    }

    /// Like [`map`](Self::map), but the mapper already returns a container,
    /// which is passed through rather than double-wrapped.
    pub fn flat_map<U>(self, mapper: impl FnOnce(T) -> Optional<U>) -> Optional<U> {
        match self {
            Self::Present(value) => mapper(value),
            Self::Empty => Optional::Empty,
        }
    }

    /// Keeps a present value only if the predicate holds.
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        match self {
            Self::Present(value) if predicate(&value) => Self::Present(value),
            _ => Self::Empty,
        }
    }

    /// Converts into a plain `Option`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Empty => None,
        }
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        Self::of_nullable(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.into_option()
    }
}

impl<T: PartialEq> PartialEq for Optional<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Present(a), Self::Present(b)) => a == b,
            (Self::Empty, Self::Empty) => true,
            _ => false,
        }
    }
}

impl<T: Eq> Eq for Optional<T> {}

impl<T: std::fmt::Display> std::fmt::Display for Optional<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present(value) => write!(f, "Optional[{value}]"),
            Self::Empty => f.write_str("Optional.empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    #[test]
    fn test_of_rejects_null() {
        let err = Optional::<i32>::of(None).unwrap_err();
        assert!(matches!(err, SeqflowError::NullValue(_)));
    }

    #[test]
    fn test_of_accepts_present() {
        let opt = Optional::of(Some(5)).unwrap();
        assert!(opt.is_present());
        assert_eq!(opt.get().unwrap(), 5);
    }

    #[test]
    fn test_of_nullable_maps_null_to_empty() {
        assert!(Optional::<i32>::of_nullable(None).is_empty());
        assert!(Optional::of_nullable(Some(1)).is_present());
    }

    #[test]
    fn test_get_on_empty_fails() {
        let err = Optional::<i32>::empty().get().unwrap_err();
        assert_eq!(err.to_string(), "Optional is empty");
    }

    #[test]
    fn test_or_else() {
        assert_eq!(Optional::Present(2).or_else(9), 2);
        assert_eq!(Optional::empty().or_else(9), 9);
    }

    #[test]
    fn test_or_else_get_supplier_only_when_empty() {
        let called = Cell::new(false);
        let value = Optional::Present(2).or_else_get(|| {
            called.set(true);
            9
        });
        assert_eq!(value, 2);
        assert!(!called.get());
        assert_eq!(Optional::empty().or_else_get(|| 9), 9);
    }

    #[test]
    fn test_or_else_raise_with_custom_error() {
        let err = Optional::<i32>::empty()
            .or_else_raise_with(|| SeqflowError::invalid_argument("nothing here"))
            .unwrap_err();
        assert_eq!(err.to_string(), "nothing here");
    }

    #[test]
    fn test_if_present_or_else_dispatch() {
        let seen = Cell::new(0);
        Optional::Present(7).if_present_or_else(|v| seen.set(*v), || seen.set(-1));
        assert_eq!(seen.get(), 7);
        Optional::<i32>::empty().if_present_or_else(|v| seen.set(*v), || seen.set(-1));
        assert_eq!(seen.get(), -1);
    }

    #[test]
    fn test_map_skips_mapper_when_empty() {
        let called = Cell::new(false);
        let mapped = Optional::<i32>::empty().map(|v| {
            called.set(true);
            v * 2
        });
        assert!(mapped.is_empty());
        assert!(!called.get());
        assert_eq!(Optional::Present(3).map(|v| v * 2), Optional::Present(6));
    }

    #[test]
    fn test_flat_map_no_double_wrap() {
        let flat = Optional::Present(3).flat_map(|v| Optional::Present(v * 2));
        assert_eq!(flat, Optional::Present(6));
        let empty = Optional::Present(3).flat_map(|_| Optional::<i32>::empty());
        assert!(empty.is_empty());
        assert!(Optional::<i32>::empty()
            .flat_map(Optional::Present)
            .is_empty());
    }

    #[test]
    fn test_filter() {
        assert_eq!(Optional::Present(4).filter(|v| v % 2 == 0), Optional::Present(4));
        assert!(Optional::Present(3).filter(|v| v % 2 == 0).is_empty());
        assert!(Optional::<i32>::empty().filter(|_| true).is_empty());
    }

    #[test]
    fn test_equality() {
        assert_eq!(Optional::Present(1), Optional::Present(1));
        assert_ne!(Optional::Present(1), Optional::Present(2));
        assert_eq!(Optional::<i32>::empty(), Optional::empty());
        assert_ne!(Optional::Present(1), Optional::empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Optional::Present(5).to_string(), "Optional[5]");
        assert_eq!(Optional::<i32>::empty().to_string(), "Optional.empty");
    }

    #[test]
    fn test_serde_round_trip() {
        let present = Optional::Present(5);
        let json = serde_json::to_string(&present).unwrap();
        let back: Optional<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, present);

        let empty = Optional::<i32>::empty();
        let json = serde_json::to_string(&empty).unwrap();
        let back: Optional<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, empty);
    }
}
