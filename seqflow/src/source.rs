//! Sequence source adapter.
//!
//! Normalizes every accepted input shape into one canonical lazy sequence.
//! The shape is resolved exactly once, at construction; no element contents
//! are inspected or validated.

use std::fmt;

/// The canonical kinds of input a pipeline can be built from.
pub enum Source<T> {
    /// No input: the empty pipeline.
    Empty,
    /// A single scalar, wrapped as a one-element sequence.
    Single(T),
    /// A finite list of values, each becoming a top-level element.
    Many(Vec<T>),
    /// An existing sequence, streamed through unchanged. May be infinite.
    Sequence(Box<dyn Iterator<Item = T>>),
}

impl<T: 'static> Source<T> {
    /// Converts the source into the canonical lazy element stream.
    pub(crate) fn into_elements(self) -> Box<dyn Iterator<Item = T>> {
        match self {
            Self::Empty => Box::new(std::iter::empty()),
            Self::Single(value) => Box::new(std::iter::once(value)),
            Self::Many(values) => Box::new(values.into_iter()),
            Self::Sequence(iter) => iter,
        }
    }
}

impl<T> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Source::Empty"),
            Self::Single(_) => f.write_str("Source::Single"),
            Self::Many(values) => write!(f, "Source::Many(len={})", values.len()),
            Self::Sequence(_) => f.write_str("Source::Sequence"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_yields_nothing() {
        let elements: Vec<i32> = Source::Empty.into_elements().collect();
        assert!(elements.is_empty());
    }

    #[test]
    fn test_single_source_yields_one_element() {
        let elements: Vec<i32> = Source::Single(7).into_elements().collect();
        assert_eq!(elements, vec![7]);
    }

    #[test]
    fn test_many_source_preserves_order() {
        let elements: Vec<i32> = Source::Many(vec![1, 2, 3]).into_elements().collect();
        assert_eq!(elements, vec![1, 2, 3]);
    }

    #[test]
    fn test_sequence_source_streams_unchanged() {
        let source = Source::Sequence(Box::new(0..4));
        let elements: Vec<i32> = source.into_elements().collect();
        assert_eq!(elements, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_infinite_sequence_source_stays_lazy() {
        let source = Source::Sequence(Box::new(0..));
        let elements: Vec<i32> = source.into_elements().take(3).collect();
        assert_eq!(elements, vec![0, 1, 2]);
    }
}
