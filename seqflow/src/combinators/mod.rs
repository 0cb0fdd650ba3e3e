//! Lazy combinator iterators.
//!
//! Each combinator is a pull-based producer: calling `next` pulls from the
//! upstream producer on demand, so the call stack during iteration mirrors
//! the combinator chain depth. None of these materialize an unbounded
//! upstream at construction time; the few algorithms that need the whole
//! finite input (subslices, negative-bound views, partitioning) defer that
//! collection to the first pull.

pub mod dedup;
pub mod generate;
pub mod interleave;
pub mod slice;
pub mod windowing;

pub use dedup::{UniqueEverseen, UniqueJustseen};
pub use generate::{RepeatFunc, Tabulate};
pub use interleave::{NCycles, RoundRobin};
pub use slice::View;
pub use windowing::{Grouper, IncompletePolicy, SlidingWindow, Subslices};

/// Runs a collecting thunk on the first pull, then drains its output.
///
/// Used by combinators whose result order depends on the whole input
/// (partition groups, reversed uniques): the upstream is only drained once
/// somebody actually pulls, which keeps construction side-effect free.
pub struct Deferred<T, F> {
    thunk: Option<F>,
    items: std::vec::IntoIter<T>,
}

impl<T, F> Deferred<T, F>
where
    F: FnOnce() -> Vec<T>,
{
    /// Creates a deferred producer from a collecting thunk.
    pub fn new(thunk: F) -> Self {
        Self {
            thunk: Some(thunk),
            items: Vec::new().into_iter(),
        }
    }
}

impl<T, F> Iterator for Deferred<T, F>
where
    F: FnOnce() -> Vec<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(thunk) = self.thunk.take() {
            self.items = thunk().into_iter();
        }
        self.items.next()
    }
}

impl<T, F> std::iter::FusedIterator for Deferred<T, F> where F: FnOnce() -> Vec<T> {}
