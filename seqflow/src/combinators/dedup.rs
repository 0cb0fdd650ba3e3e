//! Deduplication combinators.
//!
//! Two flavors: global first-occurrence (`UniqueEverseen`) and adjacent-run
//! collapsing (`UniqueJustseen`). Both are keyed: the caller supplies a key
//! extractor, identity being the common case.

use std::collections::HashSet;
use std::hash::Hash;

/// Drops every element whose key has been seen at any earlier position,
/// preserving first-occurrence order.
pub struct UniqueEverseen<T, K, F> {
    source: Box<dyn Iterator<Item = T>>,
    key: F,
    seen: HashSet<K>,
}

impl<T, K, F> UniqueEverseen<T, K, F>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    /// Creates a global deduplicator with the given key extractor.
    pub fn new(source: Box<dyn Iterator<Item = T>>, key: F) -> Self {
        Self {
            source,
            key,
            seen: HashSet::new(),
        }
    }
}

impl<T, K, F> Iterator for UniqueEverseen<T, K, F>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let element = self.source.next()?;
            let key = (self.key)(&element);
            if self.seen.insert(key) {
                return Some(element);
            }
        }
    }
}

impl<T, K, F> std::iter::FusedIterator for UniqueEverseen<T, K, F>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
}

/// Collapses each consecutive run of equal-key elements into its first
/// element. Non-adjacent repeats pass through.
pub struct UniqueJustseen<T, K, F> {
    source: Box<dyn Iterator<Item = T>>,
    key: F,
    last: Option<K>,
}

impl<T, K, F> UniqueJustseen<T, K, F>
where
    K: PartialEq,
    F: FnMut(&T) -> K,
{
    /// Creates an adjacent deduplicator with the given key extractor.
    pub fn new(source: Box<dyn Iterator<Item = T>>, key: F) -> Self {
        Self {
            source,
            key,
            last: None,
        }
    }
}

impl<T, K, F> Iterator for UniqueJustseen<T, K, F>
where
    K: PartialEq,
    F: FnMut(&T) -> K,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let element = self.source.next()?;
            let key = (self.key)(&element);
            if self.last.as_ref() != Some(&key) {
                self.last = Some(key);
                return Some(element);
            }
        }
    }
}

impl<T, K, F> std::iter::FusedIterator for UniqueJustseen<T, K, F>
where
    K: PartialEq,
    F: FnMut(&T) -> K,
{
}
