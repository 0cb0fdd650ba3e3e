//! Interleaving and bounded cycling combinators.

use std::collections::VecDeque;

/// Interleaves the elements of a sequence of sub-sequences.
///
/// Repeatedly takes the next available element from each sub-sequence in
/// its original relative order, dropping exhausted sub-sequences, until all
/// are exhausted. The outer sequence is drained at the first pull; the
/// sub-sequences themselves stay lazy.
pub struct RoundRobin<I>
where
    I: Iterator,
{
    outer: Option<Box<dyn Iterator<Item = I>>>,
    active: VecDeque<I>,
}

impl<I> RoundRobin<I>
where
    I: Iterator,
{
    /// Creates an interleaving producer over a sequence of sub-sequences.
    pub fn new(outer: Box<dyn Iterator<Item = I>>) -> Self {
        Self {
            outer: Some(outer),
            active: VecDeque::new(),
        }
    }
}

impl<I> Iterator for RoundRobin<I>
where
    I: Iterator,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(outer) = self.outer.take() {
            self.active = outer.collect();
        }
        loop {
            let mut inner = self.active.pop_front()?;
            if let Some(element) = inner.next() {
                self.active.push_back(inner);
                return Some(element);
            }
            // Exhausted sub-sequence: drop it and move on.
        }
    }
}

impl<I> std::iter::FusedIterator for RoundRobin<I> where I: Iterator {}

/// Repeats the full upstream sequence `count` times in order.
///
/// The first cycle streams straight from the upstream while recording each
/// element; later cycles replay the recording. A non-positive `count` is an
/// empty sequence, not an error.
pub struct NCycles<T> {
    source: Box<dyn Iterator<Item = T>>,
    seen: Vec<T>,
    remaining: usize,
    replay_at: usize,
    first_pass: bool,
}

impl<T> NCycles<T> {
    /// Creates a bounded cycling producer.
    pub fn new(source: Box<dyn Iterator<Item = T>>, count: usize) -> Self {
        Self {
            source,
            seen: Vec::new(),
            remaining: count,
            replay_at: 0,
            first_pass: true,
        }
    }
}

impl<T: Clone> Iterator for NCycles<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        if self.first_pass {
            if let Some(element) = self.source.next() {
                self.seen.push(element.clone());
                return Some(element);
            }
            self.first_pass = false;
            self.remaining -= 1;
        }
        loop {
            if self.remaining == 0 || self.seen.is_empty() {
                return None;
            }
            if self.replay_at < self.seen.len() {
                let element = self.seen[self.replay_at].clone();
                self.replay_at += 1;
                return Some(element);
            }
            self.replay_at = 0;
            self.remaining -= 1;
        }
    }
}

impl<T: Clone> std::iter::FusedIterator for NCycles<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin_interleaves_in_order() {
        let groups = vec!["ABC".chars(), "D".chars(), "EF".chars()];
        let merged: String = RoundRobin::new(Box::new(groups.into_iter())).collect();
        assert_eq!(merged, "ADEBFC");
    }

    #[test]
    fn test_round_robin_skips_exhausted() {
        let groups: Vec<std::vec::IntoIter<i32>> = vec![
            vec![1, 2].into_iter(),
            vec![].into_iter(),
            vec![3, 4].into_iter(),
        ];
        let merged: Vec<i32> = RoundRobin::new(Box::new(groups.into_iter())).collect();
        assert_eq!(merged, vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_round_robin_empty_outer() {
        let groups: Vec<std::vec::IntoIter<i32>> = vec![];
        let merged: Vec<i32> = RoundRobin::new(Box::new(groups.into_iter())).collect();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_ncycles_repeats_in_order() {
        let doubled: Vec<i32> = NCycles::new(Box::new(1..=3), 2).collect();
        assert_eq!(doubled, vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_ncycles_once_is_identity() {
        let single: Vec<i32> = NCycles::new(Box::new(1..=3), 1).collect();
        assert_eq!(single, vec![1, 2, 3]);
    }

    #[test]
    fn test_ncycles_zero_is_empty() {
        let none: Vec<i32> = NCycles::new(Box::new(1..=3), 0).collect();
        assert!(none.is_empty());
    }

    #[test]
    fn test_ncycles_empty_source() {
        let none: Vec<i32> = NCycles::new(Box::new(std::iter::empty()), 3).collect();
        assert!(none.is_empty());
    }
}
