//! Windowing, chunking, and subslice combinators.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{InvalidArgumentError, SeqflowError};

/// Yields overlapping consecutive windows of length `size`, advancing one
/// slot at a time. A source shorter than the window yields nothing.
pub struct SlidingWindow<T> {
    source: Box<dyn Iterator<Item = T>>,
    window: VecDeque<T>,
    size: usize,
    primed: bool,
}

impl<T> SlidingWindow<T> {
    /// Creates a sliding window of the given size.
    pub fn new(source: Box<dyn Iterator<Item = T>>, size: usize) -> Self {
        Self {
            source,
            window: VecDeque::with_capacity(size),
            size,
            primed: false,
        }
    }
}

impl<T: Clone> Iterator for SlidingWindow<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.size == 0 {
            // Every boundary between elements carries an empty window,
            // including the one past the last element: len + 1 in total.
            if !self.primed {
                self.primed = true;
                return Some(Vec::new());
            }
            return self.source.next().map(|_| Vec::new());
        }
        if !self.primed {
            while self.window.len() < self.size {
                match self.source.next() {
                    Some(element) => self.window.push_back(element),
                    None => return None,
                }
            }
            self.primed = true;
            return Some(self.window.iter().cloned().collect());
        }
        let incoming = self.source.next()?;
        self.window.pop_front();
        self.window.push_back(incoming);
        Some(self.window.iter().cloned().collect())
    }
}

impl<T: Clone> std::iter::FusedIterator for SlidingWindow<T> {}

/// Yields every non-empty contiguous subsequence: outer loop over the start
/// index, inner loop over the end index.
///
/// Requires the whole (finite) input; it is collected at the first pull.
pub struct Subslices<T> {
    source: Option<Box<dyn Iterator<Item = T>>>,
    items: Vec<T>,
    start: usize,
    end: usize,
}

impl<T> Subslices<T> {
    /// Creates a subslice producer over the upstream sequence.
    pub fn new(source: Box<dyn Iterator<Item = T>>) -> Self {
        Self {
            source: Some(source),
            items: Vec::new(),
            start: 0,
            end: 1,
        }
    }
}

impl<T: Clone> Iterator for Subslices<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if let Some(source) = self.source.take() {
            self.items = source.collect();
        }
        if self.start >= self.items.len() {
            return None;
        }
        let piece = self.items[self.start..self.end].to_vec();
        self.end += 1;
        if self.end > self.items.len() {
            self.start += 1;
            self.end = self.start + 1;
        }
        Some(piece)
    }
}

impl<T: Clone> std::iter::FusedIterator for Subslices<T> {}

/// Policy for the final short chunk of a [`Grouper`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncompletePolicy {
    /// Pad the final short chunk with the fill value.
    #[default]
    Fill,
    /// Fail once the short chunk is reached.
    Strict,
    /// Drop the final short chunk.
    Ignore,
}

impl FromStr for IncompletePolicy {
    type Err = InvalidArgumentError;

    fn from_str(flag: &str) -> Result<Self, Self::Err> {
        match flag {
            "fill" => Ok(Self::Fill),
            "strict" => Ok(Self::Strict),
            "ignore" => Ok(Self::Ignore),
            other => Err(InvalidArgumentError::new(format!(
                "Invalid incomplete flag '{other}', expected: 'fill', 'strict', or 'ignore'"
            ))),
        }
    }
}

impl std::fmt::Display for IncompletePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fill => f.write_str("fill"),
            Self::Strict => f.write_str("strict"),
            Self::Ignore => f.write_str("ignore"),
        }
    }
}

/// Chunks the sequence into groups of length `size`.
///
/// The policy decides what happens to a final short chunk. Under
/// [`IncompletePolicy::Strict`] the shortfall is only detectable once
/// evaluation reaches it, so the error is recorded in the pipeline's fault
/// slot and iteration ends; the terminal operation surfaces it.
pub struct Grouper<T> {
    source: Box<dyn Iterator<Item = T>>,
    size: usize,
    policy: IncompletePolicy,
    fill: Option<T>,
    fault: Rc<RefCell<Option<SeqflowError>>>,
    done: bool,
}

impl<T> Grouper<T> {
    /// Creates a chunking producer. `size` must already be validated as
    /// positive, and `fill` as present under the fill policy.
    pub fn new(
        source: Box<dyn Iterator<Item = T>>,
        size: usize,
        policy: IncompletePolicy,
        fill: Option<T>,
        fault: Rc<RefCell<Option<SeqflowError>>>,
    ) -> Self {
        Self {
            source,
            size,
            policy,
            fill,
            fault,
            done: false,
        }
    }
}

impl<T: Clone> Iterator for Grouper<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        let mut chunk = Vec::with_capacity(self.size);
        while chunk.len() < self.size {
            match self.source.next() {
                Some(element) => chunk.push(element),
                None => break,
            }
        }
        if chunk.is_empty() {
            self.done = true;
            return None;
        }
        if chunk.len() == self.size {
            return Some(chunk);
        }
        self.done = true;
        match self.policy {
            IncompletePolicy::Fill => {
                if let Some(fill) = &self.fill {
                    while chunk.len() < self.size {
                        chunk.push(fill.clone());
                    }
                }
                Some(chunk)
            }
            IncompletePolicy::Strict => {
                *self.fault.borrow_mut() = Some(SeqflowError::invalid_argument(format!(
                    "Incomplete chunk of length {}, expected {}",
                    chunk.len(),
                    self.size
                )));
                None
            }
            IncompletePolicy::Ignore => None,
        }
    }
}

impl<T: Clone> std::iter::FusedIterator for Grouper<T> {}
