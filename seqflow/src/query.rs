//! The lazy query pipeline.
//!
//! A [`Query`] wraps exactly one lazy sequence plus a consumed flag. Every
//! non-terminal combinator takes the pipeline by value and returns a newly
//! derived one; nothing is materialized until a terminal operation pulls.
//! Terminal operations (`to_list`, `to_map`, `take_nth`, `all_equal` and
//! their variants) drain the sequence and flip the pipeline to Consumed, an
//! absorbing state: a later terminal call yields an empty result rather
//! than silently replaying elements.
//!
//! Evaluation is single-threaded and pull-based; the shared fault slot that
//! carries evaluation-time failures uses `Rc`, which keeps `Query` `!Send`
//! on purpose.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::apply::{Options, Transform};
use crate::combinators::slice;
use crate::combinators::{
    Deferred, Grouper, IncompletePolicy, NCycles, RepeatFunc, RoundRobin, SlidingWindow,
    Subslices, Tabulate, UniqueEverseen, UniqueJustseen, View,
};
use crate::errors::SeqflowError;
use crate::optional::Optional;
use crate::source::Source;

/// Shared slot for failures that are only detectable mid-evaluation.
pub(crate) type FaultSlot = Rc<RefCell<Option<SeqflowError>>>;

/// A lazily-evaluated, chainable query over a sequence of elements.
pub struct Query<T> {
    elements: Box<dyn Iterator<Item = T>>,
    consumed: bool,
    fault: FaultSlot,
}

impl<T: 'static> Query<T> {
    /// Builds a pipeline from an explicit source kind.
    #[must_use]
    pub fn from_source(source: Source<T>) -> Self {
        Self::wrap(source.into_elements(), Rc::new(RefCell::new(None)))
    }

    /// The empty pipeline.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_source(Source::Empty)
    }

    /// A pipeline over a single scalar.
    #[must_use]
    pub fn of(value: T) -> Self {
        Self::from_source(Source::Single(value))
    }

    /// A pipeline over a finite list of values, each a top-level element.
    #[must_use]
    pub fn of_each(values: impl Into<Vec<T>>) -> Self {
        Self::from_source(Source::Many(values.into()))
    }

    /// A pipeline streaming an existing sequence unchanged. The sequence
    /// may be infinite; nothing is pulled until a terminal operation runs.
    #[must_use]
    pub fn new<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_source(Source::Sequence(Box::new(iterable.into_iter())))
    }

    fn wrap(elements: Box<dyn Iterator<Item = T>>, fault: FaultSlot) -> Self {
        Self {
            elements,
            consumed: false,
            fault,
        }
    }

    fn into_parts(self) -> (Box<dyn Iterator<Item = T>>, FaultSlot) {
        (self.elements, self.fault)
    }

    // ------------------------------------------------------------------
    // Non-terminal combinators: each derives a new pipeline.
    // ------------------------------------------------------------------

    /// Yields at most `n` leading elements.
    #[must_use]
    pub fn limit(self, n: usize) -> Self {
        let (elements, fault) = self.into_parts();
        Self::wrap(Box::new(elements.take(n)), fault)
    }

    /// Elementwise transform, one output per input.
    #[must_use]
    pub fn map<U: 'static>(self, func: impl FnMut(T) -> U + 'static) -> Query<U> {
        let (elements, fault) = self.into_parts();
        Query::wrap(Box::new(elements.map(func)), fault)
    }

    /// Replaces the sequence with `func(start), func(start + 1), ...`,
    /// an infinite tabulation. Bound it before materializing.
    #[must_use]
    pub fn tabulate<U: 'static>(self, func: impl FnMut(i64) -> U + 'static, start: i64) -> Query<U> {
        let (_, fault) = self.into_parts();
        Query::wrap(Box::new(Tabulate::new(func, start)), fault)
    }

    /// Yields `operation(&args)` exactly `times` times, where `args` is the
    /// current sequence materialized at the first pull. Not memoized.
    #[must_use]
    pub fn repeat_func<U: 'static>(
        self,
        operation: impl FnMut(&[T]) -> U + 'static,
        times: usize,
    ) -> Query<U> {
        let (elements, fault) = self.into_parts();
        Query::wrap(Box::new(RepeatFunc::new(elements, operation, times)), fault)
    }

    /// Repeats the full sequence `count` times in order. A non-positive
    /// `count` yields the empty pipeline, not an error.
    #[must_use]
    pub fn ncycles(self, count: isize) -> Self
    where
        T: Clone,
    {
        let times = usize::try_from(count).unwrap_or(0);
        let (elements, fault) = self.into_parts();
        Self::wrap(Box::new(NCycles::new(elements, times)), fault)
    }

    /// Discards the first `n` elements, keeping the remainder.
    pub fn consume(self, n: isize) -> Result<Self, SeqflowError> {
        if n < 0 {
            return Err(SeqflowError::invalid_argument(
                "Consume boundary cannot be negative",
            ));
        }
        let (elements, fault) = self.into_parts();
        Ok(Self::wrap(Box::new(elements.skip(n.unsigned_abs())), fault))
    }

    /// Discards the entire sequence: the derived pipeline drains its
    /// upstream when pulled and yields nothing.
    #[must_use]
    pub fn consume_all(self) -> Self {
        let (elements, fault) = self.into_parts();
        Self::wrap(Box::new(elements.filter(|_| false)), fault)
    }

    /// Applies an external transformation function to the current lazy
    /// sequence, forwarding the configuration map. Option-name aliases are
    /// resolved by [`Options`] itself, so callers can use canonical names.
    #[must_use]
    pub fn use_fn<U: 'static>(self, transform: impl Transform<T, U>, options: Options) -> Query<U> {
        let (elements, fault) = self.into_parts();
        Query::wrap(transform.apply(elements, &options), fault)
    }

    /// Slice semantics over the sequence, Python style: negative `start`
    /// and `stop` count from the end (forcing the input to be collected,
    /// deferred to the first pull); `stop = None` means through the end;
    /// `step = None` means 1.
    pub fn view(
        self,
        start: Option<isize>,
        stop: Option<isize>,
        step: Option<isize>,
    ) -> Result<Self, SeqflowError> {
        if step.is_some_and(|s| s <= 0) {
            return Err(SeqflowError::invalid_argument(
                "Step must be a positive integer or None",
            ));
        }
        let stride = step.map_or(1, isize::unsigned_abs);
        let begin = start.unwrap_or(0);
        let (elements, fault) = self.into_parts();
        let needs_length = begin < 0 || stop.is_some_and(|s| s < 0);
        let sliced: Box<dyn Iterator<Item = T>> = if needs_length {
            Box::new(View::new(elements, begin, stop, stride))
        } else {
            let offset = begin.unsigned_abs();
            let skipped = elements.skip(offset);
            match stop {
                Some(stop) => Box::new(
                    skipped
                        .take(stop.unsigned_abs().saturating_sub(offset))
                        .step_by(stride),
                ),
                None => Box::new(skipped.step_by(stride)),
            }
        };
        Ok(Self::wrap(sliced, fault))
    }

    /// Yields overlapping consecutive windows of length `n`, advancing one
    /// slot at a time. A source shorter than `n` yields nothing.
    pub fn sliding_window(self, n: isize) -> Result<Query<Vec<T>>, SeqflowError>
    where
        T: Clone,
    {
        if n < 0 {
            return Err(SeqflowError::invalid_argument(
                "Window size cannot be negative",
            ));
        }
        let (elements, fault) = self.into_parts();
        Ok(Query::wrap(
            Box::new(SlidingWindow::new(elements, n.unsigned_abs())),
            fault,
        ))
    }

    /// Yields every non-empty contiguous subsequence, ordered by start
    /// index, then by end index.
    #[must_use]
    pub fn subslices(self) -> Query<Vec<T>>
    where
        T: Clone,
    {
        let (elements, fault) = self.into_parts();
        Query::wrap(Box::new(Subslices::new(elements)), fault)
    }

    /// Splits into a two-element pipeline of groups: elements matching the
    /// predicate FIRST, the rest second. The upstream is drained at the
    /// first pull.
    #[must_use]
    pub fn partition(self, mut predicate: impl FnMut(&T) -> bool + 'static) -> Query<Vec<T>> {
        let (elements, fault) = self.into_parts();
        let groups = Deferred::new(move || {
            let mut matched = Vec::new();
            let mut rest = Vec::new();
            for element in elements {
                if predicate(&element) {
                    matched.push(element);
                } else {
                    rest.push(element);
                }
            }
            vec![matched, rest]
        });
        Query::wrap(Box::new(groups), fault)
    }

    /// Interleaves a sequence of sub-sequences: one element from each in
    /// turn, skipping exhausted ones, until all are exhausted.
    #[must_use]
    pub fn round_robin(self) -> Query<T::Item>
    where
        T: IntoIterator,
        T::IntoIter: 'static,
        T::Item: 'static,
    {
        let (elements, fault) = self.into_parts();
        let inners = elements.map(IntoIterator::into_iter);
        Query::wrap(Box::new(RoundRobin::new(Box::new(inners))), fault)
    }

    /// Chunks the sequence into groups of length `size`, with the policy
    /// deciding the fate of a final short chunk. The fill policy requires a
    /// fill value; a strict shortfall surfaces at the terminal operation.
    pub fn grouper(
        self,
        size: usize,
        incomplete: IncompletePolicy,
        fill_value: Option<T>,
    ) -> Result<Query<Vec<T>>, SeqflowError>
    where
        T: Clone,
    {
        if size == 0 {
            return Err(SeqflowError::invalid_argument(
                "Group size must be a positive integer",
            ));
        }
        if incomplete == IncompletePolicy::Fill && fill_value.is_none() {
            return Err(SeqflowError::invalid_argument(
                "Fill policy requires a fill value",
            ));
        }
        let (elements, fault) = self.into_parts();
        let chunks = Grouper::new(elements, size, incomplete, fill_value, Rc::clone(&fault));
        Ok(Query::wrap(Box::new(chunks), fault))
    }

    /// Each distinct element's first occurrence, in order of first
    /// occurrence; `reverse` reverses that result sequence.
    #[must_use]
    pub fn unique(self, reverse: bool) -> Self
    where
        T: Clone + Eq + Hash,
    {
        self.unique_by(|element: &T| element.clone(), reverse)
    }

    /// [`unique`](Self::unique) under a key extractor.
    #[must_use]
    pub fn unique_by<K: Eq + Hash + 'static>(
        self,
        key: impl FnMut(&T) -> K + 'static,
        reverse: bool,
    ) -> Self {
        let (elements, fault) = self.into_parts();
        let firsts = UniqueEverseen::new(elements, key);
        let ordered: Box<dyn Iterator<Item = T>> = if reverse {
            Box::new(Deferred::new(move || {
                let mut kept: Vec<T> = firsts.collect();
                kept.reverse();
                kept
            }))
        } else {
            Box::new(firsts)
        };
        Self::wrap(ordered, fault)
    }

    /// Collapses consecutive runs of equal elements into one representative.
    #[must_use]
    pub fn unique_just_seen(self) -> Self
    where
        T: Clone + PartialEq,
    {
        self.unique_just_seen_by(|element: &T| element.clone())
    }

    /// [`unique_just_seen`](Self::unique_just_seen) under a key extractor.
    #[must_use]
    pub fn unique_just_seen_by<K: PartialEq + 'static>(
        self,
        key: impl FnMut(&T) -> K + 'static,
    ) -> Self {
        let (elements, fault) = self.into_parts();
        Self::wrap(Box::new(UniqueJustseen::new(elements, key)), fault)
    }

    /// Drops every element seen at any earlier position, preserving order.
    #[must_use]
    pub fn unique_ever_seen(self) -> Self
    where
        T: Clone + Eq + Hash,
    {
        self.unique_ever_seen_by(|element: &T| element.clone())
    }

    /// [`unique_ever_seen`](Self::unique_ever_seen) under a key extractor.
    #[must_use]
    pub fn unique_ever_seen_by<K: Eq + Hash + 'static>(
        self,
        key: impl FnMut(&T) -> K + 'static,
    ) -> Self {
        let (elements, fault) = self.into_parts();
        Self::wrap(Box::new(UniqueEverseen::new(elements, key)), fault)
    }

    /// Lazily yields the indices in `[start, stop)` at which an element
    /// equals `value`; `stop = None` means through the end.
    #[must_use]
    pub fn find_indices(self, value: T, start: usize, stop: Option<usize>) -> Query<usize>
    where
        T: PartialEq,
    {
        let (elements, fault) = self.into_parts();
        Query::wrap(slice::find_indices(elements, value, start, stop), fault)
    }

    // ------------------------------------------------------------------
    // Terminal operations: drain the sequence and mark the pipeline
    // consumed. On an already-consumed pipeline they yield empty results.
    // ------------------------------------------------------------------

    /// Whether a terminal operation has already drained this pipeline.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    fn begin_terminal(&mut self, operation: &str) -> Box<dyn Iterator<Item = T>> {
        if self.consumed {
            tracing::warn!(operation, "terminal call on a consumed pipeline");
        } else {
            tracing::debug!(operation, "consuming pipeline");
        }
        self.consumed = true;
        std::mem::replace(&mut self.elements, Box::new(std::iter::empty()))
    }

    fn finish_terminal<R>(&self, result: R) -> Result<R, SeqflowError> {
        match self.fault.borrow_mut().take() {
            Some(error) => Err(error),
            None => Ok(result),
        }
    }

    /// Materializes the remaining sequence into an ordered collection.
    pub fn to_list(&mut self) -> Result<Vec<T>, SeqflowError> {
        let elements = self.begin_terminal("to_list");
        let items: Vec<T> = elements.collect();
        self.finish_terminal(items)
    }

    /// Builds a mapping from the `(key, value)` pair produced per element.
    /// Later duplicate keys overwrite earlier ones.
    pub fn to_map<K, V>(
        &mut self,
        mut entry: impl FnMut(T) -> (K, V),
    ) -> Result<HashMap<K, V>, SeqflowError>
    where
        K: Eq + Hash,
    {
        let elements = self.begin_terminal("to_map");
        let mut mapping = HashMap::new();
        for element in elements {
            let (key, value) = entry(element);
            mapping.insert(key, value);
        }
        self.finish_terminal(mapping)
    }

    /// The element at the zero-based `index`, or an empty `Optional` when
    /// out of range. A negative index counts from the end, which buffers a
    /// tail of `|index|` elements while draining.
    pub fn take_nth(&mut self, index: isize) -> Result<Optional<T>, SeqflowError> {
        let found = self.locate(index);
        self.finish_terminal(Optional::of_nullable(found))
    }

    /// [`take_nth`](Self::take_nth) with a present default for the
    /// out-of-range case.
    pub fn take_nth_or(&mut self, index: isize, default: T) -> Result<Optional<T>, SeqflowError> {
        let found = self.locate(index);
        self.finish_terminal(Optional::of_nullable(found.or(Some(default))))
    }

    fn locate(&mut self, index: isize) -> Option<T> {
        let mut elements = self.begin_terminal("take_nth");
        if index >= 0 {
            return elements.nth(index.unsigned_abs());
        }
        let back = index.unsigned_abs();
        let mut tail: VecDeque<T> = VecDeque::with_capacity(back);
        for element in elements {
            if tail.len() == back {
                tail.pop_front();
            }
            tail.push_back(element);
        }
        if tail.len() == back {
            tail.pop_front()
        } else {
            None
        }
    }

    /// Whether every element is equal; vacuously true for one or zero
    /// elements.
    pub fn all_equal(&mut self) -> Result<bool, SeqflowError>
    where
        T: PartialEq,
    {
        let mut elements = self.begin_terminal("all_equal");
        let verdict = match elements.next() {
            None => true,
            Some(first) => elements.all(|element| element == first),
        };
        self.finish_terminal(verdict)
    }

    /// Whether every element maps to an equal key value.
    pub fn all_equal_by<K: PartialEq>(
        &mut self,
        mut key: impl FnMut(&T) -> K,
    ) -> Result<bool, SeqflowError> {
        let mut elements = self.begin_terminal("all_equal");
        let verdict = match elements.next() {
            None => true,
            Some(first) => {
                let first_key = key(&first);
                elements.all(|element| key(&element) == first_key)
            }
        };
        self.finish_terminal(verdict)
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("consumed", &self.consumed)
            .finish_non_exhaustive()
    }
}
