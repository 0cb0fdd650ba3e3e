//! Slicing with negative-index semantics and indexed search.

/// A slice view over a sequence, with Python-style bound semantics.
///
/// Negative `start`/`stop` count from the end, which requires the total
/// length; the input is therefore collected, but only at the first pull.
/// Callers with non-negative bounds should prefer plain skip/take adapters
/// and never pay for materialization.
pub struct View<T> {
    source: Option<Box<dyn Iterator<Item = T>>>,
    start: isize,
    stop: Option<isize>,
    step: usize,
    ready: std::vec::IntoIter<T>,
}

impl<T: 'static> View<T> {
    /// Creates a view with the given bounds. `step` must already be
    /// validated as positive.
    pub fn new(
        source: Box<dyn Iterator<Item = T>>,
        start: isize,
        stop: Option<isize>,
        step: usize,
    ) -> Self {
        Self {
            source: Some(source),
            start,
            stop,
            step,
            ready: Vec::new().into_iter(),
        }
    }
}

impl<T: 'static> Iterator for View<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(source) = self.source.take() {
            let items: Vec<T> = source.collect();
            let len = items.len();
            let begin = resolve_bound(len, self.start);
            let end = self.stop.map_or(len, |stop| resolve_bound(len, stop));
            let sliced: Vec<T> = items
                .into_iter()
                .skip(begin)
                .take(end.saturating_sub(begin))
                .step_by(self.step)
                .collect();
            self.ready = sliced.into_iter();
        }
        self.ready.next()
    }
}

impl<T: 'static> std::iter::FusedIterator for View<T> {}

/// Clamps one slice bound into `0..=len`, counting negatives from the end.
fn resolve_bound(len: usize, bound: isize) -> usize {
    if bound < 0 {
        len.saturating_sub(bound.unsigned_abs())
    } else {
        bound.unsigned_abs().min(len)
    }
}

/// Lazily yields the indices in `[start, stop)` where an element equals
/// `value`. `stop = None` means through the end of the sequence.
pub fn find_indices<T>(
    source: Box<dyn Iterator<Item = T>>,
    value: T,
    start: usize,
    stop: Option<usize>,
) -> Box<dyn Iterator<Item = usize>>
where
    T: PartialEq + 'static,
{
    let bounded: Box<dyn Iterator<Item = (usize, T)>> = match stop {
        Some(stop) => Box::new(source.enumerate().take(stop)),
        None => Box::new(source.enumerate()),
    };
    Box::new(
        bounded
            .skip(start)
            .filter(move |(_, element)| *element == value)
            .map(|(index, _)| index),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> Box<dyn Iterator<Item = i32>> {
        Box::new(1..=9)
    }

    #[test]
    fn test_view_negative_start() {
        let tail: Vec<i32> = View::new(digits(), -3, None, 1).collect();
        assert_eq!(tail, vec![7, 8, 9]);
    }

    #[test]
    fn test_view_negative_stop() {
        let head: Vec<i32> = View::new(digits(), 0, Some(-4), 1).collect();
        assert_eq!(head, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_view_mixed_bounds() {
        let middle: Vec<i32> = View::new(digits(), 2, Some(-3), 1).collect();
        assert_eq!(middle, vec![3, 4, 5, 6]);
        let middle: Vec<i32> = View::new(digits(), -5, Some(-2), 1).collect();
        assert_eq!(middle, vec![5, 6, 7]);
    }

    #[test]
    fn test_view_bounds_clamp_to_length() {
        let all: Vec<i32> = View::new(digits(), -100, Some(100), 1).collect();
        assert_eq!(all, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_view_step_applies_after_bounds() {
        let stepped: Vec<i32> = View::new(digits(), -6, None, 2).collect();
        assert_eq!(stepped, vec![4, 6, 8]);
    }

    #[test]
    fn test_view_crossed_bounds_yield_empty() {
        let none: Vec<i32> = View::new(digits(), -1, Some(2), 1).collect();
        assert!(none.is_empty());
    }

    #[test]
    fn test_find_indices_whole_range() {
        let letters = Box::new("AABCADEAF".chars());
        let indices: Vec<usize> = find_indices(letters, 'A', 0, None).collect();
        assert_eq!(indices, vec![0, 1, 4, 7]);
    }

    #[test]
    fn test_find_indices_custom_start() {
        let letters = Box::new("AABCADEAF".chars());
        let indices: Vec<usize> = find_indices(letters, 'A', 3, None).collect();
        assert_eq!(indices, vec![4, 7]);
    }

    #[test]
    fn test_find_indices_custom_stop() {
        let letters = Box::new("AABCADEAF".chars());
        let indices: Vec<usize> = find_indices(letters, 'A', 0, Some(5)).collect();
        assert_eq!(indices, vec![0, 1, 4]);
    }

    #[test]
    fn test_find_indices_is_lazy() {
        let indices: Vec<usize> = find_indices(Box::new(0..), 5, 0, None).take(1).collect();
        assert_eq!(indices, vec![5]);
    }
}
