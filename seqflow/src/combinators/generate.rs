//! Producer combinators that generate elements instead of transforming them.

/// Yields `f(start), f(start + 1), f(start + 2), ...` forever.
///
/// The classic `tabulate` recipe. Infinite: must be bounded downstream
/// (`limit`, a terminal applied after bounding) before materialization.
pub struct Tabulate<U, F> {
    func: F,
    counter: i64,
    _marker: std::marker::PhantomData<U>,
}

impl<U, F> Tabulate<U, F>
where
    F: FnMut(i64) -> U,
{
    /// Creates a tabulation starting at `start`.
    pub fn new(func: F, start: i64) -> Self {
        Self {
            func,
            counter: start,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<U, F> Iterator for Tabulate<U, F>
where
    F: FnMut(i64) -> U,
{
    type Item = U;

    #[inline]
    fn next(&mut self) -> Option<U> {
        let index = self.counter;
        self.counter += 1;
        Some((self.func)(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Calls `operation(&args)` exactly `times` times.
///
/// The argument list is the upstream sequence, collected at the first pull.
/// Each call is a fresh evaluation; results are not memoized.
pub struct RepeatFunc<T, U, F> {
    source: Option<Box<dyn Iterator<Item = T>>>,
    args: Vec<T>,
    operation: F,
    remaining: usize,
    _marker: std::marker::PhantomData<U>,
}

impl<T, U, F> RepeatFunc<T, U, F>
where
    F: FnMut(&[T]) -> U,
{
    /// Creates a repeated-call producer over the upstream argument list.
    pub fn new(source: Box<dyn Iterator<Item = T>>, operation: F, times: usize) -> Self {
        Self {
            source: Some(source),
            args: Vec::new(),
            operation,
            remaining: times,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T, U, F> Iterator for RepeatFunc<T, U, F>
where
    F: FnMut(&[T]) -> U,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        if self.remaining == 0 {
            return None;
        }
        if let Some(source) = self.source.take() {
            self.args = source.collect();
        }
        self.remaining -= 1;
        Some((self.operation)(&self.args))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, U, F> std::iter::FusedIterator for RepeatFunc<T, U, F> where F: FnMut(&[T]) -> U {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabulate_from_zero() {
        let squares: Vec<i64> = Tabulate::new(|x| x * x, 0).take(3).collect();
        assert_eq!(squares, vec![0, 1, 4]);
    }

    #[test]
    fn test_tabulate_custom_start() {
        let squares: Vec<i64> = Tabulate::new(|x| x * x, 3).take(3).collect();
        assert_eq!(squares, vec![9, 16, 25]);
    }

    #[test]
    fn test_repeat_func_calls_exactly_times() {
        let products: Vec<i64> =
            RepeatFunc::new(Box::new(vec![2, 3].into_iter()), |args| args[0] * args[1], 4)
                .collect();
        assert_eq!(products, vec![6, 6, 6, 6]);
    }

    #[test]
    fn test_repeat_func_zero_times_never_pulls_source() {
        let source = std::iter::from_fn(|| -> Option<i32> {
            panic!("argument source must not be pulled");
        });
        let calls: Vec<i32> = RepeatFunc::new(Box::new(source), |_| 1, 0).collect();
        assert!(calls.is_empty());
    }

    #[test]
    fn test_repeat_func_is_not_memoized() {
        let mut counter = 0;
        let calls: Vec<i32> = RepeatFunc::new(
            Box::new(std::iter::empty::<i32>()),
            move |_| {
                counter += 1;
                counter
            },
            3,
        )
        .collect();
        assert_eq!(calls, vec![1, 2, 3]);
    }
}
