//! Generic transform applicator.
//!
//! Lets a pipeline hand its lazy sequence to an externally supplied
//! transformation function along with a configuration map of named options.
//! The map resolves a small fixed set of name aliases, so callers can use
//! the pipeline's canonical option names without knowing which spelling the
//! target function expects (`func` vs `function` being the notorious case).

use std::any::Any;
use std::collections::HashMap;

/// Canonical option names understood across transformation functions.
pub const CANONICAL_NAMES: &[&str] = &[
    "func",
    "function",
    "start",
    "stop",
    "step",
    "n",
    "times",
    "initial",
    "repeat",
    "fillvalue",
];

/// Fixed alias table: a lookup under the left name also consults the right.
const ALIASES: &[(&str, &str)] = &[("func", "function"), ("function", "func")];

fn alias_of(name: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(canonical, _)| *canonical == name)
        .map(|(_, alias)| *alias)
}

/// Configuration map passed to an external transformation function.
///
/// Values are stored type-erased; a typed `get` with the wrong type behaves
/// like a missing option. Unordered for matching purposes.
#[derive(Default)]
pub struct Options {
    values: HashMap<String, Box<dyn Any>>,
}

impl Options {
    /// Creates an empty configuration map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named option, builder style.
    #[must_use]
    pub fn with<V: Any>(mut self, name: impl Into<String>, value: V) -> Self {
        self.values.insert(name.into(), Box::new(value));
        self
    }

    /// Looks up an option by name, falling back to its known alias.
    pub fn get<V: Any>(&self, name: &str) -> Option<&V> {
        if let Some(value) = self.values.get(name).and_then(|v| v.downcast_ref()) {
            return Some(value);
        }
        alias_of(name)
            .and_then(|alias| self.values.get(alias))
            .and_then(|v| v.downcast_ref())
    }

    /// Looks up an option, returning `default` when absent.
    pub fn get_or<V: Any + Clone>(&self, name: &str, default: V) -> V {
        self.get(name).cloned().unwrap_or(default)
    }

    /// Returns whether the name (or its alias) is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
            || alias_of(name).is_some_and(|alias| self.values.contains_key(alias))
    }

    /// Number of stored options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Options").field("names", &names).finish()
    }
}

/// An external sequence-transformation function.
///
/// Receives the pipeline's current lazy sequence as its first input and the
/// configuration map as its second; returns the transformed lazy sequence.
/// Implemented for any matching closure.
pub trait Transform<T, U> {
    /// Applies the transformation. Must not force evaluation of the input;
    /// an eager implementation is the caller's responsibility.
    fn apply(&self, input: Box<dyn Iterator<Item = T>>, options: &Options)
        -> Box<dyn Iterator<Item = U>>;
}

impl<T, U, F> Transform<T, U> for F
where
    F: Fn(Box<dyn Iterator<Item = T>>, &Options) -> Box<dyn Iterator<Item = U>>,
{
    fn apply(
        &self,
        input: Box<dyn Iterator<Item = T>>,
        options: &Options,
    ) -> Box<dyn Iterator<Item = U>> {
        self(input, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_exact_name() {
        let options = Options::new().with("times", 3usize);
        assert_eq!(options.get::<usize>("times"), Some(&3));
    }

    #[test]
    fn test_get_missing_name() {
        let options = Options::new();
        assert_eq!(options.get::<usize>("times"), None);
    }

    #[test]
    fn test_func_resolves_under_function() {
        let options = Options::new().with("func", "mul".to_string());
        assert_eq!(options.get::<String>("function"), Some(&"mul".to_string()));
    }

    #[test]
    fn test_function_resolves_under_func() {
        let options = Options::new().with("function", 7i64);
        assert_eq!(options.get::<i64>("func"), Some(&7));
        assert!(options.contains("func"));
    }

    #[test]
    fn test_exact_name_wins_over_alias() {
        let options = Options::new().with("func", 1i64).with("function", 2i64);
        assert_eq!(options.get::<i64>("func"), Some(&1));
        assert_eq!(options.get::<i64>("function"), Some(&2));
    }

    #[test]
    fn test_wrong_type_reads_as_absent() {
        let options = Options::new().with("start", 5i64);
        assert_eq!(options.get::<String>("start"), None);
        assert_eq!(options.get_or("start", 0i64), 5);
    }

    #[test]
    fn test_stored_closure_option() {
        let options = Options::new().with("func", Box::new(|a: i64, b: i64| a * b) as Box<dyn Fn(i64, i64) -> i64>);
        let func = options
            .get::<Box<dyn Fn(i64, i64) -> i64>>("function")
            .unwrap();
        assert_eq!(func(6, 7), 42);
    }

    #[test]
    fn test_canonical_names_cover_alias_pair() {
        assert!(CANONICAL_NAMES.contains(&"func"));
        assert!(CANONICAL_NAMES.contains(&"function"));
    }
}
