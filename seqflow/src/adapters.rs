//! Call-convention adapters.
//!
//! Wrap a plain function so its possibly-absent return value or its error
//! is reported through the explicit containers instead: `Option` becomes
//! [`Optional`], `Result` becomes [`Outcome`]. Thin by contract; the
//! wrapped function is called exactly once per invocation.

use crate::optional::Optional;
use crate::outcome::Outcome;

/// Wraps a function returning a possibly-null value so it reports through a
/// presence/absence container.
pub fn optionally<A, T, F>(func: F) -> impl Fn(A) -> Optional<T>
where
    F: Fn(A) -> Option<T>,
{
    move |input| Optional::of_nullable(func(input))
}

/// Wraps a fallible function so it reports through a success/failure
/// container, capturing any error raised during the call as the failure
/// payload.
pub fn attempt<A, T, E, F>(func: F) -> impl Fn(A) -> Outcome<T>
where
    F: Fn(A) -> Result<T, E>,
    E: Into<anyhow::Error>,
{
    move |input| match func(input) {
        Ok(value) => Outcome::success(value),
        Err(error) => Outcome::failure(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optionally_present_and_absent() {
        let head = optionally(|s: &str| s.chars().next());
        assert_eq!(head("abc"), Optional::Present('a'));
        assert!(head("").is_empty());
    }

    #[test]
    fn test_attempt_success() {
        let parse = attempt(|s: &str| s.parse::<i32>());
        assert_eq!(parse("42").get().unwrap(), 42);
    }

    #[test]
    fn test_attempt_captures_error_unmodified() {
        let parse = attempt(|s: &str| s.parse::<i32>());
        let outcome = parse("not a number");
        assert!(outcome.is_failure());
        let message = outcome.error().map(ToString::to_string);
        assert_eq!(message, Some("invalid digit found in string".to_string()));
    }
}
