//! # Seqflow
//!
//! Composable, lazily-evaluated query pipelines over finite or infinite
//! sequences, plus explicit presence/absence and success/failure containers.
//!
//! Seqflow provides:
//!
//! - **Lazy chaining**: every combinator derives a new pipeline; nothing is
//!   materialized until a terminal operation pulls
//! - **Consume-once lifecycle**: a drained pipeline cannot silently replay
//!   elements; later terminal calls yield empty results
//! - **Recipe combinators**: windowing, chunking, deduplication,
//!   interleaving, slicing with negative-index semantics, indexed search
//! - **Explicit results**: [`optional::Optional`] and [`outcome::Outcome`]
//!   instead of null-like sentinels or unchecked error propagation
//!
//! ## Quick Start
//!
//! ```rust
//! use seqflow::prelude::*;
//!
//! let mut windows = Query::new("ABCDE".chars()).sliding_window(3)?;
//! assert_eq!(windows.to_list()?.len(), 3);
//!
//! let mut evens_first = Query::new(0..10).partition(|x| x % 2 == 0);
//! let groups = evens_first.to_list()?;
//! assert_eq!(groups[0], vec![0, 2, 4, 6, 8]);
//! # Ok::<(), seqflow::errors::SeqflowError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod adapters;
pub mod apply;
pub mod combinators;
pub mod errors;
pub mod optional;
pub mod outcome;
pub mod query;
pub mod source;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::{attempt, optionally};
    pub use crate::apply::{Options, Transform};
    pub use crate::combinators::IncompletePolicy;
    pub use crate::errors::{
        EmptyOptionalError, InvalidArgumentError, NullValueError, SeqflowError,
    };
    pub use crate::optional::Optional;
    pub use crate::outcome::Outcome;
    pub use crate::query::Query;
    pub use crate::source::Source;
}

#[cfg(test)]
mod tests {
    #[test]
    fn library_compiles() {
        assert!(true);
    }
}
