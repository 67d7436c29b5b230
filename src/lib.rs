//! # Pull-based lazy sequence adapters
//!
//! This library reimplements two well-known lazy-sequence combinators —
//! a deduplicating filter (`distinct_by`) and a sequence flattener
//! (`flatten` / `flatten_map`) — as explicit pull-based state machines,
//! and benchmarks them against their standard-library spellings.
//!
//! ## Design
//!
//! 1. **One state machine**: every adapter stages at most one element in a
//!    three-state [`PullState`] (`NotComputed | Ready | Done`)
//! 2. **Two views of the same machine**: plain [`Iterator`] for ecosystem
//!    interop, plus the explicit [`Sequence`] contract with an idempotent
//!    `has_next` and a `try_next` that fails on exhaustion instead of
//!    wrapping around
//! 3. **Strict laziness**: key selectors run exactly once per pulled
//!    element; outer-to-inner mappers never see outer elements past the
//!    last one the consumer needed
//!
//! ## Usage Example
//!
//! ```
//! use pullseq::{flatten, SequenceExt};
//!
//! let firsts: Vec<_> = ["ant", "axe", "bat"]
//!     .into_iter()
//!     .distinct_by(|word| word.as_bytes()[0])
//!     .collect();
//! assert_eq!(firsts, vec!["ant", "bat"]);
//!
//! let flat: Vec<_> = flatten(vec![vec![1, 2], vec![], vec![3]]).collect();
//! assert_eq!(flat, vec![1, 2, 3]);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

use std::hash::Hash;

// Core modules - each implements one adapter or the shared machinery
pub mod pull;     // Pull-state machine and lazy-sequence contract
pub mod distinct; // Distinct-filter adapter
pub mod flatten;  // Flatten / flat-map adapters
pub mod dataset;  // Deterministic benchmark input generation

// Re-exports for convenience
pub use distinct::DistinctBy;
pub use flatten::{FlatMap, Flatten};
pub use pull::{PullState, Sequence, Staged};

use thiserror::Error;

/// Errors produced by the [`Sequence`] contract.
///
/// Caller-supplied selectors and mappers are never caught here; if one
/// panics, the panic propagates and the adapter must not be pulled again.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    /// `try_next` was called with no further elements available.
    #[error("sequence exhausted: no further elements to consume")]
    Exhausted,
}

/// Produce a lazy sequence retaining, in source order, the first element
/// for every distinct key computed by `selector`.
///
/// Keys are compared by equality and hash. The selector is invoked exactly
/// once per source element actually pulled, before the membership test.
pub fn distinct_by<I, F, K>(source: I, selector: F) -> DistinctBy<I::IntoIter, F, K>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> K,
    K: Eq + Hash,
{
    DistinctBy::new(source.into_iter(), selector)
}

/// Produce a lazy sequence concatenating the iterables yielded by
/// `source`, in order, skipping empty ones.
pub fn flatten<I>(source: I) -> Flatten<I::IntoIter>
where
    I: IntoIterator,
    I::Item: IntoIterator,
{
    Flatten::new(source.into_iter())
}

/// Produce a lazy sequence concatenating the inner iterables obtained by
/// applying `mapper` to each element of `source`.
///
/// The mapper is invoked exactly once per outer element visited; outer
/// elements past the last one the consumer needs are never visited.
pub fn flatten_map<I, F, J>(source: I, mapper: F) -> FlatMap<I::IntoIter, F, J>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> J,
    J: IntoIterator,
{
    FlatMap::new(source.into_iter(), mapper)
}

/// Adapter constructors as iterator extension methods.
///
/// Named to avoid shadowing the standard `Iterator::flatten` and
/// `Iterator::flat_map`, which these adapters are benchmarked against.
pub trait SequenceExt: Iterator {
    /// See [`distinct_by`].
    fn distinct_by<F, K>(self, selector: F) -> DistinctBy<Self, F, K>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> K,
        K: Eq + Hash,
    {
        DistinctBy::new(self, selector)
    }

    /// See [`flatten`].
    fn flatten_seqs(self) -> Flatten<Self>
    where
        Self: Sized,
        Self::Item: IntoIterator,
    {
        Flatten::new(self)
    }

    /// See [`flatten_map`].
    fn flat_map_seq<F, J>(self, mapper: F) -> FlatMap<Self, F, J>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> J,
        J: IntoIterator,
    {
        FlatMap::new(self, mapper)
    }

    /// Give any iterator the explicit [`Sequence`] contract.
    fn staged(self) -> Staged<Self>
    where
        Self: Sized,
    {
        Staged::new(self)
    }
}

impl<I: Iterator> SequenceExt for I {}
