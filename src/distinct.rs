//! Distinct-filter adapter
//!
//! Emits, in source order, only the first element for every distinct key
//! derived by a caller-supplied selector. Unlike the usual
//! `filter`-with-captured-`HashSet` spelling, the seen-set and the staging
//! state live inside one named adapter, so the explicit
//! [`Sequence`](crate::Sequence) contract (idempotent `has_next`, failing
//! `try_next`) comes for free alongside `Iterator`.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use crate::pull::{PullState, Sequence};
use crate::SequenceError;

/// Lazy sequence retaining the first occurrence of each key.
///
/// Created by [`distinct_by`](crate::distinct_by) or
/// [`SequenceExt::distinct_by`](crate::SequenceExt::distinct_by).
pub struct DistinctBy<I: Iterator, F, K> {
    source: I,
    selector: F,
    seen: HashSet<K>,
    state: PullState<I::Item>,
}

impl<I, F, K> DistinctBy<I, F, K>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Eq + Hash,
{
    pub(crate) fn new(source: I, selector: F) -> Self {
        Self {
            source,
            selector,
            seen: HashSet::new(),
            state: PullState::NotComputed,
        }
    }

    /// Pull from the source until an unseen key appears, staging that
    /// element, or mark the sequence done.
    ///
    /// The selector runs exactly once per pulled element, before the
    /// membership test, so selector side effects always precede it.
    fn ensure(&mut self) {
        if let PullState::NotComputed = self.state {
            self.state = loop {
                match self.source.next() {
                    Some(item) => {
                        let key = (self.selector)(&item);
                        if self.seen.insert(key) {
                            break PullState::Ready(item);
                        }
                    }
                    None => break PullState::Done,
                }
            };
        }
    }
}

impl<I, F, K> Sequence for DistinctBy<I, F, K>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Eq + Hash,
{
    type Item = I::Item;

    fn has_next(&mut self) -> bool {
        self.ensure();
        self.state.is_ready()
    }

    fn try_next(&mut self) -> Result<I::Item, SequenceError> {
        self.ensure();
        self.state.take().ok_or(SequenceError::Exhausted)
    }
}

impl<I, F, K> Iterator for DistinctBy<I, F, K>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Eq + Hash,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.ensure();
        self.state.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // At most every remaining source element, plus the staged one.
        let staged = usize::from(self.state.is_ready());
        let (_, upper) = self.source.size_hint();
        (staged, upper.and_then(|u| u.checked_add(staged)))
    }
}

impl<I: Iterator, F, K> fmt::Debug for DistinctBy<I, F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistinctBy")
            .field("seen_keys", &self.seen.len())
            .field("state", &self.state.label())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequenceExt;

    #[test]
    fn keeps_first_occurrence_per_key() {
        let out: Vec<_> = [1, 2, 1, 3, 2, 4].into_iter().distinct_by(|v| *v).collect();
        assert_eq!(out, vec![1, 2, 3, 4]);
    }

    #[test]
    fn key_selector_can_project() {
        // Dedup words by length; first word of each length wins.
        let words = ["to", "be", "or", "not", "the", "a"];
        let out: Vec<_> = words.into_iter().distinct_by(|w| w.len()).collect();
        assert_eq!(out, vec!["to", "not", "a"]);
    }

    #[test]
    fn sequence_contract_after_exhaustion() {
        let mut seq = [5, 5, 5].into_iter().distinct_by(|v| *v);
        assert!(seq.has_next());
        assert_eq!(seq.try_next(), Ok(5));
        assert!(!seq.has_next());
        assert_eq!(seq.try_next(), Err(SequenceError::Exhausted));
        assert_eq!(seq.try_next(), Err(SequenceError::Exhausted));
    }

    #[test]
    fn size_hint_never_exceeds_source() {
        let mut seq = (0..10).distinct_by(|v| v % 3);
        let (lower, upper) = seq.size_hint();
        assert_eq!(lower, 0);
        assert_eq!(upper, Some(10));

        assert!(seq.has_next());
        let (lower, _) = seq.size_hint();
        assert_eq!(lower, 1, "staged element is guaranteed");
    }
}
