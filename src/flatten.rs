//! Flatten adapter
//!
//! Concatenates the inner sequences produced by mapping each outer element,
//! in outer order, skipping empty inners. The current inner iterator lives
//! in an `Option` slot and is drained completely before being replaced;
//! outer elements past the last one the consumer needs are never mapped.

use std::fmt;

use crate::pull::{PullState, Sequence};
use crate::SequenceError;

/// Lazy sequence concatenating mapped inner sequences.
///
/// Created by [`flatten_map`](crate::flatten_map) or
/// [`SequenceExt::flat_map_seq`](crate::SequenceExt::flat_map_seq).
pub struct FlatMap<I, F, J>
where
    I: Iterator,
    J: IntoIterator,
{
    outer: I,
    mapper: F,
    /// Inner iterator currently being drained; `None` before the first
    /// non-empty inner and after termination.
    inner: Option<J::IntoIter>,
    state: PullState<J::Item>,
}

impl<I, F, J> FlatMap<I, F, J>
where
    I: Iterator,
    F: FnMut(I::Item) -> J,
    J: IntoIterator,
{
    pub(crate) fn new(outer: I, mapper: F) -> Self {
        Self {
            outer,
            mapper,
            inner: None,
            state: PullState::NotComputed,
        }
    }

    /// Stage the next element: drain the current inner first, then map
    /// outer elements one at a time until a non-empty inner turns up.
    ///
    /// The mapper runs exactly once per visited outer element.
    fn ensure(&mut self) {
        if let PullState::NotComputed = self.state {
            if let Some(inner) = &mut self.inner {
                if let Some(item) = inner.next() {
                    self.state = PullState::Ready(item);
                    return;
                }
            }
            self.state = loop {
                match self.outer.next() {
                    Some(element) => {
                        let mut candidate = (self.mapper)(element).into_iter();
                        if let Some(item) = candidate.next() {
                            self.inner = Some(candidate);
                            break PullState::Ready(item);
                        }
                    }
                    None => {
                        self.inner = None;
                        break PullState::Done;
                    }
                }
            };
        }
    }
}

impl<I, F, J> Sequence for FlatMap<I, F, J>
where
    I: Iterator,
    F: FnMut(I::Item) -> J,
    J: IntoIterator,
{
    type Item = J::Item;

    fn has_next(&mut self) -> bool {
        self.ensure();
        self.state.is_ready()
    }

    fn try_next(&mut self) -> Result<J::Item, SequenceError> {
        self.ensure();
        self.state.take().ok_or(SequenceError::Exhausted)
    }
}

impl<I, F, J> Iterator for FlatMap<I, F, J>
where
    I: Iterator,
    F: FnMut(I::Item) -> J,
    J: IntoIterator,
{
    type Item = J::Item;

    fn next(&mut self) -> Option<J::Item> {
        self.ensure();
        self.state.take()
    }
}

impl<I, F, J> fmt::Debug for FlatMap<I, F, J>
where
    I: Iterator,
    J: IntoIterator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatMap")
            .field("draining_inner", &self.inner.is_some())
            .field("state", &self.state.label())
            .finish_non_exhaustive()
    }
}

/// Lazy sequence concatenating a source of iterables.
///
/// [`FlatMap`] with an identity mapper; created by
/// [`flatten`](crate::flatten) or
/// [`SequenceExt::flatten_seqs`](crate::SequenceExt::flatten_seqs).
pub struct Flatten<I>
where
    I: Iterator,
    I::Item: IntoIterator,
{
    inner: FlatMap<I, fn(I::Item) -> I::Item, I::Item>,
}

impl<I> Flatten<I>
where
    I: Iterator,
    I::Item: IntoIterator,
{
    pub(crate) fn new(outer: I) -> Self {
        Self {
            inner: FlatMap::new(outer, std::convert::identity as fn(I::Item) -> I::Item),
        }
    }
}

impl<I> Sequence for Flatten<I>
where
    I: Iterator,
    I::Item: IntoIterator,
{
    type Item = <I::Item as IntoIterator>::Item;

    fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    fn try_next(&mut self) -> Result<Self::Item, SequenceError> {
        self.inner.try_next()
    }
}

impl<I> Iterator for Flatten<I>
where
    I: Iterator,
    I::Item: IntoIterator,
{
    type Item = <I::Item as IntoIterator>::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<I> fmt::Debug for Flatten<I>
where
    I: Iterator,
    I::Item: IntoIterator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flatten").field("inner", &self.inner).finish()
    }
}
