//! Pull-state machine shared by every lazy adapter
//!
//! All adapters in this crate stage at most one element between
//! consumptions. The staging discipline is captured once, as a tagged
//! three-state enum, instead of the integer-state and abstract-base
//! variants such machines are often written with:
//!
//!   NotComputed --compute--> Ready(item) --consume--> NotComputed
//!   NotComputed --compute--> Done (source exhausted, terminal)
//!
//! `Ready` owns the staged element, so "the cached element is valid only
//! while the state says ready" holds by construction.

use crate::SequenceError;

/// Staging state of a pull-based adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullState<T> {
    /// The next element has not been computed since the last consumption.
    NotComputed,
    /// The next element is staged and waiting to be consumed.
    Ready(T),
    /// The sequence has terminated; no further elements will appear.
    Done,
}

impl<T> PullState<T> {
    /// True if an element is currently staged.
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, PullState::Ready(_))
    }

    /// True if the sequence has terminated.
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, PullState::Done)
    }

    /// Consume the staged element, resetting the state to `NotComputed`.
    ///
    /// Returns `None` when nothing is staged (`NotComputed` and `Done` are
    /// left untouched apart from the `Ready -> NotComputed` transition).
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        match std::mem::replace(self, PullState::NotComputed) {
            PullState::Ready(item) => Some(item),
            PullState::NotComputed => None,
            PullState::Done => {
                *self = PullState::Done;
                None
            }
        }
    }

    /// State name for diagnostics; avoids a `T: Debug` bound in adapter
    /// `Debug` impls that hold closures.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            PullState::NotComputed => "NotComputed",
            PullState::Ready(_) => "Ready",
            PullState::Done => "Done",
        }
    }
}

/// Lazy-sequence contract: query for a next element without consuming it,
/// or consume it with explicit exhaustion signaling.
///
/// `has_next` may be called any number of times between consumptions; only
/// the first call after a consumption may pull from the underlying source.
/// Once it has returned `false` it keeps returning `false`, and `try_next`
/// keeps returning [`SequenceError::Exhausted`], without further side
/// effects on the source.
pub trait Sequence {
    /// Element type produced by the sequence.
    type Item;

    /// Query whether another element is available, computing and staging it
    /// if necessary.
    fn has_next(&mut self) -> bool;

    /// Consume and return the next element.
    ///
    /// Fails with [`SequenceError::Exhausted`] when no element remains.
    fn try_next(&mut self) -> Result<Self::Item, SequenceError>;
}

/// Adapter giving any iterator the staged [`Sequence`] contract.
///
/// The step extension point is the wrapped iterator itself: an ad-hoc
/// "compute the next element" closure becomes a `Staged` sequence via
/// `std::iter::from_fn(step)`. Between two consumptions the wrapped
/// iterator is advanced at most once.
pub struct Staged<I: Iterator> {
    source: I,
    state: PullState<I::Item>,
}

impl<I: Iterator> Staged<I> {
    /// Wrap an iterator, staging nothing yet.
    pub fn new(source: I) -> Self {
        Self {
            source,
            state: PullState::NotComputed,
        }
    }

    /// Borrow the staged element without consuming it, computing it first
    /// if necessary.
    pub fn peek(&mut self) -> Option<&I::Item> {
        self.ensure();
        match &self.state {
            PullState::Ready(item) => Some(item),
            _ => None,
        }
    }

    fn ensure(&mut self) {
        if let PullState::NotComputed = self.state {
            self.state = match self.source.next() {
                Some(item) => PullState::Ready(item),
                None => PullState::Done,
            };
        }
    }
}

impl<I: Iterator> Sequence for Staged<I> {
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

impl<I: Iterator> Iterator for Staged<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.ensure();
        self.state.take()
    }
}

impl<I: Iterator> std::fmt::Debug for Staged<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Staged")
            .field("state", &self.state.label())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_resets_ready_to_not_computed() {
        let mut state = PullState::Ready(7);
        assert_eq!(state.take(), Some(7));
        assert_eq!(state, PullState::NotComputed);
        assert_eq!(state.take(), None);
    }

    #[test]
    fn take_leaves_done_terminal() {
        let mut state: PullState<i32> = PullState::Done;
        assert_eq!(state.take(), None);
        assert!(state.is_done());
    }

    #[test]
    fn staged_pulls_source_once_per_consumption() {
        let pulls = std::cell::Cell::new(0);
        let mut values = 0..3;
        let mut staged = Staged::new(std::iter::from_fn(|| {
            pulls.set(pulls.get() + 1);
            values.next()
        }));

        // Repeated queries stage exactly one element.
        assert!(staged.has_next());
        assert!(staged.has_next());
        assert_eq!(staged.peek(), Some(&0));
        assert_eq!(staged.try_next(), Ok(0));

        assert_eq!(staged.try_next(), Ok(1));
        assert_eq!(staged.try_next(), Ok(2));
        assert_eq!(staged.try_next(), Err(crate::SequenceError::Exhausted));
        assert!(!staged.has_next());
        assert!(!staged.has_next());

        // 3 elements plus the single pull that observed exhaustion.
        assert_eq!(pulls.get(), 4);
    }

    #[test]
    fn staged_is_an_iterator() {
        let staged = Staged::new([1, 2, 3].into_iter());
        assert_eq!(staged.collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
