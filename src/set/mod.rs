//! The set interface and its two implementations.
//!
//! - [`ThreadSafeSet`]: guarded by a reader/writer lock, safe to share
//!   between threads. Built by [`new_set`], [`new_set_with`] and
//!   [`new_set_from_slice`].
//! - [`ThreadUnsafeSet`]: no locking at all, for single-threaded hot paths.
//!   Built by [`new_thread_unsafe_set`] and
//!   [`new_thread_unsafe_set_from_slice`].
//!
//! Both implement [`Set`]. Binary operations take an operand of the same
//! concrete type as the receiver, so a thread-safe set can never be combined
//! with a thread-unsafe one by accident.
//!
//! # Examples
//!
//! ```rust
//! use mapset::{Set, new_set, new_thread_unsafe_set_from_slice};
//!
//! let set_a = new_set([1, 2, 3]);
//! let set_b = new_set([2, 3, 4]);
//! assert!(set_a.intersect(&set_b).equal(&new_set([2, 3])));
//! assert!(set_a.symmetric_difference(&set_b).equal(&new_set([1, 4])));
//!
//! let letters = new_thread_unsafe_set_from_slice(&["a", "b", "a"].map(String::from));
//! assert_eq!(letters.cardinality(), 2);
//! ```

mod thread_safe;
mod thread_unsafe;

pub use thread_safe::ThreadSafeSet;
pub use thread_unsafe::ThreadUnsafeSet;

use std::fmt;

use crossbeam_channel::Receiver;

use crate::element::Element;
use crate::iterator::SetIterator;

#[cfg(feature = "serde")]
use crate::error::SetResult;

/// Operations shared by every set implementation.
///
/// Enumeration order (`each`, `iter`, `iterator`, `to_vec`, `Display`,
/// `to_json`) is unspecified and may change between calls.
///
/// `Clone` is a deep copy: the clone never shares storage with the original.
///
/// [`ThreadSafeSet`] also provides every mutator as an inherent method taking
/// `&self`; the trait versions take `&mut self` so that [`ThreadUnsafeSet`]
/// can implement them without interior mutability.
pub trait Set<T: Element>: Clone + fmt::Display + Sized {
    /// Adds an element, returning `true` if it was not already present.
    fn add(&mut self, element: T) -> bool;

    /// Removes an element if present.
    fn remove(&mut self, element: &T);

    /// Returns `true` if every element of `elements` is in the set.
    fn contains(&self, elements: &[T]) -> bool;

    /// Removes every element.
    fn clear(&mut self);

    /// Returns the number of elements.
    fn cardinality(&self) -> usize;

    /// Returns `true` if the set holds no elements.
    fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    /// Returns `true` if both sets hold exactly the same elements.
    fn equal(&self, other: &Self) -> bool;

    /// Returns a new set with the elements of both sets.
    #[must_use]
    fn union(&self, other: &Self) -> Self;

    /// Returns a new set with the elements present in both sets.
    #[must_use]
    fn intersect(&self, other: &Self) -> Self;

    /// Returns a new set with the elements of `self` absent from `other`.
    #[must_use]
    fn difference(&self, other: &Self) -> Self;

    /// Returns a new set with the elements in exactly one of the two sets.
    #[must_use]
    fn symmetric_difference(&self, other: &Self) -> Self;

    /// Returns `true` if every element of `self` is in `other`.
    fn is_subset(&self, other: &Self) -> bool;

    /// Returns `true` if `self` is a subset of `other` and the two differ.
    fn is_proper_subset(&self, other: &Self) -> bool;

    /// Returns `true` if every element of `other` is in `self`.
    fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a superset of `other` and the two differ.
    fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    /// Visits each element until `visit` returns `true`.
    fn each<F>(&self, visit: F)
    where
        F: FnMut(&T) -> bool;

    /// Streams the elements through a channel fed by a background thread.
    ///
    /// Receive until the channel closes, or drop the receiver to end the
    /// producer early.
    #[allow(clippy::iter_not_returning_iterator)]
    fn iter(&self) -> Receiver<T>;

    /// Streams the elements through a stoppable [`SetIterator`].
    fn iterator(&self) -> SetIterator<T>;

    /// Removes and returns an arbitrary element, or `None` if empty.
    fn pop(&mut self) -> Option<T>;

    /// Copies the elements into a vector.
    fn to_vec(&self) -> Vec<T>;

    /// Encodes the set as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Encode`](crate::SetError::Encode) if an element
    /// cannot be encoded.
    #[cfg(feature = "serde")]
    fn to_json(&self) -> SetResult<String>;

    /// Adds every element of a JSON array; on error nothing is added.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Decode`](crate::SetError::Decode) if `json` is
    /// not an array of `T`.
    #[cfg(feature = "serde")]
    fn extend_from_json(&mut self, json: &str) -> SetResult<()>;
}

// =============================================================================
// Factories
// =============================================================================

/// Creates a thread-safe set holding `elements`.
pub fn new_set<T: Element>(elements: impl IntoIterator<Item = T>) -> ThreadSafeSet<T> {
    elements.into_iter().collect()
}

/// Creates a thread-safe set holding `elements`.
///
/// Equivalent to [`new_set`].
pub fn new_set_with<T: Element>(elements: impl IntoIterator<Item = T>) -> ThreadSafeSet<T> {
    new_set(elements)
}

/// Creates a thread-safe set holding copies of the slice's elements.
pub fn new_set_from_slice<T: Element>(elements: &[T]) -> ThreadSafeSet<T> {
    new_set(elements.iter().cloned())
}

/// Creates an empty thread-unsafe set.
pub fn new_thread_unsafe_set<T: Element>() -> ThreadUnsafeSet<T> {
    ThreadUnsafeSet::new()
}

/// Creates a thread-unsafe set holding copies of the slice's elements.
pub fn new_thread_unsafe_set_from_slice<T: Element>(elements: &[T]) -> ThreadUnsafeSet<T> {
    elements.iter().cloned().collect()
}

static_assertions::assert_impl_all!(ThreadSafeSet<i64>: Send, Sync);
static_assertions::assert_impl_all!(ThreadSafeSet<String>: Send, Sync);
static_assertions::assert_impl_all!(ThreadUnsafeSet<i64>: Send, Sync);
static_assertions::assert_impl_all!(SetIterator<String>: Send);
