//! Lock-guarded hash set.
//!
//! [`ThreadSafeSet`] owns one [`ThreadUnsafeSet`] behind a
//! [`parking_lot::RwLock`]. Every operation holds the lock for its whole
//! duration, so operations on one set are linearizable:
//!
//! - queries (`contains`, `cardinality`, `equal`, `is_subset`, `to_vec`,
//!   `Display`, `to_json`, `each`) take the shared lock;
//! - mutators (`add`, `remove`, `clear`, `pop`, `extend_from_json`) take the
//!   exclusive lock;
//! - binary operations take the shared locks of both operands, always in
//!   the same global order, and return a new, independently locked set;
//! - `iter` and `iterator` hand the shared lock to a background producer,
//!   which holds it until the stream is drained, stopped or abandoned.
//!
//! All methods take `&self`, so a set is shared between threads through an
//! [`Arc`].
//!
//! # Examples
//!
//! ```rust
//! use mapset::new_set;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(new_set::<u64>([]));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|worker| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || {
//!             for value in 0..100 {
//!                 set.add(worker * 100 + value);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(set.cardinality(), 400);
//! ```

use std::fmt;
use std::sync::Arc;

use crossbeam_channel::Receiver;
use parking_lot::RwLock;

use super::{Set, ThreadUnsafeSet};
use crate::element::Element;
use crate::iterator::{self, SetIterator};

#[cfg(feature = "serde")]
use crate::error::SetResult;

/// A hash set guarded by a reader/writer lock.
///
/// `Clone` takes the shared lock and produces an independent deep copy; it
/// never shares storage with the original.
///
/// # Deadlocks
///
/// The visitor passed to [`each`](Self::each) runs under the shared lock
/// and must not mutate the same set. A stream from [`iter`](Self::iter) or
/// [`iterator`](Self::iterator) that is kept alive but never drained keeps
/// the shared lock held, which blocks writers.
pub struct ThreadSafeSet<T> {
    core: Arc<RwLock<ThreadUnsafeSet<T>>>,
}

impl<T> ThreadSafeSet<T> {
    /// Creates an empty set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_core(ThreadUnsafeSet::new())
    }

    /// Creates an empty set with room for at least `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_core(ThreadUnsafeSet::with_capacity(capacity))
    }

    fn from_core(core: ThreadUnsafeSet<T>) -> Self {
        Self {
            core: Arc::new(RwLock::new(core)),
        }
    }

    /// Returns the number of elements in the set.
    pub fn cardinality(&self) -> usize {
        self.core.read().cardinality()
    }

    /// Returns `true` if the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.core.read().is_empty()
    }

    /// Removes every element.
    pub fn clear(&self) {
        self.core.write().clear();
    }

    /// Runs `operation` with both operands' cores read-locked.
    ///
    /// Locks are taken in address order so that `a.union(&b)` racing
    /// `b.union(&a)` cannot deadlock. A set paired with itself is locked
    /// once.
    fn read_pair<R>(
        &self,
        other: &Self,
        operation: impl FnOnce(&ThreadUnsafeSet<T>, &ThreadUnsafeSet<T>) -> R,
    ) -> R {
        if Arc::ptr_eq(&self.core, &other.core) {
            let core = self.core.read();
            return operation(&*core, &*core);
        }
        if Arc::as_ptr(&self.core) < Arc::as_ptr(&other.core) {
            let own = self.core.read();
            let theirs = other.core.read();
            operation(&*own, &*theirs)
        } else {
            let theirs = other.core.read();
            let own = self.core.read();
            operation(&*own, &*theirs)
        }
    }
}

impl<T: Element> ThreadSafeSet<T> {
    /// Adds an element.
    ///
    /// Returns `true` if the element was not already present.
    pub fn add(&self, element: T) -> bool {
        self.core.write().add(element)
    }

    /// Returns `true` if every element of `elements` is in the set.
    pub fn contains(&self, elements: &[T]) -> bool {
        self.core.read().contains(elements)
    }

    /// Removes an element if present.
    pub fn remove(&self, element: &T) {
        self.core.write().remove(element);
    }

    /// Returns `true` if both sets hold exactly the same elements.
    pub fn equal(&self, other: &Self) -> bool {
        self.read_pair(other, ThreadUnsafeSet::equal)
    }

    /// Returns a new set with the elements of both sets.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_core(self.read_pair(other, ThreadUnsafeSet::union))
    }

    /// Returns a new set with the elements present in both sets.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        Self::from_core(self.read_pair(other, ThreadUnsafeSet::intersect))
    }

    /// Returns a new set with the elements of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self::from_core(self.read_pair(other, ThreadUnsafeSet::difference))
    }

    /// Returns a new set with the elements in exactly one of the two sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        Self::from_core(self.read_pair(other, ThreadUnsafeSet::symmetric_difference))
    }

    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.read_pair(other, ThreadUnsafeSet::is_subset)
    }

    /// Returns `true` if `self` is a subset of `other` and the two differ.
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.read_pair(other, ThreadUnsafeSet::is_proper_subset)
    }

    /// Returns `true` if every element of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a superset of `other` and the two differ.
    pub fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    /// Removes and returns an arbitrary element, or `None` if the set is
    /// empty.
    pub fn pop(&self) -> Option<T> {
        self.core.write().pop()
    }

    /// Visits each element under the shared lock until `visit` returns
    /// `true`.
    pub fn each<F>(&self, visit: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.core.read().each(visit);
    }

    /// Streams the live elements through a channel.
    ///
    /// A background thread takes the shared lock when it starts and holds
    /// it until every element has been received or the receiver is dropped.
    #[allow(clippy::iter_not_returning_iterator)]
    pub fn iter(&self) -> Receiver<T> {
        let core = Arc::clone(&self.core);
        iterator::spawn_stream(move |emitter| {
            let core = core.read();
            iterator::emit_all(emitter, core.elements().cloned());
        })
    }

    /// Streams the live elements through a stoppable [`SetIterator`].
    ///
    /// A background thread takes the shared lock when it starts and holds
    /// it until the stream is drained, stopped, or the iterator is dropped.
    pub fn iterator(&self) -> SetIterator<T> {
        let core = Arc::clone(&self.core);
        iterator::spawn_iterator(move |emitter| {
            let core = core.read();
            iterator::emit_all(emitter, core.elements().cloned());
        })
    }

    /// Copies the elements into a vector, in unspecified order.
    pub fn to_vec(&self) -> Vec<T> {
        self.core.read().to_vec()
    }

    /// Converts into an unsynchronized set.
    ///
    /// The storage is moved out when no producer still references it and
    /// copied otherwise.
    #[must_use]
    pub fn into_thread_unsafe(self) -> ThreadUnsafeSet<T> {
        Arc::try_unwrap(self.core)
            .map_or_else(|core| core.read().clone(), RwLock::into_inner)
    }
}

#[cfg(feature = "serde")]
impl<T: Element> ThreadSafeSet<T> {
    /// Encodes the set as a JSON array under the shared lock.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Encode`](crate::SetError::Encode) if an element
    /// cannot be encoded.
    pub fn to_json(&self) -> SetResult<String> {
        self.core.read().to_json()
    }

    /// Adds every element of a JSON array to the set.
    ///
    /// The payload is decoded before the exclusive lock is taken; on error
    /// the set is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Decode`](crate::SetError::Decode) if `json` is
    /// not an array of `T`.
    pub fn extend_from_json(&self, json: &str) -> SetResult<()> {
        let decoded = super::thread_unsafe::decode_json_array(json)?;
        self.core.write().extend(decoded);
        Ok(())
    }
}

// =============================================================================
// Set trait
// =============================================================================

impl<T: Element> Set<T> for ThreadSafeSet<T> {
    fn add(&mut self, element: T) -> bool {
        Self::add(self, element)
    }

    fn remove(&mut self, element: &T) {
        Self::remove(self, element);
    }

    fn contains(&self, elements: &[T]) -> bool {
        Self::contains(self, elements)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn cardinality(&self) -> usize {
        Self::cardinality(self)
    }

    fn equal(&self, other: &Self) -> bool {
        Self::equal(self, other)
    }

    fn union(&self, other: &Self) -> Self {
        Self::union(self, other)
    }

    fn intersect(&self, other: &Self) -> Self {
        Self::intersect(self, other)
    }

    fn difference(&self, other: &Self) -> Self {
        Self::difference(self, other)
    }

    fn symmetric_difference(&self, other: &Self) -> Self {
        Self::symmetric_difference(self, other)
    }

    fn is_subset(&self, other: &Self) -> bool {
        Self::is_subset(self, other)
    }

    fn is_proper_subset(&self, other: &Self) -> bool {
        Self::is_proper_subset(self, other)
    }

    fn each<F>(&self, visit: F)
    where
        F: FnMut(&T) -> bool,
    {
        Self::each(self, visit);
    }

    fn iter(&self) -> Receiver<T> {
        Self::iter(self)
    }

    fn iterator(&self) -> SetIterator<T> {
        Self::iterator(self)
    }

    fn pop(&mut self) -> Option<T> {
        Self::pop(self)
    }

    fn to_vec(&self) -> Vec<T> {
        Self::to_vec(self)
    }

    #[cfg(feature = "serde")]
    fn to_json(&self) -> SetResult<String> {
        Self::to_json(self)
    }

    #[cfg(feature = "serde")]
    fn extend_from_json(&mut self, json: &str) -> SetResult<()> {
        Self::extend_from_json(self, json)
    }
}

// =============================================================================
// Standard trait implementations
// =============================================================================

impl<T: Clone> Clone for ThreadSafeSet<T> {
    fn clone(&self) -> Self {
        Self::from_core(self.core.read().clone())
    }
}

impl<T> Default for ThreadSafeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<ThreadUnsafeSet<T>> for ThreadSafeSet<T> {
    fn from(core: ThreadUnsafeSet<T>) -> Self {
        Self::from_core(core)
    }
}

impl<T: Element> PartialEq for ThreadSafeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: Element> Eq for ThreadSafeSet<T> {}

impl<T: Element> FromIterator<T> for ThreadSafeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_core(iter.into_iter().collect())
    }
}

impl<T: Element> Extend<T> for ThreadSafeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.core.write().extend(iter);
    }
}

impl<T: fmt::Display> fmt::Display for ThreadSafeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.core.read(), formatter)
    }
}

impl<T: fmt::Debug> fmt::Debug for ThreadSafeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.core.read(), formatter)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for ThreadSafeSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&*self.core.read(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Element> serde::Deserialize<'de> for ThreadSafeSet<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <ThreadUnsafeSet<T> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from_core)
    }
}

// =============================================================================
// Tests
// =============================================================================
