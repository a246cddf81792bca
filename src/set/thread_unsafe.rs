//! Unsynchronized hash set.
//!
//! [`ThreadUnsafeSet`] is an [`IndexSet`]-backed collection with no locking
//! of its own. It is the fastest variant for single-threaded code and the
//! storage that [`ThreadSafeSet`](super::ThreadSafeSet) guards.
//!
//! # Examples
//!
//! ```rust
//! use mapset::{Set, ThreadUnsafeSet};
//!
//! let mut set_a: ThreadUnsafeSet<i32> = [1, 2, 3].into_iter().collect();
//! let set_b: ThreadUnsafeSet<i32> = [2, 3, 4].into_iter().collect();
//!
//! assert_eq!(set_a.intersect(&set_b).cardinality(), 2);
//! assert_eq!(set_a.union(&set_b).cardinality(), 4);
//!
//! assert!(set_a.add(5));
//! assert!(!set_a.add(5));
//! ```

use std::fmt;

use crossbeam_channel::Receiver;
use indexmap::IndexSet;
use indexmap::set as index_set;

use super::Set;
use crate::element::Element;
use crate::hasher::DefaultBuildHasher;
use crate::iterator::{self, SetIterator};

#[cfg(feature = "serde")]
use crate::error::{SetError, SetResult};

/// A hash set with no internal synchronization.
///
/// Mutating methods take `&mut self`, so the borrow checker enforces
/// exclusive access; share it across threads only behind your own lock, or
/// use [`ThreadSafeSet`](super::ThreadSafeSet).
///
/// `Clone` produces an independent deep copy.
#[derive(Clone)]
pub struct ThreadUnsafeSet<T> {
    elements: IndexSet<T, DefaultBuildHasher>,
}

impl<T> ThreadUnsafeSet<T> {
    /// Creates an empty set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: IndexSet::with_hasher(DefaultBuildHasher::default()),
        }
    }

    /// Creates an empty set with room for at least `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: IndexSet::with_capacity_and_hasher(capacity, DefaultBuildHasher::default()),
        }
    }

    /// Returns the number of elements in the set.
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Removes every element.
    #[inline]
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Borrows the elements in unspecified order.
    #[inline]
    pub fn elements(&self) -> index_set::Iter<'_, T> {
        self.elements.iter()
    }
}

impl<T: Element> ThreadUnsafeSet<T> {
    /// Adds an element.
    ///
    /// Returns `true` if the element was not already present.
    #[inline]
    pub fn add(&mut self, element: T) -> bool {
        self.elements.insert(element)
    }

    /// Returns `true` if every element of `elements` is in the set.
    ///
    /// An empty slice is trivially contained.
    pub fn contains(&self, elements: &[T]) -> bool {
        elements.iter().all(|element| self.elements.contains(element))
    }

    /// Removes an element if present.
    #[inline]
    pub fn remove(&mut self, element: &T) {
        self.elements.swap_remove(element);
    }

    /// Returns `true` if both sets hold exactly the same elements.
    pub fn equal(&self, other: &Self) -> bool {
        self.cardinality() == other.cardinality()
            && self.elements().all(|element| other.elements.contains(element))
    }

    /// Returns a new set with the elements of both sets.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = Self::with_capacity(self.cardinality().max(other.cardinality()));
        result.extend(self.elements().cloned());
        result.extend(other.elements().cloned());
        result
    }

    /// Returns a new set with the elements present in both sets.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        // Probe the larger set with the smaller one.
        let (smaller, larger) = if self.cardinality() < other.cardinality() {
            (self, other)
        } else {
            (other, self)
        };
        smaller
            .elements()
            .filter(|element| larger.elements.contains(*element))
            .cloned()
            .collect()
    }

    /// Returns a new set with the elements of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.elements()
            .filter(|element| !other.elements.contains(*element))
            .cloned()
            .collect()
    }

    /// Returns a new set with the elements in exactly one of the two sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        self.difference(other).union(&other.difference(self))
    }

    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.cardinality() <= other.cardinality()
            && self.elements().all(|element| other.elements.contains(element))
    }

    /// Returns `true` if `self` is a subset of `other` and the two differ.
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.is_subset(other) && !self.equal(other)
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
    ///
    /// Runs in constant time, so draining a set with `pop` is linear.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.elements.pop()
    }

    /// Visits each element until `visit` returns `true`.
    pub fn each<F>(&self, mut visit: F)
    where
        F: FnMut(&T) -> bool,
    {
        for element in self.elements() {
            if visit(element) {
                break;
            }
        }
    }

    /// Streams the elements through a channel fed by a background thread.
    ///
    /// The stream covers the elements present when `iter` was called.
    /// Dropping the receiver ends the producer.
    #[allow(clippy::iter_not_returning_iterator)]
    pub fn iter(&self) -> Receiver<T> {
        let snapshot = self.to_vec();
        iterator::spawn_stream(move |emitter| iterator::emit_all(emitter, snapshot))
    }

    /// Streams the elements through a stoppable [`SetIterator`].
    ///
    /// The stream covers the elements present when `iterator` was called.
    pub fn iterator(&self) -> SetIterator<T> {
        let snapshot = self.to_vec();
        iterator::spawn_iterator(move |emitter| iterator::emit_all(emitter, snapshot))
    }

    /// Copies the elements into a vector, in unspecified order.
    pub fn to_vec(&self) -> Vec<T> {
        self.elements().cloned().collect()
    }
}

#[cfg(feature = "serde")]
impl<T: Element> ThreadUnsafeSet<T> {
    /// Encodes the set as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Encode`] if an element cannot be encoded.
    pub fn to_json(&self) -> SetResult<String> {
        serde_json::to_string(self).map_err(SetError::Encode)
    }

    /// Adds every element of a JSON array to the set.
    ///
    /// Duplicate values collapse into one element. The whole array is
    /// decoded before anything is added, so on error the set is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Decode`] if `json` is not an array of `T`.
    pub fn extend_from_json(&mut self, json: &str) -> SetResult<()> {
        let decoded = decode_json_array(json)?;
        self.extend(decoded);
        Ok(())
    }
}

#[cfg(feature = "serde")]
pub(super) fn decode_json_array<T: Element>(json: &str) -> SetResult<Vec<T>> {
    serde_json::from_str(json).map_err(|error| {
        tracing::debug!(%error, "rejected JSON set payload");
        SetError::Decode(error)
    })
}

// =============================================================================
// Set trait
// =============================================================================

impl<T: Element> Set<T> for ThreadUnsafeSet<T> {
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

impl<T> Default for ThreadUnsafeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> PartialEq for ThreadUnsafeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: Element> Eq for ThreadUnsafeSet<T> {}

impl<T: Element> FromIterator<T> for ThreadUnsafeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Element> Extend<T> for ThreadUnsafeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<T> IntoIterator for ThreadUnsafeSet<T> {
    type Item = T;
    type IntoIter = index_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ThreadUnsafeSet<T> {
    type Item = &'a T;
    type IntoIter = index_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements()
    }
}

impl<T: fmt::Display> fmt::Display for ThreadUnsafeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Set{{")?;
        let mut first = true;
        for element in self.elements() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

impl<T: fmt::Debug> fmt::Debug for ThreadUnsafeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.elements()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for ThreadUnsafeSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.cardinality()))?;
        for element in self.elements() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct ThreadUnsafeSetVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> ThreadUnsafeSetVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Element> serde::de::Visitor<'de> for ThreadUnsafeSetVisitor<T> {
    type Value = ThreadUnsafeSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of set elements")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = ThreadUnsafeSet::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(element) = seq.next_element()? {
            set.add(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Element> serde::Deserialize<'de> for ThreadUnsafeSet<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(ThreadUnsafeSetVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
