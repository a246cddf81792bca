//! # mapset
//!
//! Unordered, duplicate-free sets over a closed catalogue of element types,
//! in two flavours sharing one API:
//!
//! - [`ThreadSafeSet`]: a hash set behind a reader/writer lock. Every
//!   operation is linearizable and the set can be shared through an `Arc`.
//! - [`ThreadUnsafeSet`]: the same hash set with no locking, for
//!   single-threaded hot paths.
//!
//! Both can stream their elements lazily through a channel fed by a
//! background thread, either fire-and-forget ([`Set::iter`]) or through a
//! stoppable [`SetIterator`] ([`Set::iterator`]).
//!
//! ## Feature Flags
//!
//! - `serde` (default): `Serialize`/`Deserialize` for sets and elements, and
//!   the JSON helpers `to_json` / `extend_from_json`
//! - `fxhash`: hash elements with `rustc-hash`
//! - `ahash`: hash elements with `ahash`
//! - `full`: Enable all features except the alternative hashers
//!
//! ## Example
//!
//! ```rust
//! use mapset::prelude::*;
//!
//! let set_a = new_set([1, 2, 3]);
//! let set_b = new_set([2, 3, 4]);
//!
//! let mut union = set_a.union(&set_b).to_vec();
//! union.sort_unstable();
//! assert_eq!(union, vec![1, 2, 3, 4]);
//!
//! let mut iterator = set_a.iterator();
//! assert!(iterator.next().is_some());
//! iterator.stop();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use mapset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::element::{Element, Float32, Float64, OrderedPair, Timestamp};
    pub use crate::iterator::{IteratorState, SetIterator};
    pub use crate::set::*;

    #[cfg(feature = "serde")]
    pub use crate::error::{SetError, SetResult};
}

pub mod catalogue;
pub mod element;
pub mod hasher;
pub mod iterator;
pub mod set;

#[cfg(feature = "serde")]
pub mod error;

pub use iterator::{IteratorState, SetIterator};
pub use set::{
    Set, ThreadSafeSet, ThreadUnsafeSet, new_set, new_set_from_slice, new_set_with,
    new_thread_unsafe_set, new_thread_unsafe_set_from_slice,
};

#[cfg(feature = "serde")]
pub use error::{SetError, SetResult};
