//! Hash builder selection.
//!
//! Every set hashes its elements with [`DefaultBuildHasher`], chosen at
//! compile time:
//!
//! - `fxhash` feature: [`rustc_hash::FxBuildHasher`]
//! - `ahash` feature: [`ahash::RandomState`]
//! - neither: [`std::hash::RandomState`] (SipHash)
//!
//! When both features are enabled, `fxhash` wins.

/// The hash builder used by every set in this crate.
#[cfg(feature = "fxhash")]
pub type DefaultBuildHasher = rustc_hash::FxBuildHasher;

/// The hash builder used by every set in this crate.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultBuildHasher = ahash::RandomState;

/// The hash builder used by every set in this crate.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultBuildHasher = std::hash::RandomState;
