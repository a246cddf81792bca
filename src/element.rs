//! Element types that sets can hold.
//!
//! Sets in this crate are defined over a closed catalogue of element types:
//! booleans, signed and unsigned integers of every width, the two float
//! widths, strings and timestamps. The catalogue is expressed by the sealed
//! [`Element`] trait; see [`crate::catalogue`] for the full list and the
//! per-type set aliases.
//!
//! Rust floats are neither `Eq` nor `Hash`, so the catalogue stores them
//! through the [`Float32`] and [`Float64`] wrappers.
//!
//! # Examples
//!
//! ```rust
//! use mapset::element::Float64;
//!
//! assert_eq!(Float64::new(0.0), Float64::new(-0.0));
//! assert_eq!(Float64::new(f64::NAN), Float64::new(f64::NAN));
//! assert_eq!(Float64::new(1.5).get(), 1.5);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// A point in time, stored in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A type that can be stored in a set.
///
/// This trait is sealed: it is implemented exactly for the types of the
/// element catalogue and cannot be implemented outside this crate.
#[cfg(feature = "serde")]
pub trait Element:
    sealed::Sealed
    + Clone
    + Eq
    + Hash
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
    + serde::Serialize
    + serde::de::DeserializeOwned
{
}

/// A type that can be stored in a set.
///
/// This trait is sealed: it is implemented exactly for the types of the
/// element catalogue and cannot be implemented outside this crate.
#[cfg(not(feature = "serde"))]
pub trait Element:
    sealed::Sealed + Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

// =============================================================================
// Float wrappers
// =============================================================================

macro_rules! float_element {
    ($(#[$meta:meta])* $name:ident, $float:ty, $bits:ty) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name($float);

        // JSON has no NaN or infinity; serde_json would write them as `null`.
        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                if self.0.is_finite() {
                    serde::Serialize::serialize(&self.0, serializer)
                } else {
                    Err(serde::ser::Error::custom(format_args!(
                        "cannot serialize non-finite float {}",
                        self.0
                    )))
                }
            }
        }

        impl $name {
            /// Wraps a float value.
            #[inline]
            #[must_use]
            pub const fn new(value: $float) -> Self {
                Self(value)
            }

            /// Returns the wrapped float value.
            #[inline]
            #[must_use]
            pub const fn get(self) -> $float {
                self.0
            }

            // Every NaN maps to one pattern and -0.0 maps to +0.0.
            fn canonical_bits(self) -> $bits {
                if self.0.is_nan() {
                    <$float>::NAN.to_bits()
                } else if self.0 == 0.0 {
                    0
                } else {
                    self.0.to_bits()
                }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.canonical_bits() == other.canonical_bits()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.canonical_bits().hash(state);
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&self.0, formatter)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, formatter)
            }
        }

        impl From<$float> for $name {
            fn from(value: $float) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $float {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

float_element!(
    /// A 32-bit float usable as a set element.
    ///
    /// Equality and hashing work on the bit pattern after canonicalization:
    /// `-0.0` equals `0.0` and every NaN equals every other NaN.
    Float32,
    f32,
    u32
);

float_element!(
    /// A 64-bit float usable as a set element.
    ///
    /// Equality and hashing work on the bit pattern after canonicalization:
    /// `-0.0` equals `0.0` and every NaN equals every other NaN.
    Float64,
    f64,
    u64
);

// =============================================================================
// OrderedPair
// =============================================================================

/// A 2-tuple of values of one element type.
///
/// Two pairs are equal when both components are equal in the same position.
///
/// # Examples
///
/// ```rust
/// use mapset::element::OrderedPair;
///
/// let pair = OrderedPair::new(1, 2);
/// assert!(pair.equal(&OrderedPair::new(1, 2)));
/// assert!(!pair.equal(&OrderedPair::new(2, 1)));
/// assert_eq!(pair.to_string(), "(1, 2)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderedPair<T> {
    /// The first component.
    pub first: T,
    /// The second component.
    pub second: T,
}

impl<T> OrderedPair<T> {
    /// Creates a pair from its two components.
    #[inline]
    #[must_use]
    pub const fn new(first: T, second: T) -> Self {
        Self { first, second }
    }
}

impl<T: PartialEq> OrderedPair<T> {
    /// Returns `true` if both pairs hold the same values in the same order.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self.first == other.first && self.second == other.second
    }
}

impl<T: fmt::Display> fmt::Display for OrderedPair<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[rstest]
    #[case(0.0, -0.0)]
    #[case(f64::NAN, -f64::NAN)]
    #[case(1.25, 1.25)]
    fn test_float64_equal_values_hash_alike(#[case] left: f64, #[case] right: f64) {
        let left = Float64::new(left);
        let right = Float64::new(right);
        assert_eq!(left, right);
        assert_eq!(hash_of(&left), hash_of(&right));
    }

    #[rstest]
    fn test_float32_distinct_values_differ() {
        assert_ne!(Float32::new(1.0), Float32::new(1.5));
        assert_ne!(Float32::new(f32::NAN), Float32::new(0.0));
    }

    #[rstest]
    fn test_float_display_is_bare_value() {
        assert_eq!(Float32::new(2.5).to_string(), "2.5");
        assert_eq!(format!("{:?}", Float64::new(-1.0)), "-1.0");
    }

    #[rstest]
    fn test_float_conversions() {
        let wrapped: Float64 = 3.0.into();
        let raw: f64 = wrapped.into();
        assert_eq!(raw, 3.0);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn test_float64_rejects_non_finite_serialization(#[case] value: f64) {
        let error = serde_json::to_string(&Float64::new(value)).unwrap_err();
        assert!(error.to_string().contains("non-finite"));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_float32_serializes_finite_and_rejects_nan() {
        assert_eq!(serde_json::to_string(&Float32::new(-2.5)).unwrap(), "-2.5");
        assert!(serde_json::to_string(&Float32::new(f32::NAN)).is_err());
    }

    #[rstest]
    fn test_ordered_pair_equality_is_positional() {
        let pair = OrderedPair::new("a", "b");
        assert!(pair.equal(&OrderedPair::new("a", "b")));
        assert!(!pair.equal(&OrderedPair::new("b", "a")));
    }

    #[rstest]
    fn test_ordered_pair_display() {
        assert_eq!(OrderedPair::new(true, false).to_string(), "(true, false)");
    }
}
