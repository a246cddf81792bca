//! The closed catalogue of element types.
//!
//! Each catalogue entry implements [`Element`] and gets two aliases: a
//! thread-safe `<Name>Set` and a `ThreadUnsafe<Name>Set`.
//!
//! | Element      | Thread-safe    | Thread-unsafe              |
//! |--------------|----------------|----------------------------|
//! | `bool`       | [`BoolSet`]    | [`ThreadUnsafeBoolSet`]    |
//! | `i8`         | [`Int8Set`]    | [`ThreadUnsafeInt8Set`]    |
//! | `i16`        | [`Int16Set`]   | [`ThreadUnsafeInt16Set`]   |
//! | `i32`        | [`Int32Set`]   | [`ThreadUnsafeInt32Set`]   |
//! | `i64`        | [`Int64Set`]   | [`ThreadUnsafeInt64Set`]   |
//! | `isize`      | [`IntSet`]     | [`ThreadUnsafeIntSet`]     |
//! | `u8`         | [`Uint8Set`]   | [`ThreadUnsafeUint8Set`]   |
//! | `u16`        | [`Uint16Set`]  | [`ThreadUnsafeUint16Set`]  |
//! | `u32`        | [`Uint32Set`]  | [`ThreadUnsafeUint32Set`]  |
//! | `u64`        | [`Uint64Set`]  | [`ThreadUnsafeUint64Set`]  |
//! | `usize`      | [`UintSet`]    | [`ThreadUnsafeUintSet`]    |
//! | [`Float32`]  | [`Float32Set`] | [`ThreadUnsafeFloat32Set`] |
//! | [`Float64`]  | [`Float64Set`] | [`ThreadUnsafeFloat64Set`] |
//! | `String`     | [`StringSet`]  | [`ThreadUnsafeStringSet`]  |
//! | [`Timestamp`]| [`TimeSet`]    | [`ThreadUnsafeTimeSet`]    |
//!
//! # Examples
//!
//! ```rust
//! use mapset::catalogue::{Float64Set, ThreadUnsafeStringSet};
//! use mapset::element::Float64;
//!
//! let floats = Float64Set::new();
//! floats.add(Float64::new(0.5));
//! assert_eq!(floats.cardinality(), 1);
//!
//! let mut names = ThreadUnsafeStringSet::new();
//! names.add("ada".to_string());
//! assert!(names.contains(&["ada".to_string()]));
//! ```

use crate::element::{Element, Float32, Float64, Timestamp, sealed};
use crate::set::{ThreadSafeSet, ThreadUnsafeSet};

macro_rules! element_catalogue {
    ($($element:ty => $name:ident),* $(,)?) => {
        paste::paste! {
            $(
                impl sealed::Sealed for $element {}
                impl Element for $element {}

                #[doc = concat!("A thread-safe set of `", stringify!($element), "`.")]
                pub type [<$name Set>] = ThreadSafeSet<$element>;

                #[doc = concat!("A thread-unsafe set of `", stringify!($element), "`.")]
                pub type [<ThreadUnsafe $name Set>] = ThreadUnsafeSet<$element>;
            )*
        }
    };
}

element_catalogue! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    isize => Int,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    usize => Uint,
    Float32 => Float32,
    Float64 => Float64,
    String => String,
    Timestamp => Time,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    #[rstest]
    fn test_bool_set_holds_at_most_two() {
        let set = BoolSet::new();
        set.add(true);
        set.add(false);
        set.add(true);
        assert_eq!(set.cardinality(), 2);
    }

    #[rstest]
    fn test_float_set_folds_signed_zero_and_nan() {
        let mut set = ThreadUnsafeFloat32Set::new();
        assert!(set.add(Float32::new(0.0)));
        assert!(!set.add(Float32::new(-0.0)));
        assert!(set.add(Float32::new(f32::NAN)));
        assert!(!set.add(Float32::new(f32::NAN)));
        assert_eq!(set.cardinality(), 2);
    }

    #[rstest]
    fn test_time_set_compares_instants() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let set = TimeSet::new();
        assert!(set.add(instant));
        assert!(!set.add(instant));
        assert!(set.contains(&[instant]));
    }

    #[rstest]
    fn test_platform_width_sets() {
        let signed = IntSet::new();
        signed.add(-1);
        let unsigned = ThreadUnsafeUintSet::from_iter([usize::MAX]);
        assert_eq!(signed.cardinality(), 1);
        assert_eq!(unsigned.to_vec(), vec![usize::MAX]);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_time_set_json_uses_rfc3339() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let set = TimeSet::new();
        set.add(instant);
        assert_eq!(set.to_json().unwrap(), r#"["2024-01-02T03:04:05Z"]"#);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn test_float_set_json_rejects_non_finite(#[case] value: f64) {
        let set = Float64Set::new();
        set.add(Float64::new(1.0));
        set.add(Float64::new(value));
        assert!(matches!(set.to_json(), Err(crate::SetError::Encode(_))));

        let plain = set.into_thread_unsafe();
        assert!(matches!(plain.to_json(), Err(crate::SetError::Encode(_))));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_finite_float_set_json_round_trips() {
        let set = ThreadUnsafeFloat32Set::from_iter([Float32::new(0.5), Float32::new(-3.0)]);
        let json = set.to_json().unwrap();
        let mut decoded = ThreadUnsafeFloat32Set::new();
        decoded.extend_from_json(&json).unwrap();
        assert_eq!(decoded, set);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_float_set_json_is_bare_numbers() {
        let set = Float64Set::new();
        set.add(Float64::new(1.5));
        assert_eq!(set.to_json().unwrap(), "[1.5]");
    }
}
