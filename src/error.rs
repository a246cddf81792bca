//! Error type for set serialization.
//!
//! Set operations themselves cannot fail: mismatched operand kinds are
//! rejected by the type system and `pop` on an empty set yields `None`.
//! The only fallible operations are the JSON conversions.

use thiserror::Error;

/// Errors produced when converting a set to or from JSON.
#[derive(Debug, Error)]
pub enum SetError {
    /// The set could not be rendered as a JSON array.
    #[error("failed to encode set as JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// The input was not a JSON array of the set's element type.
    ///
    /// Nothing is added to the target set when this is returned.
    #[error("failed to decode JSON array into set: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Result alias for fallible set operations.
pub type SetResult<T> = Result<T, SetError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn decode_failure() -> serde_json::Error {
        serde_json::from_str::<Vec<i32>>("[1, \"two\"]").unwrap_err()
    }

    #[rstest]
    fn test_decode_error_display_mentions_cause() {
        let error = SetError::Decode(decode_failure());
        let message = error.to_string();
        assert!(message.starts_with("failed to decode JSON array into set: "));
    }

    #[rstest]
    fn test_error_exposes_source() {
        let error = SetError::Decode(decode_failure());
        let source = std::error::Error::source(&error);
        assert!(source.is_some());
    }
}
