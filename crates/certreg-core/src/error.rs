//! # Error Types
//!
//! Structured validation errors built with `thiserror`. These carry the
//! reason a request was rejected for operator logs; HTTP clients only ever
//! see a fixed message.

use thiserror::Error;

/// Why a set of certificate parameters was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A date field does not look like `YYYY-MM-DD`.
    #[error("malformed date in {field}: \"{value}\" (expected YYYY-MM-DD)")]
    MalformedDate {
        /// Parameter name (`date` or `expires`).
        field: &'static str,
        /// The text as received.
        value: String,
    },

    /// A date field matched the pattern but names a day that does not exist
    /// (e.g. `2024-02-30`).
    #[error("{field} is not a calendar date: \"{value}\"")]
    NotACalendarDate {
        /// Parameter name (`date` or `expires`).
        field: &'static str,
        /// The text as received.
        value: String,
    },
}
