//! Error types for the fallible text helpers.

use thiserror::Error;

/// Errors returned by [`format_byte`](crate::bytes::format_byte).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ByteSizeError {
    /// The size was negative (or NaN), which has no human-readable form.
    #[error("byte size must be greater than or equal to 0, got {0}")]
    Negative(f64),
}

/// Errors returned when building a [`DateTimeNormalizer`](crate::datetime::DateTimeNormalizer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    /// The output format contains specifiers chrono cannot render for a
    /// naive date-time (unknown `%` codes, time zone fields, ...).
    #[error("invalid date/time output format: {0:?}")]
    InvalidFormat(String),
}

/// Errors returned by [`LinkResolver::resolve`](crate::links::LinkResolver::resolve).
///
/// A link whose structure matches no known shape is *not* an error; it
/// resolves to an empty record. These variants cover links whose shape is
/// known but whose content is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// A path segment or query value that must be an integer was not.
    #[error("invalid {field} in link: {value:?} is not an integer")]
    InvalidNumber {
        /// Which field was being decoded (`post_id`, `channel`, ...).
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// A comment link carried no group segment in its path.
    #[error("comment link has no group in its path")]
    MissingGroup,
}

/// Result type for link resolution.
pub type LinkResult<T> = Result<T, LinkError>;
