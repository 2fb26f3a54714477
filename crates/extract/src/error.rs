//! Extraction Error Types
//!
//! Extraction itself never fails: every field has a default. These errors
//! only surface from the strict value parsers (`try_*`) and the `FromStr`
//! implementations on the closed enums, which callers can use when they
//! need to know *why* a lenient parser fell back to its default.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The raw value that was rejected.
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Markup is either parsable or it isn't; asking again changes nothing.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        let kind = ErrorKind::ParseError {
            field: "price",
            value: "free".to_string(),
        };
        assert_eq!(kind.to_string(), "failed to parse field 'price', found value: free");
        assert!(!kind.is_retryable());
    }
}
