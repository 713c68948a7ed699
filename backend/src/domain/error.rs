//! Domain-level error types.
//!
//! These errors are transport agnostic. The inbound HTTP adapter maps them
//! to status codes and the wire-level error envelope; nothing in this module
//! knows about HTTP.

/// Stable machine-readable code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// A downstream dependency (the item store) is unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// A single failure entry surfaced to clients.
///
/// Validation failures carry one entry per violated field; every other
/// failure carries exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    message: String,
    description: String,
}

impl ErrorEntry {
    /// Create an entry from a human-readable message and a supplementary
    /// description of the failing part.
    pub fn new(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            description: description.into(),
        }
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary description of the failing part.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - Carries at least one [`ErrorEntry`].
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("missing", "no row matched");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.entries().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    entries: Vec<ErrorEntry>,
}

impl Error {
    /// Create an error with a single entry.
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code,
            entries: vec![ErrorEntry::new(message, description)],
        }
    }

    /// Create an error carrying multiple entries.
    ///
    /// An empty entry list is replaced by a single generic entry so the
    /// at-least-one invariant holds.
    pub fn with_entries(code: ErrorCode, entries: Vec<ErrorEntry>) -> Self {
        if entries.is_empty() {
            return Self::new(code, "request failed", "no further detail available");
        }
        Self { code, entries }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Failure entries, in the order they were recorded.
    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message, description)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message, description)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ServiceUnavailable,
            message,
            "a downstream dependency did not respond",
        )
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalError,
            message,
            "an unexpected error occurred",
        )
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.entries.first() {
            Some(entry) => write!(f, "{}", entry.message()),
            None => write!(f, "request failed"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn single_entry_constructor_records_code_and_message() {
        let err = Error::invalid_request("name must not be empty", "field 'name'");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.entries().len(), 1);
        assert_eq!(err.entries()[0].message(), "name must not be empty");
        assert_eq!(err.to_string(), "name must not be empty");
    }

    #[rstest]
    fn empty_entry_list_falls_back_to_generic_entry() {
        let err = Error::with_entries(ErrorCode::InvalidRequest, Vec::new());

        assert_eq!(err.entries().len(), 1);
        assert_eq!(err.entries()[0].message(), "request failed");
    }

    #[rstest]
    fn multiple_entries_preserve_order() {
        let err = Error::with_entries(
            ErrorCode::InvalidRequest,
            vec![ErrorEntry::new("first", "a"), ErrorEntry::new("second", "b")],
        );

        let messages: Vec<_> = err.entries().iter().map(ErrorEntry::message).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
