//! Normalization error types.

use thiserror::Error;

/// Failure while normalizing an element tree.
///
/// Normalization is fail-fast with no partial results: the first failure in
/// any subtree aborts every ancestor up to the top-level call, and the
/// caller sees exactly one terminal error.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A `published`/`updated` element whose text does not match the export
    /// timestamp layout after colon removal.
    #[error("Invalid {tag} timestamp {text:?}")]
    Timestamp {
        tag: String,
        text: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A required field was absent, or the value that should carry it did
    /// not normalize to a record.
    #[error("Element <{tag}> is missing required field {field:?}")]
    MissingField { tag: String, field: &'static str },
}

/// Result type alias for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;
