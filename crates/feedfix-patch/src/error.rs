//! Patch planning error types.

use std::path::PathBuf;
use thiserror::Error;

/// Patch planning error.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The feed id does not carry a blog id segment.
    #[error("Cannot derive a blog id from feed id {id:?}")]
    BlogId { id: String },

    /// The entry id does not carry a numeric suffix.
    #[error("Cannot derive an entry id from {id:?}")]
    EntryId { id: String },

    /// The bucket needed for id derivation is absent or empty.
    #[error("Feed has no {kind} entries")]
    MissingBucket { kind: &'static str },

    /// An entry is missing a field the plan needs, or the field is not text.
    #[error("A {kind} entry is missing required field {field:?}")]
    EntryField {
        kind: &'static str,
        field: &'static str,
    },

    /// File I/O error while writing a plan.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Plan serialization error.
    #[error("Failed to encode patch plan for {path}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for patch operations.
pub type Result<T> = std::result::Result<T, PatchError>;
