//! Ingestion error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading or materializing a feed document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("Malformed XML near byte {position}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// An attribute list could not be parsed.
    #[error("Malformed attribute list")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// An escape sequence could not be resolved.
    #[error("Invalid character escape")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// The document contains bytes that are not valid UTF-8.
    #[error("Document is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    /// An entity reference that is neither predefined nor a character
    /// reference.
    #[error("Unknown entity reference &{name};")]
    UnknownEntity { name: String },

    /// Nesting beyond the supported depth.
    #[error("Document nesting exceeds {limit} levels")]
    TooDeep { limit: usize },

    /// The document ended without a root element.
    #[error("Document contains no root element")]
    NoRootElement,
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
