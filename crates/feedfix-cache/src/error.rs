//! Cache error types.
//!
//! All cache operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// Cache operation error.
#[derive(Debug, Error)]
pub enum CacheError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sidecar is not a feed cache file.
    #[error("Invalid cache file format: {path}")]
    InvalidFormat { path: PathBuf, found: String },

    /// Unsupported cache format version.
    #[error("Cache file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// Serialization error.
    #[error("Failed to encode cache data for {path}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization error.
    #[error("Failed to decode cache file: {path}")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete cache write")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { path, found } => {
                format!(
                    "The file at {} is not a feed cache (found format marker {:?})",
                    path.display(),
                    found
                )
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => {
                format!(
                    "This cache was written by a newer version of feedfix \
                    (cache version {found}, this version supports up to {max_supported})."
                )
            }
            Self::Serialize { path, .. } => {
                format!("Could not encode the cache data for {}", path.display())
            }
            Self::Deserialize { path, .. } => {
                format!(
                    "Could not read the cache at {}. The file may be corrupted.",
                    path.display()
                )
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not write the cache to {}. Check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::InvalidFormat { .. } | Self::Deserialize { .. } => {
                Some("Delete the cache file (or run clear-cache) and normalize again.".into())
            }
            Self::UnsupportedVersion { .. } => {
                Some("Update feedfix, or run clear-cache to rebuild the cache.".into())
            }
            Self::Serialize { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try a different output location.".into())
            }
        }
    }
}

/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
