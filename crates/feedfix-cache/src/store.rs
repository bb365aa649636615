//! Cache sidecar reading and writing.
//!
//! A normalized feed is cached next to its source export: `blog.xml`
//! gets the sidecar `blog.xml.cache`. The sidecar is a JSON envelope
//! carrying a format marker, a format version, the digest of the source
//! file at normalization time, and the normalized feed itself. Writes
//! are atomic (temp file + rename); a crash never leaves a truncated
//! cache behind.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use feedfix_model::Value;

use crate::error::{CacheError, Result};

/// Format marker stored in every cache envelope.
pub const CACHE_FORMAT: &str = "feedfix-cache";

/// Current cache envelope version.
pub const CACHE_VERSION: u32 = 1;

/// A cache entry as read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFeed {
    /// Digest of the source file when the cache was written.
    pub source_digest: String,
    /// The normalized feed.
    pub feed: Value,
}

#[derive(Deserialize)]
struct CacheEnvelope {
    format: String,
    version: u32,
    source_digest: String,
    feed: Value,
}

// Serialization goes through a borrowed struct so the feed value is
// streamed straight to JSON. Routing it through serde_json::Value would
// lose record field order.
#[derive(Serialize)]
struct CacheEnvelopeRef<'a> {
    format: &'static str,
    version: u32,
    source_digest: &'a str,
    feed: &'a Value,
}

/// Sidecar path for a source file: the full file name plus `.cache`.
pub fn cache_path(source: &Path) -> PathBuf {
    append_suffix(source, ".cache")
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Load the cached feed for a source file.
///
/// Returns `Ok(None)` when no sidecar exists. An unreadable or
/// malformed sidecar is an error; staleness (digest mismatch against
/// the current source) is the caller's concern, not handled here.
pub fn load_cached_feed(source: &Path) -> Result<Option<CachedFeed>> {
    let path = cache_path(source);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(CacheError::Io {
                operation: "read",
                path,
                source: e,
            });
        }
    };

    let envelope: CacheEnvelope =
        serde_json::from_slice(&bytes).map_err(|e| CacheError::Deserialize {
            path: path.clone(),
            source: e,
        })?;

    if envelope.format != CACHE_FORMAT {
        return Err(CacheError::InvalidFormat {
            path,
            found: envelope.format,
        });
    }

    if envelope.version > CACHE_VERSION {
        return Err(CacheError::UnsupportedVersion {
            found: envelope.version,
            max_supported: CACHE_VERSION,
            path,
        });
    }

    tracing::debug!(path = %path.display(), "loaded cached feed");
    Ok(Some(CachedFeed {
        source_digest: envelope.source_digest,
        feed: envelope.feed,
    }))
}

/// Write the cache sidecar for a source file, returning the sidecar path.
///
/// Uses atomic write (temp file + rename) to prevent data corruption
/// on crash or power loss. A store that fails after the temp file
/// exists removes it before returning.
pub fn store_cached_feed(source: &Path, source_digest: &str, feed: &Value) -> Result<PathBuf> {
    let path = cache_path(source);
    let envelope = CacheEnvelopeRef {
        format: CACHE_FORMAT,
        version: CACHE_VERSION,
        source_digest,
        feed,
    };
    let bytes = serde_json::to_vec_pretty(&envelope).map_err(|e| CacheError::Serialize {
        path: path.clone(),
        source: e,
    })?;

    let temp_path = append_suffix(&path, ".tmp");

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| CacheError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| CacheError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    if let Err(error) = commit_temp(&mut file, &bytes, &temp_path, &path) {
        drop(file);
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }

    tracing::info!("Cached normalized feed at {}", path.display());
    Ok(path)
}

fn commit_temp(file: &mut File, bytes: &[u8], temp_path: &Path, target: &Path) -> Result<()> {
    file.write_all(bytes).map_err(|e| CacheError::Io {
        operation: "write",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.sync_all().map_err(|e| CacheError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    fs::rename(temp_path, target).map_err(|e| CacheError::AtomicWriteFailed {
        temp_path: temp_path.to_path_buf(),
        target_path: target.to_path_buf(),
        source: e,
    })
}

/// Delete the cache sidecar for a source file.
///
/// Returns `Ok(true)` when a sidecar was removed, `Ok(false)` when none
/// existed.
pub fn remove_cached_feed(source: &Path) -> Result<bool> {
    let path = cache_path(source);
    match fs::remove_file(&path) {
        Ok(()) => {
            tracing::info!("Removed cache at {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(CacheError::Io {
            operation: "remove",
            path,
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedfix_model::Record;
    use tempfile::tempdir;

    fn sample_feed() -> Value {
        let mut post = Record::new();
        post.insert("id", Value::scalar("tag:blogger.com,1999:blog-1.post-2"));
        post.insert("title", Value::scalar("First"));
        post.insert("content", Value::scalar("<p>hello</p>"));

        let mut feed = Record::new();
        feed.insert("id", Value::scalar("tag:blogger.com,1999:user-1.blog-1"));
        feed.insert("post", Value::List(vec![Value::Record(post)]));
        Value::Record(feed)
    }

    #[test]
    fn cache_path_appends_to_the_full_name() {
        assert_eq!(
            cache_path(Path::new("/tmp/blog.xml")),
            PathBuf::from("/tmp/blog.xml.cache")
        );
    }

    #[test]
    fn missing_sidecar_loads_as_none() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("blog.xml");
        assert_eq!(load_cached_feed(&source).unwrap(), None);
    }

    #[test]
    fn store_then_load_round_trips_with_field_order() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("blog.xml");
        let feed = sample_feed();

        let sidecar = store_cached_feed(&source, "abc123", &feed).unwrap();
        assert_eq!(sidecar, dir.path().join("blog.xml.cache"));

        let cached = load_cached_feed(&source).unwrap().expect("cached");
        assert_eq!(cached.source_digest, "abc123");
        assert_eq!(cached.feed, feed);

        let post = cached.feed.field("post").and_then(Value::as_list).unwrap();
        let keys: Vec<&str> = post[0].as_record().unwrap().keys().collect();
        assert_eq!(keys, ["id", "title", "content"]);
    }

    #[test]
    fn corrupted_sidecar_is_a_decode_error() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("blog.xml");
        fs::write(cache_path(&source), b"not json at all").unwrap();

        let err = load_cached_feed(&source).unwrap_err();
        assert!(matches!(err, CacheError::Deserialize { .. }));
    }

    #[test]
    fn foreign_format_marker_is_rejected() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("blog.xml");
        fs::write(
            cache_path(&source),
            br#"{"format":"something-else","version":1,"source_digest":"x","feed":{"kind":"Scalar","value":null}}"#,
        )
        .unwrap();

        let err = load_cached_feed(&source).unwrap_err();
        assert!(matches!(err, CacheError::InvalidFormat { found, .. } if found == "something-else"));
    }

    #[test]
    fn future_version_is_rejected() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("blog.xml");
        fs::write(
            cache_path(&source),
            br#"{"format":"feedfix-cache","version":999,"source_digest":"x","feed":{"kind":"Scalar","value":null}}"#,
        )
        .unwrap();

        let err = load_cached_feed(&source).unwrap_err();
        assert!(matches!(err, CacheError::UnsupportedVersion { found: 999, .. }));
    }

    #[test]
    fn remove_reports_whether_a_sidecar_existed() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("blog.xml");

        assert!(!remove_cached_feed(&source).unwrap());
        store_cached_feed(&source, "abc", &sample_feed()).unwrap();
        assert!(remove_cached_feed(&source).unwrap());
        assert!(!cache_path(&source).exists());
    }

    #[test]
    fn failed_store_leaves_no_temp_file_behind() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("blog.xml");
        // A directory at the sidecar path makes the final rename fail.
        fs::create_dir(cache_path(&source)).unwrap();

        let err = store_cached_feed(&source, "abc", &sample_feed()).unwrap_err();
        assert!(matches!(err, CacheError::AtomicWriteFailed { .. }));
        assert!(!append_suffix(&cache_path(&source), ".tmp").exists());
    }
}
