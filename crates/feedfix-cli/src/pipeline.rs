//! Feed processing pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Digest**: Hash the source export for staleness reporting
//! 2. **Load**: Reuse the cache sidecar, or parse + normalize + store
//! 3. **Plan**: Derive content patches (handled by `feedfix-patch`)
//!
//! Each stage returns typed results and logs its duration under a span.

use std::fmt;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, warn};

use feedfix_cache::{load_cached_feed, source_digest, store_cached_feed};
use feedfix_ingest::read_feed_file;
use feedfix_model::{Record, Value};
use feedfix_normalize::normalize;

// ============================================================================
// Stage 1-2: Digest and load
// ============================================================================

/// How the normalized feed was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOrigin {
    /// Read back from the cache sidecar.
    Cache,
    /// Freshly parsed and normalized from the source file.
    Normalized,
}

impl fmt::Display for FeedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedOrigin::Cache => f.write_str("cache"),
            FeedOrigin::Normalized => f.write_str("normalized"),
        }
    }
}

/// Result of the load stage.
#[derive(Debug)]
pub struct LoadedFeed {
    /// The normalized feed record.
    pub feed: Record,
    pub origin: FeedOrigin,
    /// Digest of the source file as it is now.
    pub source_digest: String,
    /// True when the cache sidecar was used but was built from a
    /// different copy of the source file.
    pub stale: bool,
}

/// Load the normalized feed for a source export.
///
/// The cache sidecar is preferred when present; a digest mismatch is
/// reported but does not invalidate it. With `refresh` the sidecar is
/// ignored and overwritten with a fresh normalization.
pub fn load_feed(source: &Path, refresh: bool) -> Result<LoadedFeed> {
    let load_span = info_span!("load_feed", source = %source.display());
    let _load_guard = load_span.enter();

    let digest_start = Instant::now();
    let digest = source_digest(source)
        .with_context(|| format!("digest {}", source.display()))?;
    debug!(
        digest = %digest,
        duration_ms = digest_start.elapsed().as_millis(),
        "source digested"
    );

    if !refresh
        && let Some(cached) = load_cached_feed(source).context("load cache sidecar")?
    {
        let stale = cached.source_digest != digest;
        if stale {
            warn!(
                cached_digest = %cached.source_digest,
                current_digest = %digest,
                "cache was built from a different copy of the source; use --refresh to rebuild"
            );
        }
        let Value::Record(feed) = cached.feed else {
            bail!("cached feed is not a record; run clear-cache and retry");
        };
        info!(field_count = feed.len(), stale, "feed loaded from cache");
        return Ok(LoadedFeed {
            feed,
            origin: FeedOrigin::Cache,
            source_digest: digest,
            stale,
        });
    }

    let parse_start = Instant::now();
    let root = info_span!("parse")
        .in_scope(|| read_feed_file(source))
        .with_context(|| format!("parse {}", source.display()))?;
    debug!(
        root_tag = %root.tag,
        child_count = root.children.len(),
        duration_ms = parse_start.elapsed().as_millis(),
        "feed parsed"
    );

    let normalize_start = Instant::now();
    let (value, root_tag) = info_span!("normalize")
        .in_scope(|| normalize(&root))
        .context("normalize feed")?;
    debug!(
        root_tag = %root_tag,
        duration_ms = normalize_start.elapsed().as_millis(),
        "feed normalized"
    );

    store_cached_feed(source, &digest, &value).context("write cache sidecar")?;

    let Value::Record(feed) = value else {
        bail!("feed root <{root_tag}> normalized to a bare value; nothing to fix");
    };
    info!(field_count = feed.len(), "feed normalized and cached");
    Ok(LoadedFeed {
        feed,
        origin: FeedOrigin::Normalized,
        source_digest: digest,
        stale: false,
    })
}

// ============================================================================
// Bucket summaries
// ============================================================================

/// Per-bucket counts for summary tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSummary {
    /// Field name the bucket is stored under (`post`, `page`, `draft`, ...).
    pub name: String,
    pub entries: usize,
    /// Entries carrying at least one label.
    pub labelled: usize,
    /// Entries with a non-empty body.
    pub with_content: usize,
}

/// Summarize every list-valued field of a normalized feed.
pub fn summarize_buckets(feed: &Record) -> Vec<BucketSummary> {
    feed.iter()
        .filter_map(|(name, value)| {
            let entries = value.as_list()?;
            Some(BucketSummary {
                name: name.to_string(),
                entries: entries.len(),
                labelled: entries
                    .iter()
                    .filter(|entry| entry.field("label").is_some())
                    .count(),
                with_content: entries
                    .iter()
                    .filter(|entry| {
                        matches!(
                            entry.field("content"),
                            Some(Value::Scalar(Some(text))) if !text.is_empty()
                        )
                    })
                    .count(),
            })
        })
        .collect()
}
