use std::path::PathBuf;

use feedfix_cli::pipeline::{BucketSummary, FeedOrigin};
use feedfix_patch::ContentPatch;

#[derive(Debug)]
pub struct FixResult {
    pub source: PathBuf,
    pub origin: FeedOrigin,
    pub stale_cache: bool,
    pub blog_id: String,
    pub buckets: Vec<BucketSummary>,
    pub patches: Vec<ContentPatch>,
    pub plan_path: Option<PathBuf>,
    /// Number of dry-run submissions, when `--apply` was given.
    pub applied: Option<usize>,
}

#[derive(Debug)]
pub struct InspectResult {
    pub source: PathBuf,
    pub origin: FeedOrigin,
    pub stale_cache: bool,
    /// Total fields on the feed record, buckets included.
    pub field_count: usize,
    pub buckets: Vec<BucketSummary>,
}

#[derive(Debug)]
pub struct ClearCacheResult {
    pub cache_path: PathBuf,
    pub removed: bool,
}
