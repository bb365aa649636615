//! Normalized-feed caching.
//!
//! Normalizing a large export is the expensive half of a fix run, so the
//! result is cached in a JSON sidecar next to the source file
//! (`blog.xml.cache` for `blog.xml`). The envelope records the source
//! digest at normalization time; a later run against a modified export
//! can detect and report the drift. The cache is never invalidated
//! automatically, only by an explicit refresh or removal.

pub mod digest;
pub mod error;
pub mod store;

pub use digest::source_digest;
pub use error::{CacheError, Result};
pub use store::{
    CACHE_FORMAT, CACHE_VERSION, CachedFeed, cache_path, load_cached_feed, remove_cached_feed,
    store_cached_feed,
};
