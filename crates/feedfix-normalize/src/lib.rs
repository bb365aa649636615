//! Recursive element-to-record normalization for exported feed documents.
//!
//! An exported blog feed is one root element containing repeated `entry`
//! elements (posts, pages, comments, settings). Each entry carries
//! `category` children, exactly one of which is a kind marker (its `scheme`
//! contains `#kind` and its `term` encodes the kind after the final `#`),
//! plus `published`/`updated` timestamps, an optional `control` block
//! flagging drafts, and a `content` body.
//!
//! Normalization turns that tree into one ordered record:
//!
//! - leaves become scalars, timestamps, or attribute records
//!   ([`classify`]);
//! - children fold into their parent under the schema-specific rules:
//!   kind extraction, draft segregation, per-kind scheme buckets, content
//!   unwrapping, and a small ignore list ([`aggregate`]);
//! - [`normalize`] ties the two together recursively.
//!
//! The pass is pure and fail-fast: any rule violation aborts the whole
//! top-level call with a single [`NormalizeError`], never a partial tree.

pub mod aggregate;
pub mod classify;
pub mod datetime;
pub mod error;
pub mod normalize;

pub use aggregate::{IGNORED_CHILD_TAGS, KIND_MARKER, aggregate};
pub use classify::{ATTRIBUTE_ONLY_TAGS, classify};
pub use datetime::{FEED_TIMESTAMP_FORMAT, TIMESTAMP_TAGS, parse_feed_timestamp};
pub use error::{NormalizeError, Result};
pub use normalize::normalize;
