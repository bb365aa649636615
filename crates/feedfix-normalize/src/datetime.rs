//! Export timestamp parsing.
//!
//! `published` and `updated` elements carry an ISO-8601-like instant whose
//! UTC offset is colon-separated (`2016-06-01T12:00:00.000-07:00`). The
//! established normalization removes every `:` first (time-of-day and
//! offset colons alike) and parses the collapsed text against a fixed
//! layout, so the time-of-day arrives as six digits with no separators and
//! the offset as `±HHMM`. The date part is accepted with or without its
//! hyphens.

use chrono::{DateTime, FixedOffset};

use crate::error::{NormalizeError, Result};

/// Leaf tags whose text is parsed as a timestamp.
pub const TIMESTAMP_TAGS: [&str; 2] = ["published", "updated"];

/// Layout of a collapsed timestamp, hyphenated date form:
/// `2016-06-01T120000.000-0700`.
pub const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H%M%S%.f%z";

/// Layout of a collapsed timestamp, bare date form:
/// `20160601T120000.000-0700`.
const FEED_TIMESTAMP_FORMAT_BARE: &str = "%Y%m%dT%H%M%S%.f%z";

/// Whether a leaf with this tag holds a timestamp.
pub fn is_timestamp_tag(tag: &str) -> bool {
    TIMESTAMP_TAGS.contains(&tag)
}

/// Strip all colons from `text`, then parse it as an export timestamp.
///
/// Failure to match either accepted layout is fatal; the error keeps the
/// original (pre-collapse) text.
pub fn parse_feed_timestamp(tag: &str, text: &str) -> Result<DateTime<FixedOffset>> {
    let collapsed = text.replace(':', "");
    DateTime::parse_from_str(&collapsed, FEED_TIMESTAMP_FORMAT)
        .or_else(|primary| {
            DateTime::parse_from_str(&collapsed, FEED_TIMESTAMP_FORMAT_BARE).map_err(|_| primary)
        })
        .map_err(|source| NormalizeError::Timestamp {
            tag: tag.to_string(),
            text: text.to_string(),
            source,
        })
}
