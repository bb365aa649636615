//! Patch plan construction.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use feedfix_model::{Record, Value};

use crate::error::{PatchError, Result};
use crate::id::{blog_id, entry_suffix};

/// Entry kinds that take content patches, in walk order.
pub const PATCH_KINDS: [&str; 2] = ["page", "post"];

/// One content update for a single entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPatch {
    /// Entry id suffix (the part the update API addresses entries by).
    pub id: String,
    /// Entry kind, `page` or `post`.
    pub kind: String,
    /// Full replacement body.
    pub content: String,
}

/// Every content update derived from one normalized feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchPlan {
    pub blog_id: String,
    pub patches: Vec<ContentPatch>,
}

/// Build the patch plan for replacing `from` with `to` in entry bodies.
///
/// Walks the `page` bucket and then the `post` bucket, in bucket order.
/// Entries whose body is null, empty, or unaffected by the substitution
/// are skipped. A feed with no bucket for a kind contributes nothing for
/// that kind; the `draft` bucket is never walked, since the update path
/// publishes. The blog id comes from the first `post` entry, so a feed
/// without posts cannot be planned.
pub fn build_plan(feed: &Record, from: &str, to: &str) -> Result<PatchPlan> {
    let blog_id = feed_blog_id(feed)?;

    let mut patches = Vec::new();
    for kind in PATCH_KINDS {
        let Some(entries) = feed.get(kind).and_then(Value::as_list) else {
            continue;
        };
        for entry in entries {
            if let Some(patch) = plan_entry(entry, kind, from, to)? {
                patches.push(patch);
            }
        }
    }

    Ok(PatchPlan { blog_id, patches })
}

fn feed_blog_id(feed: &Record) -> Result<String> {
    let first_post = feed
        .get("post")
        .and_then(Value::as_list)
        .and_then(|posts| posts.first())
        .ok_or(PatchError::MissingBucket { kind: "post" })?;
    let id = first_post
        .field("id")
        .and_then(Value::as_text)
        .ok_or(PatchError::EntryField {
            kind: "post",
            field: "id",
        })?;
    blog_id(id)
}

fn plan_entry(
    entry: &Value,
    kind: &'static str,
    from: &str,
    to: &str,
) -> Result<Option<ContentPatch>> {
    let id = entry
        .field("id")
        .and_then(Value::as_text)
        .ok_or(PatchError::EntryField { kind, field: "id" })?;
    let id = entry_suffix(id)?;

    let content = match entry.field("content") {
        Some(Value::Scalar(Some(text))) => text.as_str(),
        Some(Value::Scalar(None)) => return Ok(None),
        _ => {
            return Err(PatchError::EntryField {
                kind,
                field: "content",
            });
        }
    };
    if content.is_empty() {
        return Ok(None);
    }

    let replaced = content.replace(from, to);
    if replaced == content {
        return Ok(None);
    }

    Ok(Some(ContentPatch {
        id,
        kind: kind.to_string(),
        content: replaced,
    }))
}

/// Write a plan as pretty JSON for an external submitter.
pub fn write_plan(path: &Path, plan: &PatchPlan) -> Result<()> {
    let json = serde_json::to_vec_pretty(plan).map_err(|e| PatchError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, json).map_err(|e| PatchError::Io {
        operation: "write",
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, content: Option<&str>) -> Value {
        let mut record = Record::new();
        record.insert("id", Value::scalar(id));
        record.insert(
            "content",
            match content {
                Some(text) => Value::scalar(text),
                None => Value::Scalar(None),
            },
        );
        Value::Record(record)
    }

    fn feed(pages: Vec<Value>, posts: Vec<Value>) -> Record {
        let mut feed = Record::new();
        feed.insert("page", Value::List(pages));
        feed.insert("post", Value::List(posts));
        feed
    }

    #[test]
    fn plan_walks_pages_before_posts() {
        let feed = feed(
            vec![entry("blog-8411682.page-101", Some("old body"))],
            vec![
                entry("blog-8411682.post-201", Some("old body")),
                entry("blog-8411682.post-202", Some("fresh body")),
            ],
        );

        let plan = build_plan(&feed, "old", "new").unwrap();
        assert_eq!(plan.blog_id, "8411682");
        assert_eq!(plan.patches.len(), 2);
        assert_eq!(plan.patches[0].kind, "page");
        assert_eq!(plan.patches[0].id, "101");
        assert_eq!(plan.patches[0].content, "new body");
        assert_eq!(plan.patches[1].kind, "post");
        assert_eq!(plan.patches[1].id, "201");
    }

    #[test]
    fn null_empty_and_unchanged_bodies_are_skipped() {
        let feed = feed(
            vec![],
            vec![
                entry("blog-1.post-1", None),
                entry("blog-1.post-2", Some("")),
                entry("blog-1.post-3", Some("unaffected")),
                entry("blog-1.post-4", Some("has old text")),
            ],
        );

        let plan = build_plan(&feed, "old", "new").unwrap();
        assert_eq!(plan.patches.len(), 1);
        assert_eq!(plan.patches[0].id, "4");
        assert_eq!(plan.patches[0].content, "has new text");
    }

    #[test]
    fn absent_page_bucket_contributes_nothing() {
        let mut feed = Record::new();
        feed.insert(
            "post",
            Value::List(vec![entry("blog-1.post-1", Some("old"))]),
        );

        let plan = build_plan(&feed, "old", "new").unwrap();
        assert_eq!(plan.patches.len(), 1);
        assert_eq!(plan.patches[0].kind, "post");
    }

    #[test]
    fn feed_without_posts_cannot_derive_a_blog_id() {
        let feed = feed(vec![entry("blog-1.page-1", Some("old"))], vec![]);
        let err = build_plan(&feed, "old", "new").unwrap_err();
        assert!(matches!(err, PatchError::MissingBucket { kind: "post" }));
    }

    #[test]
    fn entry_missing_content_is_an_error() {
        let mut record = Record::new();
        record.insert("id", Value::scalar("blog-1.post-1"));
        let mut feed = Record::new();
        feed.insert("post", Value::List(vec![Value::Record(record)]));

        let err = build_plan(&feed, "old", "new").unwrap_err();
        assert!(matches!(
            err,
            PatchError::EntryField {
                kind: "post",
                field: "content"
            }
        ));
    }

    #[test]
    fn entry_id_is_read_before_the_body_is_checked() {
        // An unusable id fails even though the body would be skipped.
        let feed = feed(
            vec![entry("nodashes", Some("unaffected"))],
            vec![entry("blog-1.post-1", Some("unaffected"))],
        );
        let err = build_plan(&feed, "old", "new").unwrap_err();
        assert!(matches!(err, PatchError::EntryId { .. }));
    }

    #[test]
    fn write_plan_emits_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let plan = PatchPlan {
            blog_id: "8411682".to_string(),
            patches: vec![ContentPatch {
                id: "201".to_string(),
                kind: "post".to_string(),
                content: "new body".to_string(),
            }],
        };

        write_plan(&path, &plan).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"blog_id\": \"8411682\""));
        let round: PatchPlan = serde_json::from_str(&text).unwrap();
        assert_eq!(round, plan);
    }
}
