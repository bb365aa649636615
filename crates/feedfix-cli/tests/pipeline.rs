//! Integration tests for the pipeline module.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use feedfix_cache::cache_path;
use feedfix_cli::pipeline::{FeedOrigin, load_feed, summarize_buckets};
use feedfix_model::Value;
use feedfix_patch::build_plan;

const FEED_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<feed xmlns='http://www.w3.org/2005/Atom'>
  <id>tag:blogger.com,1999:user-42.blog-8411682.archive</id>
  <updated>2018-03-09T08:30:15.500-08:00</updated>
  <title type='text'>Example Blog</title>
  <entry>
    <id>tag:blogger.com,1999:blog-8411682.post-1001</id>
    <category scheme='http://schemas.google.com/g/2005#kind' term='http://schemas.google.com/blogger/2008/kind#post'/>
    <category scheme='http://www.blogger.com/atom/ns#' term='rust'/>
    <published>2016-06-01T12:00:00.000-07:00</published>
    <updated>2016-06-02T08:00:00.000-07:00</updated>
    <title type='text'>First post</title>
    <content type='html'>&lt;p&gt;old text&lt;/p&gt;</content>
  </entry>
  <entry>
    <id>tag:blogger.com,1999:blog-8411682.page-2001</id>
    <category scheme='http://schemas.google.com/g/2005#kind' term='http://schemas.google.com/blogger/2008/kind#page'/>
    <published>2012-01-15T09:00:00.000-08:00</published>
    <updated>2012-01-15T09:00:00.000-08:00</updated>
    <title type='text'>About</title>
    <content type='html'>nothing to change</content>
  </entry>
</feed>
"#;

fn post_content(feed: &feedfix_model::Record) -> Option<&Value> {
    feed.get("post")
        .and_then(Value::as_list)
        .and_then(|posts| posts.first())
        .and_then(|post| post.field("content"))
}

#[test]
fn first_load_normalizes_and_writes_the_sidecar() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("blog.xml");
    fs::write(&source, FEED_XML).unwrap();

    let loaded = load_feed(&source, false).unwrap();
    assert_eq!(loaded.origin, FeedOrigin::Normalized);
    assert!(!loaded.stale);
    assert!(cache_path(&source).exists());

    let posts = loaded.feed.get("post").and_then(Value::as_list).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(
        post_content(&loaded.feed),
        Some(&Value::scalar("<p>old text</p>"))
    );
}

#[test]
fn second_load_comes_from_the_cache() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("blog.xml");
    fs::write(&source, FEED_XML).unwrap();

    let first = load_feed(&source, false).unwrap();
    let second = load_feed(&source, false).unwrap();
    assert_eq!(second.origin, FeedOrigin::Cache);
    assert!(!second.stale);
    assert_eq!(second.feed, first.feed);
}

#[test]
fn modified_source_is_reported_stale_until_refreshed() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("blog.xml");
    fs::write(&source, FEED_XML).unwrap();
    load_feed(&source, false).unwrap();

    fs::write(&source, FEED_XML.replace("old text", "updated text")).unwrap();

    // The sidecar still wins; staleness is only reported.
    let stale = load_feed(&source, false).unwrap();
    assert_eq!(stale.origin, FeedOrigin::Cache);
    assert!(stale.stale);
    assert_eq!(
        post_content(&stale.feed),
        Some(&Value::scalar("<p>old text</p>"))
    );

    let refreshed = load_feed(&source, true).unwrap();
    assert_eq!(refreshed.origin, FeedOrigin::Normalized);
    assert_eq!(
        post_content(&refreshed.feed),
        Some(&Value::scalar("<p>updated text</p>"))
    );

    let after = load_feed(&source, false).unwrap();
    assert_eq!(after.origin, FeedOrigin::Cache);
    assert!(!after.stale);
}

#[test]
fn loaded_feed_plans_patches_end_to_end() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("blog.xml");
    fs::write(&source, FEED_XML).unwrap();

    let loaded = load_feed(&source, false).unwrap();
    let plan = build_plan(&loaded.feed, "old", "new").unwrap();
    assert_eq!(plan.blog_id, "8411682");
    assert_eq!(plan.patches.len(), 1);
    assert_eq!(plan.patches[0].kind, "post");
    assert_eq!(plan.patches[0].id, "1001");
    assert_eq!(plan.patches[0].content, "<p>new text</p>");
}

#[test]
fn buckets_summarize_the_loaded_feed() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("blog.xml");
    fs::write(&source, FEED_XML).unwrap();

    let loaded = load_feed(&source, false).unwrap();
    let buckets = summarize_buckets(&loaded.feed);
    assert_eq!(buckets.len(), 2);

    let post = buckets.iter().find(|b| b.name == "post").unwrap();
    assert_eq!(post.entries, 1);
    assert_eq!(post.labelled, 1);
    assert_eq!(post.with_content, 1);

    let page = buckets.iter().find(|b| b.name == "page").unwrap();
    assert_eq!(page.entries, 1);
    assert_eq!(page.labelled, 0);
    assert_eq!(page.with_content, 1);
}

#[test]
fn missing_source_fails_at_the_digest_stage() {
    let err = load_feed(Path::new("/nonexistent/blog.xml"), false).unwrap_err();
    assert!(err.to_string().contains("digest"));
}
