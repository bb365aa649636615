//! Blogger-style id derivation.
//!
//! Entry ids in an export look like
//! `tag:blogger.com,1999:blog-8411682.post-3735928559`: the blog id sits
//! between the first and second `-` (up to the first `.`), and the entry
//! id is the suffix after the last `-`.

use crate::error::{PatchError, Result};

/// Blog id segment of a feed or entry id.
///
/// `tag:blogger.com,1999:blog-8411682.post-1` derives `8411682`. Ids
/// with fewer than two `-`-separated segments fail.
pub fn blog_id(id: &str) -> Result<String> {
    let segment = id
        .split('-')
        .nth(1)
        .ok_or_else(|| PatchError::BlogId { id: id.to_string() })?;
    let segment = match segment.split_once('.') {
        Some((head, _)) => head,
        None => segment,
    };
    Ok(segment.to_string())
}

/// Entry id suffix after the last `-`.
pub fn entry_suffix(id: &str) -> Result<String> {
    match id.rsplit_once('-') {
        Some((_, suffix)) => Ok(suffix.to_string()),
        None => Err(PatchError::EntryId { id: id.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_id_sits_between_the_first_two_dashes() {
        assert_eq!(
            blog_id("tag:blogger.com,1999:blog-8411682.post-3735928559").unwrap(),
            "8411682"
        );
        assert_eq!(
            blog_id("tag:blogger.com,1999:user-42.blog-8411682.archive").unwrap(),
            "42"
        );
    }

    #[test]
    fn blog_id_without_a_dot_is_taken_whole() {
        assert_eq!(blog_id("blog-8411682").unwrap(), "8411682");
    }

    #[test]
    fn id_without_segments_cannot_derive_a_blog_id() {
        let err = blog_id("tag:blogger.com").unwrap_err();
        assert!(matches!(err, PatchError::BlogId { id } if id == "tag:blogger.com"));
    }

    #[test]
    fn entry_suffix_follows_the_last_dash() {
        assert_eq!(
            entry_suffix("tag:blogger.com,1999:blog-8411682.post-3735928559").unwrap(),
            "3735928559"
        );
    }

    #[test]
    fn id_without_a_dash_cannot_derive_an_entry_suffix() {
        let err = entry_suffix("nodashes").unwrap_err();
        assert!(matches!(err, PatchError::EntryId { id } if id == "nodashes"));
    }
}
