//! The update-submission seam.

use crate::error::Result;
use crate::plan::ContentPatch;

/// Something that can apply one content patch to a blog.
///
/// No network implementation ships here; the CLI wires a [`DryRunClient`]
/// in, and an external submitter can consume a written plan instead.
pub trait PatchClient {
    fn submit(&mut self, blog_id: &str, patch: &ContentPatch) -> Result<()>;
}

/// A client that records what it would have submitted.
#[derive(Debug, Default)]
pub struct DryRunClient {
    submitted: Vec<ContentPatch>,
}

impl DryRunClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patches submitted so far, in submission order.
    pub fn submitted(&self) -> &[ContentPatch] {
        &self.submitted
    }
}

impl PatchClient for DryRunClient {
    fn submit(&mut self, blog_id: &str, patch: &ContentPatch) -> Result<()> {
        tracing::info!(
            blog_id,
            kind = %patch.kind,
            id = %patch.id,
            "dry run: would update entry content"
        );
        self.submitted.push(patch.clone());
        Ok(())
    }
}
