//! Content patch planning for normalized feeds.
//!
//! After normalization a feed holds per-kind entry buckets. This crate
//! turns those buckets into a [`PatchPlan`]: one update per published
//! page or post whose body contains a target substring, addressed by the
//! ids the update API expects. Plans can be written to JSON for an
//! external submitter or pushed through a [`PatchClient`].

pub mod client;
pub mod error;
pub mod id;
pub mod plan;

pub use client::{DryRunClient, PatchClient};
pub use error::{PatchError, Result};
pub use id::{blog_id, entry_suffix};
pub use plan::{ContentPatch, PATCH_KINDS, PatchPlan, build_plan, write_plan};
