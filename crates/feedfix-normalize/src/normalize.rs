//! Recursive normalization driver.

use feedfix_model::{Value, XmlElement};

use crate::aggregate::aggregate;
use crate::classify::classify;
use crate::error::Result;

/// Normalize one element subtree into its `(value, tag)` pair.
///
/// Childless elements go through [`classify`] directly. Elements with
/// children have each child normalized in document order first; the results
/// are then folded into the parent's record by [`aggregate`], seeded from
/// the parent's own attributes.
///
/// Given the same tree the output is fully deterministic, and no mutable
/// state escapes a single top-level call. Recursion depth equals document
/// nesting depth, which ingestion bounds.
pub fn normalize(element: &XmlElement) -> Result<(Value, String)> {
    if !element.has_children() {
        return classify(element);
    }
    let mut children = Vec::with_capacity(element.children.len());
    for child in &element.children {
        children.push(normalize(child)?);
    }
    let (record, tag) = aggregate(&element.attributes, children, element.local_name())?;
    Ok((Value::Record(record), tag))
}
