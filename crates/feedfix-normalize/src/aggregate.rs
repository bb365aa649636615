//! Child aggregation rules.
//!
//! The rule set is not a single exclusive dispatch: check A (category
//! handling) and check B run in sequence, and a non-kind category child is
//! processed by both. The resulting double write (`label` plus `category`)
//! is part of the established output shape and is kept exactly; both writes
//! funnel through [`CategoryOutcome`] so the behavior sits in one place.

use feedfix_model::{Record, Value};

use crate::error::{NormalizeError, Result};

/// Child tags that never create a field under their own name.
pub const IGNORED_CHILD_TAGS: [&str; 4] = ["extendedProperty", "image", "link", "thumbnail"];

/// Substring of a category `scheme` that marks it as a kind marker rather
/// than a user-facing label.
pub const KIND_MARKER: &str = "#kind";

/// What check A decided about a `category` child.
enum CategoryOutcome {
    /// Kind marker: fully consumed into the parent's `scheme` field.
    Consumed,
    /// Ordinary label: `term` was appended to `label`, and the child still
    /// continues into check B's generic branch, which also stores the full
    /// category record under `category` (last sibling wins).
    Labelled,
}

/// Fold normalized children into the parent's accumulator record.
///
/// The accumulator is seeded from the parent's own attributes, threaded
/// through the children in document order, and returned with the parent
/// tag. Any rule failure aborts the whole aggregation.
pub fn aggregate(
    own_attributes: &[(String, String)],
    children: Vec<(Value, String)>,
    parent_tag: &str,
) -> Result<(Record, String)> {
    let mut accumulator = Record::with_capacity(own_attributes.len() + children.len());
    for (name, value) in own_attributes {
        accumulator.insert(name.clone(), Value::scalar(value.clone()));
    }
    for (value, tag) in children {
        fold_child(&mut accumulator, value, &tag)?;
    }
    Ok((accumulator, parent_tag.to_string()))
}

fn fold_child(accumulator: &mut Record, value: Value, tag: &str) -> Result<()> {
    // Check A. A kind-marker category is consumed here; a labelled one
    // falls through to check B as well.
    if tag == "category" {
        if let CategoryOutcome::Consumed = fold_category(accumulator, &value)? {
            return Ok(());
        }
    }

    // Check B.
    if tag == "entry" {
        return fold_entry(accumulator, value);
    }
    if tag == "content" {
        let text = value.field("text").ok_or_else(|| missing("content", "text"))?;
        accumulator.insert("content", text.clone());
        return Ok(());
    }
    if !IGNORED_CHILD_TAGS.contains(&tag) {
        accumulator.insert(tag, value);
    }
    Ok(())
}

/// Check A: categorize a `category` child.
///
/// A scheme containing [`KIND_MARKER`] captures the kind string (the part
/// of `term` after its last `#`, or the whole term when it has none) into
/// the parent's `scheme` field. Any other category appends its `term` to
/// the `label` list. `term` is required either way.
fn fold_category(accumulator: &mut Record, value: &Value) -> Result<CategoryOutcome> {
    let is_kind_marker = value
        .field("scheme")
        .and_then(Value::as_text)
        .is_some_and(|scheme| scheme.contains(KIND_MARKER));

    let term = value
        .field("term")
        .and_then(Value::as_text)
        .ok_or_else(|| missing("category", "term"))?;

    if is_kind_marker {
        let kind = term.rsplit_once('#').map_or(term, |(_, kind)| kind);
        accumulator.insert("scheme", Value::scalar(kind));
        Ok(CategoryOutcome::Consumed)
    } else {
        accumulator.append("label", Value::scalar(term));
        Ok(CategoryOutcome::Labelled)
    }
}

/// Check B for `entry` children: remove the required `scheme`, segregate
/// drafts (`control.draft == "yes"`, with `control` stripped from the
/// stored record) into `draft`, and append everything else to the scheme
/// bucket. An entry kept out of the draft list keeps its `control` field.
fn fold_entry(accumulator: &mut Record, value: Value) -> Result<()> {
    let mut entry = value
        .into_record()
        .ok_or_else(|| missing("entry", "scheme"))?;
    let scheme = entry
        .remove("scheme")
        .ok_or_else(|| missing("entry", "scheme"))?;

    let is_draft = match entry.get("control") {
        Some(Value::Record(control)) => {
            let draft = control
                .get("draft")
                .ok_or_else(|| missing("control", "draft"))?;
            draft.as_text() == Some("yes")
        }
        Some(_) => return Err(missing("control", "draft")),
        None => false,
    };

    if is_draft {
        entry.remove("control");
        accumulator.append("draft", Value::Record(entry));
        return Ok(());
    }

    let bucket = match &scheme {
        Value::Scalar(Some(name)) => name.clone(),
        _ => return Err(missing("entry", "scheme")),
    };
    accumulator.append(bucket, Value::Record(entry));
    Ok(())
}

fn missing(tag: &str, field: &'static str) -> NormalizeError {
    NormalizeError::MissingField {
        tag: tag.to_string(),
        field,
    }
}
