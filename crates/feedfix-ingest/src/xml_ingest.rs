//! Event-loop materialization of an exported feed document.
//!
//! The tree this produces mirrors what the downstream normalizer expects
//! from the export format: attribute order and child order follow document
//! order, namespace declarations are not attributes, and only character
//! data ahead of the first child element counts as an element's text.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use feedfix_model::XmlElement;

use crate::error::{IngestError, Result};

/// Documents nested deeper than this are rejected up front so the
/// recursive normalizer never sees them.
pub const MAX_DEPTH: usize = 128;

/// Read and materialize an exported feed file.
pub fn read_feed_file(path: &Path) -> Result<XmlElement> {
    let xml = fs::read_to_string(path).map_err(|source| IngestError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    let root = parse_document(&xml)?;
    tracing::debug!(path = %path.display(), root = %root.tag, "parsed feed document");
    Ok(root)
}

/// Materialize a document held in memory.
///
/// The first top-level element becomes the root; anything after it is
/// ignored. Comments, processing instructions, the XML declaration, and
/// DOCTYPE are skipped.
pub fn parse_document(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| IngestError::Xml {
                position: reader.buffer_position(),
                source,
            })?;
        match event {
            Event::Start(start) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(IngestError::TooDeep { limit: MAX_DEPTH });
                }
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(text) => {
                let bytes = text.into_inner();
                let raw = std::str::from_utf8(&bytes)?;
                append_text(&mut stack, &unescape(raw)?);
            }
            Event::CData(cdata) => {
                let bytes = cdata.into_inner();
                append_text(&mut stack, std::str::from_utf8(&bytes)?);
            }
            Event::GeneralRef(entity) => {
                let bytes = entity.into_inner();
                let name = std::str::from_utf8(&bytes)?;
                match resolve_entity(name) {
                    Some(resolved) => append_text(&mut stack, &resolved),
                    None => {
                        return Err(IngestError::UnknownEntity {
                            name: name.to_string(),
                        });
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    root.ok_or(IngestError::NoRootElement)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = start.name();
    let tag = std::str::from_utf8(name.as_ref())?;
    let mut element = XmlElement::new(tag);
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = std::str::from_utf8(attribute.key.as_ref())?;
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let raw = std::str::from_utf8(&attribute.value)?;
        element
            .attributes
            .push((key.to_string(), unescape(raw)?.into_owned()));
    }
    Ok(element)
}

fn attach(stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// Append character data to the innermost open element, but only while it
/// has no children yet: text between or after child elements is discarded,
/// matching the element-text model the normalizer was written against.
fn append_text(stack: &mut Vec<XmlElement>, text: &str) {
    let Some(open) = stack.last_mut() else {
        return;
    };
    if !open.children.is_empty() {
        return;
    }
    match &mut open.text {
        Some(existing) => existing.push_str(text),
        None => open.text = Some(text.to_string()),
    }
}

/// Resolve a character reference (`#38`, `#x26`) or one of the five
/// predefined entities. Anything else is unknown: the export format
/// declares no custom entities.
fn resolve_entity(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = if let Some(hex) = code.strip_prefix('x') {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            code.parse::<u32>().ok()?
        };
        return char::from_u32(value).map(|ch| ch.to_string());
    }
    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "apos" => "'",
        "quot" => "\"",
        _ => return None,
    };
    Some(resolved.to_string())
}
