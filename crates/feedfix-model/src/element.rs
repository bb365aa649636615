use serde::{Deserialize, Serialize};

/// One element of the materialized feed document.
///
/// Produced by the ingestion layer; the normalizer only reads it. `tag` keeps
/// the qualified name exactly as written in the source (`entry`,
/// `app:control`); attribute order and child order follow document order.
/// Namespace declarations (`xmlns`, `xmlns:*`) are not attributes here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    /// Character data before the first child element; `None` when the
    /// element has no leading text node at all.
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Local part of the tag, with any namespace prefix stripped.
    ///
    /// Every element is localized the same way regardless of which namespace
    /// it belongs to, so `app:control` and a hypothetical `other:control`
    /// both normalize under `control`.
    pub fn local_name(&self) -> &str {
        match self.tag.rsplit_once(':') {
            Some((_, local)) => local,
            None => self.tag.as_str(),
        }
    }

    /// First attribute with the given name, if any.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    // Builder-style helpers, used mainly to assemble fixtures in tests.

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_name_strips_prefix() {
        assert_eq!(XmlElement::new("entry").local_name(), "entry");
        assert_eq!(XmlElement::new("app:control").local_name(), "control");
        assert_eq!(XmlElement::new("thr:in-reply-to").local_name(), "in-reply-to");
    }

    #[test]
    fn attribute_lookup_finds_first_match() {
        let element = XmlElement::new("category")
            .with_attribute("scheme", "http://schemas.google.com/g/2005#kind")
            .with_attribute("term", "http://schemas.google.com/blogger/2008/kind#post");
        assert_eq!(
            element.attribute("scheme"),
            Some("http://schemas.google.com/g/2005#kind")
        );
        assert_eq!(element.attribute("missing"), None);
    }
}
