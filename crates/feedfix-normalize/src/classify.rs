//! Leaf element classification.

use feedfix_model::{Record, Value, XmlElement};

use crate::datetime::{is_timestamp_tag, parse_feed_timestamp};
use crate::error::Result;

/// Leaf tags that normalize to a record of their attributes alone, with no
/// `text` field added.
pub const ATTRIBUTE_ONLY_TAGS: [&str; 6] = [
    "category",
    "extendedProperty",
    "image",
    "in-reply-to",
    "link",
    "thumbnail",
];

/// Classify a childless element into its `(value, tag)` pair.
///
/// Rules, applied in order:
/// 1. The element has attributes and its tag is not `title`: the result is
///    a record of the attributes; unless the tag is attribute-only, a
///    `text` field holding the element's text (possibly null) is added.
/// 2. The tag is `published` or `updated`: the text is parsed as an export
///    timestamp after colon removal. Failure is fatal.
/// 3. Otherwise: a scalar holding the raw text (possibly null).
///
/// Deterministic and side-effect free.
pub fn classify(element: &XmlElement) -> Result<(Value, String)> {
    let tag = element.local_name().to_string();

    if element.has_attributes() && tag != "title" {
        let mut record = Record::with_capacity(element.attributes.len() + 1);
        for (name, value) in &element.attributes {
            record.insert(name.clone(), Value::scalar(value.clone()));
        }
        if !ATTRIBUTE_ONLY_TAGS.contains(&tag.as_str()) {
            record.insert("text", Value::Scalar(element.text.clone()));
        }
        return Ok((Value::Record(record), tag));
    }

    if is_timestamp_tag(&tag) {
        let text = element.text.as_deref().unwrap_or_default();
        let instant = parse_feed_timestamp(&tag, text)?;
        return Ok((Value::Timestamp(instant), tag));
    }

    Ok((Value::Scalar(element.text.clone()), tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NormalizeError;

    #[test]
    fn attributed_leaf_records_attributes_and_text() {
        let element = XmlElement::new("content")
            .with_attribute("type", "html")
            .with_text("<p>body</p>");

        let (value, tag) = classify(&element).expect("classify");
        assert_eq!(tag, "content");
        let record = value.as_record().expect("record");
        assert_eq!(record.get("type"), Some(&Value::scalar("html")));
        assert_eq!(record.get("text"), Some(&Value::scalar("<p>body</p>")));
    }

    #[test]
    fn attributed_leaf_keeps_empty_text() {
        let element = XmlElement::new("content")
            .with_attribute("type", "html")
            .with_text("");

        let (value, _) = classify(&element).expect("classify");
        assert_eq!(value.field("text"), Some(&Value::scalar("")));
    }

    #[test]
    fn attribute_only_tags_get_no_text_field() {
        for tag in ATTRIBUTE_ONLY_TAGS {
            let element = XmlElement::new(tag)
                .with_attribute("href", "http://example.com/")
                .with_text("ignored");

            let (value, _) = classify(&element).expect("classify");
            let record = value.as_record().expect("record");
            assert!(!record.contains_key("text"), "{tag} must not record text");
            assert_eq!(record.get("href"), Some(&Value::scalar("http://example.com/")));
        }
    }

    #[test]
    fn title_is_scalar_even_with_attributes() {
        let element = XmlElement::new("title")
            .with_attribute("type", "text")
            .with_text("My Blog");

        let (value, tag) = classify(&element).expect("classify");
        assert_eq!(tag, "title");
        assert_eq!(value, Value::scalar("My Blog"));
    }

    #[test]
    fn timestamp_tags_parse_after_colon_stripping() {
        let element = XmlElement::new("published").with_text("2016-06-01T12:00:00.000-07:00");

        let (value, tag) = classify(&element).expect("classify");
        assert_eq!(tag, "published");
        assert!(matches!(value, Value::Timestamp(_)));
    }

    #[test]
    fn malformed_timestamp_is_fatal() {
        let element = XmlElement::new("updated").with_text("yesterday");
        let err = classify(&element).expect_err("must fail");
        assert!(matches!(err, NormalizeError::Timestamp { .. }));
    }

    #[test]
    fn timestamp_without_text_is_fatal() {
        let element = XmlElement::new("published");
        assert!(classify(&element).is_err());
    }

    #[test]
    fn plain_leaf_is_raw_scalar() {
        let element = XmlElement::new("id").with_text("tag:blogger.com,1999:blog-1.post-2");
        let (value, _) = classify(&element).expect("classify");
        assert_eq!(value, Value::scalar("tag:blogger.com,1999:blog-1.post-2"));

        let empty = XmlElement::new("thr:total");
        let (value, tag) = classify(&empty).expect("classify");
        assert_eq!(tag, "total");
        assert_eq!(value, Value::Scalar(None));
    }
}
