pub mod element;
pub mod record;
pub mod value;

pub use element::XmlElement;
pub use record::Record;
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_through_json() {
        let mut record = Record::new();
        record.insert("id", Value::scalar("tag:blogger.com,1999:blog-1.post-2"));
        record.insert("content", Value::Scalar(None));
        record.append("label", Value::scalar("rust"));
        record.append("label", Value::scalar("xml"));

        let json = serde_json::to_string(&record).expect("serialize record");
        let round: Record = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round, record);
    }

    #[test]
    fn record_serialization_preserves_field_order() {
        let mut record = Record::new();
        record.insert("zeta", Value::scalar("1"));
        record.insert("alpha", Value::scalar("2"));

        let json = serde_json::to_string(&record).expect("serialize record");
        let zeta = json.find("zeta").expect("zeta present");
        let alpha = json.find("alpha").expect("alpha present");
        assert!(zeta < alpha, "insertion order lost: {json}");
    }
}
