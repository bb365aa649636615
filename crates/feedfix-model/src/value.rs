use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::Record;

/// A normalized feed value.
///
/// Scalars and timestamps come out of leaf classification, records out of
/// attribute sets and child aggregation. Lists are created exclusively by
/// the aggregation rules (`label`, `draft`, and the per-kind scheme
/// buckets); a top-level normalization never returns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Scalar(Option<String>),
    Timestamp(DateTime<FixedOffset>),
    Record(Record),
    List(Vec<Value>),
}

impl Value {
    /// Non-null scalar constructor.
    pub fn scalar(text: impl Into<String>) -> Self {
        Value::Scalar(Some(text.into()))
    }

    /// Text of a non-null scalar.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Scalar(Some(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Field lookup that tolerates non-record values (returns `None`).
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_record().and_then(|record| record.get(name))
    }
}
