use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured record payload, e.g. `{"sensor": "temp", "value": 23.5, "unit": "C"}`
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A single piece of data handed to a processor, stream or pipeline.
///
/// Deserializes from untagged JSON: numbers, strings, objects and arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamItem {
    Number(f64),
    Text(String),
    /// Ordered sequence, produced by splitting delimited text
    List(Vec<StreamItem>),
    Record(Record),
}

impl StreamItem {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StreamItem::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StreamItem::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short shape name used in log fields
    pub fn shape(&self) -> &'static str {
        match self {
            StreamItem::Number(_) => "number",
            StreamItem::Text(_) => "text",
            StreamItem::List(_) => "list",
            StreamItem::Record(_) => "record",
        }
    }
}

impl From<f64> for StreamItem {
    fn from(value: f64) -> Self {
        StreamItem::Number(value)
    }
}

impl From<i32> for StreamItem {
    fn from(value: i32) -> Self {
        StreamItem::Number(f64::from(value))
    }
}

impl From<i64> for StreamItem {
    fn from(value: i64) -> Self {
        StreamItem::Number(value as f64)
    }
}

impl From<&str> for StreamItem {
    fn from(value: &str) -> Self {
        StreamItem::Text(value.to_string())
    }
}

impl From<String> for StreamItem {
    fn from(value: String) -> Self {
        StreamItem::Text(value)
    }
}

impl From<Record> for StreamItem {
    fn from(value: Record) -> Self {
        StreamItem::Record(value)
    }
}

impl<T: Into<StreamItem>> From<Vec<T>> for StreamItem {
    fn from(values: Vec<T>) -> Self {
        StreamItem::List(values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for StreamItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamItem::Number(n) => f.write_str(&format_number(*n)),
            StreamItem::Text(s) => f.write_str(s),
            StreamItem::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            StreamItem::Record(record) => {
                write!(f, "{}", serde_json::Value::Object(record.clone()))
            }
        }
    }
}

/// Render a number without a trailing fraction when it is integral (`25`, not `25.0`).
pub fn format_number(value: f64) -> String {
    // Integers beyond 2^53 lose precision as f64, so leave them to the float formatter
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Build a batch from anything convertible into items.
pub fn batch<T: Into<StreamItem>>(values: impl IntoIterator<Item = T>) -> Vec<StreamItem> {
    values.into_iter().map(Into::into).collect()
}
