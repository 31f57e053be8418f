use serde_json::Value;
use tracing::debug;

use crate::constants;
use crate::types::{format_number, StreamItem};

/// One step of a pipeline. Every stage is a total function over `StreamItem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Recognizes the shape of the incoming item and passes it on unchanged
    Input,
    /// Splits delimited text into fields; records and other items pass through
    Transform,
    /// Renders the final description
    Output,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Input => "input",
            Stage::Transform => "transform",
            Stage::Output => "output",
        }
    }

    pub fn apply(&self, item: StreamItem) -> StreamItem {
        match self {
            Stage::Input => {
                debug!(stage = self.name(), shape = item.shape(), item = %item, "input recognized");
                item
            }
            Stage::Transform => transform(item),
            Stage::Output => StreamItem::Text(render(&item)),
        }
    }
}

fn transform(item: StreamItem) -> StreamItem {
    match item {
        StreamItem::Text(text) if text.contains(constants::FIELD_SEPARATOR) => {
            debug!(stage = "transform", "parsed and structured delimited text");
            StreamItem::List(
                text.split(constants::FIELD_SEPARATOR)
                    .map(|field| StreamItem::Text(field.trim().to_string()))
                    .collect(),
            )
        }
        StreamItem::Record(record) => {
            debug!(stage = "transform", fields = record.len(), "record enriched");
            StreamItem::Record(record)
        }
        other => {
            debug!(stage = "transform", shape = other.shape(), "passed through");
            other
        }
    }
}

fn render(item: &StreamItem) -> String {
    match item {
        StreamItem::Record(record) => {
            let value = record.get("value").map(field_text).unwrap_or_default();
            let unit = record.get("unit").map(field_text).unwrap_or_default();
            format!(
                "Processed temperature reading: {}°{} (Normal range)",
                value, unit
            )
        }
        // First field is the actor and last is the timestamp; the rest are actions
        StreamItem::List(fields) => format!(
            "User activity logged: {} actions processed",
            fields.len().saturating_sub(2)
        ),
        StreamItem::Text(_) => constants::STREAM_SUMMARY_PLACEHOLDER.to_string(),
        StreamItem::Number(n) => format_number(*n),
    }
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
