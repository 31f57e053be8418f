use tracing::debug;

use crate::types::{format_number, StreamItem};

pub const INVALID_DATA: &str = "Invalid data";

/// Validators and describers for a single payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorKind {
    /// A list made only of numbers
    Numeric,
    /// Free text
    Text,
    /// `LEVEL: message` lines
    Log,
}

impl ProcessorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessorKind::Numeric => "numeric",
            ProcessorKind::Text => "text",
            ProcessorKind::Log => "log",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "numeric" => Some(ProcessorKind::Numeric),
            "text" => Some(ProcessorKind::Text),
            "log" => Some(ProcessorKind::Log),
            _ => None,
        }
    }

    pub fn validate(&self, item: &StreamItem) -> bool {
        match (self, item) {
            (ProcessorKind::Numeric, StreamItem::List(values)) => {
                values.iter().all(|v| matches!(v, StreamItem::Number(_)))
            }
            (ProcessorKind::Text, StreamItem::Text(_)) => true,
            (ProcessorKind::Log, StreamItem::Text(line)) => line.contains(':'),
            _ => false,
        }
    }

    /// Describe the payload, or return `Invalid data` when it fails validation.
    pub fn process(&self, item: &StreamItem) -> String {
        if !self.validate(item) {
            debug!(processor = self.as_str(), shape = item.shape(), "payload rejected");
            return INVALID_DATA.to_string();
        }

        match item {
            StreamItem::List(values) => describe_numbers(values),
            StreamItem::Text(text) if *self == ProcessorKind::Log => describe_log_line(text),
            StreamItem::Text(text) => describe_text(text),
            _ => INVALID_DATA.to_string(),
        }
    }

    pub fn format_output(&self, result: &str) -> String {
        format!("Output: {}", result)
    }
}

fn describe_numbers(values: &[StreamItem]) -> String {
    let numbers: Vec<f64> = values.iter().filter_map(StreamItem::as_number).collect();
    let total: f64 = numbers.iter().sum();
    let average = if numbers.is_empty() {
        0.0
    } else {
        total / numbers.len() as f64
    };
    format!(
        "Processed {} numeric values, sum={}, avg={:?}",
        numbers.len(),
        format_number(total),
        average
    )
}

fn describe_text(text: &str) -> String {
    format!(
        "Processed text: {} characters, {} words",
        text.chars().count(),
        text.split_whitespace().count()
    )
}

fn describe_log_line(line: &str) -> String {
    let (level, message) = line.split_once(':').unwrap_or((line, ""));
    let level = level.trim();
    let prefix = if level.contains("ERROR") { "ALERT" } else { "INFO" };
    format!("[{}] {} level detected: {}", prefix, level, message.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_processor() {
        let data = StreamItem::from(vec![1, 2, 3, 4, 5]);
        assert!(ProcessorKind::Numeric.validate(&data));
        assert_eq!(
            ProcessorKind::Numeric.process(&data),
            "Processed 5 numeric values, sum=15, avg=3.0"
        );
    }

    #[test]
    fn test_numeric_processor_rejects_mixed_lists() {
        let data = StreamItem::List(vec![StreamItem::Number(1.0), StreamItem::from("two")]);
        assert!(!ProcessorKind::Numeric.validate(&data));
        assert_eq!(ProcessorKind::Numeric.process(&data), INVALID_DATA);
    }

    #[test]
    fn test_empty_numeric_list_averages_to_zero() {
        let data = StreamItem::List(vec![]);
        assert_eq!(
            ProcessorKind::Numeric.process(&data),
            "Processed 0 numeric values, sum=0, avg=0.0"
        );
    }

    #[test]
    fn test_text_processor() {
        let data = StreamItem::from("Hello Nexus World");
        assert_eq!(
            ProcessorKind::Text.process(&data),
            "Processed text: 17 characters, 3 words"
        );
        assert_eq!(ProcessorKind::Text.process(&StreamItem::Number(4.0)), INVALID_DATA);
    }

    #[test]
    fn test_log_processor_alerts_on_error_level() {
        let data = StreamItem::from("ERROR: Connection timeout");
        assert_eq!(
            ProcessorKind::Log.process(&data),
            "[ALERT] ERROR level detected: Connection timeout"
        );

        let data = StreamItem::from("INFO: System ready");
        assert_eq!(
            ProcessorKind::Log.process(&data),
            "[INFO] INFO level detected: System ready"
        );
    }

    #[test]
    fn test_log_processor_requires_separator() {
        assert!(!ProcessorKind::Log.validate(&StreamItem::from("no level here")));
    }

    #[test]
    fn test_format_output() {
        assert_eq!(ProcessorKind::Text.format_output("done"), "Output: done");
    }
}
