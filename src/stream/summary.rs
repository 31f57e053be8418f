use serde::Serialize;
use std::fmt;

use super::StreamKind;
use crate::types::format_number;

/// Result of running a batch through a stream.
///
/// Every variant, failures included, renders to a descriptive line through
/// `Display`; nothing here is ever raised to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchSummary {
    Sensor { readings: usize, average: f64 },
    Transaction { operations: usize, net_flow: f64 },
    Event { events: usize, errors: usize },
    /// The batch was empty
    NoData,
    /// The batch held items, none of the right shape
    NoValidData,
    Failed { kind: StreamKind, reason: String },
}

impl BatchSummary {
    pub fn is_failure(&self) -> bool {
        matches!(self, BatchSummary::Failed { .. })
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchSummary::Sensor { readings, average } => write!(
                f,
                "Sensor data: {} readings processed, avg temp: {:.1}°C",
                readings, average
            ),
            BatchSummary::Transaction {
                operations,
                net_flow,
            } => {
                let sign = if *net_flow >= 0.0 { "+" } else { "" };
                write!(
                    f,
                    "Transaction data: {} operations, net flow: {}{} units",
                    operations,
                    sign,
                    format_number(*net_flow)
                )
            }
            BatchSummary::Event { events, errors } => {
                write!(f, "Event data: {} events, {} error detected", events, errors)
            }
            BatchSummary::NoData => f.write_str("No data processed"),
            BatchSummary::NoValidData => f.write_str("No valid numeric data"),
            BatchSummary::Failed { kind, reason } => write!(
                f,
                "Error processing {} batch: {}",
                kind.as_str(),
                reason
            ),
        }
    }
}

/// Identity and label of a stream, as reported by `Stream::stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    pub id: String,
    pub stream_type: &'static str,
}
