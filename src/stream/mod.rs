// Typed batch streams: validation, aggregation and high-priority filtering

pub mod filter;
pub mod summary;

pub use filter::Criterion;
pub use summary::{BatchSummary, StreamStats};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::FilterConfig;
use crate::constants;
use crate::error::{NexusError, Result};
use crate::metrics::StreamMetrics;
use crate::types::StreamItem;

/// The closed set of stream kinds. A stream's kind never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    Sensor,
    Transaction,
    Event,
}

impl StreamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Sensor => "sensor",
            StreamKind::Transaction => "transaction",
            StreamKind::Event => "event",
        }
    }

    pub fn stream_type(&self) -> &'static str {
        match self {
            StreamKind::Sensor => constants::SENSOR_STREAM_TYPE,
            StreamKind::Transaction => constants::TRANSACTION_STREAM_TYPE,
            StreamKind::Event => constants::EVENT_STREAM_TYPE,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sensor" => Some(StreamKind::Sensor),
            "transaction" => Some(StreamKind::Transaction),
            "event" => Some(StreamKind::Event),
            _ => None,
        }
    }

    /// Whether an item has the shape this kind aggregates
    pub fn accepts(&self, item: &StreamItem) -> bool {
        match self {
            StreamKind::Sensor | StreamKind::Transaction => {
                matches!(item, StreamItem::Number(_))
            }
            StreamKind::Event => matches!(item, StreamItem::Text(_)),
        }
    }
}

/// A named, typed source of batches
#[derive(Debug, Clone)]
pub struct Stream {
    id: String,
    kind: StreamKind,
    bounds: FilterConfig,
}

impl Stream {
    pub fn new(id: impl Into<String>, kind: StreamKind) -> Self {
        Self::with_bounds(id, kind, FilterConfig::default())
    }

    /// Create a stream whose high-priority criterion uses custom bounds
    pub fn with_bounds(id: impl Into<String>, kind: StreamKind, bounds: FilterConfig) -> Self {
        Self {
            id: id.into(),
            kind,
            bounds,
        }
    }

    pub fn sensor(id: impl Into<String>) -> Self {
        Self::new(id, StreamKind::Sensor)
    }

    pub fn transaction(id: impl Into<String>) -> Self {
        Self::new(id, StreamKind::Transaction)
    }

    pub fn event(id: impl Into<String>) -> Self {
        Self::new(id, StreamKind::Event)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    pub fn stats(&self) -> StreamStats {
        StreamStats {
            id: self.id.clone(),
            stream_type: self.kind.stream_type(),
        }
    }

    /// Validate and summarize a batch. Never fails: computation errors come
    /// back as `BatchSummary::Failed`.
    pub fn process_batch(&self, items: &[StreamItem]) -> BatchSummary {
        let valid = items.iter().filter(|item| self.kind.accepts(item)).count();
        StreamMetrics::record_batch(self.kind.as_str(), items.len(), valid);

        match self.aggregate(items) {
            Ok(summary) => {
                debug!(stream = %self.id, kind = self.kind.as_str(), batch = items.len(), valid, "batch processed");
                summary
            }
            Err(e) => {
                warn!(stream = %self.id, kind = self.kind.as_str(), error = %e, "batch aggregation failed");
                StreamMetrics::record_batch_failure(self.kind.as_str());
                BatchSummary::Failed {
                    kind: self.kind,
                    reason: e.to_string(),
                }
            }
        }
    }

    fn aggregate(&self, items: &[StreamItem]) -> Result<BatchSummary> {
        match self.kind {
            StreamKind::Sensor => {
                if items.is_empty() {
                    return Ok(BatchSummary::NoData);
                }
                let readings: Vec<f64> = items.iter().filter_map(StreamItem::as_number).collect();
                if readings.is_empty() {
                    return Ok(BatchSummary::NoValidData);
                }
                let average = finite(
                    readings.iter().sum::<f64>() / readings.len() as f64,
                    "sensor average",
                )?;
                Ok(BatchSummary::Sensor {
                    readings: readings.len(),
                    average,
                })
            }
            StreamKind::Transaction => {
                let amounts: Vec<f64> = items.iter().filter_map(StreamItem::as_number).collect();
                let net_flow = finite(amounts.iter().sum(), "transaction net flow")?;
                Ok(BatchSummary::Transaction {
                    operations: amounts.len(),
                    net_flow,
                })
            }
            StreamKind::Event => Ok(BatchSummary::Event {
                events: items.len(),
                errors: items.iter().filter(|item| filter::is_error_event(item)).count(),
            }),
        }
    }

    /// Keep the items matching `criterion`. An absent or unrecognized
    /// criterion returns the batch unchanged.
    pub fn filter_data(&self, items: &[StreamItem], criterion: Option<&str>) -> Vec<StreamItem> {
        let Some(criterion) = criterion.and_then(Criterion::parse) else {
            return items.to_vec();
        };

        let kept: Vec<StreamItem> = items
            .iter()
            .filter(|item| self.matches(criterion, item))
            .cloned()
            .collect();
        StreamMetrics::record_filter(self.kind.as_str(), kept.len(), items.len() - kept.len());
        kept
    }

    fn matches(&self, criterion: Criterion, item: &StreamItem) -> bool {
        match (criterion, self.kind) {
            (Criterion::HighPriority, StreamKind::Sensor) => {
                filter::is_sensor_outlier(item, &self.bounds)
            }
            (Criterion::HighPriority, StreamKind::Transaction) => {
                filter::is_large_transaction(item, &self.bounds)
            }
            (Criterion::HighPriority, StreamKind::Event) => filter::is_error_event(item),
        }
    }
}

fn finite(value: f64, what: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NexusError::Aggregate { what })
    }
}
