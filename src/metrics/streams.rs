//! Stream Phase Metrics
//!
//! Batches processed per stream kind, invalid items skipped, and batches that
//! ended in a failure summary.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

/// Metrics collection for the stream phase
pub struct StreamMetrics;

impl StreamMetrics {
    /// Record a processed batch
    pub fn record_batch(kind: &'static str, batch_size: usize, valid_items: usize) {
        ::metrics::counter!(phase_metric!(counter, "streams", "batches_processed"), "kind" => kind)
            .increment(1);
        ::metrics::histogram!(phase_metric!(histogram, "streams", "batch_size"), "kind" => kind)
            .record(batch_size as f64);
        let skipped = batch_size.saturating_sub(valid_items);
        if skipped > 0 {
            ::metrics::counter!(phase_metric!(counter, "streams", "items_skipped"), "kind" => kind)
                .increment(skipped as u64);
        }
    }

    /// Record a batch whose aggregate could not be computed
    pub fn record_batch_failure(kind: &'static str) {
        ::metrics::counter!(phase_metric!(counter, "streams", "batch_failures"), "kind" => kind)
            .increment(1);
    }

    /// Record a filter pass
    pub fn record_filter(kind: &'static str, kept: usize, dropped: usize) {
        ::metrics::counter!(phase_metric!(counter, "streams", "items_kept"), "kind" => kind)
            .increment(kept as u64);
        ::metrics::counter!(phase_metric!(counter, "streams", "items_filtered"), "kind" => kind)
            .increment(dropped as u64);
    }
}

impl PhaseMetrics for StreamMetrics {
    fn register_metrics() {
        for doc in Self::metrics_documentation() {
            match doc.metric_type {
                MetricType::Counter => ::metrics::describe_counter!(doc.name, doc.help),
                MetricType::Histogram => ::metrics::describe_histogram!(doc.name, doc.help),
            }
        }
    }

    fn phase_name() -> &'static str {
        "streams"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "streams", "batches_processed"),
                metric_type: MetricType::Counter,
                help: "Total number of batches processed by streams",
                labels: vec!["kind"],
            },
            MetricDoc {
                name: phase_metric!(counter, "streams", "items_skipped"),
                metric_type: MetricType::Counter,
                help: "Items excluded from an aggregate because their shape was invalid",
                labels: vec!["kind"],
            },
            MetricDoc {
                name: phase_metric!(counter, "streams", "batch_failures"),
                metric_type: MetricType::Counter,
                help: "Batches whose aggregate could not be computed",
                labels: vec!["kind"],
            },
            MetricDoc {
                name: phase_metric!(counter, "streams", "items_kept"),
                metric_type: MetricType::Counter,
                help: "Items kept by a filter criterion",
                labels: vec!["kind"],
            },
            MetricDoc {
                name: phase_metric!(counter, "streams", "items_filtered"),
                metric_type: MetricType::Counter,
                help: "Items removed by a filter criterion",
                labels: vec!["kind"],
            },
            MetricDoc {
                name: phase_metric!(histogram, "streams", "batch_size"),
                metric_type: MetricType::Histogram,
                help: "Number of items in each batch",
                labels: vec!["kind"],
            },
        ]
    }
}
