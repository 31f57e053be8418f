//! Dispatch Phase Metrics

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct ManagerMetrics;

impl ManagerMetrics {
    pub fn record_dispatch(target: &'static str) {
        ::metrics::counter!(phase_metric!(counter, "manager", "dispatches"), "target" => target)
            .increment(1);
    }

    pub fn record_lookup_miss() {
        ::metrics::counter!(phase_metric!(counter, "manager", "lookup_misses")).increment(1);
    }
}

impl PhaseMetrics for ManagerMetrics {
    fn register_metrics() {
        for doc in Self::metrics_documentation() {
            ::metrics::describe_counter!(doc.name, doc.help);
        }
    }

    fn phase_name() -> &'static str {
        "manager"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "manager", "dispatches"),
                metric_type: MetricType::Counter,
                help: "Items or batches forwarded to a registered component",
                labels: vec!["target"],
            },
            MetricDoc {
                name: phase_metric!(counter, "manager", "lookup_misses"),
                metric_type: MetricType::Counter,
                help: "Dispatches to an identifier with nothing registered",
                labels: vec![],
            },
        ]
    }
}
