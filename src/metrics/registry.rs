//! Metrics registry for coordinating phase-specific metrics
//!
//! Registers the metrics of every phase, validates naming consistency, and
//! detects conflicts early.

use crate::metrics::{MetricDoc, PhaseMetrics};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Register all metrics from all phases and return how many were registered
pub fn register_all_metrics() -> usize {
    let mut all_metrics = HashMap::new();

    register_phase_metrics::<super::streams::StreamMetrics>(&mut all_metrics);
    register_phase_metrics::<super::pipeline::PipelineMetrics>(&mut all_metrics);
    register_phase_metrics::<super::manager::ManagerMetrics>(&mut all_metrics);

    info!(
        "Registered {} total metrics across all phases",
        all_metrics.len()
    );
    all_metrics.len()
}

/// Register metrics for a specific phase and detect conflicts
fn register_phase_metrics<T: PhaseMetrics>(all_metrics: &mut HashMap<String, MetricDoc>) {
    T::register_metrics();
    let phase_name = T::phase_name();

    for doc in T::metrics_documentation() {
        if extract_phase_from_metric_name(doc.name) != phase_name {
            warn!(
                "Metric '{}' does not carry the prefix of its phase '{}'",
                doc.name, phase_name
            );
        }
        if all_metrics.contains_key(doc.name) {
            warn!(
                "Metric name conflict detected: '{}' registered again by phase '{}'",
                doc.name, phase_name
            );
        } else {
            debug!(metric = doc.name, labels = ?doc.labels, "registered metric");
            all_metrics.insert(doc.name.to_string(), doc);
        }
    }
}

/// Extract phase name from metric name (e.g., "nexus_pipeline_recoveries_total" -> "pipeline")
fn extract_phase_from_metric_name(metric_name: &str) -> &str {
    if let Some(stripped) = metric_name.strip_prefix("nexus_") {
        if let Some(next_underscore) = stripped.find('_') {
            return &stripped[..next_underscore];
        }
    }
    "unknown"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_phase_from_metric_name() {
        assert_eq!(
            extract_phase_from_metric_name("nexus_pipeline_recoveries_total"),
            "pipeline"
        );
        assert_eq!(
            extract_phase_from_metric_name("nexus_streams_batch_size"),
            "streams"
        );
        assert_eq!(
            extract_phase_from_metric_name("invalid_metric_name"),
            "unknown"
        );
    }

    #[test]
    fn test_all_phases_register_without_conflicts() {
        // 6 stream + 4 pipeline + 2 manager
        assert_eq!(register_all_metrics(), 12);
    }
}
