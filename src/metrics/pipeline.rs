//! Pipeline Phase Metrics

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

/// Metrics collection for the pipeline phase
pub struct PipelineMetrics;

impl PipelineMetrics {
    /// Record a run that went through every stage
    pub fn record_completed(stages_run: usize) {
        ::metrics::counter!(phase_metric!(counter, "pipeline", "runs_completed")).increment(1);
        ::metrics::histogram!(phase_metric!(histogram, "pipeline", "stages_per_run"))
            .record(stages_run as f64);
    }

    /// Record a stage fault that ended in recovery
    pub fn record_recovery(stage: usize) {
        ::metrics::counter!(phase_metric!(counter, "pipeline", "recoveries")).increment(1);
        ::metrics::histogram!(phase_metric!(histogram, "pipeline", "fault_stage"))
            .record(stage as f64);
    }
}

impl PhaseMetrics for PipelineMetrics {
    fn register_metrics() {
        for doc in Self::metrics_documentation() {
            match doc.metric_type {
                MetricType::Counter => ::metrics::describe_counter!(doc.name, doc.help),
                MetricType::Histogram => ::metrics::describe_histogram!(doc.name, doc.help),
            }
        }
    }

    fn phase_name() -> &'static str {
        "pipeline"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "pipeline", "runs_completed"),
                metric_type: MetricType::Counter,
                help: "Pipeline runs that reached the final stage",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "pipeline", "recoveries"),
                metric_type: MetricType::Counter,
                help: "Pipeline runs that faulted and returned the recovery result",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "pipeline", "stages_per_run"),
                metric_type: MetricType::Histogram,
                help: "Number of stages executed by completed runs",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "pipeline", "fault_stage"),
                metric_type: MetricType::Histogram,
                help: "One-based index of the stage that faulted",
                labels: vec![],
            },
        ]
    }
}
