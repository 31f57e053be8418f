//! Phase-organized metrics for streams, pipelines and dispatch
//!
//! Each phase defines its metrics in a dedicated submodule and records through
//! the `metrics` facade. No recorder is installed by the library; embedding
//! applications choose their own exporter, and without one every call is a no-op.

pub mod manager;
pub mod pipeline;
pub mod registry;
pub mod streams;

pub use manager::ManagerMetrics;
pub use pipeline::PipelineMetrics;
pub use streams::StreamMetrics;

use std::sync::Once;

static INIT: Once = Once::new();

/// Describe every phase metric once. Idempotent.
pub fn init_metrics() {
    INIT.call_once(|| {
        registry::register_all_metrics();
    });
}

/// Trait for phase-specific metrics collections
///
/// Each phase implements this trait to provide:
/// - Metric registration at startup
/// - Consistent naming conventions
/// - Documentation of what each metric measures
pub trait PhaseMetrics {
    /// Register all metrics for this phase
    fn register_metrics();

    /// Get the phase name for prefixing metrics
    fn phase_name() -> &'static str;

    /// Get documentation for all metrics in this phase
    fn metrics_documentation() -> Vec<MetricDoc>;
}

/// Documentation for a single metric
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetricType {
    Counter,
    Histogram,
}

/// Macro to create phase-specific metric names with consistent naming
///
/// nexus_{phase}_{metric_name}[_total]
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("nexus_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("nexus_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_naming_convention() {
        assert_eq!(
            phase_metric!(counter, "pipeline", "recoveries"),
            "nexus_pipeline_recoveries_total"
        );
        assert_eq!(
            phase_metric!(histogram, "streams", "batch_size"),
            "nexus_streams_batch_size"
        );
    }

    #[test]
    fn test_init_metrics_is_idempotent() {
        init_metrics();
        init_metrics();
    }
}
