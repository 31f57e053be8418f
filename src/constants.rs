/// Fixed literals shared by streams, stages and the pipeline.
/// Changing any of these changes user-visible output.

// Filter criteria
pub const HIGH_PRIORITY: &str = "High-priority";

// Case-insensitive marker counted by event streams
pub const ERROR_MARKER: &str = "error";

// Pipeline fault injection defaults
pub const FAULT_SENTINEL: &str = "FAIL_TEST";
pub const FAULT_STAGE: usize = 2;
pub const FAULT_REASON: &str = "Invalid data format";

/// Value yielded by a pipeline after any stage fault
pub const RECOVERY_MESSAGE: &str = "Recovery successful: Pipeline restored, processing resumed";

// Output stage renderings
pub const STREAM_SUMMARY_PLACEHOLDER: &str = "Stream summary: 5 readings, avg: 22.1°C";
pub const FIELD_SEPARATOR: char = ',';

// Stream type labels
pub const SENSOR_STREAM_TYPE: &str = "Environmental Data";
pub const TRANSACTION_STREAM_TYPE: &str = "Financial Data";
pub const EVENT_STREAM_TYPE: &str = "System Events";

// Default configuration file, overridable through NEXUS_CONFIG
pub const DEFAULT_CONFIG_PATH: &str = "nexus.toml";
pub const CONFIG_ENV_VAR: &str = "NEXUS_CONFIG";

/// Get all stream kind names accepted on the command line
pub fn get_supported_stream_kinds() -> Vec<&'static str> {
    vec!["sensor", "transaction", "event"]
}
