use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants;
use crate::error::{NexusError, Result};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub filters: FilterConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default directive used when RUST_LOG is unset
    pub level: String,
    /// Write JSON logs to a daily rolling file as well as the console
    pub file: bool,
    pub directory: String,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "code_nexus=info".to_string(),
            file: false,
            directory: "logs".to_string(),
            file_name: "nexus.log".to_string(),
        }
    }
}

/// Bounds used by the high-priority criterion
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    /// Sensor readings below this are high priority
    pub sensor_low: f64,
    /// Sensor readings above this are high priority
    pub sensor_high: f64,
    /// Transactions with an absolute amount at or above this are high priority
    pub transaction_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            sensor_low: 0.0,
            sensor_high: 50.0,
            transaction_threshold: 100.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub fault_sentinel: String,
    pub fault_stage: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fault_sentinel: constants::FAULT_SENTINEL.to_string(),
            fault_stage: constants::FAULT_STAGE,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.filters.sensor_low > self.filters.sensor_high {
            return Err(NexusError::Config(format!(
                "filters.sensor_low ({}) must not exceed filters.sensor_high ({})",
                self.filters.sensor_low, self.filters.sensor_high
            )));
        }
        // An empty sentinel is contained in every text and would fault all input
        if self.pipeline.fault_sentinel.is_empty() {
            return Err(NexusError::Config(
                "pipeline.fault_sentinel must not be empty".to_string(),
            ));
        }
        if self.pipeline.fault_stage == 0 {
            return Err(NexusError::Config(
                "pipeline.fault_stage is one-based and must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pipeline.fault_sentinel, "FAIL_TEST");
        assert_eq!(config.pipeline.fault_stage, 2);
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let file = write_config("[filters]\ntransaction_threshold = 250.0\n");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.filters.transaction_threshold, 250.0);
        assert_eq!(config.filters.sensor_high, 50.0);
        assert!(!config.logging.file);
    }

    #[test]
    fn test_malformed_toml_is_reported() {
        let file = write_config("[filters\nsensor_low = ");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, NexusError::Toml(_)));
    }

    #[test]
    fn test_inverted_sensor_range_is_rejected() {
        let file = write_config("[filters]\nsensor_low = 60.0\nsensor_high = 10.0\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, NexusError::Config(_)));
    }

    #[test]
    fn test_empty_fault_sentinel_is_rejected() {
        let file = write_config("[pipeline]\nfault_sentinel = \"\"\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, NexusError::Config(_)));
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, NexusError::Io(_)));
    }
}
