use thiserror::Error;

#[derive(Error, Debug)]
pub enum NexusError {
    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("{what} is not a finite number")]
    Aggregate { what: &'static str },
}

/// A stage refused the item it was handed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("stage {stage} failed: {reason}")]
pub struct StageFault {
    /// One-based position of the stage inside its pipeline
    pub stage: usize,
    pub reason: String,
}

impl StageFault {
    pub fn new(stage: usize, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NexusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_fault_message() {
        let fault = StageFault::new(2, "Invalid data format");
        assert_eq!(fault.to_string(), "stage 2 failed: Invalid data format");
    }

    #[test]
    fn test_aggregate_error_message() {
        let err = NexusError::Aggregate { what: "sensor average" };
        assert_eq!(err.to_string(), "sensor average is not a finite number");
    }
}
