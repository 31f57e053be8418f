// Stage chaining with deterministic fault injection and fixed recovery

pub mod stage;

pub use stage::Stage;

use std::fmt;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::constants;
use crate::error::StageFault;
use crate::metrics::PipelineMetrics;
use crate::types::StreamItem;

/// Input format a pipeline is labelled with. Labels only; every format
/// runs through the same stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineFormat {
    Json,
    Csv,
    Stream,
}

impl PipelineFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineFormat::Json => "JSON",
            PipelineFormat::Csv => "CSV",
            PipelineFormat::Stream => "Stream",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(PipelineFormat::Json),
            "csv" => Some(PipelineFormat::Csv),
            "stream" => Some(PipelineFormat::Stream),
            _ => None,
        }
    }
}

/// Text items containing `sentinel` fault when they reach stage `stage`.
/// An empty sentinel never trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultPolicy {
    pub sentinel: String,
    pub stage: usize,
}

impl Default for FaultPolicy {
    fn default() -> Self {
        Self {
            sentinel: constants::FAULT_SENTINEL.to_string(),
            stage: constants::FAULT_STAGE,
        }
    }
}

impl From<&PipelineConfig> for FaultPolicy {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            sentinel: config.fault_sentinel.clone(),
            stage: config.fault_stage,
        }
    }
}

impl FaultPolicy {
    fn check(&self, position: usize, item: &StreamItem) -> Result<(), StageFault> {
        let tripped = position == self.stage
            && !self.sentinel.is_empty()
            && item.as_text().is_some_and(|text| text.contains(&self.sentinel));
        if tripped {
            Err(StageFault::new(position, constants::FAULT_REASON))
        } else {
            Ok(())
        }
    }
}

/// Terminal state of a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// Every stage ran; holds the last stage's result
    Completed(StreamItem),
    /// A stage faulted; the remaining stages were skipped
    Recovered(StageFault),
}

impl PipelineOutcome {
    pub fn is_recovered(&self) -> bool {
        matches!(self, PipelineOutcome::Recovered(_))
    }

    /// The value handed back to callers. Recovered runs always yield the
    /// fixed recovery message.
    pub fn into_value(self) -> StreamItem {
        match self {
            PipelineOutcome::Completed(item) => item,
            PipelineOutcome::Recovered(_) => StreamItem::from(constants::RECOVERY_MESSAGE),
        }
    }
}

impl fmt::Display for PipelineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineOutcome::Completed(item) => write!(f, "{}", item),
            PipelineOutcome::Recovered(_) => f.write_str(constants::RECOVERY_MESSAGE),
        }
    }
}

/// An ordered sequence of stages. Stages can be appended but never reordered.
#[derive(Debug, Clone)]
pub struct Pipeline {
    id: String,
    format: PipelineFormat,
    stages: Vec<Stage>,
    fault_policy: FaultPolicy,
}

impl Pipeline {
    pub fn new(id: impl Into<String>, format: PipelineFormat) -> Self {
        Self {
            id: id.into(),
            format,
            stages: Vec::new(),
            fault_policy: FaultPolicy::default(),
        }
    }

    /// Input, Transform, Output
    pub fn standard(id: impl Into<String>, format: PipelineFormat) -> Self {
        Self::new(id, format)
            .with_stage(Stage::Input)
            .with_stage(Stage::Transform)
            .with_stage(Stage::Output)
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.add_stage(stage);
        self
    }

    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }

    pub fn add_stage(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn format(&self) -> PipelineFormat {
        self.format
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run `item` through every stage in order. Any stage fault ends the run
    /// in `Recovered`; nothing is retried and nothing is raised.
    pub fn run(&self, item: StreamItem) -> PipelineOutcome {
        info!(pipeline = %self.id, format = self.format.as_str(), "processing data through pipeline");

        let mut current = item;
        for (index, stage) in self.stages.iter().enumerate() {
            let position = index + 1;
            current = match self.execute_stage(position, *stage, current) {
                Ok(next) => next,
                Err(fault) => {
                    warn!(pipeline = %self.id, stage = fault.stage, error = %fault.reason, "stage fault detected, recovery initiated");
                    PipelineMetrics::record_recovery(fault.stage);
                    return PipelineOutcome::Recovered(fault);
                }
            };
        }

        debug!(pipeline = %self.id, stages = self.stages.len(), "pipeline completed");
        PipelineMetrics::record_completed(self.stages.len());
        PipelineOutcome::Completed(current)
    }

    fn execute_stage(
        &self,
        position: usize,
        stage: Stage,
        item: StreamItem,
    ) -> Result<StreamItem, StageFault> {
        self.fault_policy.check(position, &item)?;
        Ok(stage.apply(item))
    }
}
