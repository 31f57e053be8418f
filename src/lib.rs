pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod manager;
pub mod metrics;
pub mod pipeline;
pub mod processor;
pub mod stream;
pub mod types;

pub use error::{NexusError, Result, StageFault};
pub use manager::{Component, DispatchResult, NexusManager};
pub use pipeline::{FaultPolicy, Pipeline, PipelineFormat, PipelineOutcome, Stage};
pub use processor::ProcessorKind;
pub use stream::{BatchSummary, Stream, StreamKind, StreamStats};
pub use types::StreamItem;
