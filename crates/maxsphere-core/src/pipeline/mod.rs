pub mod config;
mod orchestrator;
mod types;
mod worker;

pub use orchestrator::{
    prepare_batch, run_batch, run_batch_config, run_batch_reported, PreparedBatch,
};
pub use types::{BatchSummary, FrameOutcome, PipelineStage, ProgressReporter};
