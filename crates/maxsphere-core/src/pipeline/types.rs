use std::path::PathBuf;
use std::time::Duration;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Probing,
    LoadingTable,
    Converting,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Probing => write!(f, "Probing frames"),
            Self::LoadingTable => write!(f, "Preparing projection table"),
            Self::Converting => write!(f, "Converting frames"),
        }
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_batch` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// What happened to one frame index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Written(PathBuf),
    /// Output already existed and skip-existing is on.
    Skipped(PathBuf),
    /// A source frame of the pair does not exist.
    MissingSource(PathBuf),
    Failed(String),
}

/// Totals for a batch run.
#[derive(Clone, Debug, Default)]
pub struct BatchSummary {
    pub written: usize,
    pub skipped: usize,
    pub missing: usize,
    /// Frame index and reason for every failed frame, sorted by index.
    pub failed: Vec<(usize, String)>,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub(super) fn record(&mut self, index: usize, outcome: FrameOutcome) {
        match outcome {
            FrameOutcome::Written(_) => self.written += 1,
            FrameOutcome::Skipped(_) => self.skipped += 1,
            FrameOutcome::MissingSource(_) => self.missing += 1,
            FrameOutcome::Failed(reason) => self.failed.push((index, reason)),
        }
    }

    pub(super) fn merge(&mut self, other: BatchSummary) {
        self.written += other.written;
        self.skipped += other.skipped;
        self.missing += other.missing;
        self.failed.extend(other.failed);
    }
}
