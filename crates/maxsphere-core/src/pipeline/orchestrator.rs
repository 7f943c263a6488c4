use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::{Result, SphereError};
use crate::io::image_io::check_frames;
use crate::io::naming::FrameNaming;
use crate::lut::{build_or_load_table, ProjectionTable, TableKey};
use crate::sampler::Sampler;
use crate::template::FrameTemplate;

use super::config::BatchConfig;
use super::types::{BatchSummary, NoOpReporter, PipelineStage, ProgressReporter};
use super::worker::Worker;

/// Everything a batch needs once configuration has been checked.
///
/// Built before any worker starts so configuration errors are fatal up
/// front. Shared read-only by all workers.
pub struct PreparedBatch {
    naming: FrameNaming,
    template: FrameTemplate,
    table: Arc<ProjectionTable>,
    sampler: Sampler,
    start: usize,
    stop: usize,
    workers: usize,
    skip_existing: bool,
}

impl PreparedBatch {
    pub fn template(&self) -> &FrameTemplate {
        &self.template
    }

    pub fn table(&self) -> &ProjectionTable {
        &self.table
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub fn naming(&self) -> &FrameNaming {
        &self.naming
    }

    pub fn skip_existing(&self) -> bool {
        self.skip_existing
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn range(&self) -> (usize, usize) {
        (self.start, self.stop)
    }
}

/// Check the configuration, detect the frame template from the first pair,
/// and load or build the projection table.
pub fn prepare_batch(
    config: &BatchConfig,
    reporter: &dyn ProgressReporter,
) -> Result<PreparedBatch> {
    config.validate()?;
    let naming = FrameNaming::new(&config.input, config.output.as_deref())?;
    let registry = config.registry()?;

    reporter.begin_stage(PipelineStage::Probing, None);
    let (path1, path2) = naming.source_paths(config.start);
    debug!(frame1 = %path1.display(), frame2 = %path2.display(), "Checking first frame pair");
    let template = check_frames(&path1, &path2, &registry)?.clone();
    reporter.finish_stage();

    let (width, height) = config.output_size(&template);
    info!(
        template = %template.name,
        frame_width = template.width,
        frame_height = template.height,
        output_width = width,
        output_height = height,
        antialias = config.antialias,
        "Detected frame template"
    );

    reporter.begin_stage(PipelineStage::LoadingTable, None);
    let key = TableKey::new(&template, width, height, config.antialias);
    let table = Arc::new(build_or_load_table(key, &config.cache_dir)?);
    reporter.finish_stage();

    Ok(PreparedBatch {
        sampler: Sampler::new(&template),
        naming,
        template,
        table,
        start: config.start,
        stop: config.stop,
        workers: config.worker_count(),
        skip_existing: config.skip_existing,
    })
}

/// Convert every frame index of a prepared batch.
///
/// Workers claim indices from one shared counter until it passes the stop
/// index, so each index is handled exactly once, in no particular order.
/// Per-frame failures are collected in the summary rather than returned.
pub fn run_batch(batch: &PreparedBatch, reporter: &dyn ProgressReporter) -> Result<BatchSummary> {
    let started = Instant::now();
    let total = (batch.stop - batch.start).saturating_add(1);
    reporter.begin_stage(PipelineStage::Converting, Some(total));
    info!(
        workers = batch.workers,
        start = batch.start,
        stop = batch.stop,
        "Starting workers"
    );

    let next_index = AtomicUsize::new(batch.start);
    let done = AtomicUsize::new(0);

    let results: Vec<std::thread::Result<BatchSummary>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..batch.workers)
            .map(|id| {
                let next_index = &next_index;
                let done = &done;
                scope.spawn(move || {
                    let mut worker = Worker::new(id, batch);
                    let mut summary = BatchSummary::default();
                    while let Some(index) = claim_next(next_index, batch.stop) {
                        debug!(worker = id, index, "Starting job");
                        let outcome = worker.process(index);
                        summary.record(index, outcome);
                        reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
                    }
                    debug!(worker = id, "Finished all jobs");
                    summary
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join()).collect()
    });

    let mut summary = BatchSummary::default();
    for (id, result) in results.into_iter().enumerate() {
        let worker_summary =
            result.map_err(|_| SphereError::Pipeline(format!("worker {id} panicked")))?;
        summary.merge(worker_summary);
    }
    summary.failed.sort_by_key(|(index, _)| *index);
    summary.elapsed = started.elapsed();
    reporter.finish_stage();

    info!(
        written = summary.written,
        skipped = summary.skipped,
        missing = summary.missing,
        failed = summary.failed.len(),
        seconds = summary.elapsed.as_secs_f64(),
        "Batch complete"
    );
    Ok(summary)
}

/// Take the next unclaimed index, or `None` once the counter has passed
/// `stop`. The counter never moves beyond `stop + 1`, so it cannot wrap.
fn claim_next(counter: &AtomicUsize, stop: usize) -> Option<usize> {
    counter
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |i| {
            (i <= stop).then(|| i + 1)
        })
        .ok()
}

/// Prepare and run a batch with a thread-safe progress reporter.
pub fn run_batch_reported(
    config: &BatchConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<BatchSummary> {
    let batch = prepare_batch(config, reporter.as_ref())?;
    run_batch(&batch, reporter.as_ref())
}

/// Prepare and run a batch without progress reporting.
pub fn run_batch_config(config: &BatchConfig) -> Result<BatchSummary> {
    run_batch_reported(config, Arc::new(NoOpReporter))
}
