use std::time::Instant;

use tracing::{debug, warn};

use crate::frame::RgbaFrame;
use crate::io::image_io::{load_frame_into, save_png};
use crate::project::project;

use super::orchestrator::PreparedBatch;
use super::types::FrameOutcome;

/// One pool thread's private state.
///
/// Buffers are sized once from the template and output size and reused for
/// every frame the worker claims.
pub(super) struct Worker<'a> {
    id: usize,
    batch: &'a PreparedBatch,
    frame1: RgbaFrame,
    frame2: RgbaFrame,
    spherical: RgbaFrame,
    decode_scratch: Vec<u8>,
    encode_scratch: Vec<u8>,
}

impl<'a> Worker<'a> {
    pub(super) fn new(id: usize, batch: &'a PreparedBatch) -> Self {
        let template = batch.template();
        let table = batch.table();
        Self {
            id,
            batch,
            frame1: RgbaFrame::new(template.width, template.height),
            frame2: RgbaFrame::new(template.width, template.height),
            spherical: RgbaFrame::new(table.width(), table.height()),
            decode_scratch: Vec::new(),
            encode_scratch: Vec::new(),
        }
    }

    /// Convert frame pair `index`, reporting instead of propagating errors.
    pub(super) fn process(&mut self, index: usize) -> FrameOutcome {
        let naming = self.batch.naming();
        let (path1, path2) = naming.source_paths(index);
        let out_path = naming.output_path(index);

        if self.batch.skip_existing() && out_path.exists() {
            debug!(worker = self.id, index, path = %out_path.display(), "Skipping frame, output exists");
            return FrameOutcome::Skipped(out_path);
        }

        for path in [&path1, &path2] {
            if !path.exists() {
                debug!(worker = self.id, index, path = %path.display(), "Source frame missing");
                return FrameOutcome::MissingSource(path.clone());
            }
        }

        if let Err(e) = load_frame_into(&path1, &mut self.frame1, &mut self.decode_scratch) {
            warn!(worker = self.id, index, path = %path1.display(), error = %e, "Failed to read frame");
            return FrameOutcome::Failed(format!("{}: {}", path1.display(), e));
        }
        if let Err(e) = load_frame_into(&path2, &mut self.frame2, &mut self.decode_scratch) {
            warn!(worker = self.id, index, path = %path2.display(), error = %e, "Failed to read frame");
            return FrameOutcome::Failed(format!("{}: {}", path2.display(), e));
        }

        let started = Instant::now();
        if let Err(e) = project(
            self.batch.sampler(),
            self.batch.table(),
            &self.frame1,
            &self.frame2,
            &mut self.spherical,
        ) {
            warn!(worker = self.id, index, error = %e, "Projection failed");
            return FrameOutcome::Failed(e.to_string());
        }
        debug!(
            worker = self.id,
            index,
            seconds = started.elapsed().as_secs_f64(),
            "Projected frame"
        );

        if let Err(e) = save_png(&self.spherical, &out_path, &mut self.encode_scratch) {
            warn!(worker = self.id, index, path = %out_path.display(), error = %e, "Failed to write output");
            return FrameOutcome::Failed(format!("{}: {}", out_path.display(), e));
        }
        debug!(worker = self.id, index, path = %out_path.display(), "Saved equirectangular");
        FrameOutcome::Written(out_path)
    }
}
