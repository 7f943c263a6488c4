use indicatif::{ProgressBar, ProgressStyle};
use maxsphere_core::pipeline::{PipelineStage, ProgressReporter};

/// Progress reporter drawing an indicatif bar on stderr.
///
/// Setup stages show a spinner; the conversion stage a bar over the frame
/// range.
pub struct BarReporter {
    pb: ProgressBar,
}

impl BarReporter {
    pub fn new() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.pb.reset();
        match total_items {
            Some(total) => {
                self.pb.set_length(total as u64);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("{msg:20} [{bar:40}] {pos}/{len} ({eta})")
                {
                    self.pb.set_style(style.progress_chars("=> "));
                }
            }
            None => {
                self.pb.set_length(0);
                self.pb.set_style(ProgressStyle::default_spinner());
            }
        }
        self.pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        self.pb.set_message(stage.to_string());
    }

    fn advance(&self, items_done: usize) {
        self.pb.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        self.pb.tick();
    }
}

impl Default for BarReporter {
    fn default() -> Self {
        Self::new()
    }
}
