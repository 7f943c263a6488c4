use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ANTIALIAS, DEFAULT_STOP_INDEX, OUTPUT_WIDTH_MULTIPLE};
use crate::error::{Result, SphereError};
use crate::template::{FrameTemplate, TemplateRegistry};

/// Settings for converting a range of frame pairs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Source filename pattern with two placeholders: track, then frame.
    pub input: String,
    /// Destination pattern with one placeholder for the frame index.
    /// Defaults to the track 0 name with a `_sphere.png` suffix.
    #[serde(default)]
    pub output: Option<String>,
    /// First frame index.
    #[serde(default)]
    pub start: usize,
    /// Last frame index, inclusive.
    #[serde(default = "default_stop")]
    pub stop: usize,
    /// Number of worker threads.
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Supersamples per output-pixel axis.
    #[serde(default = "default_antialias")]
    pub antialias: usize,
    /// Output width; the template default when unset.
    #[serde(default)]
    pub width: Option<usize>,
    /// Leave frames alone whose output file already exists.
    #[serde(default = "default_true")]
    pub skip_existing: bool,
    /// Directory holding projection table caches.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Frame layouts to recognise in addition to the built-in ones.
    #[serde(default)]
    pub templates: Vec<FrameTemplate>,
}

fn default_stop() -> usize {
    DEFAULT_STOP_INDEX
}
fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
fn default_antialias() -> usize {
    DEFAULT_ANTIALIAS
}
fn default_true() -> bool {
    true
}
fn default_cache_dir() -> PathBuf {
    PathBuf::from(".")
}

impl BatchConfig {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: None,
            start: 0,
            stop: DEFAULT_STOP_INDEX,
            threads: default_threads(),
            antialias: DEFAULT_ANTIALIAS,
            width: None,
            skip_existing: true,
            cache_dir: default_cache_dir(),
            templates: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.stop < self.start {
            return Err(SphereError::InvalidConfig(format!(
                "stop index {} is before start index {}",
                self.stop, self.start
            )));
        }
        if self.stop == usize::MAX {
            return Err(SphereError::InvalidConfig(format!(
                "stop index must be below {}",
                usize::MAX
            )));
        }
        if self.antialias == 0 {
            return Err(SphereError::InvalidConfig("antialias must be at least 1".into()));
        }
        if self.threads == 0 {
            return Err(SphereError::InvalidConfig("need at least one thread".into()));
        }
        Ok(())
    }

    /// Built-in templates plus the ones declared in this config.
    pub fn registry(&self) -> Result<TemplateRegistry> {
        TemplateRegistry::with_extra(&self.templates)
    }

    /// Number of frame indices in the inclusive range.
    pub fn frame_count(&self) -> usize {
        self.stop.saturating_sub(self.start).saturating_add(1)
    }

    /// Workers actually started: never more than there are frames.
    pub fn worker_count(&self) -> usize {
        self.threads.min(self.frame_count()).max(1)
    }

    /// Output size for `template`: width rounded down to a multiple of 4,
    /// height half of it.
    pub fn output_size(&self, template: &FrameTemplate) -> (usize, usize) {
        let requested = self.width.unwrap_or(template.equirect_width);
        let width = (requested / OUTPUT_WIDTH_MULTIPLE * OUTPUT_WIDTH_MULTIPLE)
            .max(OUTPUT_WIDTH_MULTIPLE);
        (width, width / 2)
    }
}
