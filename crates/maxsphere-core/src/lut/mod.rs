pub mod cache;

use std::f64::consts::PI;
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, SphereError};
use crate::geometry::{resolve_face, FaceId, Uv};
use crate::template::FrameTemplate;

pub use cache::{load_table, save_table};

/// Face and texture coordinate for one supersample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LutEntry {
    pub face: FaceId,
    pub uv: Uv,
}

/// Identity of a projection table: everything its contents depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TableKey {
    pub template_id: u32,
    pub width: usize,
    pub height: usize,
    pub antialias: usize,
}

impl TableKey {
    pub fn new(template: &FrameTemplate, width: usize, height: usize, antialias: usize) -> Self {
        Self {
            template_id: template.id,
            width,
            height,
            antialias,
        }
    }

    pub fn samples_per_pixel(&self) -> usize {
        self.antialias * self.antialias
    }

    pub fn entry_count(&self) -> usize {
        self.width * self.height * self.samples_per_pixel()
    }

    /// Cache file name for this key.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}_{}.data",
            self.template_id, self.width, self.height, self.antialias
        )
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.antialias == 0 {
            return Err(SphereError::InvalidConfig(format!(
                "projection table needs non-zero size and antialias, got {}x{} aa {}",
                self.width, self.height, self.antialias
            )));
        }
        Ok(())
    }
}

/// Precomputed (face, uv) for every supersample of the output image.
///
/// Entries are row-major over (output row, output column, sub-row,
/// sub-column), so the samples of one output pixel are contiguous.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionTable {
    key: TableKey,
    entries: Vec<LutEntry>,
}

impl ProjectionTable {
    /// Wrap entries produced elsewhere (e.g. read from the cache).
    pub fn from_entries(key: TableKey, entries: Vec<LutEntry>) -> Result<Self> {
        key.validate()?;
        if entries.len() != key.entry_count() {
            return Err(SphereError::Cache(format!(
                "expected {} entries, got {}",
                key.entry_count(),
                entries.len()
            )));
        }
        Ok(Self { key, entries })
    }

    /// Compute the table from scratch.
    ///
    /// Output rows are built in parallel; each entry depends only on its own
    /// position so the result is identical to a sequential build.
    pub fn build(key: TableKey) -> Result<Self> {
        key.validate()?;
        let row_len = key.width * key.samples_per_pixel();
        let mut entries = vec![
            LutEntry {
                face: FaceId::Front,
                uv: Uv::default(),
            };
            key.entry_count()
        ];

        entries
            .par_chunks_mut(row_len)
            .enumerate()
            .try_for_each(|(j, row)| fill_row(&key, j, row))?;

        Ok(Self { key, entries })
    }

    pub fn key(&self) -> &TableKey {
        &self.key
    }

    pub fn width(&self) -> usize {
        self.key.width
    }

    pub fn height(&self) -> usize {
        self.key.height
    }

    pub fn entries(&self) -> &[LutEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Supersamples of output pixel `index` (row-major).
    pub fn pixel_samples(&self, index: usize) -> &[LutEntry] {
        let n = self.key.samples_per_pixel();
        &self.entries[index * n..(index + 1) * n]
    }
}

/// Longitude and latitude of sub-sample (ai, aj) of output pixel (i, j).
pub fn sample_angles(key: &TableKey, i: usize, j: usize, ai: usize, aj: usize) -> (f64, f64) {
    let aa = key.antialias as f64;
    let x = (i as f64 + ai as f64 / aa) / key.width as f64;
    let y = (j as f64 + aj as f64 / aa) / key.height as f64;
    (x * 2.0 * PI - PI, y * PI - PI / 2.0)
}

fn fill_row(key: &TableKey, j: usize, row: &mut [LutEntry]) -> Result<()> {
    let aa = key.antialias;
    let mut idx = 0;
    for i in 0..key.width {
        for aj in 0..aa {
            for ai in 0..aa {
                let (longitude, latitude) = sample_angles(key, i, j, ai, aj);
                let (face, uv) = resolve_face(longitude, latitude)?;
                row[idx] = LutEntry { face, uv };
                idx += 1;
            }
        }
    }
    Ok(())
}

/// Load the table for `key` from `cache_dir`, or build and store it.
///
/// Any problem reading the cache falls back to a rebuild. Failing to write
/// the rebuilt table is an error.
pub fn build_or_load_table(key: TableKey, cache_dir: &Path) -> Result<ProjectionTable> {
    let path = cache_dir.join(key.file_name());
    if path.exists() {
        match load_table(&path, &key) {
            Ok(table) => {
                info!(path = %path.display(), entries = table.len(), "Loaded projection table");
                return Ok(table);
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Discarding projection table cache");
            }
        }
    }

    info!(
        template = key.template_id,
        width = key.width,
        height = key.height,
        antialias = key.antialias,
        "Generating projection table"
    );
    let table = ProjectionTable::build(key)?;
    save_table(&path, &table)?;
    debug!(path = %path.display(), "Saved projection table");
    Ok(table)
}
