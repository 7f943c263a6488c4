use image::Rgba;

use crate::error::{Result, SphereError};
use crate::frame::RgbaFrame;
use crate::lut::ProjectionTable;
use crate::sampler::Sampler;

/// Render one equirectangular frame from a source frame pair.
///
/// Every output pixel averages its `antialias^2` supersamples, walking the
/// table in emission order. Channel sums are widened to `u32` and divided
/// with truncation.
pub fn project(
    sampler: &Sampler,
    table: &ProjectionTable,
    frame1: &RgbaFrame,
    frame2: &RgbaFrame,
    out: &mut RgbaFrame,
) -> Result<()> {
    if out.width() != table.width() || out.height() != table.height() {
        return Err(SphereError::InvalidConfig(format!(
            "output buffer is {}x{}, projection table is {}x{}",
            out.width(),
            out.height(),
            table.width(),
            table.height()
        )));
    }

    let n = table.key().samples_per_pixel() as u32;
    let pixel_count = table.width() * table.height();
    for index in 0..pixel_count {
        let mut sum = [0u32; 4];
        for entry in table.pixel_samples(index) {
            let c = sampler.sample_colour(entry.face, entry.uv, frame1, frame2);
            for (acc, &ch) in sum.iter_mut().zip(c.0.iter()) {
                *acc += ch as u32;
            }
        }
        out.set_index(
            index,
            Rgba([
                (sum[0] / n) as u8,
                (sum[1] / n) as u8,
                (sum[2] / n) as u8,
                (sum[3] / n) as u8,
            ]),
        );
    }
    Ok(())
}
