use image::Rgba;

use crate::consts::BLEND_STEEPNESS;
use crate::frame::{Pixel, RgbaFrame};
use crate::geometry::{FaceId, Uv};
use crate::template::FrameTemplate;

/// Where a face's texels live in the pair of source frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Region {
    Left,
    Center,
    Right,
}

/// Which frame of the pair holds the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Track {
    First,
    Second,
}

/// Source layout of each face.
///
/// The first frame carries left, front and right; the second carries down,
/// back and top, stored rotated by 90 degrees.
fn face_source(face: FaceId) -> (Track, Region) {
    match face {
        FaceId::Left => (Track::First, Region::Left),
        FaceId::Front => (Track::First, Region::Center),
        FaceId::Right => (Track::First, Region::Right),
        FaceId::Down => (Track::Second, Region::Left),
        FaceId::Back => (Track::Second, Region::Center),
        FaceId::Top => (Track::Second, Region::Right),
    }
}

/// Resolves cube-face texture coordinates to colours in a frame pair.
///
/// Side faces are stored with an overlap band in the middle; the two copies
/// of the band are cross-faded with a tanh curve to hide the lens seam.
#[derive(Clone, Debug)]
pub struct Sampler {
    height: f64,
    side_width: f64,
    center_width: f64,
    left_x: f64,
    center_x: f64,
    right_x: f64,
    duv: f64,
}

impl Sampler {
    pub fn new(template: &FrameTemplate) -> Self {
        Self {
            height: template.height as f64,
            side_width: template.side_width as f64,
            center_width: template.center_width as f64,
            left_x: 0.0,
            center_x: template.side_width as f64,
            right_x: template.right_region_x() as f64,
            duv: template.blend_fraction(),
        }
    }

    /// Colour of `face` at `uv`, read from `frame1` (track 0) or `frame2`
    /// (track 5).
    pub fn sample_colour(
        &self,
        face: FaceId,
        uv: Uv,
        frame1: &RgbaFrame,
        frame2: &RgbaFrame,
    ) -> Pixel {
        let uv = match face {
            FaceId::Down | FaceId::Back | FaceId::Top => uv.rotated_ccw(),
            FaceId::Left | FaceId::Right | FaceId::Front => uv,
        };
        let (track, region) = face_source(face);
        let frame = match track {
            Track::First => frame1,
            Track::Second => frame2,
        };
        let u = uv.u as f64;
        let v = uv.v as f64;

        let x0 = match region {
            Region::Center => return self.fetch(frame, self.center_x + u * self.center_width, v),
            Region::Left => self.left_x,
            Region::Right => self.right_x,
        };

        match self.split(u) {
            SideSample::Single(su) => self.fetch(frame, x0 + su * self.side_width, v),
            SideSample::Blend { left, right, alpha } => {
                let c1 = self.fetch(frame, x0 + left * self.side_width, v);
                let c2 = self.fetch(frame, x0 + right * self.side_width, v);
                blend(c1, c2, alpha)
            }
        }
    }

    /// Map a face `u` to positions within a side region.
    fn split(&self, u: f64) -> SideSample {
        let duv = self.duv;
        let left = 2.0 * (0.5 - duv) * u;
        let right = 2.0 * (0.5 - duv) * (u - 0.5) + 0.5 + duv;
        if left <= 0.5 - 2.0 * duv {
            SideSample::Single(left)
        } else if right >= 0.5 + 2.0 * duv {
            SideSample::Single(right)
        } else {
            SideSample::Blend {
                left,
                right,
                alpha: (left - 0.5 + 2.0 * duv) / (2.0 * duv),
            }
        }
    }

    #[inline]
    fn fetch(&self, frame: &RgbaFrame, x: f64, v: f64) -> Pixel {
        let iy = (v * self.height) as usize;
        frame.texel(x as usize, iy)
    }
}

enum SideSample {
    Single(f64),
    Blend { left: f64, right: f64, alpha: f64 },
}

/// Smoothed blend weight: near 0 and 1 at the band edges, 0.5 at its center.
pub fn seam_weight(alpha: f64) -> f64 {
    (alpha * BLEND_STEEPNESS - BLEND_STEEPNESS / 2.0).tanh() / 2.0 + 0.5
}

/// Cross-fade `c1` into `c2` by the seam weight of `alpha`.
///
/// Colour channels are truncated to `u8`; alpha is taken from `c1`.
pub fn blend(c1: Pixel, c2: Pixel, alpha: f64) -> Pixel {
    let w = seam_weight(alpha);
    let m1 = 1.0 - w;
    let mut out = [0u8, 0, 0, c1.0[3]];
    for (k, o) in out.iter_mut().take(3).enumerate() {
        *o = (m1 * c1.0[k] as f64 + w * c2.0[k] as f64) as u8;
    }
    Rgba(out)
}
