use image::{Rgba, RgbaImage};

/// One RGBA pixel, 8 bits per channel.
pub type Pixel = Rgba<u8>;

/// A dense, row-major RGBA frame.
///
/// Used both for decoded source frames and for the equirectangular output.
/// Workers allocate their frames once and decode into them repeatedly.
#[derive(Clone, Debug)]
pub struct RgbaFrame {
    pub data: RgbaImage,
}

impl RgbaFrame {
    /// Allocate an opaque black frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: RgbaImage::from_pixel(width as u32, height as u32, Rgba([0, 0, 0, 255])),
        }
    }

    pub fn width(&self) -> usize {
        self.data.width() as usize
    }

    pub fn height(&self) -> usize {
        self.data.height() as usize
    }

    /// Pixel at column `ix`, row `iy`. Coordinates are clamped to the frame.
    #[inline]
    pub fn texel(&self, ix: usize, iy: usize) -> Pixel {
        let w = self.width();
        let ix = ix.min(w - 1);
        let iy = iy.min(self.height() - 1);
        let offset = (iy * w + ix) * 4;
        let raw = self.data.as_raw();
        Rgba([raw[offset], raw[offset + 1], raw[offset + 2], raw[offset + 3]])
    }

    /// Overwrite the pixel at the given row-major index.
    #[inline]
    pub fn set_index(&mut self, index: usize, pixel: Pixel) {
        let offset = index * 4;
        let raw: &mut [u8] = &mut self.data;
        raw[offset..offset + 4].copy_from_slice(&pixel.0);
    }
}
