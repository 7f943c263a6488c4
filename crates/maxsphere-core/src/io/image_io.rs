use std::path::Path;

use image::{ColorType, DynamicImage, ExtendedColorType, ImageDecoder, ImageFormat, ImageReader};

use crate::error::{Result, SphereError};
use crate::frame::RgbaFrame;
use crate::template::{FrameTemplate, TemplateRegistry};

/// Whether the file name looks like a JPEG or PNG frame.
pub fn is_supported_frame(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("jpg" | "jpeg" | "png")
    )
}

/// Read the declared dimensions of an image without decoding it.
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    if !is_supported_frame(path) {
        return Err(SphereError::UnsupportedFrameFormat(path.to_path_buf()));
    }
    Ok(image::image_dimensions(path)?)
}

/// Check a frame pair and pick the template it was recorded with.
///
/// Both frames must be JPEG or PNG, exist, share one size, and that size
/// must match a registered template.
pub fn check_frames<'a>(
    path1: &Path,
    path2: &Path,
    registry: &'a TemplateRegistry,
) -> Result<&'a FrameTemplate> {
    let (w1, h1) = probe_dimensions(path1)?;
    let (w2, h2) = probe_dimensions(path2)?;
    if w1 != w2 || h1 != h2 {
        return Err(SphereError::FrameSizeMismatch {
            width1: w1,
            height1: h1,
            width2: w2,
            height2: h2,
        });
    }
    registry.detect(w1, h1)
}

/// Decode a JPEG/PNG into an existing frame buffer.
///
/// The file must have exactly the buffer's dimensions. `scratch` holds the
/// packed decode of non-RGBA images and is reused between calls.
pub fn load_frame_into(path: &Path, frame: &mut RgbaFrame, scratch: &mut Vec<u8>) -> Result<()> {
    let decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;

    let (w, h) = decoder.dimensions();
    if w as usize != frame.width() || h as usize != frame.height() {
        return Err(SphereError::UnexpectedFrameSize {
            path: path.to_path_buf(),
            width: w,
            height: h,
            expected_width: frame.width() as u32,
            expected_height: frame.height() as u32,
        });
    }

    match decoder.color_type() {
        ColorType::Rgba8 => {
            let raw: &mut [u8] = &mut frame.data;
            decoder.read_image(raw)?;
        }
        ColorType::Rgb8 => {
            scratch.resize(decoder.total_bytes() as usize, 0);
            decoder.read_image(scratch)?;
            let raw: &mut [u8] = &mut frame.data;
            for (dst, src) in raw.chunks_exact_mut(4).zip(scratch.chunks_exact(3)) {
                dst[..3].copy_from_slice(src);
                dst[3] = 255;
            }
        }
        ColorType::L8 => {
            scratch.resize(decoder.total_bytes() as usize, 0);
            decoder.read_image(scratch)?;
            let raw: &mut [u8] = &mut frame.data;
            for (dst, &l) in raw.chunks_exact_mut(4).zip(scratch.iter()) {
                dst.copy_from_slice(&[l, l, l, 255]);
            }
        }
        _ => {
            let rgba = DynamicImage::from_decoder(decoder)?.to_rgba8();
            frame.data.copy_from_slice(rgba.as_raw());
        }
    }
    Ok(())
}

/// Write a frame as an 8-bit RGB PNG, dropping alpha.
///
/// `scratch` receives the packed RGB data and is reused between calls.
pub fn save_png(frame: &RgbaFrame, path: &Path, scratch: &mut Vec<u8>) -> Result<()> {
    scratch.clear();
    scratch.reserve(frame.width() * frame.height() * 3);
    for px in frame.data.as_raw().chunks_exact(4) {
        scratch.extend_from_slice(&px[..3]);
    }
    image::save_buffer_with_format(
        path,
        scratch,
        frame.width() as u32,
        frame.height() as u32,
        ExtendedColorType::Rgb8,
        ImageFormat::Png,
    )?;
    Ok(())
}
