use std::path::Path;

use image::{Rgb, RgbImage, Rgba, RgbaImage};

use maxsphere_core::frame::RgbaFrame;
use maxsphere_core::template::FrameTemplate;

/// A small frame layout so whole batches run in milliseconds.
///
/// Side regions are 40 px wide with a 4 px band (blend fraction 0.1).
pub fn tiny_template() -> FrameTemplate {
    FrameTemplate {
        id: 7,
        name: "tiny".into(),
        width: 112,
        height: 32,
        side_width: 40,
        center_width: 32,
        blend_width: 4,
        equirect_width: 64,
    }
}

/// Frame whose pixels encode their own position: R = column, G = row,
/// B = `tag`.
pub fn coded_frame(template: &FrameTemplate, tag: u8) -> RgbaFrame {
    let mut frame = RgbaFrame::new(template.width, template.height);
    for (x, y, p) in frame.data.enumerate_pixels_mut() {
        *p = Rgba([x as u8, y as u8, tag, 255]);
    }
    frame
}

/// Frame filled with a single colour.
pub fn flat_frame(template: &FrameTemplate, colour: [u8; 4]) -> RgbaFrame {
    RgbaFrame {
        data: RgbaImage::from_pixel(template.width as u32, template.height as u32, Rgba(colour)),
    }
}

/// Source pattern for frames under `dir`: `dir/track%d/frame%03d.png`.
pub fn input_pattern(dir: &Path) -> String {
    dir.join("track%d")
        .join("frame%03d.png")
        .to_str()
        .expect("utf-8 temp path")
        .to_string()
}

/// Write a synthetic PNG for `track` and frame `index` matching
/// [`input_pattern`]. Content varies with both so outputs differ per frame.
pub fn write_source_frame(dir: &Path, track: u32, index: usize, width: u32, height: u32) {
    let track_dir = dir.join(format!("track{track}"));
    std::fs::create_dir_all(&track_dir).expect("create track dir");
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 2 + index as u32) as u8,
            (y * 5 + track) as u8,
            (index * 13) as u8,
        ])
    });
    img.save(track_dir.join(format!("frame{index:03}.png")))
        .expect("write source frame");
}

/// Write both tracks of frame `index` at the template size.
pub fn write_source_pair(dir: &Path, template: &FrameTemplate, index: usize) {
    for track in [0, 5] {
        write_source_frame(dir, track, index, template.width as u32, template.height as u32);
    }
}
