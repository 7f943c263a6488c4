use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SphereError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("No recognised frame template for {width}x{height} frames")]
    UnknownTemplate { width: u32, height: u32 },

    #[error("Frame sizes don't match: {width1}x{height1} vs {width2}x{height2}")]
    FrameSizeMismatch {
        width1: u32,
        height1: u32,
        width2: u32,
        height2: u32,
    },

    #[error("Frame {path} is {width}x{height}, expected {expected_width}x{expected_height}")]
    UnexpectedFrameSize {
        path: PathBuf,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("Unsupported frame file {0}: expected a JPEG or PNG")]
    UnsupportedFrameFormat(PathBuf),

    #[error("Filename pattern \"{pattern}\" has {found} frame placeholders, expected {expected}")]
    InvalidPattern {
        pattern: String,
        expected: usize,
        found: usize,
    },

    #[error("Malformed filename pattern \"{pattern}\": {reason}")]
    MalformedPattern { pattern: String, reason: String },

    #[error("Invalid frame template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Could not map longitude {longitude}, latitude {latitude} onto the cube: {reason}")]
    Mapping {
        longitude: f64,
        latitude: f64,
        reason: String,
    },

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Projection table cache error: {0}")]
    Cache(String),
}

pub type Result<T> = std::result::Result<T, SphereError>;
