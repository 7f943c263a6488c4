/// Largest UV coordinate handed to the sampler. Coordinates that land on 1.0
/// are pulled back to this value so texel lookups stay inside the face.
pub const NEARLY_ONE: f32 = 0.99999;

/// Slack allowed when testing whether a ray hits a face's [-1, 1] square.
/// Rays through cube edges and corners can miss every face by a rounding
/// error; within this tolerance the coordinate is clamped onto the face.
pub const FACE_EDGE_TOLERANCE: f64 = 1e-9;

/// Track number substituted into the input pattern for the first frame
/// (front/left/right lens stream).
pub const TRACK_FRONT: u32 = 0;

/// Track number substituted into the input pattern for the second frame
/// (back/top/down lens stream).
pub const TRACK_BACK: u32 = 5;

/// Default supersampling factor per output-pixel axis.
pub const DEFAULT_ANTIALIAS: usize = 2;

/// Default last frame index of a batch run.
pub const DEFAULT_STOP_INDEX: usize = 100_000;

/// Output width is rounded down to a multiple of this.
pub const OUTPUT_WIDTH_MULTIPLE: usize = 4;

/// Suffix replacing the input extension when no output pattern is given.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_sphere.png";

/// Magic bytes at the start of a projection table cache file.
pub const LUT_MAGIC: &[u8; 13] = b"MAXSPHERE-LUT";

/// Version of the projection table cache layout.
pub const LUT_FORMAT_VERSION: u32 = 1;

/// Steepness of the tanh curve applied to the seam blend weight.
pub const BLEND_STEEPNESS: f64 = 5.0;
