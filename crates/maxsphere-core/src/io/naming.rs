use std::path::PathBuf;

use crate::consts::{DEFAULT_OUTPUT_SUFFIX, TRACK_BACK, TRACK_FRONT};
use crate::error::{Result, SphereError};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Int {
        width: usize,
        zero_pad: bool,
        left_align: bool,
    },
}

/// A printf-style filename pattern with integer placeholders.
///
/// Supports `%d`, `%i`, `%u` with optional `-`/`0` flags, a field width and
/// `l`/`ll` length modifiers. `%%` is a literal percent sign.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilenamePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl FilenamePattern {
    /// Parse `pattern`, requiring exactly `expected` placeholders.
    pub fn parse(pattern: &str, expected: usize) -> Result<Self> {
        let segments = parse_segments(pattern)?;
        let found = segments
            .iter()
            .filter(|s| matches!(s, Segment::Int { .. }))
            .count();
        if found != expected {
            return Err(SphereError::InvalidPattern {
                pattern: pattern.to_string(),
                expected,
                found,
            });
        }
        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// Substitute `values` into the placeholders, in order.
    pub fn render(&self, values: &[u64]) -> String {
        let mut out = String::with_capacity(self.raw.len() + 8);
        let mut values = values.iter();
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Int {
                    width,
                    zero_pad,
                    left_align,
                } => {
                    let n = values.next().copied().unwrap_or(0);
                    let w = *width;
                    let formatted = if *left_align {
                        format!("{n:<w$}")
                    } else if *zero_pad {
                        format!("{n:0w$}")
                    } else {
                        format!("{n:>w$}")
                    };
                    out.push_str(&formatted);
                }
            }
        }
        out
    }
}

fn parse_segments(pattern: &str) -> Result<Vec<Segment>> {
    let malformed = |reason: &str| SphereError::MalformedPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            literal.push('%');
            continue;
        }

        let mut zero_pad = false;
        let mut left_align = false;
        while let Some(&flag) = chars.peek() {
            match flag {
                '0' => zero_pad = true,
                '-' => left_align = true,
                _ => break,
            }
            chars.next();
        }

        let mut width = 0usize;
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            width = width * 10 + d as usize;
            chars.next();
        }

        while chars.peek() == Some(&'l') {
            chars.next();
        }

        match chars.next() {
            Some('d' | 'i' | 'u') => {}
            Some(other) => {
                return Err(malformed(&format!(
                    "unsupported conversion '%{other}', only integer placeholders are allowed"
                )))
            }
            None => return Err(malformed("pattern ends inside a placeholder")),
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Int {
            width,
            zero_pad,
            left_align,
        });
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Resolves frame indices to source and destination paths.
#[derive(Clone, Debug)]
pub struct FrameNaming {
    input: FilenamePattern,
    output: Option<FilenamePattern>,
}

impl FrameNaming {
    /// `input` takes (track, frame); `output`, if given, takes (frame).
    pub fn new(input: &str, output: Option<&str>) -> Result<Self> {
        let input = FilenamePattern::parse(input, 2)?;
        let output = output.map(|o| FilenamePattern::parse(o, 1)).transpose()?;
        Ok(Self { input, output })
    }

    /// Source paths of the first (track 0) and second (track 5) frame.
    pub fn source_paths(&self, index: usize) -> (PathBuf, PathBuf) {
        let n = index as u64;
        (
            PathBuf::from(self.input.render(&[TRACK_FRONT as u64, n])),
            PathBuf::from(self.input.render(&[TRACK_BACK as u64, n])),
        )
    }

    /// Destination of the equirectangular image for `index`.
    ///
    /// Without an output pattern this is the first frame's path with the
    /// extension replaced by `_sphere.png`.
    pub fn output_path(&self, index: usize) -> PathBuf {
        match &self.output {
            Some(pattern) => PathBuf::from(pattern.render(&[index as u64])),
            None => {
                let mut name = self.input.render(&[TRACK_FRONT as u64, index as u64]);
                let stem_start = name.rfind(|c: char| c == '/' || c == '\\').map_or(0, |i| i + 1);
                if let Some(dot) = name[stem_start..].rfind('.') {
                    if dot > 0 {
                        name.truncate(stem_start + dot);
                    }
                }
                name.push_str(DEFAULT_OUTPUT_SUFFIX);
                PathBuf::from(name)
            }
        }
    }
}
