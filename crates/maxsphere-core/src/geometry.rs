use std::f64::consts::PI;

use crate::consts::{FACE_EDGE_TOLERANCE, NEARLY_ONE};
use crate::error::{Result, SphereError};

/// One face of the unit cube around the camera.
///
/// The discriminants are the scan order used when resolving a ray and the
/// face code stored in the projection table cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FaceId {
    Left = 0,
    Right = 1,
    Top = 2,
    Front = 3,
    Back = 4,
    Down = 5,
}

impl FaceId {
    /// All faces, in scan order.
    pub const ALL: [FaceId; 6] = [
        FaceId::Left,
        FaceId::Right,
        FaceId::Top,
        FaceId::Front,
        FaceId::Back,
        FaceId::Down,
    ];

    /// Plane `ax + by + cz + d = 0` containing this face.
    pub const fn plane(self) -> Plane {
        match self {
            FaceId::Left => Plane::new(-1.0, 0.0, 0.0, -1.0),
            FaceId::Right => Plane::new(1.0, 0.0, 0.0, -1.0),
            FaceId::Top => Plane::new(0.0, 0.0, 1.0, -1.0),
            FaceId::Front => Plane::new(0.0, 1.0, 0.0, -1.0),
            FaceId::Back => Plane::new(0.0, -1.0, 0.0, -1.0),
            FaceId::Down => Plane::new(0.0, 0.0, -1.0, -1.0),
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<FaceId> {
        Self::ALL.get(code as usize).copied()
    }
}

impl std::fmt::Display for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Top => write!(f, "top"),
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Infinite plane `ax + by + cz + d = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Plane {
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }
}

/// Normalized texture coordinate within a face.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Uv {
    pub u: f32,
    pub v: f32,
}

impl Uv {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    /// Rotate 90 degrees counterclockwise within the face.
    pub fn rotated_ccw(self) -> Self {
        Self {
            u: self.v,
            v: NEARLY_ONE - self.u,
        }
    }
}

/// Unit ray from the cube center towards (longitude, latitude).
pub fn direction(longitude: f64, latitude: f64) -> [f64; 3] {
    let cos_lat = latitude.cos();
    [
        cos_lat * longitude.sin(),
        cos_lat * longitude.cos(),
        latitude.sin(),
    ]
}

/// Find the cube face hit by the ray at (longitude, latitude) and the
/// texture coordinate of the hit point on that face.
///
/// Longitude is in (-pi, pi], latitude in [-pi/2, pi/2]. In-face
/// coordinates are corrected through `atan(x) * 4 / pi` so texels are
/// spaced evenly in angle rather than along the face.
pub fn resolve_face(longitude: f64, latitude: f64) -> Result<(FaceId, Uv)> {
    let p = direction(longitude, latitude);

    let mut hit = None;
    for face in FaceId::ALL {
        let plane = face.plane();
        let denom = -(plane.a * p[0] + plane.b * p[1] + plane.c * p[2]);
        let mu = plane.d / denom;
        // Behind the camera, or parallel to the face.
        if !mu.is_finite() || mu < 0.0 {
            continue;
        }
        let q = [mu * p[0], mu * p[1], mu * p[2]];
        let (s, t) = in_plane(face, q);
        if let (Some(s), Some(t)) = (on_face(s), on_face(t)) {
            hit = Some((face, s, t));
            break;
        }
    }

    let Some((face, s, t)) = hit else {
        return Err(mapping_error(longitude, latitude, "no intersecting face"));
    };

    let s = angular(s);
    let t = angular(t);
    let (u, v) = match face {
        FaceId::Left => (s + 1.0, t + 1.0),
        FaceId::Right => (1.0 - s, t + 1.0),
        FaceId::Front => (s + 1.0, t + 1.0),
        FaceId::Back => (1.0 - s, t + 1.0),
        FaceId::Down => (1.0 - s, 1.0 - t),
        FaceId::Top => (1.0 - s, t + 1.0),
    };

    let uv = Uv::new(clamp_unit((u * 0.5) as f32), clamp_unit((v * 0.5) as f32));
    if !(0.0..1.0).contains(&uv.u) || !(0.0..1.0).contains(&uv.v) {
        return Err(mapping_error(
            longitude,
            latitude,
            &format!("illegal (u,v) ({}, {}) on {} face", uv.u, uv.v, face),
        ));
    }
    Ok((face, uv))
}

/// The two coordinates of `q` lying in the face's plane.
///
/// For LEFT/RIGHT these are (y, z), FRONT/BACK (x, z), TOP/DOWN (x, y).
fn in_plane(face: FaceId, q: [f64; 3]) -> (f64, f64) {
    match face {
        FaceId::Left | FaceId::Right => (q[1], q[2]),
        FaceId::Front | FaceId::Back => (q[0], q[2]),
        FaceId::Top | FaceId::Down => (q[0], q[1]),
    }
}

/// Accept a coordinate inside [-1, 1], allowing a rounding-sized overshoot
/// which is clamped back onto the face.
fn on_face(x: f64) -> Option<f64> {
    if (-1.0 - FACE_EDGE_TOLERANCE..=1.0 + FACE_EDGE_TOLERANCE).contains(&x) {
        Some(x.clamp(-1.0, 1.0))
    } else {
        None
    }
}

fn angular(x: f64) -> f64 {
    x.atan() * 4.0 / PI
}

fn clamp_unit(x: f32) -> f32 {
    if x >= 1.0 {
        NEARLY_ONE
    } else {
        x
    }
}

fn mapping_error(longitude: f64, latitude: f64, reason: &str) -> SphereError {
    SphereError::Mapping {
        longitude,
        latitude,
        reason: reason.to_string(),
    }
}
