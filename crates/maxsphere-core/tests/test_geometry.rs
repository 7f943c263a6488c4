use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;

use maxsphere_core::geometry::{direction, resolve_face, FaceId};

/// Face whose axis dominates `p`, or `None` near an edge.
fn dominant_face(p: [f64; 3]) -> Option<FaceId> {
    let abs = [p[0].abs(), p[1].abs(), p[2].abs()];
    let (axis, max) = abs
        .iter()
        .copied()
        .enumerate()
        .fold((0, 0.0), |best, (i, a)| if a > best.1 { (i, a) } else { best });
    let margin = abs
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != axis)
        .all(|(_, a)| max - a > 1e-6);
    if !margin {
        return None;
    }
    Some(match (axis, p[axis] > 0.0) {
        (0, false) => FaceId::Left,
        (0, true) => FaceId::Right,
        (1, true) => FaceId::Front,
        (1, false) => FaceId::Back,
        (2, true) => FaceId::Top,
        _ => FaceId::Down,
    })
}

#[test]
fn test_face_is_dominant_axis() {
    let (w, h) = (96usize, 48usize);
    for j in 0..h {
        for i in 0..w {
            let lon = (i as f64 + 0.37) / w as f64 * 2.0 * PI - PI;
            let lat = (j as f64 + 0.61) / h as f64 * PI - FRAC_PI_2;
            let (face, _) = resolve_face(lon, lat).unwrap();
            if let Some(expected) = dominant_face(direction(lon, lat)) {
                assert_eq!(face, expected, "lon {lon}, lat {lat}");
            }
        }
    }
}

#[test]
fn test_uv_always_in_unit_square() {
    // Includes exact grid angles that hit cube edges and corners.
    let (w, h) = (64usize, 32usize);
    for j in 0..=h {
        for i in 0..w {
            let lon = i as f64 / w as f64 * 2.0 * PI - PI;
            let lat = j as f64 / h as f64 * PI - FRAC_PI_2;
            let (_, uv) = resolve_face(lon, lat).unwrap();
            assert!((0.0..1.0).contains(&uv.u), "u {} at ({lon}, {lat})", uv.u);
            assert!((0.0..1.0).contains(&uv.v), "v {} at ({lon}, {lat})", uv.v);
        }
    }
}

#[test]
fn test_face_centers() {
    let (face, uv) = resolve_face(0.0, 0.0).unwrap();
    assert_eq!(face, FaceId::Front);
    assert_relative_eq!(uv.u, 0.5, epsilon = 1e-6);
    assert_relative_eq!(uv.v, 0.5, epsilon = 1e-6);

    let (face, uv) = resolve_face(FRAC_PI_2, 0.0).unwrap();
    assert_eq!(face, FaceId::Right);
    assert_relative_eq!(uv.u, 0.5, epsilon = 1e-6);
    assert_relative_eq!(uv.v, 0.5, epsilon = 1e-6);

    let (face, _) = resolve_face(-FRAC_PI_2, 0.0).unwrap();
    assert_eq!(face, FaceId::Left);

    let (face, _) = resolve_face(PI, 0.0).unwrap();
    assert_eq!(face, FaceId::Back);

    let (face, _) = resolve_face(0.3, 1.4).unwrap();
    assert_eq!(face, FaceId::Top);

    let (face, _) = resolve_face(0.3, -1.4).unwrap();
    assert_eq!(face, FaceId::Down);
}

#[test]
fn test_angular_correction_spacing() {
    // 22.5 degrees off the front axis lands halfway to the face edge.
    let (face, uv) = resolve_face(PI / 8.0, 0.0).unwrap();
    assert_eq!(face, FaceId::Front);
    assert_relative_eq!(uv.u, 0.75, epsilon = 1e-5);
    assert_relative_eq!(uv.v, 0.5, epsilon = 1e-5);
}
