//! Image → floor projective transforms.
//!
//! A [`Homography`] maps homogeneous image pixel coordinates to homogeneous
//! floor coordinates; callers always perspective-divide by the third
//! component after multiplying. The matrix scale is arbitrary.
//!
//! Two estimators are provided:
//! - [`homography_from_correspondences`]: 4-point DLT (authoritative path).
//! - [`homography_from_plane`]: approximation from the fitted depth plane
//!   when no correspondences or camera intrinsics are available.

mod dlt;
mod plane;

pub use dlt::homography_from_correspondences;
pub use plane::homography_from_plane;

use crate::error::{CompositorError, Result};
use crate::types::PlaneEquation;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// 3×3 image → floor projective matrix.
pub type Homography = Matrix3<f32>;

const EPS: f32 = 1e-9;

/// Which estimator the pipeline uses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum HomographyMode {
    /// Derive from the fitted floor plane.
    #[default]
    Plane,
    /// Floor coordinates are image pixel coordinates.
    Identity,
    /// Four image points (`src`) and their floor positions (`dst`).
    Correspondences {
        src: Vec<[f64; 2]>,
        dst: Vec<[f64; 2]>,
    },
}

/// Input to [`estimate_homography`].
#[derive(Clone, Copy, Debug)]
pub enum HomographySource<'a> {
    Plane {
        plane: &'a PlaneEquation,
        width: usize,
        height: usize,
    },
    Correspondences {
        src: &'a [[f64; 2]],
        dst: &'a [[f64; 2]],
    },
}

/// Estimate the image → floor homography from a plane or 4 correspondences.
pub fn estimate_homography(source: HomographySource<'_>) -> Result<Homography> {
    match source {
        HomographySource::Plane {
            plane,
            width,
            height,
        } => Ok(homography_from_plane(plane, width, height)),
        HomographySource::Correspondences { src, dst } => {
            homography_from_correspondences(src, dst)
        }
    }
}

/// Apply `h` to a single point and perspective-divide.
///
/// `None` when the homogeneous scale vanishes or the result is not finite.
#[inline]
pub fn apply_homography(h: &Homography, p: [f32; 2]) -> Option<[f32; 2]> {
    let v = h * Vector3::new(p[0], p[1], 1.0);
    let w = v[2];
    if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
        return None;
    }
    Some([v[0] / w, v[1] / w])
}

/// Apply `h` to every point; `None` if any point maps to infinity.
pub fn apply_homography_points(h: &Homography, pts: &[[f32; 2]]) -> Option<Vec<[f32; 2]>> {
    pts.iter().map(|&p| apply_homography(h, p)).collect()
}

/// Inverse transform (floor → image).
pub fn invert_homography(h: &Homography) -> Result<Homography> {
    h.cast::<f64>()
        .try_inverse()
        .map(|inv| inv.cast::<f32>())
        .ok_or_else(|| CompositorError::InvalidInput("homography is singular".into()))
}

/// Adapt a homography estimated at `src_w × src_h` to input pixels of a
/// `dst_w × dst_h` image (e.g. after the caller resampled the photo).
pub fn rescale_homography_image_space(
    h: &Homography,
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
) -> Homography {
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return *h;
    }
    let sx = src_w as f32 / dst_w as f32;
    let sy = src_h as f32 / dst_h as f32;
    let scale = Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0);
    h * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn perspective() -> Homography {
        Matrix3::new(1.2, 0.1, -30.0, -0.05, 0.9, 12.0, 0.0004, 0.0009, 1.0)
    }

    #[test]
    fn round_trip_through_inverse() {
        let h = perspective();
        let inv = invert_homography(&h).unwrap();
        for &p in &[[0.0, 0.0], [120.5, 33.0], [639.0, 479.0], [-10.0, 250.0]] {
            let q = apply_homography(&h, p).unwrap();
            let back = apply_homography(&inv, q).unwrap();
            assert_relative_eq!(back[0], p[0], epsilon = 1e-2);
            assert_relative_eq!(back[1], p[1], epsilon = 1e-2);
        }
    }

    #[test]
    fn points_at_infinity_are_rejected() {
        let h = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0);
        assert!(apply_homography(&h, [0.0, 5.0]).is_none());
        assert!(apply_homography_points(&h, &[[1.0, 1.0], [0.0, 1.0]]).is_none());
    }

    #[test]
    fn singular_matrix_cannot_be_inverted() {
        let err = invert_homography(&Matrix3::zeros()).unwrap_err();
        assert!(matches!(err, CompositorError::InvalidInput(_)));
    }

    #[test]
    fn rescale_maps_resized_pixels_to_same_floor_point() {
        let h = perspective();
        let r = rescale_homography_image_space(&h, 640, 480, 320, 240);
        let a = apply_homography(&h, [200.0, 100.0]).unwrap();
        let b = apply_homography(&r, [100.0, 50.0]).unwrap();
        assert_relative_eq!(a[0], b[0], epsilon = 1e-3);
        assert_relative_eq!(a[1], b[1], epsilon = 1e-3);
    }

    #[test]
    fn estimate_dispatches_on_source() {
        let plane = PlaneEquation::new(0.0, 0.0, 1.0, -2.0);
        let h = estimate_homography(HomographySource::Plane {
            plane: &plane,
            width: 10,
            height: 10,
        })
        .unwrap();
        let uv = apply_homography(&h, [5.0, 5.0]).unwrap();
        assert_relative_eq!(uv[0], 0.0, epsilon = 1e-6);
        let src = [[0.0, 0.0], [1.0, 0.0]];
        assert!(estimate_homography(HomographySource::Correspondences {
            src: &src,
            dst: &src
        })
        .is_err());
    }
}
