//! Plane-derived image → floor homography (approximation).
//!
//! Without camera intrinsics the exact projective relation between the
//! (pixel, depth) plane and the metric floor is unavailable. The model used
//! here keeps pixel units at the image centre and magnifies pixels in
//! proportion to their predicted depth, to first order:
//!
//! ```text
//! g   = (-a/c, -b/c)                       depth gradient of the plane
//! z0  = depth at the image centre (cx, cy)
//! w   = 1 - g·(p - centre) / z0            linearised z0 / z(p)
//! uv  = (p - centre) / w
//! ```
//!
//! which is exactly `H = [[1, 0, -cx], [0, 1, -cy], [-gx/z0, -gy/z0, 1 + g·centre/z0]]`.
//! Steep planes are flattened so that `w >= MIN_W` at every image corner.
use super::Homography;
use crate::types::PlaneEquation;
use nalgebra::Matrix3;

const MIN_W: f32 = 0.1;

/// Approximate image → floor homography from a fitted plane.
///
/// Degenerate planes (`|c| ≈ 0`, non-positive centre depth) fall back to
/// centred pixel coordinates.
pub fn homography_from_plane(plane: &PlaneEquation, width: usize, height: usize) -> Homography {
    let cx = width as f32 * 0.5;
    let cy = height as f32 * 0.5;
    let centred = Matrix3::new(1.0, 0.0, -cx, 0.0, 1.0, -cy, 0.0, 0.0, 1.0);

    let z0 = match plane.depth_at(cx, cy) {
        Some(z) if z.is_finite() && z > 1e-6 => z,
        _ => {
            log::warn!(
                "homography_from_plane: degenerate plane ({:.4}, {:.4}, {:.4}, {:.4}), using centred identity",
                plane.a,
                plane.b,
                plane.c,
                plane.d
            );
            return centred;
        }
    };

    // Relative depth slope per pixel.
    let mut kx = -plane.a / plane.c / z0;
    let mut ky = -plane.b / plane.c / z0;

    let max_rise = [(0.0, 0.0), (width as f32, 0.0), (0.0, height as f32), (width as f32, height as f32)]
        .iter()
        .map(|&(x, y)| kx * (x - cx) + ky * (y - cy))
        .fold(0.0f32, f32::max);
    if max_rise > 1.0 - MIN_W {
        let shrink = (1.0 - MIN_W) / max_rise;
        log::warn!(
            "homography_from_plane: plane too steep for linearised model, scaling slope by {shrink:.3}"
        );
        kx *= shrink;
        ky *= shrink;
    }

    Matrix3::new(
        1.0,
        0.0,
        -cx,
        0.0,
        1.0,
        -cy,
        -kx,
        -ky,
        1.0 + kx * cx + ky * cy,
    )
}
