//! Four-point Direct Linear Transform with Hartley normalisation.
use super::Homography;
use crate::error::{CompositorError, Result};
use nalgebra::{Matrix3, SMatrix};

/// Estimate `H` with `dst ≈ H · src` from exactly four correspondences.
///
/// Both point sets are normalised (centroid at the origin, mean distance
/// √2), the 8×9 system `A h = 0` is padded to 9×9 so the SVD exposes the
/// full right null space, and `h` is the right singular vector of the
/// smallest singular value. The result is de-normalised and scaled to
/// `h33 = 1` when that entry is not vanishing.
pub fn homography_from_correspondences(src: &[[f64; 2]], dst: &[[f64; 2]]) -> Result<Homography> {
    if src.len() != 4 || dst.len() != 4 {
        return Err(CompositorError::InvalidInput(format!(
            "DLT needs exactly 4 correspondences, got {} source / {} destination points",
            src.len(),
            dst.len()
        )));
    }
    if src.iter().chain(dst).any(|p| !p[0].is_finite() || !p[1].is_finite()) {
        return Err(CompositorError::InvalidInput(
            "DLT correspondences must be finite".into(),
        ));
    }

    let (t_src, src_n) = normalize_points(src);
    let (t_dst, dst_n) = normalize_points(dst);

    let mut a = SMatrix::<f64, 9, 9>::zeros();
    for i in 0..4 {
        let (sx, sy) = (src_n[i][0], src_n[i][1]);
        let (dx, dy) = (dst_n[i][0], dst_n[i][1]);

        // [ 0  0  0 | -sx -sy -1 | dy*sx  dy*sy  dy ]
        a[(2 * i, 3)] = -sx;
        a[(2 * i, 4)] = -sy;
        a[(2 * i, 5)] = -1.0;
        a[(2 * i, 6)] = dy * sx;
        a[(2 * i, 7)] = dy * sy;
        a[(2 * i, 8)] = dy;

        // [ sx sy 1 | 0 0 0 | -dx*sx -dx*sy -dx ]
        a[(2 * i + 1, 0)] = sx;
        a[(2 * i + 1, 1)] = sy;
        a[(2 * i + 1, 2)] = 1.0;
        a[(2 * i + 1, 6)] = -dx * sx;
        a[(2 * i + 1, 7)] = -dx * sy;
        a[(2 * i + 1, 8)] = -dx;
    }

    let svd = a.svd(false, true);
    let v_t = svd
        .v_t
        .ok_or_else(|| CompositorError::InvalidInput("DLT: SVD did not converge".into()))?;
    let (min_idx, _) = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|x, y| x.1.partial_cmp(y.1).unwrap_or(std::cmp::Ordering::Equal))
        .ok_or_else(|| CompositorError::InvalidInput("DLT: empty spectrum".into()))?;
    let h = v_t.row(min_idx);
    let h_norm = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], h[8]);

    let t_dst_inv = t_dst.try_inverse().ok_or_else(|| {
        CompositorError::InvalidInput("DLT: destination points are coincident".into())
    })?;
    let full = t_dst_inv * h_norm * t_src;
    if full.iter().any(|v| !v.is_finite()) {
        return Err(CompositorError::InvalidInput(
            "DLT: degenerate correspondence configuration".into(),
        ));
    }

    let scale = full[(2, 2)];
    let full = if scale.abs() > 1e-12 { full / scale } else { full };
    Ok(full.cast::<f32>())
}

/// Translate the centroid to the origin and scale the mean distance to √2.
fn normalize_points(pts: &[[f64; 2]]) -> (Matrix3<f64>, Vec<[f64; 2]>) {
    let n = pts.len() as f64;
    let cx = pts.iter().map(|p| p[0]).sum::<f64>() / n;
    let cy = pts.iter().map(|p| p[1]).sum::<f64>() / n;
    let mean_dist = pts
        .iter()
        .map(|p| ((p[0] - cx).powi(2) + (p[1] - cy).powi(2)).sqrt())
        .sum::<f64>()
        / n;
    let s = if mean_dist > 1e-15 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    let t = Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0);
    let normalized = pts
        .iter()
        .map(|p| [s * (p[0] - cx), s * (p[1] - cy)])
        .collect();
    (t, normalized)
}
