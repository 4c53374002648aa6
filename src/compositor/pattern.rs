//! Plank tiling: floor coordinates → cell index, local coordinate, texture
//! sample coordinate and seam shading.
//!
//! Cells are `plank_size.length × plank_size.width` floor units. The local
//! coordinate is the position inside the cell in `[0, 1)²` and drives the
//! seams; the sample coordinate is where the material is read and carries the
//! per-cell jitter and the herringbone rotation.
use crate::types::{PatternKind, PatternParams};
use std::f32::consts::FRAC_1_SQRT_2;

/// Maximum per-cell jitter of the sample coordinate (fraction of a cell).
pub const JITTER_AMPLITUDE: f32 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlankSample {
    pub cell: [i32; 2],
    pub local: [f32; 2],
    pub sample: [f32; 2],
    /// Multiplicative seam darkening in `[seam_floor(kind), 1]`.
    pub seam: f32,
}

/// Darkest seam factor per pattern kind.
pub fn seam_floor(kind: PatternKind) -> f32 {
    match kind {
        PatternKind::Herringbone => 0.88,
        PatternKind::Random | PatternKind::Basket => 0.92,
        PatternKind::Brick => 0.94,
    }
}

/// Apply user rotation then scale to a floor-space point.
#[inline]
pub fn transform_uv(uv: [f32; 2], params: &PatternParams) -> [f32; 2] {
    let (s, c) = params.rotation.sin_cos();
    [
        (c * uv[0] - s * uv[1]) * params.scale,
        (s * uv[0] + c * uv[1]) * params.scale,
    ]
}

/// Resolve the plank cell for a floor-space point.
pub fn plank_sample(uv: [f32; 2], params: &PatternParams) -> PlankSample {
    let t = transform_uv(uv, params);
    let mut q = [
        t[0] / params.plank_size.length.max(f32::EPSILON),
        t[1] / params.plank_size.width.max(f32::EPSILON),
    ];

    match params.kind {
        PatternKind::Brick => {
            if is_odd(q[1].floor()) {
                q[0] += 0.5;
            }
        }
        PatternKind::Basket => {
            if is_odd(q[1].floor()) {
                q[0] += 0.5;
            }
            if is_odd(q[0].floor()) {
                q[1] += 0.5;
            }
        }
        PatternKind::Random | PatternKind::Herringbone => {}
    }

    let cell_f = [q[0].floor(), q[1].floor()];
    let cell = [cell_f[0] as i32, cell_f[1] as i32];
    let local = [q[0] - cell_f[0], q[1] - cell_f[1]];

    let sample = match params.kind {
        PatternKind::Random => add(local, cell_jitter(cell, params.seed)),
        PatternKind::Herringbone => {
            let dir = if (cell[0].wrapping_add(cell[1])) & 1 == 0 {
                1.0
            } else {
                -1.0
            };
            add(rotate_about_centre(local, dir), cell_jitter(cell, params.seed))
        }
        PatternKind::Brick | PatternKind::Basket => local,
    };

    PlankSample {
        cell,
        local,
        sample,
        seam: seam_factor(local, params.seam_width, seam_floor(params.kind)),
    }
}

/// Deterministic jitter in `±JITTER_AMPLITUDE` for a cell and seed.
pub fn cell_jitter(cell: [i32; 2], seed: u32) -> [f32; 2] {
    let h = cell_hash(cell, seed);
    let jx = (h & 0xffff) as f32 / 65535.0;
    let jy = (h >> 16) as f32 / 65535.0;
    [
        (jx * 2.0 - 1.0) * JITTER_AMPLITUDE,
        (jy * 2.0 - 1.0) * JITTER_AMPLITUDE,
    ]
}

/// Seam darkening from the distance to the nearest cell edge.
///
/// `1.0` in the plank interior, `floor` on the edge, smoothstep in between.
pub fn seam_factor(local: [f32; 2], seam_width: f32, floor: f32) -> f32 {
    if seam_width <= 0.0 {
        return 1.0;
    }
    let edge = local[0]
        .min(1.0 - local[0])
        .min(local[1])
        .min(1.0 - local[1])
        .max(0.0);
    let t = smoothstep(0.0, seam_width, edge);
    floor + (1.0 - floor) * t
}

#[inline]
fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Integer avalanche hash of (cell, seed).
fn cell_hash(cell: [i32; 2], seed: u32) -> u32 {
    let mut h = (cell[0] as u32).wrapping_mul(0x8da6_b343)
        ^ (cell[1] as u32).wrapping_mul(0xd816_3841)
        ^ seed.wrapping_mul(0xcb1a_b31f);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

#[inline]
fn is_odd(v: f32) -> bool {
    (v as i64).rem_euclid(2) == 1
}

#[inline]
fn add(a: [f32; 2], b: [f32; 2]) -> [f32; 2] {
    [a[0] + b[0], a[1] + b[1]]
}

/// Rotate by ±45° about the cell centre.
#[inline]
fn rotate_about_centre(p: [f32; 2], dir: f32) -> [f32; 2] {
    let dx = p[0] - 0.5;
    let dy = p[1] - 0.5;
    let s = dir * FRAC_1_SQRT_2;
    let c = FRAC_1_SQRT_2;
    [0.5 + c * dx - s * dy, 0.5 + s * dx + c * dy]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlankSize;
    use approx::assert_relative_eq;

    fn params(kind: PatternKind) -> PatternParams {
        PatternParams {
            kind,
            plank_size: PlankSize {
                length: 4.0,
                width: 1.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn cell_and_local_split() {
        let s = plank_sample([9.0, 2.25], &params(PatternKind::Random));
        assert_eq!(s.cell, [2, 2]);
        assert_relative_eq!(s.local[0], 0.25, epsilon = 1e-6);
        assert_relative_eq!(s.local[1], 0.25, epsilon = 1e-6);
    }

    #[test]
    fn negative_coordinates_floor_towards_minus_infinity() {
        let s = plank_sample([-1.0, -0.5], &params(PatternKind::Brick));
        assert_eq!(s.cell[1], -1);
        // Row -1 is odd: shifted by half a plank.
        assert_eq!(s.cell[0], 0);
        assert_relative_eq!(s.local[0], 0.25, epsilon = 1e-6);
    }

    #[test]
    fn brick_rows_are_staggered_by_half_a_plank() {
        let p = params(PatternKind::Brick);
        let even = plank_sample([1.0, 0.5], &p);
        let odd = plank_sample([1.0, 1.5], &p);
        assert_relative_eq!(even.local[0], 0.25, epsilon = 1e-6);
        assert_relative_eq!(odd.local[0], 0.75, epsilon = 1e-6);
    }

    #[test]
    fn basket_shifts_columns_after_rows() {
        let p = params(PatternKind::Basket);
        // Row 0, column 1 (odd) → local.y shifted by half a width.
        let s = plank_sample([5.0, 0.25], &p);
        assert_eq!(s.cell[0], 1);
        assert_relative_eq!(s.local[1], 0.75, epsilon = 1e-6);
        let s = plank_sample([1.0, 0.25], &p);
        assert_relative_eq!(s.local[1], 0.25, epsilon = 1e-6);
    }

    #[test]
    fn jitter_is_bounded_deterministic_and_seeded() {
        for cx in -20..20 {
            for cy in -5..5 {
                let j = cell_jitter([cx, cy], 3);
                assert!(j[0].abs() <= JITTER_AMPLITUDE + 1e-7);
                assert!(j[1].abs() <= JITTER_AMPLITUDE + 1e-7);
                assert_eq!(j, cell_jitter([cx, cy], 3));
            }
        }
        let differs = (0..32).any(|i| cell_jitter([i, 0], 1) != cell_jitter([i, 0], 2));
        assert!(differs);
    }

    #[test]
    fn herringbone_rotation_alternates_with_cell_parity() {
        let p = PatternParams {
            seed: 11,
            ..params(PatternKind::Herringbone)
        };
        let a = plank_sample([0.0 + 4.0 * 0.75, 0.5], &p); // cell (0, 0)
        let b = plank_sample([4.0 + 4.0 * 0.75, 0.5], &p); // cell (1, 0)
        let ja = cell_jitter(a.cell, 11);
        let jb = cell_jitter(b.cell, 11);
        // local (0.75, 0.5): +45° → (0.5 + 0.177, 0.5 + 0.177), −45° flips y.
        let r = 0.25 * FRAC_1_SQRT_2;
        assert_relative_eq!(a.sample[1] - ja[1], 0.5 + r, epsilon = 1e-5);
        assert_relative_eq!(b.sample[1] - jb[1], 0.5 - r, epsilon = 1e-5);
    }

    #[test]
    fn seams_darken_towards_edges_only() {
        assert_eq!(seam_factor([0.5, 0.5], 0.015, 0.9), 1.0);
        assert_relative_eq!(seam_factor([0.0, 0.5], 0.015, 0.9), 0.9, epsilon = 1e-6);
        let mid = seam_factor([0.5, 0.9925], 0.015, 0.9);
        assert!(mid > 0.9 && mid < 1.0);
        assert_eq!(seam_factor([0.0, 0.0], 0.0, 0.9), 1.0);
    }

    #[test]
    fn rotation_and_scale_apply_before_tiling() {
        let p = PatternParams {
            rotation: std::f32::consts::FRAC_PI_2,
            scale: 2.0,
            ..params(PatternKind::Random)
        };
        let t = transform_uv([1.0, 0.0], &p);
        assert_relative_eq!(t[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(t[1], 2.0, epsilon = 1e-6);
    }
}
