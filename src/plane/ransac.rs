//! RANSAC plane fitting.
//!
//! # Algorithm Outline
//! 1. Collect `(x, y, depth)` for floor pixels with `depth > 0`; decimate
//!    evenly when the set exceeds `max_points`.
//! 2. Draw all trial triples up front from a seeded `StdRng`. A triple with
//!    repeated indices or a vanishing normal is redrawn, up to
//!    `max_resample_attempts` times, after which the trial is dropped.
//! 3. Score trials independently (in parallel with the `parallel` feature)
//!    by counting points closer than `inlier_threshold`.
//! 4. Reduce to the trial with the most inliers; ties keep the earliest.
//! 5. Optionally refit the winner by least squares over its inliers.
use super::RansacOptions;
use crate::error::{ensure_dims, Result};
use crate::image::{BinaryMask, DepthMap};
use crate::types::PlaneEquation;
use nalgebra::{Matrix3, SymmetricEigen, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const DEGENERATE_EPS: f32 = 1e-6;

/// Outcome of a RANSAC run.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaneFit {
    pub plane: PlaneEquation,
    /// Inliers of `plane` among the scored points.
    pub inliers: usize,
    /// Floor pixels with positive depth.
    pub candidates: usize,
    /// Points actually scored after decimation.
    pub scored_points: usize,
    /// Trials that produced a non-degenerate plane.
    pub valid_trials: usize,
    /// False when the default plane was returned.
    pub fitted: bool,
}

impl PlaneFit {
    fn fallback(candidates: usize, scored_points: usize) -> Self {
        Self {
            plane: PlaneEquation::default(),
            inliers: 0,
            candidates,
            scored_points,
            valid_trials: 0,
            fitted: false,
        }
    }
}

/// Fit the floor plane with default RANSAC options.
///
/// `width`/`height` describe the grid both inputs must share.
pub fn fit_floor_plane(
    depth: &DepthMap,
    floor: &BinaryMask,
    width: usize,
    height: usize,
) -> Result<PlaneEquation> {
    ensure_dims("depth map", (width, height), (depth.w, depth.h))?;
    ensure_dims("floor mask", (width, height), (floor.w, floor.h))?;
    Ok(fit_floor_plane_with(depth, floor, &RansacOptions::default())?.plane)
}

/// Fit the floor plane and report fit statistics.
pub fn fit_floor_plane_with(
    depth: &DepthMap,
    floor: &BinaryMask,
    options: &RansacOptions,
) -> Result<PlaneFit> {
    let points = collect_floor_points(depth, floor)?;
    let fit = fit_plane_ransac(&points, options);
    log::debug!(
        "fit_floor_plane: candidates={} scored={} inliers={} plane=({:.4}, {:.4}, {:.4}, {:.4}) fitted={}",
        fit.candidates,
        fit.scored_points,
        fit.inliers,
        fit.plane.a,
        fit.plane.b,
        fit.plane.c,
        fit.plane.d,
        fit.fitted
    );
    Ok(fit)
}

/// `(x, y, depth)` for every floor pixel with positive depth, raster order.
pub fn collect_floor_points(depth: &DepthMap, floor: &BinaryMask) -> Result<Vec<[f32; 3]>> {
    ensure_dims("floor mask", (depth.w, depth.h), (floor.w, floor.h))?;
    let mut points = Vec::new();
    for y in 0..depth.h {
        for x in 0..depth.w {
            let z = depth.get(x, y);
            if floor.is_set(x, y) && z > 0.0 {
                points.push([x as f32, y as f32, z]);
            }
        }
    }
    Ok(points)
}

/// Run RANSAC over an explicit point set.
pub fn fit_plane_ransac(points: &[[f32; 3]], options: &RansacOptions) -> PlaneFit {
    let candidates = points.len();
    if candidates < 3 {
        return PlaneFit::fallback(candidates, candidates);
    }
    let scored = decimate(points, options.max_points.max(3));
    let trials = draw_trials(&scored, options);
    let valid_trials = trials.iter().filter(|t| t.is_some()).count();
    let counts = score_trials(&trials, &scored, options.inlier_threshold);

    let Some((mut plane, mut inliers)) = best_trial(&trials, &counts) else {
        log::warn!("fit_plane_ransac: no non-degenerate triple among {candidates} points");
        return PlaneFit::fallback(candidates, scored.len());
    };

    if options.refit_inliers {
        let inlier_pts: Vec<[f32; 3]> = scored
            .iter()
            .copied()
            .filter(|p| plane.distance(*p) < options.inlier_threshold)
            .collect();
        if let Some(refit) = least_squares_plane(&inlier_pts) {
            plane = refit;
            inliers = count_inliers(&plane, &scored, options.inlier_threshold);
        }
    }

    PlaneFit {
        plane,
        inliers,
        candidates,
        scored_points: scored.len(),
        valid_trials,
        fitted: true,
    }
}

/// Plane through three points with unit normal and `c >= 0`.
///
/// `None` for repeated or collinear points.
pub fn plane_through(p0: [f32; 3], p1: [f32; 3], p2: [f32; 3]) -> Option<PlaneEquation> {
    let v0 = Vector3::from(p0);
    let e1 = Vector3::from(p1) - v0;
    let e2 = Vector3::from(p2) - v0;
    let n = e1.cross(&e2);
    let norm = n.norm();
    let scale = e1.norm() * e2.norm();
    if !norm.is_finite() || norm <= DEGENERATE_EPS * scale.max(DEGENERATE_EPS) {
        return None;
    }
    Some(oriented(n / norm, &v0))
}

fn oriented(n: Vector3<f32>, p: &Vector3<f32>) -> PlaneEquation {
    let n = if n.z < 0.0 { -n } else { n };
    PlaneEquation::new(n.x, n.y, n.z, -n.dot(p))
}

fn decimate(points: &[[f32; 3]], max_points: usize) -> Vec<[f32; 3]> {
    if points.len() <= max_points {
        return points.to_vec();
    }
    let step = points.len() as f64 / max_points as f64;
    (0..max_points)
        .map(|i| points[((i as f64 * step) as usize).min(points.len() - 1)])
        .collect()
}

fn draw_trials(points: &[[f32; 3]], options: &RansacOptions) -> Vec<Option<PlaneEquation>> {
    let n = points.len();
    let mut rng = StdRng::seed_from_u64(options.seed);
    (0..options.iterations)
        .map(|_| {
            for _ in 0..=options.max_resample_attempts {
                let i0 = rng.gen_range(0..n);
                let i1 = rng.gen_range(0..n);
                let i2 = rng.gen_range(0..n);
                if i0 == i1 || i1 == i2 || i0 == i2 {
                    continue;
                }
                if let Some(plane) = plane_through(points[i0], points[i1], points[i2]) {
                    return Some(plane);
                }
            }
            None
        })
        .collect()
}

/// Trial with the most inliers; the earliest wins a tie.
fn best_trial(trials: &[Option<PlaneEquation>], counts: &[usize]) -> Option<(PlaneEquation, usize)> {
    let mut best: Option<(PlaneEquation, usize)> = None;
    for (plane, &count) in trials.iter().zip(counts) {
        let Some(plane) = plane else { continue };
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((*plane, count));
        }
    }
    best
}

fn count_inliers(plane: &PlaneEquation, points: &[[f32; 3]], threshold: f32) -> usize {
    points
        .iter()
        .filter(|p| plane.distance(**p) < threshold)
        .count()
}

#[cfg(feature = "parallel")]
fn score_trials(trials: &[Option<PlaneEquation>], points: &[[f32; 3]], threshold: f32) -> Vec<usize> {
    trials
        .par_iter()
        .map(|t| t.map_or(0, |plane| count_inliers(&plane, points, threshold)))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn score_trials(trials: &[Option<PlaneEquation>], points: &[[f32; 3]], threshold: f32) -> Vec<usize> {
    trials
        .iter()
        .map(|t| t.map_or(0, |plane| count_inliers(&plane, points, threshold)))
        .collect()
}

/// Total least squares plane: normal = eigenvector of the smallest
/// eigenvalue of the point covariance.
fn least_squares_plane(points: &[[f32; 3]]) -> Option<PlaneEquation> {
    if points.len() < 3 {
        return None;
    }
    let n = points.len() as f64;
    let centroid = points
        .iter()
        .fold(Vector3::<f64>::zeros(), |acc, p| {
            acc + Vector3::new(p[0] as f64, p[1] as f64, p[2] as f64)
        })
        / n;
    let mut cov = Matrix3::<f64>::zeros();
    for p in points {
        let d = Vector3::new(p[0] as f64, p[1] as f64, p[2] as f64) - centroid;
        cov += d * d.transpose();
    }
    let eig = SymmetricEigen::new(cov);
    let (min_idx, _) = eig
        .eigenvalues
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))?;
    let normal = eig.eigenvectors.column(min_idx).into_owned();
    let norm = normal.norm();
    if !norm.is_finite() || norm <= 1e-12 {
        return None;
    }
    let normal = (normal / norm).cast::<f32>();
    Some(oriented(normal, &centroid.cast::<f32>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn options(iterations: usize) -> RansacOptions {
        RansacOptions {
            iterations,
            ..Default::default()
        }
    }

    #[test]
    fn flat_square_at_depth_five() {
        let pts = [[0.0, 0.0, 5.0], [1.0, 0.0, 5.0], [0.0, 1.0, 5.0], [1.0, 1.0, 5.0]];
        let fit = fit_plane_ransac(&pts, &options(1000));
        assert!(fit.fitted);
        assert_eq!(fit.inliers, 4);
        let [a, b, c, d] = fit.plane.coefficients();
        assert_relative_eq!(a, 0.0, epsilon = 1e-6);
        assert_relative_eq!(b, 0.0, epsilon = 1e-6);
        assert_relative_eq!(c, 1.0, epsilon = 1e-6);
        assert_relative_eq!(d, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn fewer_than_three_points_give_default_plane() {
        let fit = fit_plane_ransac(&[[1.0, 2.0, 3.0], [2.0, 2.0, 3.0]], &options(10));
        assert!(!fit.fitted);
        assert_eq!(fit.plane, PlaneEquation::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn collinear_points_give_default_plane() {
        let pts: Vec<[f32; 3]> = (0..10).map(|i| [i as f32, 0.0, 2.0]).collect();
        let fit = fit_plane_ransac(&pts, &options(50));
        assert!(!fit.fitted);
        assert_eq!(fit.plane, PlaneEquation::default());
    }

    #[test]
    fn single_iteration_recovers_exact_tilted_plane() {
        // z = 0.02 x + 0.05 y + 3
        let mut pts = Vec::new();
        for y in 0..20 {
            for x in 0..30 {
                pts.push([x as f32, y as f32, 0.02 * x as f32 + 0.05 * y as f32 + 3.0]);
            }
        }
        for seed in 0..5 {
            let fit = fit_plane_ransac(
                &pts,
                &RansacOptions {
                    iterations: 1,
                    seed,
                    ..Default::default()
                },
            );
            assert!(fit.fitted);
            assert_eq!(fit.inliers, pts.len());
            for p in &pts {
                assert!(fit.plane.distance(*p) < 1e-3);
            }
            let z = fit.plane.depth_at(10.0, 10.0).unwrap();
            assert_relative_eq!(z, 3.7, epsilon = 1e-3);
        }
    }

    #[test]
    fn ties_keep_the_earliest_trial() {
        let first = PlaneEquation::new(0.0, 0.0, 1.0, -2.0);
        let second = PlaneEquation::new(0.0, 0.0, 1.0, -7.0);
        let trials = [None, Some(first), Some(second)];
        assert_eq!(best_trial(&trials, &[0, 12, 12]), Some((first, 12)));
        assert_eq!(best_trial(&trials, &[0, 12, 13]), Some((second, 13)));
        assert_eq!(best_trial(&[None, None], &[0, 0]), None);
    }

    #[test]
    fn equally_supported_planes_resolve_to_the_first_drawn() {
        // Two parallel sheets with the same number of points.
        let mut pts = Vec::new();
        for y in 0..6 {
            for x in 0..6 {
                pts.push([x as f32, y as f32, 2.0]);
                pts.push([x as f32 + 0.5, y as f32 + 0.5, 7.0]);
            }
        }
        let options = RansacOptions {
            iterations: 200,
            seed: 3,
            ..Default::default()
        };
        let trials = draw_trials(&pts, &options);
        let counts = score_trials(&trials, &pts, options.inlier_threshold);
        let first_full = trials
            .iter()
            .zip(&counts)
            .find(|(t, c)| t.is_some() && **c == 36)
            .and_then(|(t, _)| *t)
            .expect("a trial on one sheet");
        let fit = fit_plane_ransac(&pts, &options);
        assert_eq!(fit.inliers, 36);
        assert_eq!(fit.plane, first_full);
    }

    #[test]
    fn plane_through_rejects_degenerate_triples() {
        assert!(plane_through([0.0; 3], [0.0; 3], [1.0, 0.0, 0.0]).is_none());
        assert!(plane_through([0.0; 3], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]).is_none());
        let p = plane_through([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]).unwrap();
        assert!(p.c > 0.0);
    }

    #[test]
    fn refit_keeps_exact_plane() {
        let mut pts = Vec::new();
        for y in 0..10 {
            for x in 0..10 {
                pts.push([x as f32, y as f32, 4.0 + 0.1 * y as f32]);
            }
        }
        let fit = fit_plane_ransac(
            &pts,
            &RansacOptions {
                iterations: 20,
                refit_inliers: true,
                ..Default::default()
            },
        );
        assert_eq!(fit.inliers, 100);
        assert_relative_eq!(fit.plane.depth_at(5.0, 5.0).unwrap(), 4.5, epsilon = 1e-3);
    }
}
