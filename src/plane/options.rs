use serde::Deserialize;

/// RANSAC parameters for the floor plane fit.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RansacOptions {
    /// Number of sampled triples.
    pub iterations: usize,
    /// Maximum point-to-plane distance (depth units) for an inlier.
    pub inlier_threshold: f32,
    /// Seed for the sampling RNG; fits are reproducible for a given seed.
    pub seed: u64,
    /// Candidate sets larger than this are evenly decimated before scoring.
    pub max_points: usize,
    /// Redraws allowed when a sampled triple is degenerate.
    pub max_resample_attempts: usize,
    /// Refine the winning plane by least squares over its inliers.
    pub refit_inliers: bool,
}

impl Default for RansacOptions {
    fn default() -> Self {
        Self {
            iterations: 1000,
            inlier_threshold: 0.1,
            seed: 0,
            max_points: 50_000,
            max_resample_attempts: 32,
            refit_inliers: false,
        }
    }
}
