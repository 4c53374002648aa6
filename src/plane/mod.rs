//! Robust floor plane estimation in (pixel x, pixel y, depth) space.
//!
//! Candidates are every floor pixel with positive depth. Fewer than three
//! candidates yield the default horizontal plane `z = 0`, as does a
//! candidate set without any non-collinear triple.

mod options;
mod ransac;

pub use options::RansacOptions;
pub use ransac::{
    collect_floor_points, fit_floor_plane, fit_floor_plane_with, fit_plane_ransac,
    plane_through, PlaneFit,
};
