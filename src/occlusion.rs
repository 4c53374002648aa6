//! Occluder mask refinement.
//!
//! A floor pixel is occluded when its measured depth is nearer than the
//! floor plane predicts by more than `depth_threshold` (depth convention:
//! larger = farther). Depth-occluded pixels are unioned with the furniture
//! mask and the result is dilated to hide seams at object boundaries.
//! Pixels with non-positive depth never fail the depth test.

use crate::error::{ensure_dims, Result};
use crate::image::{BinaryMask, DepthMap, ImageView, MASK_ON};
use crate::masks::morphology::dilate;
use crate::types::PlaneEquation;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OcclusionOptions {
    /// How much nearer than the plane (depth units) a pixel must be.
    pub depth_threshold: f32,
    /// Square dilation radius applied to the combined mask.
    pub dilation_radius: usize,
}

impl Default for OcclusionOptions {
    fn default() -> Self {
        Self {
            depth_threshold: 0.1,
            dilation_radius: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcclusionStats {
    /// Floor pixels failing the depth test.
    pub depth_occluded: usize,
    /// Occluder pixels after union and dilation.
    pub occluder_pixels: usize,
    /// False when the plane could not predict depth (`c ≈ 0`).
    pub depth_test_applied: bool,
}

/// Occluder mask with the default dilation radius.
pub fn refine_occlusion_mask(
    floor: &BinaryMask,
    furniture: &BinaryMask,
    depth: &DepthMap,
    plane: &PlaneEquation,
    threshold: f32,
) -> Result<BinaryMask> {
    let options = OcclusionOptions {
        depth_threshold: threshold,
        ..Default::default()
    };
    Ok(refine_occlusion_mask_with(floor, furniture, depth, plane, &options)?.0)
}

/// Occluder mask and statistics.
pub fn refine_occlusion_mask_with(
    floor: &BinaryMask,
    furniture: &BinaryMask,
    depth: &DepthMap,
    plane: &PlaneEquation,
    options: &OcclusionOptions,
) -> Result<(BinaryMask, OcclusionStats)> {
    let dims = floor.dims();
    ensure_dims("furniture mask", dims, furniture.dims())?;
    ensure_dims("depth map", dims, depth.dims())?;

    let mut stats = OcclusionStats {
        depth_test_applied: plane.depth_at(0.0, 0.0).is_some(),
        ..Default::default()
    };
    let mut occluder = furniture.clone();
    if stats.depth_test_applied {
        for y in 0..floor.h {
            for x in 0..floor.w {
                if !floor.is_set(x, y) {
                    continue;
                }
                let actual = depth.get(x, y);
                if actual <= 0.0 {
                    continue;
                }
                let Some(expected) = plane.depth_at(x as f32, y as f32) else {
                    continue;
                };
                if actual < expected - options.depth_threshold {
                    stats.depth_occluded += 1;
                    let i = occluder.idx(x, y);
                    occluder.data[i] = MASK_ON;
                }
            }
        }
    } else {
        log::warn!("refine_occlusion_mask: plane cannot predict depth, using furniture mask only");
    }

    let occluder = dilate(&occluder, options.dilation_radius);
    stats.occluder_pixels = occluder.count();
    log::debug!(
        "refine_occlusion_mask: depth_occluded={} occluder_pixels={}",
        stats.depth_occluded,
        stats.occluder_pixels
    );
    Ok((occluder, stats))
}

/// Floor with occluders removed: occlusion takes precedence over floor.
pub fn exclusive_floor(floor: &BinaryMask, occluder: &BinaryMask) -> Result<BinaryMask> {
    floor.subtract(occluder)
}
