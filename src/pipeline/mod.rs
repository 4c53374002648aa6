//! Scene preparation and rendering.
//!
//! [`FloorCompositor::prepare`] runs the geometric and photometric stages once
//! per photo:
//!
//! ```text
//! segments ─► masks ─► plane (RANSAC) ─► homography
//!                 │                         │
//! photo ──────────┴─► illumination          │
//! depth ─► occluder (floor, furniture, plane)
//! ```
//!
//! and [`FloorCompositor::render`] shades the stored scene with a material
//! and the scene's pattern. Renders are cheap relative to preparation and
//! may be repeated for any number of pattern/material choices.
mod params;
mod scene;

pub use params::CompositorParams;
pub use scene::SceneState;

use crate::compositor::{composite, Material};
use crate::diagnostics::{
    HomographyKind, HomographyStage, InputDescriptor, MaskStage, OcclusionStage,
    PreparationReport, TimingBreakdown,
};
use crate::error::{ensure_dims, Result};
use crate::homography::{homography_from_correspondences, homography_from_plane, HomographyMode};
use crate::illumination::compute_illumination_with;
use crate::image::{DepthMap, RgbImageU8};
use crate::masks::build_masks_with;
use crate::occlusion::{exclusive_floor, refine_occlusion_mask_with};
use crate::plane::fit_floor_plane_with;
use crate::types::{PatternParams, SegmentationResult};
use log::debug;
use nalgebra::Matrix3;
use std::time::Instant;

/// Floor compositor: owns the stage parameters, holds no per-photo state.
#[derive(Clone, Debug, Default)]
pub struct FloorCompositor {
    params: CompositorParams,
}

impl FloorCompositor {
    pub fn new(params: CompositorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CompositorParams {
        &self.params
    }

    /// Derive masks, plane, homography, illumination and occluders for a photo.
    pub fn prepare(
        &self,
        photo: RgbImageU8,
        segments: &[SegmentationResult],
        depth: &DepthMap,
    ) -> Result<SceneState> {
        Ok(self.prepare_with_report(photo, segments, depth)?.0)
    }

    /// Like [`prepare`](Self::prepare), also returning per-stage diagnostics.
    pub fn prepare_with_report(
        &self,
        photo: RgbImageU8,
        segments: &[SegmentationResult],
        depth: &DepthMap,
    ) -> Result<(SceneState, PreparationReport)> {
        let (width, height) = (photo.w, photo.h);
        ensure_dims("depth map", (width, height), (depth.w, depth.h))?;
        debug!(
            "FloorCompositor::prepare start w={} h={} segments={}",
            width,
            height,
            segments.len()
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let depth = self.params.depth_polarity.to_distance(depth);

        let stage = Instant::now();
        let masks = build_masks_with(segments, width, height, &self.params.masks);
        timings.push_since("masks", stage);

        let stage = Instant::now();
        let fit = fit_floor_plane_with(&depth, &masks.floor, &self.params.ransac)?;
        timings.push_since("plane", stage);

        let stage = Instant::now();
        let (kind, homography) = match &self.params.homography {
            HomographyMode::Plane => (
                HomographyKind::Plane,
                homography_from_plane(&fit.plane, width, height),
            ),
            HomographyMode::Identity => (HomographyKind::Identity, Matrix3::identity()),
            HomographyMode::Correspondences { src, dst } => (
                HomographyKind::Correspondences,
                homography_from_correspondences(src, dst)?,
            ),
        };
        timings.push_since("homography", stage);
        debug!("FloorCompositor::prepare homography={kind:?}");

        let stage = Instant::now();
        let illumination = compute_illumination_with(&photo, &masks.floor, &self.params.illumination)?;
        timings.push_since("illumination", stage);

        let stage = Instant::now();
        let (occluder, occlusion_stats) = refine_occlusion_mask_with(
            &masks.floor,
            &masks.furniture,
            &depth,
            &fit.plane,
            &self.params.occlusion,
        )?;
        let floor = exclusive_floor(&masks.floor, &occluder)?;
        timings.push_since("occlusion", stage);
        timings.total_ms = crate::diagnostics::elapsed_ms(total_start);

        let report = PreparationReport {
            input: InputDescriptor {
                width,
                height,
                segments: segments.len(),
            },
            masks: MaskStage {
                stats: masks.stats.clone(),
                floor_coverage: masks.floor.coverage(),
                furniture_coverage: masks.furniture.coverage(),
            },
            plane: fit,
            homography: HomographyStage {
                kind,
                matrix: homography,
            },
            illumination: illumination.stats,
            occlusion: OcclusionStage {
                stats: occlusion_stats,
                occluder_coverage: occluder.coverage(),
                blend_floor_coverage: floor.coverage(),
            },
            timings,
        };
        debug!("FloorCompositor::prepare done {}", report.summary());

        let scene = SceneState {
            photo,
            floor,
            furniture: masks.furniture,
            occluder,
            plane: fit.plane,
            homography,
            illumination: illumination.map,
            pattern: PatternParams::default(),
            material_id: None,
        };
        Ok((scene, report))
    }

    /// Composite `material` over the scene using the scene's pattern.
    pub fn render(&self, scene: &SceneState, material: &Material) -> Result<RgbImageU8> {
        if let Some(id) = scene.material_id.as_deref() {
            if id != material.id {
                debug!(
                    "FloorCompositor::render material '{}' differs from scene selection '{}'",
                    material.id, id
                );
            }
        }
        let start = Instant::now();
        let out = composite(
            &scene.photo,
            &scene.homography,
            &scene.illumination,
            &scene.floor,
            &scene.occluder,
            material,
            &scene.pattern,
        )?;
        debug!(
            "FloorCompositor::render pattern={:?} took {:.2}ms",
            scene.pattern.kind,
            crate::diagnostics::elapsed_ms(start)
        );
        Ok(out)
    }
}
