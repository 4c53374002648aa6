#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod compositor;
pub mod diagnostics;
pub mod error;
pub mod homography;
pub mod image;
pub mod pipeline;
pub mod types;

// Stage modules; usable on their own for custom pipelines.
pub mod illumination;
pub mod masks;
pub mod occlusion;
pub mod plane;

// Demo configuration (JSON loaders used by the binaries).
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: orchestrator, scene and parameters.
pub use crate::pipeline::{CompositorParams, FloorCompositor, SceneState};
pub use crate::error::{CompositorError, Result};
pub use crate::types::{
    PatternKind, PatternParams, PlaneEquation, PlankSize, SegmentMask, SegmentationResult,
};

// The six stage entry points.
pub use crate::compositor::{composite, shade_pixel, Material};
pub use crate::homography::{estimate_homography, HomographySource};
pub use crate::illumination::compute_illumination;
pub use crate::masks::build_masks;
pub use crate::occlusion::refine_occlusion_mask;
pub use crate::plane::fit_floor_plane;

// Diagnostics returned by `prepare_with_report`.
pub use crate::diagnostics::PreparationReport;

// Convenience homography helpers that are generally useful.
pub use crate::homography::{apply_homography_points, rescale_homography_image_space};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use floor_compositor::prelude::*;
///
/// # fn main() -> floor_compositor::Result<()> {
/// let (w, h) = (64usize, 48usize);
/// let photo = RgbImageU8::filled(w, h, [180, 170, 160]);
/// let depth = DepthMap::filled(w, h, 4.0);
///
/// let compositor = FloorCompositor::new(CompositorParams::default());
/// let scene = compositor.prepare(photo, &[], &depth)?.with_pattern(PatternParams {
///     kind: PatternKind::Herringbone,
///     ..Default::default()
/// });
/// let out = compositor.render(&scene, &Material::solid("oak", [168, 124, 82]))?;
/// println!("{}x{}", out.w, out.h);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::compositor::Material;
    pub use crate::image::{BinaryMask, DepthMap, RgbImageU8};
    pub use crate::types::{PatternKind, PatternParams, SegmentMask, SegmentationResult};
    pub use crate::{CompositorParams, FloorCompositor, SceneState};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage runners with explicit options and statistics.
    pub use crate::illumination::{compute_illumination_with, Illumination, IlluminationOptions};
    pub use crate::masks::{build_masks_with, MaskBuildStats, MaskOptions, SceneMasks};
    pub use crate::occlusion::{
        exclusive_floor, refine_occlusion_mask_with, OcclusionOptions, OcclusionStats,
    };
    pub use crate::plane::{fit_floor_plane_with, PlaneFit, RansacOptions};

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        HomographyKind, HomographyStage, InputDescriptor, MaskStage, OcclusionStage,
        StageTiming, TimingBreakdown,
    };
}
