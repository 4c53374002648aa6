use super::TimingBreakdown;
use crate::homography::Homography;
use crate::illumination::IlluminationStats;
use crate::masks::MaskBuildStats;
use crate::occlusion::OcclusionStats;
use crate::plane::PlaneFit;
use serde::Serialize;

/// Result of [`FloorCompositor::prepare_with_report`](crate::FloorCompositor::prepare_with_report).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparationReport {
    pub input: InputDescriptor,
    pub masks: MaskStage,
    pub plane: PlaneFit,
    pub homography: HomographyStage,
    pub illumination: IlluminationStats,
    pub occlusion: OcclusionStage,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub segments: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskStage {
    #[serde(flatten)]
    pub stats: MaskBuildStats,
    pub floor_coverage: f32,
    pub furniture_coverage: f32,
}

/// Where the homography came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HomographyKind {
    Plane,
    Identity,
    Correspondences,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomographyStage {
    pub kind: HomographyKind,
    pub matrix: Homography,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcclusionStage {
    #[serde(flatten)]
    pub stats: OcclusionStats,
    pub occluder_coverage: f32,
    /// Floor coverage after occluders are removed.
    pub blend_floor_coverage: f32,
}

impl PreparationReport {
    /// One-line human readable summary for logs and demos.
    pub fn summary(&self) -> String {
        format!(
            "{}x{} segments={} floor={:.1}% fallback={} inliers={}/{} homography={:?} occluder={:.1}% total={:.1}ms",
            self.input.width,
            self.input.height,
            self.input.segments,
            self.masks.floor_coverage * 100.0,
            self.masks.stats.used_floor_fallback,
            self.plane.inliers,
            self.plane.scored_points,
            self.homography.kind,
            self.occlusion.occluder_coverage * 100.0,
            self.timings.total_ms
        )
    }
}
