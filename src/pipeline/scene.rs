use crate::homography::Homography;
use crate::image::{BinaryMask, IlluminationMap, RgbImageU8};
use crate::types::{PatternParams, PlaneEquation};

/// Everything derived from one photo, ready for repeated renders.
///
/// Produced by [`FloorCompositor::prepare`](super::FloorCompositor::prepare)
/// and replaced wholesale when a new photo arrives. Pattern and material
/// choices are swapped by value with [`with_pattern`](Self::with_pattern)
/// and [`with_material_id`](Self::with_material_id); the geometry is never
/// recomputed by a render.
#[derive(Clone, Debug)]
pub struct SceneState {
    pub photo: RgbImageU8,
    /// Blend floor: the cleaned floor mask minus the occluder mask.
    pub floor: BinaryMask,
    pub furniture: BinaryMask,
    pub occluder: BinaryMask,
    pub plane: PlaneEquation,
    pub homography: Homography,
    pub illumination: IlluminationMap,
    pub pattern: PatternParams,
    pub material_id: Option<String>,
}

impl SceneState {
    pub fn with_pattern(mut self, pattern: PatternParams) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_material_id(mut self, id: impl Into<String>) -> Self {
        self.material_id = Some(id.into());
        self
    }
}
