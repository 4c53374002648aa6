//! Parameters for [`FloorCompositor`](super::FloorCompositor).
//!
//! Every stage keeps its own options struct; this type only aggregates them so
//! a single JSON object can configure a full run. Missing fields take the
//! stage defaults.
use crate::homography::HomographyMode;
use crate::illumination::IlluminationOptions;
use crate::masks::MaskOptions;
use crate::occlusion::OcclusionOptions;
use crate::plane::RansacOptions;
use crate::types::DepthPolarity;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CompositorParams {
    /// How the depth input encodes distance; converted to larger = farther.
    pub depth_polarity: DepthPolarity,
    pub masks: MaskOptions,
    pub ransac: RansacOptions,
    pub homography: HomographyMode,
    pub illumination: IlluminationOptions,
    pub occlusion: OcclusionOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_stage_defaults() {
        let params: CompositorParams = serde_json::from_str(
            r#"{
                "depth_polarity": "disparity",
                "ransac": { "iterations": 50 },
                "homography": { "mode": "identity" }
            }"#,
        )
        .unwrap();
        assert_eq!(params.depth_polarity, DepthPolarity::Disparity);
        assert_eq!(params.ransac.iterations, 50);
        assert_eq!(params.ransac.inlier_threshold, 0.1);
        assert_eq!(params.homography, HomographyMode::Identity);
        assert_eq!(params.illumination.radius, 40);
        assert_eq!(params.masks.threshold, 128);
        assert_eq!(params.occlusion.dilation_radius, 1);
    }
}
