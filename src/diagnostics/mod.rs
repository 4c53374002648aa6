//! Diagnostics returned alongside a prepared scene.
//!
//! [`PreparationReport`] gathers per-stage statistics (segment classification,
//! plane fit, homography source, illumination range, occlusion) and the
//! [`TimingBreakdown`] of the run. Every type serialises to camelCase JSON.

pub mod report;
pub mod timing;

pub use report::{
    HomographyKind, HomographyStage, InputDescriptor, MaskStage, OcclusionStage,
    PreparationReport,
};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
