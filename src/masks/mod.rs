//! Floor / furniture mask construction from segmentation output.
//!
//! Stages
//! - `vocabulary`: static label → class table (floor, furniture, other).
//! - `decode`: per-segment payload → dense `{0,255}` mask (threshold > 128
//!   by default); malformed payloads are reported and skipped.
//! - `morphology`: square-element erode/dilate/open/close and `despeckle`.
//! - `components`: 4-connected labelling and largest-component extraction.
//! - `builder`: unions, clean-up and the bottom-band floor fallback.

mod builder;
pub mod components;
pub mod decode;
pub mod morphology;
pub mod vocabulary;


pub use builder::{build_masks, build_masks_with, fallback_floor, MaskBuildStats, SceneMasks};
pub use components::{label_components, largest_component, Component};
pub use vocabulary::{classify_label, SegmentClass};

use serde::Deserialize;

/// Options for [`build_masks_with`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MaskOptions {
    /// Intensity/alpha values strictly above this are "on".
    pub threshold: u8,
    /// Segments scoring below this are ignored.
    pub min_score: f32,
    /// Fallback floor covers rows whose normalised centre exceeds this.
    pub fallback_floor_start: f32,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            threshold: 128,
            min_score: 0.0,
            fallback_floor_start: 0.4,
        }
    }
}
