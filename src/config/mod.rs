//! JSON configuration for the demo binaries.
//!
//! - [`compose`]: full pipeline (`compose_demo`).
//! - [`masks`]: mask construction only (`mask_demo`).
//!
//! Loading errors are reported as `String`s naming the offending path.
pub mod compose;
pub mod masks;

use crate::image::io::read_bytes;
use crate::types::{SegmentMask, SegmentationResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A segment whose mask is stored as an image file.
#[derive(Clone, Debug, Deserialize)]
pub struct SegmentConfig {
    pub label: String,
    #[serde(default = "default_score")]
    pub score: f32,
    pub mask: PathBuf,
}

fn default_score() -> f32 {
    1.0
}

impl SegmentConfig {
    /// Read the mask file; decoding happens in the mask builder.
    pub fn load(&self) -> Result<SegmentationResult, String> {
        Ok(SegmentationResult {
            label: self.label.clone(),
            score: self.score,
            mask: SegmentMask::Encoded {
                bytes: read_bytes(&self.mask)?,
            },
        })
    }
}

pub fn load_segments(segments: &[SegmentConfig]) -> Result<Vec<SegmentationResult>, String> {
    segments.iter().map(SegmentConfig::load).collect()
}

pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
