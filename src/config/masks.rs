use super::{load_json, SegmentConfig};
use crate::masks::MaskOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct MaskToolConfig {
    /// Photo the segments belong to; only its size is used.
    pub photo: PathBuf,
    #[serde(default)]
    pub segments: Vec<SegmentConfig>,
    #[serde(default)]
    pub masks: MaskOptions,
    pub output: MaskOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct MaskOutputConfig {
    pub floor_mask: PathBuf,
    pub furniture_mask: PathBuf,
    #[serde(default)]
    pub stats_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<MaskToolConfig, String> {
    load_json(path)
}
