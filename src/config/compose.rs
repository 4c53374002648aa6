use super::{load_json, SegmentConfig};
use crate::compositor::Material;
use crate::image::io::{load_depth_image, load_depth_json, load_rgb_image};
use crate::image::{DepthMap, Rgb8};
use crate::pipeline::CompositorParams;
use crate::types::PatternParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ComposeConfig {
    pub photo: PathBuf,
    #[serde(default)]
    pub segments: Vec<SegmentConfig>,
    pub depth: DepthSource,
    #[serde(default)]
    pub material: MaterialSource,
    #[serde(default)]
    pub pattern: PatternParams,
    #[serde(default)]
    pub params: CompositorParams,
    pub output: ComposeOutputConfig,
}

/// Where the dense depth grid comes from. Polarity is set in `params`.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DepthSource {
    /// `{"width", "height", "data"}` JSON grid.
    Json { path: PathBuf },
    /// Grayscale image (16-bit kept as is) multiplied by `scale`.
    Image {
        path: PathBuf,
        #[serde(default = "default_depth_scale")]
        scale: f32,
    },
}

fn default_depth_scale() -> f32 {
    1.0
}

impl DepthSource {
    pub fn load(&self) -> Result<DepthMap, String> {
        match self {
            DepthSource::Json { path } => load_depth_json(path),
            DepthSource::Image { path, scale } => load_depth_image(path, *scale),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaterialSource {
    /// Tileable texture image spanning one plank cell.
    Texture {
        #[serde(default)]
        id: Option<String>,
        path: PathBuf,
    },
    Solid { id: String, rgb: Rgb8 },
}

impl Default for MaterialSource {
    fn default() -> Self {
        MaterialSource::Solid {
            id: "oak".to_string(),
            rgb: [168, 124, 82],
        }
    }
}

impl MaterialSource {
    pub fn load(&self) -> Result<Material, String> {
        match self {
            MaterialSource::Texture { id, path } => {
                let texture = load_rgb_image(path)?;
                let id = id.clone().unwrap_or_else(|| {
                    path.file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "texture".to_string())
                });
                Material::from_image(id, texture)
                    .map_err(|e| format!("Invalid material {}: {e}", path.display()))
            }
            MaterialSource::Solid { id, rgb } => Ok(Material::solid(id.clone(), *rgb)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ComposeOutputConfig {
    pub composite: PathBuf,
    /// Directory for floor / furniture / occluder masks and the illumination map.
    #[serde(default)]
    pub debug_dir: Option<PathBuf>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ComposeConfig, String> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PatternKind;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: ComposeConfig = serde_json::from_str(
            r#"{
                "photo": "room.png",
                "depth": { "kind": "image", "path": "depth.png" },
                "pattern": { "kind": "brick" },
                "output": { "composite": "out/composite.png" }
            }"#,
        )
        .unwrap();
        assert!(cfg.segments.is_empty());
        assert!(matches!(cfg.depth, DepthSource::Image { scale, .. } if scale == 1.0));
        assert!(matches!(cfg.material, MaterialSource::Solid { .. }));
        assert_eq!(cfg.pattern.kind, PatternKind::Brick);
        assert_eq!(cfg.params.ransac.iterations, 1000);
        assert!(cfg.output.report_json.is_none());
    }

    #[test]
    fn solid_material_loads_without_files() {
        let source: MaterialSource =
            serde_json::from_str(r#"{ "kind": "solid", "id": "slate", "rgb": [40, 44, 52] }"#)
                .unwrap();
        let material = source.load().unwrap();
        assert_eq!(material.id, "slate");
        assert_eq!(material.sample(0.3, 0.7), [40.0, 44.0, 52.0]);
    }
}
