use crate::image::DepthMap;
use serde::{Deserialize, Serialize};

/// Plane `a·x + b·y + c·z + d = 0` in (pixel x, pixel y, depth) space.
///
/// Fitted planes carry a unit normal `(a, b, c)` with `c >= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneEquation {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl Default for PlaneEquation {
    /// Horizontal plane `z = 0` with unit normal along the depth axis.
    fn default() -> Self {
        Self {
            a: 0.0,
            b: 0.0,
            c: 1.0,
            d: 0.0,
        }
    }
}

impl PlaneEquation {
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    pub fn coefficients(&self) -> [f32; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Unsigned point-to-plane distance (normal assumed unit length).
    #[inline]
    pub fn distance(&self, p: [f32; 3]) -> f32 {
        (self.a * p[0] + self.b * p[1] + self.c * p[2] + self.d).abs()
    }

    /// Depth predicted at pixel `(x, y)`: `z = -(a·x + b·y + d) / c`.
    ///
    /// `None` when the plane is parallel to the depth axis (`c ≈ 0`).
    #[inline]
    pub fn depth_at(&self, x: f32, y: f32) -> Option<f32> {
        if self.c.abs() <= 1e-6 {
            return None;
        }
        Some(-(self.a * x + self.b * y + self.d) / self.c)
    }
}

/// One entry from the external segmentation service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentationResult {
    pub label: String,
    #[serde(default = "default_score")]
    pub score: f32,
    pub mask: SegmentMask,
}

fn default_score() -> f32 {
    1.0
}

/// Raw per-segment mask payload as delivered by the segmentation service.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SegmentMask {
    /// One intensity byte per pixel.
    Intensity {
        width: usize,
        height: usize,
        data: Vec<u8>,
    },
    /// Interleaved RGBA bytes; the alpha channel carries the mask.
    Rgba {
        width: usize,
        height: usize,
        data: Vec<u8>,
    },
    /// Encoded image bytes (PNG, JPEG, …).
    Encoded { bytes: Vec<u8> },
}

/// How the depth service encodes distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthPolarity {
    /// Larger value = farther. The convention used by every stage.
    #[default]
    Distance,
    /// Larger value = nearer (relative inverse depth).
    Disparity,
}

impl DepthPolarity {
    /// Convert `depth` to the distance convention.
    ///
    /// Disparity maps are mirrored over the range of their positive samples
    /// (`v' = min + max - v`); non-positive samples stay invalid (0).
    pub fn to_distance(self, depth: &DepthMap) -> DepthMap {
        match self {
            DepthPolarity::Distance => depth.clone(),
            DepthPolarity::Disparity => {
                let positive = depth.data.iter().copied().filter(|v| *v > 0.0);
                let (lo, hi) = positive.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
                let mut out = depth.clone();
                if lo.is_finite() && hi.is_finite() {
                    for v in &mut out.data {
                        *v = if *v > 0.0 { lo + hi - *v } else { 0.0 };
                    }
                }
                out
            }
        }
    }
}

/// Tiling layout used by the plank shader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    #[default]
    Random,
    Brick,
    Herringbone,
    Basket,
}

impl PatternKind {
    pub const ALL: [PatternKind; 4] = [
        PatternKind::Random,
        PatternKind::Brick,
        PatternKind::Herringbone,
        PatternKind::Basket,
    ];
}

/// Plank cell size in floor units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlankSize {
    pub length: f32,
    pub width: f32,
}

impl Default for PlankSize {
    fn default() -> Self {
        Self {
            length: 180.0,
            width: 30.0,
        }
    }
}

/// Per-render pattern configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternParams {
    pub kind: PatternKind,
    /// User rotation of the floor coordinate frame (radians).
    pub rotation: f32,
    /// Uniform scale applied to floor coordinates; larger = more planks.
    pub scale: f32,
    pub plank_size: PlankSize,
    /// Seed mixed into per-cell jitter.
    pub seed: u32,
    /// Width of the seam shading ramp as a fraction of the cell.
    pub seam_width: f32,
}

impl Default for PatternParams {
    fn default() -> Self {
        Self {
            kind: PatternKind::Random,
            rotation: 0.0,
            scale: 1.0,
            plank_size: PlankSize::default(),
            seed: 0,
            seam_width: 0.015,
        }
    }
}
