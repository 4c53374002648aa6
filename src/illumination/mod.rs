//! Illumination map extraction.
//!
//! Luminance (`0.299 R + 0.587 G + 0.114 B`, in [0, 1]) is kept on floor
//! pixels and zeroed elsewhere, blurred with a large separable box filter,
//! then min/max-rescaled into `[min, max]` (default `[0.8, 1.2]`). A flat
//! blurred field maps to a constant 1.0.

mod blur;

pub use blur::box_blur;

use crate::error::{ensure_dims, Result};
use crate::image::{BinaryMask, IlluminationMap, ImageF32, RgbImageU8};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct IlluminationOptions {
    /// Box blur half-width in pixels.
    pub radius: usize,
    /// Output value for the darkest blurred pixel.
    pub min: f32,
    /// Output value for the brightest blurred pixel.
    pub max: f32,
}

impl Default for IlluminationOptions {
    fn default() -> Self {
        Self {
            radius: 40,
            min: 0.8,
            max: 1.2,
        }
    }
}

/// Normalised map plus the blurred range it was stretched from.
#[derive(Clone, Debug)]
pub struct Illumination {
    pub map: IlluminationMap,
    pub stats: IlluminationStats,
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IlluminationStats {
    pub blurred_min: f32,
    pub blurred_max: f32,
    /// True when the blurred field was flat and the constant map was used.
    pub flat: bool,
}

/// Illumination map with default options.
pub fn compute_illumination(
    photo: &RgbImageU8,
    floor: &BinaryMask,
    width: usize,
    height: usize,
) -> Result<IlluminationMap> {
    ensure_dims("photo", (width, height), (photo.w, photo.h))?;
    Ok(compute_illumination_with(photo, floor, &IlluminationOptions::default())?.map)
}

/// Illumination map and statistics.
pub fn compute_illumination_with(
    photo: &RgbImageU8,
    floor: &BinaryMask,
    options: &IlluminationOptions,
) -> Result<Illumination> {
    let luma = floor_luminance(photo, floor)?;
    let blurred = box_blur(&luma, options.radius);
    let illumination = normalize_range(&blurred, options.min, options.max);
    log::debug!(
        "compute_illumination: radius={} blurred_range=[{:.4}, {:.4}] flat={}",
        options.radius,
        illumination.stats.blurred_min,
        illumination.stats.blurred_max,
        illumination.stats.flat
    );
    Ok(illumination)
}

/// Per-pixel luminance in [0, 1], zero outside the floor mask.
pub fn floor_luminance(photo: &RgbImageU8, floor: &BinaryMask) -> Result<ImageF32> {
    ensure_dims("floor mask", (photo.w, photo.h), (floor.w, floor.h))?;
    let data = photo
        .data
        .iter()
        .zip(&floor.data)
        .map(|(px, &m)| if m != 0 { luminance(*px) } else { 0.0 })
        .collect();
    ImageF32::from_vec(photo.w, photo.h, data)
}

/// Rec. 601 luma of an 8-bit RGB pixel, scaled to [0, 1].
#[inline]
pub fn luminance(px: [u8; 3]) -> f32 {
    (0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32) / 255.0
}

/// Rescale `field` linearly so its minimum maps to `lo` and maximum to `hi`.
pub fn normalize_range(field: &ImageF32, lo: f32, hi: f32) -> Illumination {
    let Some((min, max)) = field.min_max() else {
        return Illumination {
            map: ImageF32::filled(field.w, field.h, 1.0),
            stats: IlluminationStats {
                flat: true,
                ..Default::default()
            },
        };
    };
    let span = max - min;
    if span <= f32::EPSILON * max.abs().max(1.0) {
        return Illumination {
            map: ImageF32::filled(field.w, field.h, 1.0),
            stats: IlluminationStats {
                blurred_min: min,
                blurred_max: max,
                flat: true,
            },
        };
    }
    let data = field
        .data
        .iter()
        .map(|&v| (lo + (hi - lo) * (v - min) / span).clamp(lo, hi))
        .collect();
    Illumination {
        map: ImageF32 {
            w: field.w,
            h: field.h,
            data,
        },
        stats: IlluminationStats {
            blurred_min: min,
            blurred_max: max,
            flat: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompositorError;
    use approx::assert_relative_eq;

    #[test]
    fn output_lies_in_band_with_extremes_hit() {
        let (w, h) = (32usize, 24usize);
        let photo = RgbImageU8 {
            w,
            h,
            data: (0..w * h)
                .map(|i| {
                    let v = ((i % w) * 255 / (w - 1)) as u8;
                    [v, v, v]
                })
                .collect(),
        };
        let floor = BinaryMask::full(w, h);
        let options = IlluminationOptions {
            radius: 3,
            ..Default::default()
        };
        let illum = compute_illumination_with(&photo, &floor, &options).unwrap();
        let (lo, hi) = illum.map.min_max().unwrap();
        assert_relative_eq!(lo, 0.8, epsilon = 1e-6);
        assert_relative_eq!(hi, 1.2, epsilon = 1e-6);
        assert!(illum.map.data.iter().all(|v| (0.8..=1.2).contains(v)));
        // Brightest column stays brightest.
        assert!(illum.map.get(w - 1, 0) > illum.map.get(0, 0));
    }

    #[test]
    fn uniform_photo_yields_neutral_map() {
        let photo = RgbImageU8::filled(10, 8, [90, 90, 90]);
        let floor = BinaryMask::full(10, 8);
        let map = compute_illumination(&photo, &floor, 10, 8).unwrap();
        assert!(map.data.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn non_floor_pixels_are_darkest() {
        let photo = RgbImageU8::filled(20, 20, [200, 200, 200]);
        let floor = BinaryMask::from_fn(20, 20, |_, y| y >= 10);
        let options = IlluminationOptions {
            radius: 2,
            ..Default::default()
        };
        let illum = compute_illumination_with(&photo, &floor, &options).unwrap();
        assert_relative_eq!(illum.map.get(0, 0), 0.8, epsilon = 1e-6);
        assert_relative_eq!(illum.map.get(0, 19), 1.2, epsilon = 1e-6);
    }

    #[test]
    fn luminance_weights() {
        assert_relative_eq!(luminance([255, 255, 255]), 1.0, epsilon = 1e-6);
        assert_relative_eq!(luminance([255, 0, 0]), 0.299, epsilon = 1e-6);
    }

    #[test]
    fn mismatched_mask_is_rejected() {
        let photo = RgbImageU8::filled(4, 4, [1, 2, 3]);
        let floor = BinaryMask::full(4, 5);
        let err = compute_illumination(&photo, &floor, 4, 4).unwrap_err();
        assert!(matches!(err, CompositorError::DimensionMismatch { .. }));
    }
}
