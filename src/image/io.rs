//! I/O helpers for photos, masks, depth grids and JSON.
//!
//! - `load_rgb_image` / `save_rgb_image`: 8-bit RGB round trip through `image`.
//! - `save_mask`: write a `BinaryMask` as an 8-bit grayscale PNG.
//! - `save_grayscale_f32`: write an `ImageF32` min/max-stretched to [0, 255].
//! - `load_depth_json` / `load_depth_image`: dense depth from JSON or a 16-bit gray image.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{BinaryMask, ImageF32, ImageView, RgbImageU8};
use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    RgbImageU8::from_interleaved(w, h, img.as_raw())
        .map_err(|e| format!("Failed to convert {}: {e}", path.display()))
}

/// Save an RGB image (format inferred from the extension).
pub fn save_rgb_image(image: &RgbImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let out: RgbImage = ImageBuffer::from_fn(image.w as u32, image.h as u32, |x, y| {
        Rgb(image.get(x as usize, y as usize))
    });
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a binary mask to an 8-bit grayscale PNG.
pub fn save_mask(mask: &BinaryMask, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let out: GrayImage = ImageBuffer::from_raw(mask.w as u32, mask.h as u32, mask.data.clone())
        .ok_or_else(|| "Failed to create mask buffer".to_string())?;
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a float image to a grayscale PNG, stretching its finite range to [0, 255].
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let (lo, hi) = image.min_max().unwrap_or((0.0, 1.0));
    let span = if hi > lo { hi - lo } else { 1.0 };
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = ((px - lo) / span * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

#[derive(Debug, Deserialize)]
struct DepthJson {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

/// Load a dense depth grid stored as `{"width": W, "height": H, "data": [...]}`.
pub fn load_depth_json(path: &Path) -> Result<ImageF32, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read depth {}: {e}", path.display()))?;
    let parsed: DepthJson = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse depth {}: {e}", path.display()))?;
    ImageF32::from_vec(parsed.width, parsed.height, parsed.data)
        .map_err(|e| format!("Invalid depth {}: {e}", path.display()))
}

/// Load depth from a grayscale image; 16-bit sources keep their precision.
///
/// Values are scaled by `scale` after conversion to `f32`.
pub fn load_depth_image(path: &Path, scale: f32) -> Result<ImageF32, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma16();
    let (w, h) = (img.width() as usize, img.height() as usize);
    let data = img.into_raw().into_iter().map(|v| v as f32 * scale).collect();
    ImageF32::from_vec(w, h, data).map_err(|e| format!("Invalid depth {}: {e}", path.display()))
}

/// Read a whole file as bytes (used for encoded segment masks).
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, String> {
    fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
