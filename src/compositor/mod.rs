//! Per-pixel plank shading and photo blending.
//!
//! For every output pixel (centre at `x + 0.5, y + 0.5`):
//! 1. map through the image → floor homography (perspective divide);
//! 2. resolve the plank cell (see [`pattern`]) after rotation and scale;
//! 3. sample the material at the cell's sample coordinate and apply the seam factor;
//! 4. multiply by the illumination value at the screen position;
//! 5. blend with the photo using `floor × (1 − occluder)` at the screen position.
//!
//! Pixels are independent; rows run in parallel with the `parallel` feature.
pub mod material;
pub mod pattern;

pub use material::Material;
pub use pattern::{plank_sample, seam_factor, PlankSample};

use crate::error::{ensure_dims, Result};
use crate::homography::{apply_homography, Homography};
use crate::image::{
    BinaryMask, IlluminationMap, ImageView, ImageViewMut, Rgb8, RgbImageU8,
};
use crate::types::PatternParams;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Seam-shaded material colour at a floor-space point (not yet lit).
pub fn floor_color(uv: [f32; 2], material: &Material, params: &PatternParams) -> [f32; 3] {
    let s = plank_sample(uv, params);
    let c = material.sample(s.sample[0], s.sample[1]);
    [c[0] * s.seam, c[1] * s.seam, c[2] * s.seam]
}

/// Shade one pixel.
///
/// `floor_uv` is `None` when the homography sends the pixel to infinity;
/// such pixels keep the photo colour.
pub fn shade_pixel(
    photo: Rgb8,
    floor_uv: Option<[f32; 2]>,
    illumination: f32,
    weight: f32,
    material: &Material,
    params: &PatternParams,
) -> Rgb8 {
    let weight = weight.clamp(0.0, 1.0);
    if weight <= 0.0 {
        return photo;
    }
    let Some(uv) = floor_uv else {
        return photo;
    };
    let base = floor_color(uv, material, params);
    let mut out = [0u8; 3];
    for c in 0..3 {
        let lit = base[c] * illumination;
        let v = photo[c] as f32 * (1.0 - weight) + lit * weight;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(feature = "parallel")]
fn for_each_row<F>(img: &mut RgbImageU8, f: F)
where
    F: Fn(usize, &mut [Rgb8]) + Send + Sync,
{
    let w = img.w;
    img.pixels_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst)| f(y, dst));
}

#[cfg(not(feature = "parallel"))]
fn for_each_row<F>(img: &mut RgbImageU8, f: F)
where
    F: Fn(usize, &mut [Rgb8]),
{
    let w = img.w;
    img.pixels_mut()
        .chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst)| f(y, dst));
}

/// Composite the patterned material over the photo.
///
/// Every grid must match the photo's dimensions.
pub fn composite(
    photo: &RgbImageU8,
    homography: &Homography,
    illumination: &IlluminationMap,
    floor: &BinaryMask,
    occluder: &BinaryMask,
    material: &Material,
    params: &PatternParams,
) -> Result<RgbImageU8> {
    let dims = photo.dims();
    ensure_dims("illumination map", dims, illumination.dims())?;
    ensure_dims("floor mask", dims, floor.dims())?;
    ensure_dims("occluder mask", dims, occluder.dims())?;

    let mut out = photo.clone();
    if photo.is_empty() {
        return Ok(out);
    }
    let shade_row = |y: usize, dst: &mut [Rgb8]| {
        let src = photo.row(y);
        let illum = illumination.row(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let weight = floor.weight(x, y) * (1.0 - occluder.weight(x, y));
            if weight <= 0.0 {
                continue;
            }
            let uv = apply_homography(homography, [x as f32 + 0.5, y as f32 + 0.5]);
            *px = shade_pixel(src[x], uv, illum[x], weight, material, params);
        }
    };

    for_each_row(&mut out, shade_row);

    log::debug!(
        "composite: {}x{} pattern={:?} material={}",
        photo.w,
        photo.h,
        params.kind,
        material.id
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompositorError;
    use crate::image::ImageF32;
    use crate::types::{PatternKind, PlankSize};
    use nalgebra::Matrix3;

    fn gradient_photo(w: usize, h: usize) -> RgbImageU8 {
        let mut img = RgbImageU8::filled(w, h, [0, 0, 0]);
        for y in 0..h {
            for x in 0..w {
                img.set(x, y, [(x * 40) as u8, (y * 30) as u8, 77]);
            }
        }
        img
    }

    #[test]
    fn solid_material_is_uniform_for_every_pattern() {
        let (w, h) = (4usize, 4usize);
        let photo = gradient_photo(w, h);
        let illum = ImageF32::filled(w, h, 1.0);
        let floor = BinaryMask::full(w, h);
        let occ = BinaryMask::new(w, h);
        let material = Material::solid("grey", [128, 128, 128]);
        for kind in PatternKind::ALL {
            // 8×8 planks keep every pixel centre clear of the seam band; default planks darken the edge columns.
            let params = PatternParams {
                kind,
                plank_size: PlankSize {
                    length: 8.0,
                    width: 8.0,
                },
                ..Default::default()
            };
            let out = composite(
                &photo,
                &Matrix3::identity(),
                &illum,
                &floor,
                &occ,
                &material,
                &params,
            )
            .unwrap();
            assert!(
                out.data.iter().all(|p| *p == [128, 128, 128]),
                "{kind:?} produced {:?}",
                out.data
            );
        }
    }

    #[test]
    fn zero_weight_returns_photo_exactly() {
        let (w, h) = (5usize, 3usize);
        let photo = gradient_photo(w, h);
        let mut floor = BinaryMask::full(w, h);
        floor.set(0, 0, false);
        let mut occ = BinaryMask::new(w, h);
        occ.set(2, 1, true);
        let out = composite(
            &photo,
            &Matrix3::identity(),
            &ImageF32::filled(w, h, 1.1),
            &floor,
            &occ,
            &Material::solid("red", [255, 0, 0]),
            &PatternParams::default(),
        )
        .unwrap();
        assert_eq!(out.get(0, 0), photo.get(0, 0));
        assert_eq!(out.get(2, 1), photo.get(2, 1));
        assert_ne!(out.get(4, 2), photo.get(4, 2));
    }

    #[test]
    fn full_weight_is_material_times_illumination() {
        let photo = RgbImageU8::filled(1, 1, [250, 3, 9]);
        let material = Material::solid("m", [100, 50, 200]);
        let params = PatternParams {
            seam_width: 0.0,
            ..Default::default()
        };
        let px = shade_pixel(photo.get(0, 0), Some([3.0, 4.0]), 1.2, 1.0, &material, &params);
        assert_eq!(px, [120, 60, 240]);
        let dark = shade_pixel(photo.get(0, 0), Some([3.0, 4.0]), 0.8, 1.0, &material, &params);
        assert_eq!(dark, [80, 40, 160]);
    }

    #[test]
    fn seams_darken_cell_edges() {
        let material = Material::solid("m", [200, 200, 200]);
        let params = PatternParams {
            kind: PatternKind::Herringbone,
            plank_size: PlankSize {
                length: 10.0,
                width: 10.0,
            },
            ..Default::default()
        };
        let edge = shade_pixel([0, 0, 0], Some([0.0, 5.0]), 1.0, 1.0, &material, &params);
        let centre = shade_pixel([0, 0, 0], Some([5.0, 5.0]), 1.0, 1.0, &material, &params);
        assert_eq!(centre, [200, 200, 200]);
        assert_eq!(edge, [176, 176, 176]);
    }

    #[test]
    fn points_at_infinity_keep_the_photo() {
        let px = shade_pixel(
            [1, 2, 3],
            None,
            1.0,
            1.0,
            &Material::solid("m", [9, 9, 9]),
            &PatternParams::default(),
        );
        assert_eq!(px, [1, 2, 3]);
    }

    #[test]
    fn mismatched_grids_are_rejected() {
        let photo = RgbImageU8::filled(4, 4, [0, 0, 0]);
        let err = composite(
            &photo,
            &Matrix3::identity(),
            &ImageF32::filled(4, 4, 1.0),
            &BinaryMask::full(4, 4),
            &BinaryMask::new(3, 4),
            &Material::solid("m", [1, 1, 1]),
            &PatternParams::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CompositorError::DimensionMismatch {
                what: "occluder mask",
                ..
            }
        ));
    }
}
