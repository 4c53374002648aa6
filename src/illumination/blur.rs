//! Separable box blur with windows clipped at the image border.
//!
//! Each output is the mean of the in-bounds samples inside `±radius`, so
//! border pixels average fewer values instead of replicating the edge.
//! Both passes use running prefix sums: O(W·H) regardless of radius.
use crate::image::{ImageF32, ImageView, ImageViewMut};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Horizontal pass followed by a vertical pass.
pub fn box_blur(src: &ImageF32, radius: usize) -> ImageF32 {
    if radius == 0 || src.is_empty() {
        return src.clone();
    }
    let horiz = blur_rows(src, radius);
    let transposed = transpose(&horiz);
    transpose(&blur_rows(&transposed, radius))
}

#[cfg(feature = "parallel")]
fn blur_rows(src: &ImageF32, radius: usize) -> ImageF32 {
    let mut out = ImageF32::new(src.w, src.h);
    let w = src.w;
    out.pixels_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst)| blur_line(src.row(y), dst, radius));
    out
}

#[cfg(not(feature = "parallel"))]
fn blur_rows(src: &ImageF32, radius: usize) -> ImageF32 {
    let mut out = ImageF32::new(src.w, src.h);
    let w = src.w;
    out.pixels_mut()
        .chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst)| blur_line(src.row(y), dst, radius));
    out
}

fn blur_line(src: &[f32], dst: &mut [f32], radius: usize) {
    let n = src.len();
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0f64);
    let mut acc = 0.0f64;
    for &v in src {
        acc += v as f64;
        prefix.push(acc);
    }
    for (x, out) in dst.iter_mut().enumerate() {
        let lo = x.saturating_sub(radius);
        let hi = (x + radius).min(n - 1);
        let sum = prefix[hi + 1] - prefix[lo];
        *out = (sum / (hi - lo + 1) as f64) as f32;
    }
}

fn transpose(src: &ImageF32) -> ImageF32 {
    let mut out = ImageF32::new(src.h, src.w);
    for y in 0..src.h {
        for (x, &v) in src.row(y).iter().enumerate() {
            out.set(y, x, v);
        }
    }
    out
}
