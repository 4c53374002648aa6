//! Tileable material textures with wrap-around bilinear sampling.
use crate::error::{CompositorError, Result};
use crate::image::{Rgb8, RgbImageU8};

/// A floor-covering material: an id plus a texture that spans one plank cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub id: String,
    pub texture: RgbImageU8,
}

impl Material {
    /// Wrap a texture; empty textures are rejected.
    pub fn from_image(id: impl Into<String>, texture: RgbImageU8) -> Result<Self> {
        if texture.w == 0 || texture.h == 0 || texture.data.is_empty() {
            return Err(CompositorError::EmptyMaterial);
        }
        Ok(Self {
            id: id.into(),
            texture,
        })
    }

    /// Decode an encoded texture (PNG, JPEG, …).
    pub fn from_encoded(id: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| CompositorError::Image(e.to_string()))?
            .into_rgb8();
        let (w, h) = (img.width() as usize, img.height() as usize);
        let texture = RgbImageU8::from_interleaved(w, h, img.as_raw())?;
        Self::from_image(id, texture)
    }

    /// Single-colour material (1×1 texture).
    pub fn solid(id: impl Into<String>, color: Rgb8) -> Self {
        Self {
            id: id.into(),
            texture: RgbImageU8::filled(1, 1, color),
        }
    }

    /// Bilinear sample at normalised texture coordinates; coordinates wrap.
    pub fn sample(&self, u: f32, v: f32) -> [f32; 3] {
        let tex = &self.texture;
        let (w, h) = (tex.w, tex.h);
        if w == 1 && h == 1 {
            return to_f32(tex.data[0]);
        }
        let fx = wrap_unit(u) * w as f32 - 0.5;
        let fy = wrap_unit(v) * h as f32 - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let xa = wrap_index(x0 as i64, w);
        let xb = wrap_index(x0 as i64 + 1, w);
        let ya = wrap_index(y0 as i64, h);
        let yb = wrap_index(y0 as i64 + 1, h);

        let p00 = to_f32(tex.get(xa, ya));
        let p10 = to_f32(tex.get(xb, ya));
        let p01 = to_f32(tex.get(xa, yb));
        let p11 = to_f32(tex.get(xb, yb));
        let mut out = [0.0f32; 3];
        for c in 0..3 {
            let top = p00[c] + (p10[c] - p00[c]) * tx;
            let bottom = p01[c] + (p11[c] - p01[c]) * tx;
            out[c] = top + (bottom - top) * ty;
        }
        out
    }
}

#[inline]
fn to_f32(px: Rgb8) -> [f32; 3] {
    [px[0] as f32, px[1] as f32, px[2] as f32]
}

#[inline]
fn wrap_unit(t: f32) -> f32 {
    if !t.is_finite() {
        return 0.0;
    }
    let f = t - t.floor();
    // `t - floor(t)` can round up to exactly 1.0 for tiny negative t.
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

#[inline]
fn wrap_index(i: i64, n: usize) -> usize {
    i.rem_euclid(n as i64) as usize
}
