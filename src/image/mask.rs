//! Owned binary mask stored as one byte per pixel (`0` or `255`).
use crate::error::Result;

/// Value stored for "on" pixels.
pub const MASK_ON: u8 = 255;
/// Value stored for "off" pixels.
pub const MASK_OFF: u8 = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    pub w: usize,
    pub h: usize,
    /// Row-major `{0, 255}` values, `w * h` bytes.
    pub data: Vec<u8>,
}

impl BinaryMask {
    /// All-off mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![MASK_OFF; w * h],
        }
    }

    /// All-on mask of size `w × h`.
    pub fn full(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![MASK_ON; w * h],
        }
    }

    /// Build a mask from a predicate evaluated at every `(x, y)`.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(w, h);
        for y in 0..h {
            for x in 0..w {
                if f(x, y) {
                    mask.data[y * w + x] = MASK_ON;
                }
            }
        }
        mask
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.data[self.idx(x, y)] != MASK_OFF
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        let i = self.idx(x, y);
        self.data[i] = if on { MASK_ON } else { MASK_OFF };
    }

    /// Blend weight in `[0, 1]` at `(x, y)`.
    #[inline]
    pub fn weight(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)] as f32 / MASK_ON as f32
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != MASK_OFF).count()
    }

    /// Fraction of pixels that are on; 0 for an empty grid.
    pub fn coverage(&self) -> f32 {
        if self.data.is_empty() {
            0.0
        } else {
            self.count() as f32 / self.data.len() as f32
        }
    }

    /// Per-pixel OR (max) of `other` into `self`. Dimensions must agree.
    pub fn union_with(&mut self, other: &BinaryMask) -> Result<()> {
        crate::error::ensure_dims("mask union", (self.w, self.h), (other.w, other.h))?;
        for (dst, &src) in self.data.iter_mut().zip(&other.data) {
            *dst = (*dst).max(src);
        }
        Ok(())
    }

    /// `self AND NOT other`. Dimensions must agree.
    pub fn subtract(&self, other: &BinaryMask) -> Result<BinaryMask> {
        crate::error::ensure_dims("mask subtract", (self.w, self.h), (other.w, other.h))?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| if a != MASK_OFF && b == MASK_OFF { MASK_ON } else { MASK_OFF })
            .collect();
        Ok(BinaryMask {
            w: self.w,
            h: self.h,
            data,
        })
    }

    /// True when every on-pixel of `self` is also on in `other`.
    pub fn is_subset_of(&self, other: &BinaryMask) -> bool {
        self.w == other.w
            && self.h == other.h
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| a == MASK_OFF || b != MASK_OFF)
    }
}

impl crate::image::traits::ImageView for BinaryMask {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl crate::image::traits::ImageViewMut for BinaryMask {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }

    #[inline]
    fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
