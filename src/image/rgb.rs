//! Owned 8-bit RGB image used for photos, material textures and output.
use crate::error::{CompositorError, Result};

pub type Rgb8 = [u8; 3];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImageU8 {
    pub w: usize,
    pub h: usize,
    /// Row-major pixels, `w * h` entries.
    pub data: Vec<Rgb8>,
}

impl RgbImageU8 {
    /// Image of size `w × h` filled with `color`.
    pub fn filled(w: usize, h: usize, color: Rgb8) -> Self {
        Self {
            w,
            h,
            data: vec![color; w * h],
        }
    }

    /// Wrap interleaved `RGBRGB…` bytes.
    pub fn from_interleaved(w: usize, h: usize, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != w * h * 3 {
            return Err(CompositorError::InvalidInput(format!(
                "rgb image {w}x{h} needs {} bytes, got {}",
                w * h * 3,
                bytes.len()
            )));
        }
        let data = bytes.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Ok(Self { w, h, data })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb8 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: Rgb8) {
        let i = y * self.w + x;
        self.data[i] = px;
    }
}

impl crate::image::traits::ImageView for RgbImageU8 {
    type Pixel = Rgb8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[Rgb8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl crate::image::traits::ImageViewMut for RgbImageU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Rgb8] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }

    #[inline]
    fn pixels_mut(&mut self) -> &mut [Rgb8] {
        &mut self.data
    }
}
