//! Error type shared by every pipeline stage.
//!
//! Grid-shaped inputs are validated up front: any width/height disagreement
//! between inputs of a single call is reported as
//! [`CompositorError::DimensionMismatch`] before a pixel is touched.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositorError {
    #[error("dimension mismatch for {what}: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("material texture is empty")]
    EmptyMaterial,
    #[error("image error: {0}")]
    Image(String),
}

pub type Result<T> = std::result::Result<T, CompositorError>;

/// Fail with `DimensionMismatch` unless `actual` equals `expected`.
#[inline]
pub fn ensure_dims(
    what: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CompositorError::DimensionMismatch {
            what,
            expected,
            actual,
        })
    }
}
