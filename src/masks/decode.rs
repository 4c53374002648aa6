//! Decode raw segment payloads into dense binary masks.
use crate::image::{BinaryMask, MASK_OFF, MASK_ON};
use crate::types::SegmentMask;

/// Reasons a segment payload is unusable. The builder logs these and skips
/// the segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeIssue {
    Length { expected: usize, got: usize },
    Size {
        expected: (usize, usize),
        got: (usize, usize),
    },
    Undecodable(String),
}

impl std::fmt::Display for DecodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeIssue::Length { expected, got } => {
                write!(f, "expected {expected} bytes, got {got}")
            }
            DecodeIssue::Size { expected, got } => {
                write!(f, "expected {expected:?} pixels, got {got:?}")
            }
            DecodeIssue::Undecodable(msg) => write!(f, "undecodable image: {msg}"),
        }
    }
}

/// Threshold a segment payload at `threshold` (strictly greater = on).
///
/// The payload must already be at the target resolution.
pub fn decode_segment_mask(
    mask: &SegmentMask,
    width: usize,
    height: usize,
    threshold: u8,
) -> Result<BinaryMask, DecodeIssue> {
    let on = |v: u8| if v > threshold { MASK_ON } else { MASK_OFF };
    match mask {
        SegmentMask::Intensity {
            width: mw,
            height: mh,
            data,
        } => {
            check_size((*mw, *mh), (width, height))?;
            check_len(data.len(), width * height)?;
            Ok(BinaryMask {
                w: width,
                h: height,
                data: data.iter().map(|&v| on(v)).collect(),
            })
        }
        SegmentMask::Rgba {
            width: mw,
            height: mh,
            data,
        } => {
            check_size((*mw, *mh), (width, height))?;
            check_len(data.len(), width * height * 4)?;
            Ok(BinaryMask {
                w: width,
                h: height,
                data: data.chunks_exact(4).map(|px| on(px[3])).collect(),
            })
        }
        SegmentMask::Encoded { bytes } => {
            let img = image::load_from_memory(bytes)
                .map_err(|e| DecodeIssue::Undecodable(e.to_string()))?;
            let size = (img.width() as usize, img.height() as usize);
            check_size(size, (width, height))?;
            // Alpha is the mask only when it is not uniformly opaque.
            let rgba = img.color().has_alpha().then(|| img.to_rgba8());
            let data = match rgba {
                Some(rgba) if rgba.pixels().any(|px| px.0[3] < u8::MAX) => {
                    rgba.pixels().map(|px| on(px.0[3])).collect()
                }
                _ => img.into_luma8().pixels().map(|px| on(px.0[0])).collect(),
            };
            Ok(BinaryMask {
                w: width,
                h: height,
                data,
            })
        }
    }
}

fn check_size(got: (usize, usize), expected: (usize, usize)) -> Result<(), DecodeIssue> {
    if got == expected {
        Ok(())
    } else {
        Err(DecodeIssue::Size { expected, got })
    }
}

fn check_len(got: usize, expected: usize) -> Result<(), DecodeIssue> {
    if got == expected {
        Ok(())
    } else {
        Err(DecodeIssue::Length { expected, got })
    }
}
