//! Binary morphology with a square `(2r+1)×(2r+1)` structuring element.
//!
//! Both operators only consider neighbours that fall inside the image, so
//! `open(M) ⊆ M ⊆ close(M)` holds at the borders as well. The square element
//! is separable: each operator runs a horizontal pass into a scratch buffer
//! followed by a vertical pass, with the window clipped at the edges.
use crate::image::{BinaryMask, MASK_OFF, MASK_ON};

#[derive(Clone, Copy)]
enum Op {
    Erode,
    Dilate,
}

impl Op {
    #[inline]
    fn combine(self, acc: u8, v: u8) -> u8 {
        match self {
            Op::Erode => acc.min(v),
            Op::Dilate => acc.max(v),
        }
    }

    #[inline]
    fn identity(self) -> u8 {
        match self {
            Op::Erode => MASK_ON,
            Op::Dilate => MASK_OFF,
        }
    }
}

fn separable(mask: &BinaryMask, radius: usize, op: Op) -> BinaryMask {
    let (w, h) = (mask.w, mask.h);
    if radius == 0 || w == 0 || h == 0 {
        return mask.clone();
    }
    let mut horiz = vec![MASK_OFF; w * h];
    for y in 0..h {
        let row = &mask.data[y * w..(y + 1) * w];
        let out = &mut horiz[y * w..(y + 1) * w];
        for (x, dst) in out.iter_mut().enumerate() {
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius).min(w - 1);
            *dst = row[x0..=x1]
                .iter()
                .fold(op.identity(), |acc, &v| op.combine(acc, v));
        }
    }
    let mut out = BinaryMask::new(w, h);
    for y in 0..h {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius).min(h - 1);
        for x in 0..w {
            let mut acc = op.identity();
            for yy in y0..=y1 {
                acc = op.combine(acc, horiz[yy * w + x]);
            }
            out.data[y * w + x] = acc;
        }
    }
    out
}

/// Keep a pixel only if its whole in-bounds neighbourhood is on.
pub fn erode(mask: &BinaryMask, radius: usize) -> BinaryMask {
    separable(mask, radius, Op::Erode)
}

/// Turn a pixel on if any in-bounds neighbour is on.
pub fn dilate(mask: &BinaryMask, radius: usize) -> BinaryMask {
    separable(mask, radius, Op::Dilate)
}

/// Erode then dilate: removes features smaller than the element.
pub fn open(mask: &BinaryMask, radius: usize) -> BinaryMask {
    dilate(&erode(mask, radius), radius)
}

/// Dilate then erode: fills pinholes without growing the outline.
pub fn close(mask: &BinaryMask, radius: usize) -> BinaryMask {
    erode(&dilate(mask, radius), radius)
}

/// Flip pixels that share their value with none of their 8 neighbours.
///
/// Isolated on-pixels are cleared and isolated holes are filled; everything
/// else is left untouched. Pixels with no in-bounds neighbour are kept.
pub fn despeckle(mask: &BinaryMask) -> BinaryMask {
    let (w, h) = (mask.w, mask.h);
    let mut out = mask.clone();
    for y in 0..h {
        for x in 0..w {
            let v = mask.data[y * w + x];
            let mut neighbours = 0usize;
            let mut same = false;
            for yy in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                for xx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                    if xx == x && yy == y {
                        continue;
                    }
                    neighbours += 1;
                    if mask.data[yy * w + xx] == v {
                        same = true;
                    }
                }
            }
            if neighbours > 0 && !same {
                out.data[y * w + x] = if v == MASK_OFF { MASK_ON } else { MASK_OFF };
            }
        }
    }
    out
}
