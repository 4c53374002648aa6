//! 4-connected component labelling by iterative flood fill.
//!
//! The visited set is a single `Vec<bool>` owned by the labelling pass; the
//! fill uses an explicit stack so large regions cannot overflow the call
//! stack.
use crate::image::{BinaryMask, MASK_ON};

/// Axis-aligned bounds and size of one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Component {
    /// Raster index of the first pixel reached by the scan.
    pub seed: usize,
    pub area: usize,
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

/// Label every 4-connected on-region. Returns the per-pixel label map
/// (`0` = background, `k + 1` = component `k`) and the component list in
/// raster-scan order of their seeds.
pub fn label_components(mask: &BinaryMask) -> (Vec<u32>, Vec<Component>) {
    let (w, h) = (mask.w, mask.h);
    let mut labels = vec![0u32; w * h];
    let mut visited = vec![false; w * h];
    let mut components = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for start in 0..w * h {
        if visited[start] || mask.data[start] == 0 {
            continue;
        }
        let label = components.len() as u32 + 1;
        let mut comp = Component {
            seed: start,
            area: 0,
            x0: start % w,
            y0: start / w,
            x1: start % w,
            y1: start / w,
        };
        visited[start] = true;
        stack.push(start);
        while let Some(idx) = stack.pop() {
            labels[idx] = label;
            let (x, y) = (idx % w, idx / w);
            comp.area += 1;
            comp.x0 = comp.x0.min(x);
            comp.x1 = comp.x1.max(x);
            comp.y0 = comp.y0.min(y);
            comp.y1 = comp.y1.max(y);

            let mut push = |n: usize| {
                if !visited[n] && mask.data[n] != 0 {
                    visited[n] = true;
                    stack.push(n);
                }
            };
            if x > 0 {
                push(idx - 1);
            }
            if x + 1 < w {
                push(idx + 1);
            }
            if y > 0 {
                push(idx - w);
            }
            if y + 1 < h {
                push(idx + w);
            }
        }
        components.push(comp);
    }
    (labels, components)
}

/// Keep only the largest 4-connected component (ties: first in raster order).
///
/// An all-off mask is returned unchanged.
pub fn largest_component(mask: &BinaryMask) -> BinaryMask {
    let (labels, components) = label_components(mask);
    let best = components
        .iter()
        .enumerate()
        .fold(None::<(usize, usize)>, |best, (i, c)| match best {
            Some((_, area)) if area >= c.area => best,
            _ => Some((i, c.area)),
        });
    let mut out = BinaryMask::new(mask.w, mask.h);
    if let Some((index, _)) = best {
        let keep = index as u32 + 1;
        for (dst, &l) in out.data.iter_mut().zip(&labels) {
            if l == keep {
                *dst = MASK_ON;
            }
        }
    }
    out
}
