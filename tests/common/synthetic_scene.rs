use floor_compositor::image::{DepthMap, RgbImageU8};
use floor_compositor::types::{SegmentMask, SegmentationResult};

pub const WALL: [u8; 3] = [205, 200, 190];
pub const BOX: [u8; 3] = [70, 45, 30];

/// Synthetic room: wall above `horizon`, floor below with depth
/// `z = z0 - slope * y`, a box labelled "sofa", and a small object on the
/// floor that is only visible in depth (mislabelled as floor).
pub struct SyntheticRoom {
    pub w: usize,
    pub h: usize,
    pub horizon: usize,
    pub z0: f32,
    pub slope: f32,
    /// Box rectangle `[x0, y0, x1, y1)`.
    pub furniture: [usize; 4],
    /// Depth-only obstacle `[x0, y0, x1, y1)`.
    pub obstacle: [usize; 4],
}

impl Default for SyntheticRoom {
    fn default() -> Self {
        Self {
            w: 96,
            h: 72,
            horizon: 24,
            z0: 6.0,
            slope: 0.03,
            furniture: [40, 44, 56, 60],
            obstacle: [72, 50, 76, 54],
        }
    }
}

fn inside(r: [usize; 4], x: usize, y: usize) -> bool {
    x >= r[0] && x < r[2] && y >= r[1] && y < r[3]
}

impl SyntheticRoom {
    pub fn floor_depth(&self, y: usize) -> f32 {
        self.z0 - self.slope * y as f32
    }

    pub fn is_floor(&self, x: usize, y: usize) -> bool {
        y >= self.horizon && !inside(self.furniture, x, y)
    }

    pub fn in_furniture(&self, x: usize, y: usize) -> bool {
        inside(self.furniture, x, y)
    }

    pub fn in_obstacle(&self, x: usize, y: usize) -> bool {
        inside(self.obstacle, x, y)
    }

    pub fn photo(&self) -> RgbImageU8 {
        let mut img = RgbImageU8::filled(self.w, self.h, WALL);
        for y in self.horizon..self.h {
            // Brighter towards the window on the left.
            for x in 0..self.w {
                let v = (150 - (x * 60 / self.w)) as u8;
                img.set(x, y, [v, v - 20, v - 45]);
            }
        }
        for y in 0..self.h {
            for x in 0..self.w {
                if self.in_furniture(x, y) {
                    img.set(x, y, BOX);
                }
            }
        }
        img
    }

    /// Distance-convention depth (larger = farther).
    pub fn depth(&self) -> DepthMap {
        let mut depth = DepthMap::filled(self.w, self.h, self.z0 + 4.0);
        for y in self.horizon..self.h {
            for x in 0..self.w {
                let mut z = self.floor_depth(y);
                if self.in_furniture(x, y) {
                    z -= 1.0;
                } else if self.in_obstacle(x, y) {
                    z -= 0.8;
                }
                depth.set(x, y, z);
            }
        }
        depth
    }

    /// The same depth as a disparity-style map (larger = nearer).
    pub fn disparity(&self) -> DepthMap {
        let mut d = self.depth();
        for v in &mut d.data {
            *v = 20.0 - *v;
        }
        d
    }

    pub fn segments(&self) -> Vec<SegmentationResult> {
        vec![
            self.segment("wall", |x, y| y < self.horizon && x < self.w),
            self.segment("floor", |x, y| self.is_floor(x, y)),
            self.segment("sofa", |x, y| self.in_furniture(x, y)),
        ]
    }

    pub fn segment(&self, label: &str, on: impl Fn(usize, usize) -> bool) -> SegmentationResult {
        let mut data = vec![0u8; self.w * self.h];
        for y in 0..self.h {
            for x in 0..self.w {
                if on(x, y) {
                    data[y * self.w + x] = 255;
                }
            }
        }
        SegmentationResult {
            label: label.to_string(),
            score: 0.9,
            mask: SegmentMask::Intensity {
                width: self.w,
                height: self.h,
                data,
            },
        }
    }
}
