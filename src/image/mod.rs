pub mod f32;
pub mod io;
pub mod mask;
pub mod rgb;
pub mod traits;

pub use self::f32::{DepthMap, IlluminationMap, ImageF32};
pub use self::mask::{BinaryMask, MASK_OFF, MASK_ON};
pub use self::rgb::{Rgb8, RgbImageU8};
pub use self::traits::{ImageView, ImageViewMut, Rows};
