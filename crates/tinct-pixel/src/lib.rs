#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Pixel component types and the per-component arithmetic shared by every pixel operation.
pub mod component;

/// The generic four channel pixel value and its operators.
pub mod pixel;

/// Alpha compositing, averaging, interpolation and premultiplication.
pub mod composite;

/// Grayscale reduction and the gray+alpha storage pixel.
pub mod gray;

/// Conversions between pixels and the HSV, HSL, XYZ, Yxy, CMY and CMYK color spaces.
pub mod color_space;

pub use crate::color_space::{Cmy, Cmyk, ColorSpace, Hsl, Hsv, Xyz, Yxy};
pub use crate::component::{Component, Precision};
pub use crate::composite::{average_of, InterpolationMode};
pub use crate::gray::GrayAlpha;
pub use crate::pixel::{Pixel, Pixel16, Pixel8, PixelF};
