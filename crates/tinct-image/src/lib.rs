#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image module.
pub mod error;

/// Pixel storage formats and the formats of container files.
pub mod format;

/// Format-erased pixel storage.
pub mod buffer;

/// The image type: lifecycle, per-pixel access and format conversion.
pub mod image;

/// Blitting, line and rectangle drawing and canvas resizing.
pub mod draw;

/// Per-pixel transforms over whole images.
pub mod ops;

pub use crate::buffer::PixelBuffer;
pub use crate::draw::Rect;
pub use crate::error::ImageError;
pub use crate::format::{FileFormat, PixelFormat};
pub use crate::image::{Image, ImageSize};
