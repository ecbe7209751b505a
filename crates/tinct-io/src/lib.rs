#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access, signature mismatches and PNG
/// encoding/decoding failures.
pub mod error;

/// The raw row contract between images and container codecs.
///
/// Holds the read and write conversion tables that pick pixel and file formats.
pub mod codec;

/// PNG encoding and decoding.
pub mod png;

/// High-level image reading and writing functions.
///
/// See [`functional::read_image`] and [`functional::write_image`].
pub mod functional;

pub use crate::codec::{ChannelLayout, RawImage, ReadConversion, WriteConversion};
pub use crate::error::IoError;
