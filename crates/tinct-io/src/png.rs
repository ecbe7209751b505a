use std::io::Write;

use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};

use crate::codec::{ChannelLayout, RawImage};
use crate::error::IoError;
use tinct_image::ImageSize;

/// The eight bytes every PNG stream starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Whether `bytes` start with the PNG signature.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Decodes a PNG stream into raw rows.
///
/// Bit depths below 8 are expanded to 8 bits, palettes to RGB and transparency chunks to an
/// alpha channel, so the rows are always 8 or 16-bit gray, gray+alpha, RGB or RGBA.
///
/// # Arguments
///
/// * `bytes` - The whole PNG stream.
///
/// # Errors
///
/// Returns [`IoError::NotPng`] when the signature does not match and
/// [`IoError::PngDecodeError`] when the stream is malformed or unsupported.
pub fn decode_png(bytes: &[u8]) -> Result<RawImage, IoError> {
    if !is_png(bytes) {
        return Err(IoError::NotPng);
    }

    let mut decoder = Decoder::new(bytes);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let layout = match info.color_type {
        ColorType::Grayscale => ChannelLayout::Gray,
        ColorType::GrayscaleAlpha => ChannelLayout::GrayAlpha,
        ColorType::Rgb => ChannelLayout::Rgb,
        ColorType::Rgba => ChannelLayout::Rgba,
        ColorType::Indexed => {
            return Err(IoError::PngDecodeError(
                "indexed color was not expanded".to_string(),
            ))
        }
    };
    let bit_depth = match info.bit_depth {
        BitDepth::Sixteen => 16,
        _ => 8,
    };

    Ok(RawImage {
        size: ImageSize {
            width: info.width as usize,
            height: info.height as usize,
        },
        bit_depth,
        layout,
        data: buf,
    })
}

/// Encodes raw rows as a PNG stream.
///
/// # Arguments
///
/// * `writer` - The destination of the stream.
/// * `raw` - The rows to encode, 8 or 16 bits per sample.
///
/// # Errors
///
/// Returns [`IoError::PngEncodeError`] when the encoder rejects the rows or the writer fails.
pub fn encode_png<W: Write>(writer: W, raw: &RawImage) -> Result<(), IoError> {
    let mut encoder = Encoder::new(writer, raw.size.width as u32, raw.size.height as u32);
    encoder.set_color(match raw.layout {
        ChannelLayout::Gray => ColorType::Grayscale,
        ChannelLayout::GrayAlpha => ColorType::GrayscaleAlpha,
        ChannelLayout::Rgb => ColorType::Rgb,
        ChannelLayout::Rgba => ColorType::Rgba,
    });
    encoder.set_depth(if raw.bit_depth > 8 {
        BitDepth::Sixteen
    } else {
        BitDepth::Eight
    });

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodeError(e.to_string()))?;
    writer
        .write_image_data(&raw.data)
        .map_err(|e| IoError::PngEncodeError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::PngEncodeError(e.to_string()))?;
    Ok(())
}
