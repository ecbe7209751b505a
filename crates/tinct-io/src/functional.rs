use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use tinct_image::Image;

use crate::codec::{RawImage, ReadConversion, WriteConversion};
use crate::error::IoError;
use crate::png::{decode_png, encode_png};

/// Reads a PNG image from a file.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
/// * `conversion` - Selects the pixel format of the image from the format of the file.
///
/// # Returns
///
/// The decoded image, recording the format of the file as its original file format.
///
/// # Example
///
/// ```no_run
/// use tinct_io::{functional as F, ReadConversion};
///
/// let image = F::read_image("dog.png", ReadConversion::ClosestMatch).unwrap();
/// println!("{} {}", image.size(), image.pixel_format());
/// ```
pub fn read_image(
    file_path: impl AsRef<Path>,
    conversion: impl Into<ReadConversion>,
) -> Result<Image, IoError> {
    let bytes = fs::read(file_path)?;
    read_image_from_bytes(&bytes, conversion)
}

/// Reads a PNG image from an in-memory stream.
///
/// # Arguments
///
/// * `bytes` - The whole PNG stream.
/// * `conversion` - Selects the pixel format of the image from the format of the stream.
pub fn read_image_from_bytes(
    bytes: &[u8],
    conversion: impl Into<ReadConversion>,
) -> Result<Image, IoError> {
    decode_png(bytes)?.to_image(conversion.into())
}

/// Writes an image to a PNG file.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file, created or truncated.
/// * `image` - The image to write.
/// * `conversion` - Selects the format of the file.
pub fn write_image(
    file_path: impl AsRef<Path>,
    image: &Image,
    conversion: impl Into<WriteConversion>,
) -> Result<(), IoError> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);
    write_image_to(&mut writer, image, conversion)?;
    writer.flush()?;
    Ok(())
}

/// Encodes an image to an in-memory PNG stream.
pub fn write_image_to_bytes(
    image: &Image,
    conversion: impl Into<WriteConversion>,
) -> Result<Vec<u8>, IoError> {
    let mut bytes = Vec::new();
    write_image_to(&mut bytes, image, conversion)?;
    Ok(bytes)
}

/// Encodes an image as a PNG stream into any writer.
///
/// # Arguments
///
/// * `writer` - The destination of the stream.
/// * `image` - The image to write.
/// * `conversion` - Selects the format of the stream.
pub fn write_image_to<W: Write>(
    writer: W,
    image: &Image,
    conversion: impl Into<WriteConversion>,
) -> Result<(), IoError> {
    let file_format = conversion.into().file_format(image);
    encode_png(writer, &RawImage::from_image(image, file_format))
}
