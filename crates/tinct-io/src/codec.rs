use tinct_image::{FileFormat, Image, ImageError, ImageSize, PixelBuffer, PixelFormat};
use tinct_pixel::{Component, GrayAlpha, Pixel, Precision};

use crate::error::IoError;

/// How the pixel format of a decoded image is chosen from the format of the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadConversion {
    /// Keep the layout and bit depth of the file.
    #[default]
    ClosestMatch,
    /// Keep the layout, use 8-bit components.
    EightBit,
    /// Keep the layout, use 16-bit components.
    SixteenBit,
    /// Keep the layout, use floating point components.
    Float,
    /// Gray and alpha at the bit depth of the file.
    Grayscale,
    /// RGBA at the bit depth of the file.
    Rgba,
    /// A fixed pixel format regardless of the file.
    Format(PixelFormat),
}

impl ReadConversion {
    /// The pixel format an image decoded from a file of `file_format` is stored in.
    pub fn pixel_format(self, file_format: FileFormat) -> PixelFormat {
        let closest = file_format.pixel_format();
        match self {
            Self::ClosestMatch => closest,
            Self::EightBit => closest.with_precision(Precision::Eight),
            Self::SixteenBit => closest.with_precision(Precision::Sixteen),
            Self::Float => closest.with_precision(Precision::Float),
            Self::Grayscale => closest.to_grayscale(),
            Self::Rgba => closest.to_rgba(),
            Self::Format(format) => format,
        }
    }
}

impl From<PixelFormat> for ReadConversion {
    fn from(format: PixelFormat) -> Self {
        Self::Format(format)
    }
}

/// How the format of an encoded file is chosen for an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteConversion {
    /// The file format that stores the image's pixel format with the least loss.
    #[default]
    ClosestMatch,
    /// The format of the file the image was read from.
    ///
    /// Images that were not read from a file use [`WriteConversion::ClosestMatch`].
    OriginalFileFormat,
    /// A fixed file format.
    Format(FileFormat),
}

impl WriteConversion {
    /// The file format `image` is encoded to.
    pub fn file_format(self, image: &Image) -> FileFormat {
        let closest = FileFormat::closest_to(image.pixel_format());
        match self {
            Self::ClosestMatch => closest,
            Self::OriginalFileFormat => image.original_file_format().unwrap_or_else(|| {
                log::warn!("image has no original file format, writing {closest:?}");
                closest
            }),
            Self::Format(format) => format,
        }
    }
}

impl From<FileFormat> for WriteConversion {
    fn from(format: FileFormat) -> Self {
        Self::Format(format)
    }
}

/// The channels stored per pixel in a raw image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelLayout {
    /// A gray value.
    Gray,
    /// A gray value followed by alpha.
    GrayAlpha,
    /// Red, green and blue.
    Rgb,
    /// Red, green, blue and alpha.
    Rgba,
}

impl ChannelLayout {
    /// Builds a layout from whether it is gray and whether it has alpha.
    pub fn from_parts(grayscale: bool, alpha: bool) -> Self {
        match (grayscale, alpha) {
            (true, false) => Self::Gray,
            (true, true) => Self::GrayAlpha,
            (false, false) => Self::Rgb,
            (false, true) => Self::Rgba,
        }
    }

    /// The number of samples per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::GrayAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Whether the layout carries a single gray value.
    pub fn is_grayscale(self) -> bool {
        matches!(self, Self::Gray | Self::GrayAlpha)
    }

    /// Whether the layout carries an alpha sample.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::GrayAlpha | Self::Rgba)
    }
}

/// Uncompressed pixel rows exchanged with a container codec.
///
/// Rows are stored top to bottom without padding. Samples are 8 or 16 bits wide; 16-bit
/// samples are big-endian.
#[derive(Clone, Debug, PartialEq)]
pub struct RawImage {
    /// The image size in pixels.
    pub size: ImageSize,
    /// Bits per sample, 8 or 16.
    pub bit_depth: u8,
    /// The samples stored per pixel.
    pub layout: ChannelLayout,
    /// The packed rows.
    pub data: Vec<u8>,
}

impl RawImage {
    /// The file format the raw image corresponds to.
    pub fn file_format(&self) -> FileFormat {
        FileFormat::from_parts(self.layout.is_grayscale(), self.bit_depth)
    }

    fn bytes_per_sample(&self) -> usize {
        if self.bit_depth > 8 {
            2
        } else {
            1
        }
    }

    /// Encodes an image into rows of the given file format.
    ///
    /// Gray file formats store the perceptual gray of color images. The alpha channel is
    /// left out when every pixel of the image is opaque.
    ///
    /// # Arguments
    ///
    /// * `image` - The image to encode.
    /// * `file_format` - The layout and bit depth of the rows.
    pub fn from_image(image: &Image, file_format: FileFormat) -> Self {
        let layout =
            ChannelLayout::from_parts(file_format.is_grayscale(), !image.all_pixels_opaque());
        let mut raw = Self {
            size: image.size(),
            bit_depth: file_format.bit_depth(),
            layout,
            data: Vec::new(),
        };
        log::debug!(
            "encoding {} {} image as {}-bit {:?}",
            raw.size,
            image.pixel_format(),
            raw.bit_depth,
            layout
        );
        if let Some(buffer) = image.buffer() {
            raw.data = match raw.bit_depth {
                16 => encode_samples::<u16>(buffer, layout, |v, out| {
                    out.extend_from_slice(&v.to_be_bytes())
                }),
                _ => encode_samples::<u8>(buffer, layout, |v, out| out.push(v)),
            };
        }
        raw
    }

    /// Builds an image from the rows.
    ///
    /// The image records the file format of the rows as its original file format.
    ///
    /// # Arguments
    ///
    /// * `conversion` - Selects the pixel format of the image.
    ///
    /// # Errors
    ///
    /// Fails when the data length does not match the size, layout and bit depth.
    pub fn to_image(&self, conversion: ReadConversion) -> Result<Image, IoError> {
        let expected = self.size.area() * self.layout.channels() * self.bytes_per_sample();
        if self.data.len() != expected {
            return Err(ImageError::InvalidDataLength(self.data.len(), expected).into());
        }

        let file_format = self.file_format();
        let format = conversion.pixel_format(file_format);
        log::debug!(
            "decoding {} {}-bit {:?} rows as {}",
            self.size,
            self.bit_depth,
            self.layout,
            format
        );

        let mut image = Image::with_format(self.size, format);
        if let Some(buffer) = image.buffer_mut() {
            match self.bytes_per_sample() {
                2 => self.decode_samples(buffer, |s| u16::from_be_bytes([s[0], s[1]])),
                _ => self.decode_samples(buffer, |s| s[0]),
            }
        }
        image.set_original_file_format(Some(file_format));
        Ok(image)
    }

    fn decode_samples<T: Component>(
        &self,
        buffer: &mut PixelBuffer,
        sample: impl Fn(&[u8]) -> T,
    ) {
        let bytes = self.bytes_per_sample();
        let stride = self.layout.channels() * bytes;
        for (index, chunk) in self.data.chunks_exact(stride).enumerate() {
            let s = |channel: usize| sample(&chunk[channel * bytes..]);
            match self.layout {
                ChannelLayout::Gray => buffer.set_gray(index, GrayAlpha::new(s(0), T::MAX)),
                ChannelLayout::GrayAlpha => buffer.set_gray(index, GrayAlpha::new(s(0), s(1))),
                ChannelLayout::Rgb => buffer.set(index, Pixel::rgb(s(0), s(1), s(2))),
                ChannelLayout::Rgba => buffer.set(index, Pixel::new(s(0), s(1), s(2), s(3))),
            }
        }
    }
}

fn encode_samples<T: Component>(
    buffer: &PixelBuffer,
    layout: ChannelLayout,
    push: impl Fn(T, &mut Vec<u8>),
) -> Vec<u8> {
    let bytes = if T::PRECISION == Precision::Sixteen { 2 } else { 1 };
    let mut data = Vec::with_capacity(buffer.len() * layout.channels() * bytes);
    for index in 0..buffer.len() {
        if layout.is_grayscale() {
            let gray = buffer.get_gray::<T>(index);
            push(gray.v, &mut data);
            if layout.has_alpha() {
                push(gray.a, &mut data);
            }
        } else {
            let p = buffer.get::<T>(index);
            push(p.r, &mut data);
            push(p.g, &mut data);
            push(p.b, &mut data);
            if layout.has_alpha() {
                push(p.a, &mut data);
            }
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::{ChannelLayout, RawImage, ReadConversion, WriteConversion};
    use crate::error::IoError;
    use tinct_image::{FileFormat, Image, ImageError, ImageSize, PixelFormat};
    use tinct_pixel::{Pixel16, Pixel8};

    #[test]
    fn read_conversion_table() {
        use FileFormat::*;
        use ReadConversion::*;

        #[rustfmt::skip]
        let table = [
            (ClosestMatch, [PixelFormat::Ga8, PixelFormat::Ga16, PixelFormat::Rgba8, PixelFormat::Rgba16]),
            (EightBit, [PixelFormat::Ga8, PixelFormat::Ga8, PixelFormat::Rgba8, PixelFormat::Rgba8]),
            (SixteenBit, [PixelFormat::Ga16, PixelFormat::Ga16, PixelFormat::Rgba16, PixelFormat::Rgba16]),
            (Float, [PixelFormat::GaF, PixelFormat::GaF, PixelFormat::RgbaF, PixelFormat::RgbaF]),
            (Grayscale, [PixelFormat::Ga8, PixelFormat::Ga16, PixelFormat::Ga8, PixelFormat::Ga16]),
            (Rgba, [PixelFormat::Rgba8, PixelFormat::Rgba16, PixelFormat::Rgba8, PixelFormat::Rgba16]),
        ];
        for (conversion, expected) in table {
            for (file_format, format) in [Ga8, Ga16, Rgba8, Rgba16].into_iter().zip(expected) {
                assert_eq!(conversion.pixel_format(file_format), format);
            }
        }
        assert_eq!(
            ReadConversion::from(PixelFormat::GaF).pixel_format(Rgba16),
            PixelFormat::GaF
        );
    }

    #[test]
    fn write_conversion() {
        let size = ImageSize {
            width: 1,
            height: 1,
        };
        let mut image = Image::with_format(size, PixelFormat::RgbaF);
        assert_eq!(WriteConversion::ClosestMatch.file_format(&image), FileFormat::Rgba16);
        assert_eq!(
            WriteConversion::OriginalFileFormat.file_format(&image),
            FileFormat::Rgba16
        );
        image.set_original_file_format(Some(FileFormat::Ga8));
        assert_eq!(
            WriteConversion::OriginalFileFormat.file_format(&image),
            FileFormat::Ga8
        );
        assert_eq!(
            WriteConversion::from(FileFormat::Ga16).file_format(&image),
            FileFormat::Ga16
        );
    }

    #[test]
    fn decode_rows() -> Result<(), IoError> {
        let raw = RawImage {
            size: ImageSize {
                width: 2,
                height: 1,
            },
            bit_depth: 16,
            layout: ChannelLayout::Rgb,
            data: vec![0x12, 0x34, 0x00, 0x01, 0xff, 0xff, 0x00, 0x00, 0x80, 0x00, 0x00, 0xff],
        };
        let image = raw.to_image(ReadConversion::ClosestMatch)?;
        assert_eq!(image.pixel_format(), PixelFormat::Rgba16);
        assert_eq!(image.original_file_format(), Some(FileFormat::Rgba16));
        assert_eq!(image.pixel::<u16>(0, 0), Pixel16::new(0x1234, 1, 0xffff, 0xffff));
        assert_eq!(image.pixel::<u16>(1, 0), Pixel16::new(0, 0x8000, 0xff, 0xffff));

        let raw = RawImage {
            size: ImageSize {
                width: 3,
                height: 1,
            },
            bit_depth: 8,
            layout: ChannelLayout::GrayAlpha,
            data: vec![0, 255, 100, 50, 255, 0],
        };
        let image = raw.to_image(ReadConversion::Rgba)?;
        assert_eq!(image.pixel_format(), PixelFormat::Rgba8);
        assert_eq!(image.original_file_format(), Some(FileFormat::Ga8));
        assert_eq!(image.pixel::<u8>(1, 0), Pixel8::new(100, 100, 100, 50));
        assert_eq!(image.pixel::<u8>(2, 0), Pixel8::new(255, 255, 255, 0));
        Ok(())
    }

    #[test]
    fn decode_rejects_bad_length() {
        let raw = RawImage {
            size: ImageSize {
                width: 2,
                height: 2,
            },
            bit_depth: 8,
            layout: ChannelLayout::Rgba,
            data: vec![0; 15],
        };
        let err = raw.to_image(ReadConversion::ClosestMatch);
        assert!(matches!(
            err,
            Err(IoError::ImageCreationError(ImageError::InvalidDataLength(15, 16)))
        ));
    }

    #[test]
    fn encode_rows() {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let mut image = Image::new(size, Pixel8::new(10, 20, 30, 255), PixelFormat::Rgba8);
        let raw = RawImage::from_image(&image, FileFormat::Rgba8);
        assert_eq!(raw.layout, ChannelLayout::Rgb);
        assert_eq!(raw.data, vec![10, 20, 30, 10, 20, 30]);

        image.set_pixel(1, 0, Pixel8::new(1, 2, 3, 4));
        let raw = RawImage::from_image(&image, FileFormat::Rgba16);
        assert_eq!(raw.layout, ChannelLayout::Rgba);
        assert_eq!(raw.bit_depth, 16);
        assert_eq!(
            raw.data,
            vec![10, 10, 20, 20, 30, 30, 255, 255, 1, 1, 2, 2, 3, 3, 4, 4]
        );

        let gray = Image::new(size, Pixel8::gray(77), PixelFormat::Ga8);
        let raw = RawImage::from_image(&gray, FileFormat::Ga16);
        assert_eq!(raw.layout, ChannelLayout::Gray);
        assert_eq!(raw.file_format(), FileFormat::Ga16);
        assert_eq!(raw.data, vec![77, 77, 77, 77]);

        let empty = RawImage::from_image(&Image::default(), FileFormat::Rgba8);
        assert!(empty.data.is_empty());
    }
}
