use tinct_pixel::Precision;

use crate::error::ImageError;

/// The storage representation of an image.
///
/// A format combines a channel layout, gray+alpha or RGBA, with a component precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Gray and alpha, 8 bits per component.
    Ga8,
    /// Gray and alpha, 16 bits per component.
    Ga16,
    /// Gray and alpha, floating point components.
    GaF,
    /// Red, green, blue and alpha, 8 bits per component.
    #[default]
    Rgba8,
    /// Red, green, blue and alpha, 16 bits per component.
    Rgba16,
    /// Red, green, blue and alpha, floating point components.
    RgbaF,
}

impl PixelFormat {
    /// Builds a format from its layout and precision.
    pub fn from_parts(grayscale: bool, precision: Precision) -> Self {
        match (grayscale, precision) {
            (true, Precision::Eight) => Self::Ga8,
            (true, Precision::Sixteen) => Self::Ga16,
            (true, Precision::Float) => Self::GaF,
            (false, Precision::Eight) => Self::Rgba8,
            (false, Precision::Sixteen) => Self::Rgba16,
            (false, Precision::Float) => Self::RgbaF,
        }
    }

    /// The component precision of the format.
    pub fn precision(self) -> Precision {
        match self {
            Self::Ga8 | Self::Rgba8 => Precision::Eight,
            Self::Ga16 | Self::Rgba16 => Precision::Sixteen,
            Self::GaF | Self::RgbaF => Precision::Float,
        }
    }

    /// Whether the format stores gray and alpha only.
    pub fn is_grayscale(self) -> bool {
        matches!(self, Self::Ga8 | Self::Ga16 | Self::GaF)
    }

    /// Whether the format stores all four RGBA channels.
    pub fn is_rgba(self) -> bool {
        !self.is_grayscale()
    }

    /// The format with the same layout and another precision.
    pub fn with_precision(self, precision: Precision) -> Self {
        Self::from_parts(self.is_grayscale(), precision)
    }

    /// The gray+alpha format with the same precision.
    pub fn to_grayscale(self) -> Self {
        Self::from_parts(true, self.precision())
    }

    /// The RGBA format with the same precision.
    pub fn to_rgba(self) -> Self {
        Self::from_parts(false, self.precision())
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::Ga8 => "GA8",
            Self::Ga16 => "GA16",
            Self::GaF => "GAF",
            Self::Rgba8 => "RGBA8",
            Self::Rgba16 => "RGBA16",
            Self::RgbaF => "RGBAF",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for PixelFormat {
    type Err = ImageError;

    /// Parses the names printed by `Display`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GA8" => Ok(Self::Ga8),
            "GA16" => Ok(Self::Ga16),
            "GAF" => Ok(Self::GaF),
            "RGBA8" => Ok(Self::Rgba8),
            "RGBA16" => Ok(Self::Rgba16),
            "RGBAF" => Ok(Self::RgbaF),
            _ => Err(ImageError::UnknownPixelFormat(s.to_string())),
        }
    }
}

/// The pixel format of the container file an image was read from or is written to.
///
/// Files carry integer components only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Gray and alpha, 8 bits per component.
    Ga8,
    /// Gray and alpha, 16 bits per component.
    Ga16,
    /// Red, green, blue and alpha, 8 bits per component.
    Rgba8,
    /// Red, green, blue and alpha, 16 bits per component.
    Rgba16,
}

impl FileFormat {
    /// Builds a file format from its layout and bit depth.
    ///
    /// Bit depths above 8 map to the 16-bit formats.
    pub fn from_parts(grayscale: bool, bit_depth: u8) -> Self {
        match (grayscale, bit_depth > 8) {
            (true, false) => Self::Ga8,
            (true, true) => Self::Ga16,
            (false, false) => Self::Rgba8,
            (false, true) => Self::Rgba16,
        }
    }

    /// The file format that stores a pixel format with the least loss.
    ///
    /// Floating point formats map to their 16-bit counterparts.
    pub fn closest_to(format: PixelFormat) -> Self {
        match format {
            PixelFormat::Ga8 => Self::Ga8,
            PixelFormat::Ga16 | PixelFormat::GaF => Self::Ga16,
            PixelFormat::Rgba8 => Self::Rgba8,
            PixelFormat::Rgba16 | PixelFormat::RgbaF => Self::Rgba16,
        }
    }

    /// The pixel format holding this file format exactly.
    pub fn pixel_format(self) -> PixelFormat {
        match self {
            Self::Ga8 => PixelFormat::Ga8,
            Self::Ga16 => PixelFormat::Ga16,
            Self::Rgba8 => PixelFormat::Rgba8,
            Self::Rgba16 => PixelFormat::Rgba16,
        }
    }

    /// Whether the file stores gray and alpha only.
    pub fn is_grayscale(self) -> bool {
        matches!(self, Self::Ga8 | Self::Ga16)
    }

    /// Bits per component, 8 or 16.
    pub fn bit_depth(self) -> u8 {
        match self {
            Self::Ga8 | Self::Rgba8 => 8,
            Self::Ga16 | Self::Rgba16 => 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FileFormat, PixelFormat};
    use crate::error::ImageError;
    use tinct_pixel::Precision;

    #[test]
    fn pixel_format_parts() {
        for format in [
            PixelFormat::Ga8,
            PixelFormat::Ga16,
            PixelFormat::GaF,
            PixelFormat::Rgba8,
            PixelFormat::Rgba16,
            PixelFormat::RgbaF,
        ] {
            assert_eq!(
                PixelFormat::from_parts(format.is_grayscale(), format.precision()),
                format
            );
            assert_ne!(format.is_grayscale(), format.is_rgba());
        }
        assert_eq!(PixelFormat::Ga16.to_rgba(), PixelFormat::Rgba16);
        assert_eq!(PixelFormat::RgbaF.to_grayscale(), PixelFormat::GaF);
        assert_eq!(
            PixelFormat::Ga8.with_precision(Precision::Float),
            PixelFormat::GaF
        );
        assert_eq!(PixelFormat::default(), PixelFormat::Rgba8);
        assert_eq!(PixelFormat::GaF.to_string(), "GAF");
        assert_eq!("rgba16".parse::<PixelFormat>(), Ok(PixelFormat::Rgba16));
        assert_eq!(
            "rgb8".parse::<PixelFormat>(),
            Err(ImageError::UnknownPixelFormat("rgb8".to_string()))
        );
    }

    #[test]
    fn closest_file_format() {
        assert_eq!(FileFormat::closest_to(PixelFormat::Ga8), FileFormat::Ga8);
        assert_eq!(FileFormat::closest_to(PixelFormat::GaF), FileFormat::Ga16);
        assert_eq!(FileFormat::closest_to(PixelFormat::Rgba8), FileFormat::Rgba8);
        assert_eq!(FileFormat::closest_to(PixelFormat::RgbaF), FileFormat::Rgba16);
        assert_eq!(FileFormat::from_parts(true, 1), FileFormat::Ga8);
        assert_eq!(FileFormat::from_parts(false, 16), FileFormat::Rgba16);
        assert_eq!(FileFormat::Rgba16.pixel_format(), PixelFormat::Rgba16);
        assert_eq!(FileFormat::Ga16.bit_depth(), 16);
    }
}
