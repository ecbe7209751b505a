use tinct_pixel::{Component, GrayAlpha, Pixel, Pixel8};

use crate::buffer::PixelBuffer;
use crate::error::ImageError;
use crate::format::{FileFormat, PixelFormat};

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use tinct_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// The number of pixels.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// An image owning its pixels in one of the [`PixelFormat`] representations.
///
/// An image is either empty, with zero size and no pixels, or allocated. Reading outside
/// the image yields fully transparent black and writing outside it does nothing, so every
/// operation is also valid on an empty image.
///
/// Cloning copies the pixels. [`Image::take`], [`Image::move_from`] and [`Image::swap`]
/// transfer them and leave the source empty or exchanged.
///
/// # Examples
///
/// ```
/// use tinct_image::{Image, ImageSize, PixelFormat};
/// use tinct_pixel::{Pixel16, Pixel8};
///
/// let mut image = Image::new(
///     ImageSize { width: 4, height: 3 },
///     Pixel8::new(10, 20, 30, 255),
///     PixelFormat::Rgba16,
/// );
/// image.set_pixel(1, 2, Pixel8::new(255, 0, 0, 128));
///
/// assert_eq!(image.pixel::<u16>(1, 2), Pixel16::new(65535, 0, 0, 32896));
/// assert_eq!(image.pixel::<u8>(4, 0), Pixel8::new(0, 0, 0, 0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Image {
    size: ImageSize,
    buffer: Option<PixelBuffer>,
    file_format: Option<FileFormat>,
}

impl Image {
    /// Creates an image filled with a pixel.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image. A zero width or height gives an empty image.
    /// * `fill` - The initial value of every pixel.
    /// * `format` - The storage representation.
    pub fn new<T: Component>(size: ImageSize, fill: Pixel<T>, format: PixelFormat) -> Self {
        if size.area() == 0 {
            return Self::default();
        }
        Self {
            size,
            buffer: Some(PixelBuffer::new(format, size.area(), fill)),
            file_format: None,
        }
    }

    /// Creates an image filled with opaque black.
    pub fn with_format(size: ImageSize, format: PixelFormat) -> Self {
        Self::new(size, Pixel8::default(), format)
    }

    /// Creates an RGBA image from row-major pixel data.
    ///
    /// The storage format is the RGBA format of the pixel precision.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    pub fn from_pixels<T: Component>(
        size: ImageSize,
        pixels: Vec<Pixel<T>>,
    ) -> Result<Self, ImageError> {
        if pixels.len() != size.area() {
            return Err(ImageError::InvalidDataLength(pixels.len(), size.area()));
        }
        if pixels.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self {
            size,
            buffer: Some(PixelBuffer::from_pixels(pixels)),
            file_format: None,
        })
    }

    /// Replaces the contents with a new image filled with a pixel.
    ///
    /// The recorded file format is cleared.
    pub fn new_image<T: Component>(
        &mut self,
        size: ImageSize,
        fill: Pixel<T>,
        format: PixelFormat,
    ) {
        *self = Self::new(size, fill, format);
    }

    /// The size of the image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Whether the image holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_none()
    }

    /// The storage representation, [`PixelFormat::Rgba8`] for an empty image.
    pub fn pixel_format(&self) -> PixelFormat {
        self.buffer
            .as_ref()
            .map_or_else(PixelFormat::default, PixelBuffer::format)
    }

    /// Whether the image stores gray and alpha only.
    pub fn is_grayscale_pixel_format(&self) -> bool {
        self.pixel_format().is_grayscale()
    }

    /// The format of the container file the image was read from, if any.
    pub fn original_file_format(&self) -> Option<FileFormat> {
        self.file_format
    }

    /// Records the format of the container file the image came from.
    pub fn set_original_file_format(&mut self, file_format: Option<FileFormat>) {
        self.file_format = file_format;
    }

    /// The pixel storage, `None` for an empty image.
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    /// The mutable pixel storage, `None` for an empty image.
    pub fn buffer_mut(&mut self) -> Option<&mut PixelBuffer> {
        self.buffer.as_mut()
    }

    pub(crate) fn index(&self, x: i64, y: i64) -> Option<usize> {
        let (width, height) = (self.size.width as i64, self.size.height as i64);
        if x < 0 || y < 0 || x >= width || y >= height {
            return None;
        }
        Some(y as usize * self.size.width + x as usize)
    }

    /// The pixel at `(x, y)` in the requested precision.
    ///
    /// Coordinates outside the image give fully transparent black.
    pub fn pixel<T: Component>(&self, x: i64, y: i64) -> Pixel<T> {
        match (self.buffer.as_ref(), self.index(x, y)) {
            (Some(buffer), Some(index)) => buffer.get(index),
            _ => Pixel::transparent(),
        }
    }

    /// The pixel at a row-major `index` in the requested precision.
    pub fn pixel_at<T: Component>(&self, index: usize) -> Pixel<T> {
        self.buffer
            .as_ref()
            .map_or_else(Pixel::transparent, |buffer| buffer.get(index))
    }

    /// The pixel at `(x, y)` as gray and alpha in the requested precision.
    pub fn gray<T: Component>(&self, x: i64, y: i64) -> GrayAlpha<T> {
        match (self.buffer.as_ref(), self.index(x, y)) {
            (Some(buffer), Some(index)) => buffer.get_gray(index),
            _ => GrayAlpha::new(T::zero(), T::zero()),
        }
    }

    /// Stores a pixel of any precision at `(x, y)`.
    pub fn set_pixel<T: Component>(&mut self, x: i64, y: i64, pixel: Pixel<T>) {
        if let (Some(index), Some(buffer)) = (self.index(x, y), self.buffer.as_mut()) {
            buffer.set(index, pixel);
        }
    }

    /// Stores a pixel of any precision at a row-major `index`.
    pub fn set_pixel_at<T: Component>(&mut self, index: usize, pixel: Pixel<T>) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.set(index, pixel);
        }
    }

    /// Stores a gray and alpha value at `(x, y)`.
    pub fn set_gray<T: Component>(&mut self, x: i64, y: i64, gray: GrayAlpha<T>) {
        if let (Some(index), Some(buffer)) = (self.index(x, y), self.buffer.as_mut()) {
            buffer.set_gray(index, gray);
        }
    }

    /// Blends a pixel over the pixel at `(x, y)`.
    pub fn draw_pixel<T: Component>(&mut self, x: i64, y: i64, pixel: Pixel<T>) {
        if let (Some(index), Some(buffer)) = (self.index(x, y), self.buffer.as_mut()) {
            buffer.blend_run(index, 1, 1, pixel);
        }
    }

    /// Sets every pixel to `pixel`.
    pub fn fill<T: Component>(&mut self, pixel: Pixel<T>) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.fill(pixel);
        }
    }

    /// Whether every pixel has full opacity. True for an empty image.
    pub fn all_pixels_opaque(&self) -> bool {
        self.buffer
            .as_ref()
            .map_or(true, PixelBuffer::all_pixels_opaque)
    }

    /// Converts the pixels to another storage representation in place.
    ///
    /// The recorded file format is kept.
    pub fn convert_to_pixel_format(&mut self, format: PixelFormat) {
        let Some(buffer) = self.buffer.as_ref() else {
            return;
        };
        if buffer.format() == format {
            return;
        }
        log::debug!("converting {} image from {} to {}", self.size, buffer.format(), format);
        self.buffer = Some(buffer.converted(format));
    }

    /// A copy of the image in another storage representation.
    pub fn converted(&self, format: PixelFormat) -> Image {
        Self {
            size: self.size,
            buffer: self.buffer.as_ref().map(|buffer| buffer.converted(format)),
            file_format: self.file_format,
        }
    }

    /// Moves the contents out, leaving this image empty.
    pub fn take(&mut self) -> Image {
        std::mem::take(self)
    }

    /// Moves the contents of `other` into this image, leaving `other` empty.
    pub fn move_from(&mut self, other: &mut Image) {
        *self = other.take();
    }

    /// Exchanges the contents of two images.
    pub fn swap(&mut self, other: &mut Image) {
        std::mem::swap(self, other);
    }
}
