use tinct_pixel::{Component, Pixel};

use crate::image::Image;

impl Image {
    /// Applies `f` to every pixel in place.
    ///
    /// Pixels are handed to `f` in the precision `T` and stored back in the image's own
    /// format, so a gray image stays gray.
    ///
    /// # Examples
    ///
    /// ```
    /// use tinct_image::{Image, ImageSize, PixelFormat};
    /// use tinct_pixel::Pixel8;
    ///
    /// let size = ImageSize { width: 2, height: 1 };
    /// let mut image = Image::new(size, Pixel8::new(10, 20, 30, 255), PixelFormat::Rgba16);
    /// image.transform(|p: Pixel8| Pixel8::new(p.b, p.g, p.r, p.a));
    /// assert_eq!(image.pixel::<u8>(1, 0), Pixel8::new(30, 20, 10, 255));
    /// ```
    pub fn transform<T, F>(&mut self, f: F)
    where
        T: Component,
        F: FnMut(Pixel<T>) -> Pixel<T>,
    {
        if let Some(buffer) = self.buffer_mut() {
            buffer.map_pixels(f);
        }
    }

    /// Writes `f` applied to every pixel of this image into `dest`.
    ///
    /// `dest` is replaced by an image of the same size, pixel format and recorded file format
    /// as this one before the transform runs.
    pub fn transform_into<T, F>(&self, dest: &mut Image, f: F)
    where
        T: Component,
        F: FnMut(Pixel<T>) -> Pixel<T>,
    {
        *dest = self.clone();
        dest.transform(f);
    }

    /// Multiplies the color channels of every pixel by its alpha.
    pub fn premultiply_alpha(&mut self) {
        if let Some(buffer) = self.buffer_mut() {
            buffer.premultiply_alpha();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::format::{FileFormat, PixelFormat};
    use crate::image::{Image, ImageSize};
    use tinct_pixel::{Pixel, Pixel16, Pixel8, PixelF};

    const SIZE: ImageSize = ImageSize {
        width: 3,
        height: 2,
    };

    #[test]
    fn invert() {
        let mut image = Image::new(SIZE, Pixel8::new(10, 100, 250, 200), PixelFormat::Rgba8);
        image.transform(|p: Pixel8| Pixel8::new(255 - p.r, 255 - p.g, 255 - p.b, p.a));
        assert_eq!(image.pixel::<u8>(2, 1), Pixel8::new(245, 155, 5, 200));

        let mut float = Image::new(SIZE, PixelF::new(0.25, 0.5, 1.0, 1.0), PixelFormat::RgbaF);
        float.transform(|p: PixelF| 1.0 - p);
        let p = float.pixel::<f32>(0, 0);
        assert_eq!((p.r, p.g, p.b), (0.75, 0.5, 0.0));
    }

    #[test]
    fn transform_keeps_layout() {
        let mut image = Image::new(SIZE, Pixel8::gray(100), PixelFormat::Ga8);
        image.transform(|p: Pixel16| Pixel::new(p.r, 0, 0, p.a));
        assert_eq!(image.pixel_format(), PixelFormat::Ga8);
        // pure red reduces to its perceptual gray
        assert_eq!(image.gray::<u8>(1, 1).v, Pixel8::new(100, 0, 0, 255).to_gray_cie());

        let mut empty = Image::default();
        empty.transform(|p: Pixel8| p);
        assert!(empty.is_empty());
    }

    #[test]
    fn transform_into_resets_destination() {
        let mut src = Image::new(SIZE, Pixel16::new(1000, 2000, 3000, 65535), PixelFormat::Rgba16);
        src.set_original_file_format(Some(FileFormat::Rgba16));
        let mut dest = Image::new(
            ImageSize {
                width: 9,
                height: 9,
            },
            Pixel8::default(),
            PixelFormat::Ga8,
        );
        src.transform_into(&mut dest, |p: Pixel16| p * 2);
        assert_eq!(dest.size(), SIZE);
        assert_eq!(dest.pixel_format(), PixelFormat::Rgba16);
        assert_eq!(dest.original_file_format(), Some(FileFormat::Rgba16));
        assert_eq!(dest.pixel::<u16>(0, 0), Pixel16::new(2000, 4000, 6000, 65535));
        assert_eq!(src.pixel::<u16>(0, 0), Pixel16::new(1000, 2000, 3000, 65535));
    }

    #[test]
    fn premultiply() {
        let mut image = Image::new(SIZE, Pixel8::new(50, 60, 70, 64), PixelFormat::Rgba8);
        image.premultiply_alpha();
        assert_eq!(image.pixel::<u8>(1, 0), Pixel8::new(13, 15, 18, 64));

        let mut gray = Image::new(SIZE, Pixel8::gray(100), PixelFormat::Ga8);
        gray.fill(Pixel8::gray_alpha(100, 64));
        gray.premultiply_alpha();
        assert_eq!(gray.gray::<u8>(0, 0).v, 25);
    }
}
