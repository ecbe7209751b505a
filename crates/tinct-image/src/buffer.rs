use tinct_pixel::{Component, GrayAlpha, Pixel, Precision};

use crate::format::PixelFormat;

/// A pixel type a [`PixelBuffer`] can hold natively.
///
/// Conversions into a gray representation store the perceptual gray of the pixel.
trait StoredPixel: Copy + Send + Sync + 'static {
    fn from_pixel<T: Component>(pixel: Pixel<T>) -> Self;
    fn to_pixel<T: Component>(self) -> Pixel<T>;
    fn to_gray<T: Component>(self) -> GrayAlpha<T>;
    fn from_stored<P: StoredPixel>(value: P) -> Self;
    fn blended(self, src: Self) -> Self;
    fn premultiplied_alpha(self) -> Self;
    fn is_opaque(&self) -> bool;
}

impl<C: Component> StoredPixel for Pixel<C> {
    fn from_pixel<T: Component>(pixel: Pixel<T>) -> Self {
        pixel.convert()
    }

    fn to_pixel<T: Component>(self) -> Pixel<T> {
        self.convert()
    }

    fn to_gray<T: Component>(self) -> GrayAlpha<T> {
        GrayAlpha::from_pixel(self)
    }

    fn from_stored<P: StoredPixel>(value: P) -> Self {
        value.to_pixel()
    }

    fn blended(self, src: Self) -> Self {
        Pixel::blended(self, src)
    }

    fn premultiplied_alpha(self) -> Self {
        Pixel::premultiplied_alpha(self)
    }

    fn is_opaque(&self) -> bool {
        Pixel::is_opaque(self)
    }
}

impl<C: Component> StoredPixel for GrayAlpha<C> {
    fn from_pixel<T: Component>(pixel: Pixel<T>) -> Self {
        GrayAlpha::from_pixel(pixel)
    }

    fn to_pixel<T: Component>(self) -> Pixel<T> {
        GrayAlpha::to_pixel(self)
    }

    fn to_gray<T: Component>(self) -> GrayAlpha<T> {
        self.convert()
    }

    fn from_stored<P: StoredPixel>(value: P) -> Self {
        value.to_gray()
    }

    fn blended(self, src: Self) -> Self {
        GrayAlpha::blended(self, src)
    }

    fn premultiplied_alpha(self) -> Self {
        GrayAlpha::premultiplied_alpha(self)
    }

    fn is_opaque(&self) -> bool {
        GrayAlpha::is_opaque(self)
    }
}

/// A flat array of pixels in one of the six storage representations.
///
/// Every accessor converts between the native representation and the precision requested by
/// the caller, so code using a buffer never needs to know which variant is active. Indices
/// past the end read as fully transparent black and are ignored on writes.
#[derive(Clone, Debug, PartialEq)]
pub enum PixelBuffer {
    /// Gray and alpha, 8 bits per component.
    Ga8(Vec<GrayAlpha<u8>>),
    /// Gray and alpha, 16 bits per component.
    Ga16(Vec<GrayAlpha<u16>>),
    /// Gray and alpha, floating point components.
    GaF(Vec<GrayAlpha<f32>>),
    /// RGBA, 8 bits per component.
    Rgba8(Vec<Pixel<u8>>),
    /// RGBA, 16 bits per component.
    Rgba16(Vec<Pixel<u16>>),
    /// RGBA, floating point components.
    RgbaF(Vec<Pixel<f32>>),
}

// runs `$body` with `$data` bound to the native pixel vector of whichever variant is active
macro_rules! dispatch {
    ($buffer:expr, $data:ident => $body:expr) => {
        match $buffer {
            PixelBuffer::Ga8($data) => $body,
            PixelBuffer::Ga16($data) => $body,
            PixelBuffer::GaF($data) => $body,
            PixelBuffer::Rgba8($data) => $body,
            PixelBuffer::Rgba16($data) => $body,
            PixelBuffer::RgbaF($data) => $body,
        }
    };
}

fn convert_all<P: StoredPixel, Q: StoredPixel>(data: &[P]) -> Vec<Q> {
    data.iter().map(|&p| Q::from_stored(p)).collect()
}

fn apply_run<P: StoredPixel>(
    data: &mut [P],
    start: usize,
    count: usize,
    step: usize,
    value: P,
    blend: bool,
) {
    for slot in data.iter_mut().skip(start).step_by(step.max(1)).take(count) {
        *slot = if blend { slot.blended(value) } else { value };
    }
}

impl PixelBuffer {
    /// Allocates a buffer of `len` pixels, all set to `fill`.
    ///
    /// # Arguments
    ///
    /// * `format` - The storage representation of the buffer.
    /// * `len` - The number of pixels.
    /// * `fill` - The initial value, converted into the storage representation.
    pub fn new<T: Component>(format: PixelFormat, len: usize, fill: Pixel<T>) -> Self {
        match format {
            PixelFormat::Ga8 => Self::Ga8(vec![StoredPixel::from_pixel(fill); len]),
            PixelFormat::Ga16 => Self::Ga16(vec![StoredPixel::from_pixel(fill); len]),
            PixelFormat::GaF => Self::GaF(vec![StoredPixel::from_pixel(fill); len]),
            PixelFormat::Rgba8 => Self::Rgba8(vec![StoredPixel::from_pixel(fill); len]),
            PixelFormat::Rgba16 => Self::Rgba16(vec![StoredPixel::from_pixel(fill); len]),
            PixelFormat::RgbaF => Self::RgbaF(vec![StoredPixel::from_pixel(fill); len]),
        }
    }

    /// Wraps a vector of RGBA pixels in the variant matching their precision.
    pub fn from_pixels<T: Component>(pixels: Vec<Pixel<T>>) -> Self {
        match T::PRECISION {
            Precision::Eight => Self::Rgba8(convert_all(&pixels)),
            Precision::Sixteen => Self::Rgba16(convert_all(&pixels)),
            Precision::Float => Self::RgbaF(convert_all(&pixels)),
        }
    }

    /// The storage representation of the buffer.
    pub fn format(&self) -> PixelFormat {
        match self {
            Self::Ga8(_) => PixelFormat::Ga8,
            Self::Ga16(_) => PixelFormat::Ga16,
            Self::GaF(_) => PixelFormat::GaF,
            Self::Rgba8(_) => PixelFormat::Rgba8,
            Self::Rgba16(_) => PixelFormat::Rgba16,
            Self::RgbaF(_) => PixelFormat::RgbaF,
        }
    }

    /// The number of pixels.
    pub fn len(&self) -> usize {
        dispatch!(self, data => data.len())
    }

    /// Whether the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The pixel at `index` in the requested precision.
    pub fn get<T: Component>(&self, index: usize) -> Pixel<T> {
        dispatch!(self, data => data
            .get(index)
            .map_or_else(Pixel::transparent, |&p| StoredPixel::to_pixel(p)))
    }

    /// The pixel at `index` as gray and alpha in the requested precision.
    pub fn get_gray<T: Component>(&self, index: usize) -> GrayAlpha<T> {
        dispatch!(self, data => data
            .get(index)
            .map_or_else(|| GrayAlpha::new(T::zero(), T::zero()), |&p| StoredPixel::to_gray(p)))
    }

    /// Stores a pixel of any precision at `index`.
    pub fn set<T: Component>(&mut self, index: usize, pixel: Pixel<T>) {
        self.store(index, pixel);
    }

    /// Stores a gray and alpha value of any precision at `index`.
    pub fn set_gray<T: Component>(&mut self, index: usize, gray: GrayAlpha<T>) {
        self.store(index, gray);
    }

    fn store<P: StoredPixel>(&mut self, index: usize, value: P) {
        dispatch!(self, data => {
            if let Some(slot) = data.get_mut(index) {
                *slot = StoredPixel::from_stored(value);
            }
        })
    }

    /// Sets every pixel to `pixel`.
    pub fn fill<T: Component>(&mut self, pixel: Pixel<T>) {
        let len = self.len();
        self.put_run(0, len, 1, pixel);
    }

    /// Assigns `pixel` to `count` pixels starting at `start`, advancing by `step`.
    pub fn put_run<T: Component>(
        &mut self,
        start: usize,
        count: usize,
        step: usize,
        pixel: Pixel<T>,
    ) {
        dispatch!(self, data => {
            apply_run(data, start, count, step, StoredPixel::from_pixel(pixel), false)
        })
    }

    /// Blends `pixel` over `count` pixels starting at `start`, advancing by `step`.
    ///
    /// The pixel is first converted into the native representation, so gray buffers blend
    /// gray values.
    pub fn blend_run<T: Component>(
        &mut self,
        start: usize,
        count: usize,
        step: usize,
        pixel: Pixel<T>,
    ) {
        dispatch!(self, data => {
            apply_run(data, start, count, step, StoredPixel::from_pixel(pixel), true)
        })
    }

    /// Copies or blends a contiguous run of pixels into another buffer.
    ///
    /// The run is clamped to the bounds of both buffers. Copying converts each source pixel
    /// directly into the destination representation. Blending reads both pixels as RGBA in
    /// the precision of the destination, composites the source over the destination and
    /// stores the result.
    ///
    /// # Arguments
    ///
    /// * `src_start` - The first source index.
    /// * `len` - The number of pixels in the run.
    /// * `dest` - The destination buffer, of any format.
    /// * `dest_start` - The first destination index.
    /// * `blend` - Whether to blend instead of overwrite.
    pub fn copy_pixel_range(
        &self,
        src_start: usize,
        len: usize,
        dest: &mut PixelBuffer,
        dest_start: usize,
        blend: bool,
    ) {
        let len = len
            .min(self.len().saturating_sub(src_start))
            .min(dest.len().saturating_sub(dest_start));
        if len == 0 {
            return;
        }
        if !blend {
            dispatch!(self, src => dest.store_all(dest_start, &src[src_start..src_start + len]));
            return;
        }
        match dest.format().precision() {
            Precision::Eight => self.blend_range_into::<u8>(src_start, len, dest, dest_start),
            Precision::Sixteen => self.blend_range_into::<u16>(src_start, len, dest, dest_start),
            Precision::Float => self.blend_range_into::<f32>(src_start, len, dest, dest_start),
        }
    }

    fn store_all<P: StoredPixel>(&mut self, start: usize, values: &[P]) {
        dispatch!(self, data => {
            for (slot, &value) in data.iter_mut().skip(start).zip(values) {
                *slot = StoredPixel::from_stored(value);
            }
        })
    }

    fn blend_range_into<T: Component>(
        &self,
        src_start: usize,
        len: usize,
        dest: &mut PixelBuffer,
        dest_start: usize,
    ) {
        for offset in 0..len {
            let src = self.get::<T>(src_start + offset);
            let blended = dest.get::<T>(dest_start + offset).blended(src);
            dest.set(dest_start + offset, blended);
        }
    }

    /// Whether every pixel has full opacity.
    pub fn all_pixels_opaque(&self) -> bool {
        dispatch!(self, data => data.iter().all(StoredPixel::is_opaque))
    }

    /// A copy of the buffer in another representation.
    pub fn converted(&self, format: PixelFormat) -> PixelBuffer {
        dispatch!(self, data => match format {
            PixelFormat::Ga8 => Self::Ga8(convert_all(data)),
            PixelFormat::Ga16 => Self::Ga16(convert_all(data)),
            PixelFormat::GaF => Self::GaF(convert_all(data)),
            PixelFormat::Rgba8 => Self::Rgba8(convert_all(data)),
            PixelFormat::Rgba16 => Self::Rgba16(convert_all(data)),
            PixelFormat::RgbaF => Self::RgbaF(convert_all(data)),
        })
    }

    /// Multiplies the color (or gray) channel of every pixel by its alpha.
    pub fn premultiply_alpha(&mut self) {
        dispatch!(self, data => {
            for p in data.iter_mut() {
                *p = StoredPixel::premultiplied_alpha(*p);
            }
        })
    }

    /// Replaces every pixel with `f` applied to it, in the requested precision.
    pub fn map_pixels<T, F>(&mut self, mut f: F)
    where
        T: Component,
        F: FnMut(Pixel<T>) -> Pixel<T>,
    {
        dispatch!(self, data => {
            for p in data.iter_mut() {
                *p = StoredPixel::from_pixel(f(StoredPixel::to_pixel(*p)));
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::PixelBuffer;
    use crate::format::PixelFormat;
    use tinct_pixel::{GrayAlpha, Pixel, Pixel16, Pixel8};

    const FORMATS: [PixelFormat; 6] = [
        PixelFormat::Ga8,
        PixelFormat::Ga16,
        PixelFormat::GaF,
        PixelFormat::Rgba8,
        PixelFormat::Rgba16,
        PixelFormat::RgbaF,
    ];

    #[test]
    fn new_and_format() {
        for format in FORMATS {
            let buffer = PixelBuffer::new(format, 6, Pixel8::new(10, 20, 30, 255));
            assert_eq!(buffer.format(), format);
            assert_eq!(buffer.len(), 6);
            assert!(!buffer.is_empty());
            assert!(buffer.all_pixels_opaque());
        }
        assert!(PixelBuffer::new(PixelFormat::Ga8, 0, Pixel8::default()).is_empty());
    }

    #[test]
    fn get_set_rgba() {
        let mut buffer = PixelBuffer::new(PixelFormat::Rgba8, 4, Pixel8::default());
        buffer.set(1, Pixel16::new(10000, 22000, 35000, 50000));
        assert_eq!(buffer.get::<u16>(1), Pixel16::new(10023, 21845, 34952, 50115));
        assert_eq!(buffer.get::<u8>(1), Pixel8::new(39, 85, 136, 195));
        assert_eq!(buffer.get::<u8>(4), Pixel8::transparent());
        buffer.set(4, Pixel8::new(1, 2, 3, 4));
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn get_set_gray() {
        let mut ga8 = PixelBuffer::new(PixelFormat::Ga8, 2, Pixel8::default());
        ga8.set(0, Pixel8::new(20, 120, 240, 210));
        assert_eq!(ga8.get::<u8>(0), Pixel8::new(123, 123, 123, 210));
        assert_eq!(ga8.get_gray::<u8>(0), GrayAlpha::new(123, 210));

        let mut ga16 = PixelBuffer::new(PixelFormat::Ga16, 2, Pixel8::default());
        ga16.set(1, Pixel16::new(2000, 12000, 24000, 21000));
        assert_eq!(ga16.get_gray::<u16>(1), GrayAlpha::new(12110, 21000));

        let mut rgba = PixelBuffer::new(PixelFormat::RgbaF, 1, Pixel8::default());
        rgba.set_gray(0, GrayAlpha::<u8>::new(51, 255));
        assert_eq!(rgba.get::<u8>(0), Pixel8::new(51, 51, 51, 255));
        assert_eq!(rgba.get::<f32>(0).a, 1.0);
        assert_eq!(rgba.get_gray::<u8>(7), GrayAlpha::new(0, 0));
    }

    #[test]
    fn copy_between_formats() {
        let src = PixelBuffer::new(PixelFormat::Rgba8, 4, Pixel8::new(128, 167, 85, 98));
        let mut dest = PixelBuffer::new(PixelFormat::Ga8, 6, Pixel8::default());
        src.copy_pixel_range(1, 10, &mut dest, 3, false);
        assert_eq!(dest.get::<u8>(2), Pixel8::new(0, 0, 0, 255));
        for i in 3..6 {
            assert_eq!(dest.get_gray::<u8>(i), GrayAlpha::new(155, 98));
        }
    }

    #[test]
    fn copy_blend_uses_dest_precision() {
        let src = PixelBuffer::new(PixelFormat::RgbaF, 2, Pixel8::new(177, 122, 21, 150));
        let mut dest = PixelBuffer::new(PixelFormat::Rgba8, 2, Pixel8::new(62, 150, 200, 220));
        src.copy_pixel_range(0, 2, &mut dest, 0, true);
        assert_eq!(dest.get::<u8>(0), Pixel8::new(133, 132, 88, 241));
        assert_eq!(dest.get::<u8>(1), Pixel8::new(133, 132, 88, 241));
    }

    #[test]
    fn runs() {
        let mut buffer = PixelBuffer::new(PixelFormat::Rgba8, 9, Pixel8::new(123, 234, 21, 190));
        buffer.blend_run(1, 3, 3, Pixel8::new(55, 66, 77, 110));
        assert_eq!(buffer.get::<u8>(1), Pixel8::new(88, 149, 49, 218));
        assert_eq!(buffer.get::<u8>(4), Pixel8::new(88, 149, 49, 218));
        assert_eq!(buffer.get::<u8>(7), Pixel8::new(88, 149, 49, 218));
        assert_eq!(buffer.get::<u8>(2), Pixel8::new(123, 234, 21, 190));

        buffer.put_run(0, 100, 1, Pixel8::new(1, 2, 3, 4));
        assert_eq!(buffer.get::<u8>(8), Pixel8::new(1, 2, 3, 4));
        assert!(!buffer.all_pixels_opaque());

        let mut ga = PixelBuffer::new(PixelFormat::Ga8, 2, Pixel8::new(120, 230, 210, 215));
        ga.blend_run(0, 1, 1, Pixel8::new(155, 166, 177, 60));
        assert_eq!(ga.get::<u8>(0), Pixel8::new(199, 199, 199, 224));
        assert_eq!(ga.get::<u8>(1), Pixel8::new(211, 211, 211, 215));
    }

    #[test]
    fn conversions() {
        let src = PixelBuffer::from_pixels(vec![Pixel8::new(128, 167, 85, 98); 3]);
        assert_eq!(src.format(), PixelFormat::Rgba8);
        for format in FORMATS {
            let converted = src.converted(format);
            assert_eq!(converted.format(), format);
            assert_eq!(converted.len(), 3);
        }
        assert_eq!(
            src.converted(PixelFormat::Ga8).get::<u8>(0),
            Pixel8::new(155, 155, 155, 98)
        );
        assert_eq!(
            src.converted(PixelFormat::Rgba16).converted(PixelFormat::Rgba8),
            src
        );
    }

    #[test]
    fn premultiply_and_map() {
        let mut buffer = PixelBuffer::new(PixelFormat::Rgba8, 2, Pixel8::new(50, 60, 70, 64));
        buffer.premultiply_alpha();
        assert_eq!(buffer.get::<u8>(1), Pixel8::new(13, 15, 18, 64));

        buffer.map_pixels(|p: Pixel<u8>| 255 - p);
        assert_eq!(buffer.get::<u8>(0), Pixel8::new(242, 240, 237, 64));

        let mut fill = PixelBuffer::new(PixelFormat::Ga16, 3, Pixel8::default());
        fill.fill(Pixel16::gray(1234));
        assert_eq!(fill.get_gray::<u16>(2).v, 1234);
    }
}
