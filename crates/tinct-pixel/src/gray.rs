use crate::color_space::{linear_to_srgb, srgb_to_linear};
use crate::component::Component;
use crate::pixel::Pixel;

impl<T: Component> Pixel<T> {
    /// The gray value of the pixel using the default weights `(30, 59, 11)`.
    pub fn to_gray(&self) -> T {
        self.to_gray_weighted(T::GRAY_WEIGHTS)
    }

    /// The weighted mean of the color channels.
    ///
    /// Integer results are rounded to nearest. Weights summing to zero give zero.
    ///
    /// # Arguments
    ///
    /// * `weights` - The red, green and blue weights.
    pub fn to_gray_weighted(&self, weights: [T::Scalar; 3]) -> T {
        T::weighted_gray([self.r, self.g, self.b], weights)
    }

    /// The perceptual gray value of the pixel.
    ///
    /// The color channels are linearized with the sRGB curve, reduced to CIE luminance
    /// and encoded back with the inverse curve.
    pub fn to_gray_cie(&self) -> T {
        let r = srgb_to_linear(self.r.to_f32());
        let g = srgb_to_linear(self.g.to_f32());
        let b = srgb_to_linear(self.b.to_f32());
        T::from_f32(linear_to_srgb(r * 0.2126 + g * 0.7152 + b * 0.0722))
    }

    /// The pixel with its color channels replaced by [`Pixel::to_gray`], alpha preserved.
    pub fn gray_pixel(&self) -> Self {
        Self::gray_alpha(self.to_gray(), self.a)
    }

    /// The pixel with its color channels replaced by [`Pixel::to_gray_cie`], alpha preserved.
    pub fn gray_cie_pixel(&self) -> Self {
        Self::gray_alpha(self.to_gray_cie(), self.a)
    }
}

/// A gray value with alpha, the storage pixel of the grayscale image formats.
///
/// Building one from a color [`Pixel`] stores the perceptual gray of the pixel. Reading it
/// back as a color pixel replicates the gray value into the three color channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrayAlpha<T> {
    /// The gray value.
    pub v: T,
    /// The alpha channel.
    pub a: T,
}

impl<T: Component> Default for GrayAlpha<T> {
    fn default() -> Self {
        Self::new(T::zero(), T::MAX)
    }
}

impl<T: Component> GrayAlpha<T> {
    /// Creates a gray value with alpha.
    pub const fn new(v: T, a: T) -> Self {
        Self { v, a }
    }

    /// The perceptual gray of a color pixel of any precision.
    pub fn from_pixel<U: Component>(pixel: Pixel<U>) -> Self {
        let gray = pixel.convert::<f32>().to_gray_cie();
        Self::new(T::from_f32(gray), pixel.a.cast())
    }

    /// The gray value replicated into a color pixel of the requested precision.
    pub fn to_pixel<U: Component>(self) -> Pixel<U> {
        Pixel::gray_alpha(self.v.cast(), self.a.cast())
    }

    /// Converts to another precision.
    pub fn convert<U: Component>(self) -> GrayAlpha<U> {
        GrayAlpha::new(self.v.cast(), self.a.cast())
    }

    /// Composites `src` over this value, treating the gray as a color channel.
    pub fn blended(self, src: Self) -> Self {
        let a = T::blend_alpha(self.a, src.a);
        Self::new(T::blend(self.v, self.a, src.v, src.a, a), a)
    }

    /// The gray value multiplied by alpha.
    pub fn premultiplied_alpha(self) -> Self {
        Self::new(T::premultiply(self.v, self.a), self.a)
    }

    /// Whether the alpha channel is at full opacity.
    pub fn is_opaque(&self) -> bool {
        self.a.is_opaque()
    }
}

impl<T: Component> From<GrayAlpha<T>> for Pixel<T> {
    fn from(gray: GrayAlpha<T>) -> Self {
        gray.to_pixel()
    }
}

#[cfg(test)]
mod tests {
    use super::GrayAlpha;
    use crate::pixel::{Pixel16, Pixel8, PixelF};
    use approx::assert_abs_diff_eq;

    #[test]
    fn weighted_gray() {
        assert_eq!(Pixel8::new(12, 34, 56, 255).to_gray(), 30);
        assert_eq!(Pixel8::new(34, 56, 78, 0).to_gray(), 52);
        assert_eq!(Pixel8::new(255, 0, 255, 255).to_gray(), 105);
        assert_eq!(Pixel8::new(10, 20, 30, 255).to_gray_weighted([1, 0, 0]), 10);
        assert_eq!(Pixel16::new(100, 200, 300, 1).to_gray_weighted([1, 1, 1]), 200);
        assert_eq!(
            Pixel8::new(255, 0, 255, 40).gray_pixel(),
            Pixel8::new(105, 105, 105, 40)
        );
        assert_abs_diff_eq!(
            PixelF::new(1.0, 0.0, 1.0, 1.0).to_gray(),
            0.41,
            epsilon = 1e-6
        );
    }

    #[test]
    fn cie_gray() {
        assert_eq!(Pixel8::new(10, 50, 150, 255).to_gray_cie(), 60);
        assert_eq!(Pixel8::new(255, 0, 255, 255).to_gray_cie(), 145);
        assert_eq!(Pixel16::new(1000, 50000, 7000, 65535).to_gray_cie(), 43065);
        assert_abs_diff_eq!(
            PixelF::new(0.2, 0.4, 0.9, 1.0).to_gray_cie(),
            0.435237,
            epsilon = 1e-4
        );
        assert_eq!(
            Pixel8::new(255, 0, 255, 7).gray_cie_pixel(),
            Pixel8::new(145, 145, 145, 7)
        );
    }

    #[test]
    fn gray_alpha_from_pixel() {
        assert_eq!(
            GrayAlpha::<u8>::from_pixel(Pixel8::new(20, 120, 240, 210)),
            GrayAlpha::new(123, 210)
        );
        assert_eq!(
            GrayAlpha::<u16>::from_pixel(Pixel16::new(2000, 12000, 24000, 21000)),
            GrayAlpha::new(12110, 21000)
        );
        let gray = GrayAlpha::<f32>::from_pixel(PixelF::new(0.25, 0.5, 0.75, 0.125));
        assert_abs_diff_eq!(gray.v, 0.486, epsilon = 1e-3);
        assert_abs_diff_eq!(gray.a, 0.125);
        assert_eq!(
            GrayAlpha::<u8>::from_pixel(Pixel8::new(128, 167, 85, 98)),
            GrayAlpha::new(155, 98)
        );
    }

    #[test]
    fn gray_alpha_to_pixel() {
        let gray = GrayAlpha::<u8>::new(211, 215);
        assert_eq!(gray.to_pixel::<u8>(), Pixel8::new(211, 211, 211, 215));
        assert_eq!(
            gray.to_pixel::<u16>(),
            Pixel16::new(54227, 54227, 54227, 55255)
        );
        assert_eq!(Pixel8::from(gray), Pixel8::new(211, 211, 211, 215));
        assert_eq!(gray.convert::<u16>().convert::<u8>(), gray);
        assert_eq!(GrayAlpha::<u16>::default(), GrayAlpha::new(0, 65535));
    }

    #[test]
    fn gray_alpha_blend() {
        let dest = GrayAlpha::<u8>::new(211, 215);
        let src = GrayAlpha::<u8>::new(165, 60);
        assert_eq!(dest.blended(src), GrayAlpha::new(199, 224));
        assert_eq!(
            GrayAlpha::<u8>::new(100, 64).premultiplied_alpha(),
            GrayAlpha::new(25, 64)
        );
        assert!(GrayAlpha::<f32>::new(0.3, 1.0).is_opaque());
    }
}
