use crate::component::Component;
use crate::pixel::Pixel;

/// How [`Pixel::interpolated_with`] treats the alpha channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Color channels are weighted by their alpha before interpolating.
    #[default]
    AlphaAware,
    /// All four channels are interpolated independently.
    Raw,
}

impl<T: Component> Pixel<T> {
    /// Composites `src` over this pixel with the Porter-Duff "over" operator.
    ///
    /// # Arguments
    ///
    /// * `src` - The pixel drawn on top of `self`.
    ///
    /// # Returns
    ///
    /// The composited pixel. Its color is zero when the resulting alpha is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use tinct_pixel::Pixel8;
    ///
    /// let dest = Pixel8::new(0, 0, 0, 128);
    /// let src = Pixel8::new(255, 255, 255, 128);
    /// assert_eq!(dest.blended(src), Pixel8::new(170, 170, 170, 192));
    /// ```
    pub fn blended(self, src: Self) -> Self {
        let a = T::blend_alpha(self.a, src.a);
        Self::new(
            T::blend(self.r, self.a, src.r, src.a, a),
            T::blend(self.g, self.a, src.g, src.a, a),
            T::blend(self.b, self.a, src.b, src.a, a),
            a,
        )
    }

    /// Composites `src` over this pixel in place.
    pub fn blend(&mut self, src: Self) {
        *self = self.blended(src);
    }

    /// The alpha-weighted average of this pixel and `others`.
    ///
    /// Each color channel is weighted by its pixel's alpha and the resulting alpha is the
    /// plain mean of all alphas. If every alpha is zero the result is fully transparent black.
    pub fn averaged(self, others: &[Self]) -> Self {
        let samples = std::iter::once(self)
            .chain(others.iter().copied())
            .map(Self::to_array);
        Self::from_array(T::weighted_mean(samples))
    }

    /// Replaces this pixel with the average of itself and `others`.
    pub fn average(&mut self, others: &[Self]) {
        *self = self.averaged(others);
    }

    /// Alpha-aware interpolation towards `other`.
    ///
    /// `factor` is expressed in component units: `0` yields `self`, `T::MAX` yields `other`.
    pub fn interpolated(self, other: Self, factor: T) -> Self {
        self.interpolated_with(other, factor, InterpolationMode::AlphaAware)
    }

    /// Interpolation towards `other` treating all four channels independently.
    pub fn raw_interpolated(self, other: Self, factor: T) -> Self {
        self.interpolated_with(other, factor, InterpolationMode::Raw)
    }

    /// Interpolation towards `other` with an explicit [`InterpolationMode`].
    ///
    /// In alpha-aware mode the color channels are premultiplied by their alpha, interpolated
    /// and divided back by the interpolated alpha. When both alphas are equal the two modes
    /// give the same result.
    pub fn interpolated_with(self, other: Self, factor: T, mode: InterpolationMode) -> Self {
        if mode == InterpolationMode::Raw || self.a == other.a {
            return Self::new(
                T::lerp(self.r, other.r, factor),
                T::lerp(self.g, other.g, factor),
                T::lerp(self.b, other.b, factor),
                T::lerp(self.a, other.a, factor),
            );
        }
        let channel =
            |first: T, second: T| T::lerp_weighted(first, self.a, second, other.a, factor);
        Self::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
            T::lerp(self.a, other.a, factor),
        )
    }

    /// Alpha-aware interpolation towards `other`, in place.
    pub fn interpolate(&mut self, other: Self, factor: T) {
        *self = self.interpolated(other, factor);
    }

    /// Raw interpolation towards `other`, in place.
    pub fn raw_interpolate(&mut self, other: Self, factor: T) {
        *self = self.raw_interpolated(other, factor);
    }

    /// The pixel with its color channels multiplied by alpha.
    pub fn premultiplied_alpha(self) -> Self {
        let a = self.a;
        self.map_color(|c| T::premultiply(c, a))
    }

    /// Multiplies the color channels by alpha in place.
    pub fn premultiply_alpha(&mut self) {
        *self = self.premultiplied_alpha();
    }
}

/// The alpha-weighted average of a set of pixels.
///
/// Returns fully transparent black for an empty slice.
pub fn average_of<T: Component>(pixels: &[Pixel<T>]) -> Pixel<T> {
    Pixel::from_array(T::weighted_mean(pixels.iter().map(|p| p.to_array())))
}
