use std::fmt::Debug;

use num_traits::Zero;

/// The numeric precision of a pixel component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Precision {
    /// 8-bit unsigned components in `[0, 255]`.
    Eight,
    /// 16-bit unsigned components in `[0, 65535]`.
    Sixteen,
    /// 32-bit floating point components, nominally in `[0.0, 1.0]`.
    Float,
}

/// A single channel value of a pixel.
///
/// Implemented for `u8`, `u16` and `f32`. Besides the conversions between precisions, the
/// trait carries every per-component kernel used by the pixel operators, blending, averaging
/// and interpolation, so that the saturation and rounding rules of each precision live in
/// exactly one place.
///
/// Integer kernels saturate to `[0, MAX]` and never wrap. Division by zero yields `MAX` for
/// integers and `f32::MAX` for floats.
pub trait Component:
    Copy + Debug + Default + PartialEq + PartialOrd + Zero + Send + Sync + 'static
{
    /// The precision tag of the component type.
    const PRECISION: Precision;

    /// The value representing full intensity or full opacity.
    const MAX: Self;

    /// The scalar operand type of the pixel operators: `i32` for integers, `f32` for floats.
    type Scalar: Copy + Debug;

    /// The default red, green and blue weights used by [`crate::Pixel::to_gray`].
    const GRAY_WEIGHTS: [Self::Scalar; 3];

    /// Converts from an 8-bit component.
    fn from_u8(value: u8) -> Self;

    /// Converts from a 16-bit component.
    fn from_u16(value: u16) -> Self;

    /// Converts from a float component, rounding to nearest and saturating at the bounds.
    fn from_f32(value: f32) -> Self;

    /// Converts to an 8-bit component.
    fn to_u8(self) -> u8;

    /// Converts to a 16-bit component.
    fn to_u16(self) -> u16;

    /// Converts to a float component.
    fn to_f32(self) -> f32;

    /// Converts the component to another precision.
    fn cast<U: Component>(self) -> U {
        match Self::PRECISION {
            Precision::Eight => U::from_u8(self.to_u8()),
            Precision::Sixteen => U::from_u16(self.to_u16()),
            Precision::Float => U::from_f32(self.to_f32()),
        }
    }

    /// `self + scalar`, saturating.
    fn add_scalar(self, scalar: Self::Scalar) -> Self;

    /// `self - scalar`, saturating.
    fn sub_scalar(self, scalar: Self::Scalar) -> Self;

    /// `self * scalar`, saturating.
    fn mul_scalar(self, scalar: Self::Scalar) -> Self;

    /// `self / scalar`, rounded and saturating.
    fn div_scalar(self, scalar: Self::Scalar) -> Self;

    /// `scalar - self`, saturating.
    fn scalar_sub(scalar: Self::Scalar, value: Self) -> Self;

    /// `scalar / self`, rounded and saturating.
    fn scalar_div(scalar: Self::Scalar, value: Self) -> Self;

    /// `self + other`, saturating.
    fn saturating_add(self, other: Self) -> Self;

    /// `self - other`, saturating.
    fn saturating_sub(self, other: Self) -> Self;

    /// `self * other`, saturating.
    fn saturating_mul(self, other: Self) -> Self;

    /// `self / other`, rounded and saturating.
    fn saturating_div(self, other: Self) -> Self;

    /// The mean of two components, truncated for integers.
    fn mean(self, other: Self) -> Self;

    /// The alpha of `src` composited over `dest`.
    fn blend_alpha(dest_alpha: Self, src_alpha: Self) -> Self;

    /// A color component of `src` composited over `dest`, given the already blended alpha.
    fn blend(dest: Self, dest_alpha: Self, src: Self, src_alpha: Self, out_alpha: Self) -> Self;

    /// Linear interpolation between two components, `factor` in component units.
    fn lerp(first: Self, second: Self, factor: Self) -> Self;

    /// Linear interpolation between two alpha-weighted color components.
    ///
    /// Returns zero when the interpolated weight is zero.
    fn lerp_weighted(
        first: Self,
        first_alpha: Self,
        second: Self,
        second_alpha: Self,
        factor: Self,
    ) -> Self;

    /// A color component multiplied by its alpha.
    fn premultiply(value: Self, alpha: Self) -> Self;

    /// Weighted mean of three color components.
    ///
    /// Returns zero when the weights sum to zero.
    fn weighted_gray(rgb: [Self; 3], weights: [Self::Scalar; 3]) -> Self;

    /// The alpha-weighted mean of a set of `[r, g, b, a]` samples.
    ///
    /// Color channels are weighted by alpha, the alpha is the plain mean. Returns all zeros
    /// when the alphas sum to zero or there are no samples.
    fn weighted_mean<I>(samples: I) -> [Self; 4]
    where
        I: IntoIterator<Item = [Self; 4]>;

    /// Whether the component is at full opacity.
    fn is_opaque(self) -> bool;
}

#[inline]
fn clamp_to(value: i64, max: i64) -> i64 {
    value.clamp(0, max)
}

macro_rules! integer_component {
    (
        $ty:ty,
        $precision:ident,
        from_u8: $from_u8:expr,
        from_u16: $from_u16:expr,
        to_u8: $to_u8:expr,
        to_u16: $to_u16:expr $(,)?
    ) => {
        impl Component for $ty {
            const PRECISION: Precision = Precision::$precision;
            const MAX: Self = <$ty>::MAX;
            type Scalar = i32;
            const GRAY_WEIGHTS: [i32; 3] = [30, 59, 11];

            #[inline]
            fn from_u8(value: u8) -> Self {
                ($from_u8)(value)
            }

            #[inline]
            fn from_u16(value: u16) -> Self {
                ($from_u16)(value)
            }

            #[inline]
            fn from_f32(value: f32) -> Self {
                if value <= 0.0 {
                    0
                } else if value >= 1.0 {
                    Self::MAX
                } else {
                    (value * Self::MAX as f32 + 0.5) as $ty
                }
            }

            #[inline]
            fn to_u8(self) -> u8 {
                ($to_u8)(self)
            }

            #[inline]
            fn to_u16(self) -> u16 {
                ($to_u16)(self)
            }

            #[inline]
            fn to_f32(self) -> f32 {
                self as f32 * (1.0 / Self::MAX as f32)
            }

            #[inline]
            fn add_scalar(self, scalar: i32) -> Self {
                clamp_to(self as i64 + scalar as i64, Self::MAX as i64) as $ty
            }

            #[inline]
            fn sub_scalar(self, scalar: i32) -> Self {
                clamp_to(self as i64 - scalar as i64, Self::MAX as i64) as $ty
            }

            #[inline]
            fn mul_scalar(self, scalar: i32) -> Self {
                clamp_to(self as i64 * scalar as i64, Self::MAX as i64) as $ty
            }

            #[inline]
            fn div_scalar(self, scalar: i32) -> Self {
                match scalar {
                    0 => Self::MAX,
                    s if s < 0 => 0,
                    s => {
                        let s = s as i64;
                        clamp_to((self as i64 + s / 2) / s, Self::MAX as i64) as $ty
                    }
                }
            }

            #[inline]
            fn scalar_sub(scalar: i32, value: Self) -> Self {
                clamp_to(scalar as i64 - value as i64, Self::MAX as i64) as $ty
            }

            #[inline]
            fn scalar_div(scalar: i32, value: Self) -> Self {
                if value == 0 {
                    return Self::MAX;
                }
                let value = value as i64;
                clamp_to((scalar as i64 + value / 2) / value, Self::MAX as i64) as $ty
            }

            #[inline]
            fn saturating_add(self, other: Self) -> Self {
                <$ty>::saturating_add(self, other)
            }

            #[inline]
            fn saturating_sub(self, other: Self) -> Self {
                <$ty>::saturating_sub(self, other)
            }

            #[inline]
            fn saturating_mul(self, other: Self) -> Self {
                <$ty>::saturating_mul(self, other)
            }

            #[inline]
            fn saturating_div(self, other: Self) -> Self {
                if other == 0 {
                    return Self::MAX;
                }
                let other = other as u64;
                ((self as u64 + other / 2) / other).min(Self::MAX as u64) as $ty
            }

            #[inline]
            fn mean(self, other: Self) -> Self {
                ((self as u64 + other as u64) / 2) as $ty
            }

            #[inline]
            fn blend_alpha(dest_alpha: Self, src_alpha: Self) -> Self {
                let max = Self::MAX as u64;
                let (dest_alpha, src_alpha) = (dest_alpha as u64, src_alpha as u64);
                (src_alpha + (dest_alpha * (max - src_alpha) + max / 2) / max) as $ty
            }

            #[inline]
            fn blend(
                dest: Self,
                dest_alpha: Self,
                src: Self,
                src_alpha: Self,
                out_alpha: Self,
            ) -> Self {
                if out_alpha == 0 {
                    return 0;
                }
                let max = Self::MAX as u64;
                let src_term = src as u64 * src_alpha as u64 * max;
                let dest_term = dest as u64 * dest_alpha as u64 * (max - src_alpha as u64);
                ((src_term + dest_term) / out_alpha as u64 / max).min(max) as $ty
            }

            #[inline]
            fn lerp(first: Self, second: Self, factor: Self) -> Self {
                let max = Self::MAX as u64;
                let factor = factor as u64;
                ((first as u64 * (max - factor) + second as u64 * factor) / max) as $ty
            }

            #[inline]
            fn lerp_weighted(
                first: Self,
                first_alpha: Self,
                second: Self,
                second_alpha: Self,
                factor: Self,
            ) -> Self {
                let max = Self::MAX as u64;
                let first_weight = first_alpha as u64 * (max - factor as u64);
                let second_weight = second_alpha as u64 * factor as u64;
                let weight = first_weight + second_weight;
                if weight == 0 {
                    return 0;
                }
                ((first as u64 * first_weight + second as u64 * second_weight) / weight).min(max)
                    as $ty
            }

            #[inline]
            fn premultiply(value: Self, alpha: Self) -> Self {
                let max = Self::MAX as u64;
                ((value as u64 * alpha as u64 + max / 2) / max) as $ty
            }

            #[inline]
            fn weighted_gray(rgb: [Self; 3], weights: [i32; 3]) -> Self {
                let sum: i64 = weights.iter().map(|&w| w as i64).sum();
                if sum == 0 {
                    return 0;
                }
                let weighted: i64 = rgb
                    .iter()
                    .zip(weights.iter())
                    .map(|(&c, &w)| c as i64 * w as i64)
                    .sum();
                clamp_to((weighted + sum / 2) / sum, Self::MAX as i64) as $ty
            }

            fn weighted_mean<I>(samples: I) -> [Self; 4]
            where
                I: IntoIterator<Item = [Self; 4]>,
            {
                let mut color_sums = [0u64; 3];
                let mut alpha_sum = 0u64;
                let mut count = 0u64;
                for [r, g, b, a] in samples {
                    let a = a as u64;
                    color_sums[0] += r as u64 * a;
                    color_sums[1] += g as u64 * a;
                    color_sums[2] += b as u64 * a;
                    alpha_sum += a;
                    count += 1;
                }
                if alpha_sum == 0 {
                    return [0; 4];
                }
                let channel = |sum: u64| ((sum + alpha_sum / 2) / alpha_sum) as $ty;
                [
                    channel(color_sums[0]),
                    channel(color_sums[1]),
                    channel(color_sums[2]),
                    ((alpha_sum + count / 2) / count) as $ty,
                ]
            }

            #[inline]
            fn is_opaque(self) -> bool {
                self == Self::MAX
            }
        }
    };
}

integer_component!(
    u8,
    Eight,
    from_u8: |v: u8| v,
    from_u16: |v: u16| (v >> 8) as u8,
    to_u8: |v: u8| v,
    to_u16: |v: u8| (v as u16) | ((v as u16) << 8),
);

integer_component!(
    u16,
    Sixteen,
    from_u8: |v: u8| (v as u16) | ((v as u16) << 8),
    from_u16: |v: u16| v,
    to_u8: |v: u16| (v >> 8) as u8,
    to_u16: |v: u16| v,
);

impl Component for f32 {
    const PRECISION: Precision = Precision::Float;
    const MAX: Self = 1.0;
    type Scalar = f32;
    const GRAY_WEIGHTS: [f32; 3] = [30.0, 59.0, 11.0];

    #[inline]
    fn from_u8(value: u8) -> Self {
        value as f32 * (1.0 / 255.0)
    }

    #[inline]
    fn from_u16(value: u16) -> Self {
        value as f32 * (1.0 / 65535.0)
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value
    }

    #[inline]
    fn to_u8(self) -> u8 {
        u8::from_f32(self)
    }

    #[inline]
    fn to_u16(self) -> u16 {
        u16::from_f32(self)
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn add_scalar(self, scalar: f32) -> Self {
        self + scalar
    }

    #[inline]
    fn sub_scalar(self, scalar: f32) -> Self {
        self - scalar
    }

    #[inline]
    fn mul_scalar(self, scalar: f32) -> Self {
        self * scalar
    }

    #[inline]
    fn div_scalar(self, scalar: f32) -> Self {
        if scalar == 0.0 {
            f32::MAX
        } else {
            self / scalar
        }
    }

    #[inline]
    fn scalar_sub(scalar: f32, value: Self) -> Self {
        scalar - value
    }

    #[inline]
    fn scalar_div(scalar: f32, value: Self) -> Self {
        scalar.div_scalar(value)
    }

    #[inline]
    fn saturating_add(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    fn saturating_sub(self, other: Self) -> Self {
        self - other
    }

    #[inline]
    fn saturating_mul(self, other: Self) -> Self {
        self * other
    }

    #[inline]
    fn saturating_div(self, other: Self) -> Self {
        self.div_scalar(other)
    }

    #[inline]
    fn mean(self, other: Self) -> Self {
        (self + other) * 0.5
    }

    #[inline]
    fn blend_alpha(dest_alpha: Self, src_alpha: Self) -> Self {
        src_alpha + dest_alpha * (1.0 - src_alpha)
    }

    #[inline]
    fn blend(dest: Self, dest_alpha: Self, src: Self, src_alpha: Self, out_alpha: Self) -> Self {
        if out_alpha == 0.0 {
            return 0.0;
        }
        (src * src_alpha + dest * dest_alpha * (1.0 - src_alpha)) / out_alpha
    }

    #[inline]
    fn lerp(first: Self, second: Self, factor: Self) -> Self {
        first * (1.0 - factor) + second * factor
    }

    #[inline]
    fn lerp_weighted(
        first: Self,
        first_alpha: Self,
        second: Self,
        second_alpha: Self,
        factor: Self,
    ) -> Self {
        let first_weight = first_alpha * (1.0 - factor);
        let second_weight = second_alpha * factor;
        let weight = first_weight + second_weight;
        if weight == 0.0 {
            return 0.0;
        }
        (first * first_weight + second * second_weight) / weight
    }

    #[inline]
    fn premultiply(value: Self, alpha: Self) -> Self {
        value * alpha
    }

    #[inline]
    fn weighted_gray(rgb: [Self; 3], weights: [f32; 3]) -> Self {
        let sum = weights[0] + weights[1] + weights[2];
        if sum == 0.0 {
            return 0.0;
        }
        (rgb[0] * weights[0] + rgb[1] * weights[1] + rgb[2] * weights[2]) / sum
    }

    fn weighted_mean<I>(samples: I) -> [Self; 4]
    where
        I: IntoIterator<Item = [Self; 4]>,
    {
        let mut color_sums = [0.0f32; 3];
        let mut alpha_sum = 0.0f32;
        let mut count = 0usize;
        for [r, g, b, a] in samples {
            color_sums[0] += r * a;
            color_sums[1] += g * a;
            color_sums[2] += b * a;
            alpha_sum += a;
            count += 1;
        }
        if alpha_sum == 0.0 {
            return [0.0; 4];
        }
        [
            color_sums[0] / alpha_sum,
            color_sums[1] / alpha_sum,
            color_sums[2] / alpha_sum,
            alpha_sum / count as f32,
        ]
    }

    #[inline]
    fn is_opaque(self) -> bool {
        self >= 1.0
    }
}
