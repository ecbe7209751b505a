use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use crate::component::Component;

/// A pixel with red, green, blue and alpha channels of component type `T`.
///
/// The default pixel is opaque black.
///
/// Scalar operators act on the color channels only and leave alpha untouched. Pixel-by-pixel
/// operators combine the color channels and set alpha to the mean of both alphas.
///
/// # Examples
///
/// ```
/// use tinct_pixel::{Pixel16, Pixel8};
///
/// let p = Pixel8::new(10, 20, 30, 255) * 3 - 5;
/// assert_eq!(p, Pixel8::new(25, 55, 85, 255));
///
/// let wide = Pixel16::from(Pixel8::new(255, 0, 18, 255));
/// assert_eq!(wide, Pixel16::new(65535, 0, 0x1212, 65535));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixel<T> {
    /// The red channel.
    pub r: T,
    /// The green channel.
    pub g: T,
    /// The blue channel.
    pub b: T,
    /// The alpha channel.
    pub a: T,
}

/// A pixel with 8-bit components.
pub type Pixel8 = Pixel<u8>;

/// A pixel with 16-bit components.
pub type Pixel16 = Pixel<u16>;

/// A pixel with floating point components.
pub type PixelF = Pixel<f32>;

impl<T: Component> Default for Pixel<T> {
    fn default() -> Self {
        Self::rgb(T::zero(), T::zero(), T::zero())
    }
}

impl<T: Component> Pixel<T> {
    /// Creates a pixel from its four channels.
    pub const fn new(r: T, g: T, b: T, a: T) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque pixel.
    pub fn rgb(r: T, g: T, b: T) -> Self {
        Self::new(r, g, b, T::MAX)
    }

    /// Creates a fully opaque gray pixel.
    pub fn gray(value: T) -> Self {
        Self::rgb(value, value, value)
    }

    /// Creates a gray pixel with the given alpha.
    pub fn gray_alpha(value: T, alpha: T) -> Self {
        Self::new(value, value, value, alpha)
    }

    /// Creates a fully transparent black pixel.
    pub fn transparent() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::zero())
    }

    /// Sets the color channels, keeping alpha.
    pub fn set_rgb(&mut self, r: T, g: T, b: T) {
        self.r = r;
        self.g = g;
        self.b = b;
    }

    /// Converts the pixel to another precision.
    pub fn convert<U: Component>(self) -> Pixel<U> {
        Pixel::new(self.r.cast(), self.g.cast(), self.b.cast(), self.a.cast())
    }

    /// Whether the alpha channel is at full opacity.
    pub fn is_opaque(&self) -> bool {
        self.a.is_opaque()
    }

    /// The channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [T; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Creates a pixel from `[r, g, b, a]`.
    pub fn from_array([r, g, b, a]: [T; 4]) -> Self {
        Self::new(r, g, b, a)
    }

    pub(crate) fn map_color(self, f: impl Fn(T) -> T) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), self.a)
    }

    pub(crate) fn zip_color(self, other: Self, f: impl Fn(T, T) -> T) -> Self {
        Self::new(
            f(self.r, other.r),
            f(self.g, other.g),
            f(self.b, other.b),
            self.a.mean(other.a),
        )
    }
}

macro_rules! impl_precision_from {
    ($($from:ty => $to:ty),* $(,)?) => {
        $(
            impl From<Pixel<$from>> for Pixel<$to> {
                fn from(pixel: Pixel<$from>) -> Self {
                    pixel.convert()
                }
            }
        )*
    };
}

impl_precision_from!(
    u8 => u16,
    u8 => f32,
    u16 => u8,
    u16 => f32,
    f32 => u8,
    f32 => u16,
);

impl<T: Component> Add for Pixel<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_color(rhs, T::saturating_add)
    }
}

impl<T: Component> Sub for Pixel<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_color(rhs, T::saturating_sub)
    }
}

impl<T: Component> Mul for Pixel<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.zip_color(rhs, T::saturating_mul)
    }
}

impl<T: Component> Div for Pixel<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.zip_color(rhs, T::saturating_div)
    }
}

impl<T: Component> AddAssign for Pixel<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Component> SubAssign for Pixel<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Component> MulAssign for Pixel<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Component> DivAssign for Pixel<T> {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

// scalar operators, including the reversed `scalar op pixel` forms
macro_rules! impl_scalar_ops {
    ($component:ty, $scalar:ty) => {
        impl Add<$scalar> for Pixel<$component> {
            type Output = Self;

            fn add(self, rhs: $scalar) -> Self {
                self.map_color(|c| c.add_scalar(rhs))
            }
        }

        impl Sub<$scalar> for Pixel<$component> {
            type Output = Self;

            fn sub(self, rhs: $scalar) -> Self {
                self.map_color(|c| c.sub_scalar(rhs))
            }
        }

        impl Mul<$scalar> for Pixel<$component> {
            type Output = Self;

            fn mul(self, rhs: $scalar) -> Self {
                self.map_color(|c| c.mul_scalar(rhs))
            }
        }

        impl Div<$scalar> for Pixel<$component> {
            type Output = Self;

            fn div(self, rhs: $scalar) -> Self {
                self.map_color(|c| c.div_scalar(rhs))
            }
        }

        impl Add<Pixel<$component>> for $scalar {
            type Output = Pixel<$component>;

            fn add(self, rhs: Pixel<$component>) -> Pixel<$component> {
                rhs + self
            }
        }

        impl Sub<Pixel<$component>> for $scalar {
            type Output = Pixel<$component>;

            fn sub(self, rhs: Pixel<$component>) -> Pixel<$component> {
                rhs.map_color(|c| <$component>::scalar_sub(self, c))
            }
        }

        impl Mul<Pixel<$component>> for $scalar {
            type Output = Pixel<$component>;

            fn mul(self, rhs: Pixel<$component>) -> Pixel<$component> {
                rhs * self
            }
        }

        impl Div<Pixel<$component>> for $scalar {
            type Output = Pixel<$component>;

            fn div(self, rhs: Pixel<$component>) -> Pixel<$component> {
                rhs.map_color(|c| <$component>::scalar_div(self, c))
            }
        }

        impl AddAssign<$scalar> for Pixel<$component> {
            fn add_assign(&mut self, rhs: $scalar) {
                *self = *self + rhs;
            }
        }

        impl SubAssign<$scalar> for Pixel<$component> {
            fn sub_assign(&mut self, rhs: $scalar) {
                *self = *self - rhs;
            }
        }

        impl MulAssign<$scalar> for Pixel<$component> {
            fn mul_assign(&mut self, rhs: $scalar) {
                *self = *self * rhs;
            }
        }

        impl DivAssign<$scalar> for Pixel<$component> {
            fn div_assign(&mut self, rhs: $scalar) {
                *self = *self / rhs;
            }
        }
    };
}

impl_scalar_ops!(u8, i32);
impl_scalar_ops!(u16, i32);
impl_scalar_ops!(f32, f32);
