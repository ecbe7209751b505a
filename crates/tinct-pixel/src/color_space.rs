use crate::component::Component;
use crate::pixel::{Pixel, PixelF};

/// A color space value convertible to and from a floating point pixel.
///
/// Every color space carries the alpha channel through unchanged. Conversions ignore alpha
/// otherwise, so a transparent pixel converts exactly like its opaque counterpart.
pub trait ColorSpace: Copy {
    /// Converts the color channels of a floating point pixel.
    fn from_pixel(pixel: PixelF) -> Self;

    /// Converts back to a floating point pixel.
    fn to_pixel(self) -> PixelF;
}

/// Hue, saturation and value, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hsv {
    /// Hue, wrapped into `[0, 1)`.
    pub h: f32,
    /// Saturation.
    pub s: f32,
    /// Value.
    pub v: f32,
    /// Alpha.
    pub a: f32,
}

/// Hue, saturation and lightness, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hsl {
    /// Hue, wrapped into `[0, 1)`.
    pub h: f32,
    /// Saturation.
    pub s: f32,
    /// Lightness.
    pub l: f32,
    /// Alpha.
    pub a: f32,
}

/// CIE 1931 XYZ tristimulus values scaled so that white has `Y = 100`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Xyz {
    /// X.
    pub x: f32,
    /// Y, the luminance.
    pub y: f32,
    /// Z.
    pub z: f32,
    /// Alpha.
    pub a: f32,
}

/// CIE Yxy: luminance plus the chromaticity coordinates derived from XYZ.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Yxy {
    /// The luminance `Y`, on the same scale as [`Xyz::y`].
    pub luminance: f32,
    /// Chromaticity x.
    pub x: f32,
    /// Chromaticity y.
    pub y: f32,
    /// Alpha.
    pub a: f32,
}

/// Subtractive cyan, magenta and yellow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cmy {
    /// Cyan.
    pub c: f32,
    /// Magenta.
    pub m: f32,
    /// Yellow.
    pub y: f32,
    /// Alpha.
    pub a: f32,
}

/// Cyan, magenta, yellow and key (black).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cmyk {
    /// Cyan.
    pub c: f32,
    /// Magenta.
    pub m: f32,
    /// Yellow.
    pub y: f32,
    /// Key.
    pub k: f32,
    /// Alpha.
    pub a: f32,
}

/// Decodes an sRGB encoded component to linear light.
pub(crate) fn srgb_to_linear(c: f32) -> f32 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// Encodes a linear light component with the sRGB curve.
pub(crate) fn linear_to_srgb(c: f32) -> f32 {
    if c > 0.0031308 {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * c
    }
}

fn wrap_unit(value: f32) -> f32 {
    let wrapped = value % 1.0;
    if wrapped < 0.0 {
        wrapped + 1.0
    } else {
        wrapped
    }
}

// hue of a non-gray color, from the channel holding the maximum
fn hue(p: &PixelF, max: f32, delta: f32) -> f32 {
    let component = |c: f32| ((max - c) / 6.0 + delta / 2.0) / delta;
    let (dr, dg, db) = (component(p.r), component(p.g), component(p.b));
    let h = if p.r == max {
        db - dg
    } else if p.g == max {
        1.0 / 3.0 + dr - db
    } else {
        2.0 / 3.0 + dg - dr
    };
    wrap_unit(h)
}

fn min_max(p: &PixelF) -> (f32, f32) {
    (p.r.min(p.g).min(p.b), p.r.max(p.g).max(p.b))
}

fn hue_to_rgb(v1: f32, v2: f32, hue: f32) -> f32 {
    let hue = if hue < 0.0 {
        hue + 1.0
    } else if hue > 1.0 {
        hue - 1.0
    } else {
        hue
    };
    if 6.0 * hue < 1.0 {
        v1 + (v2 - v1) * 6.0 * hue
    } else if 2.0 * hue < 1.0 {
        v2
    } else if 3.0 * hue < 2.0 {
        v1 + (v2 - v1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        v1
    }
}

impl ColorSpace for Hsv {
    fn from_pixel(p: PixelF) -> Self {
        let (min, max) = min_max(&p);
        let delta = max - min;
        if delta == 0.0 {
            return Self { h: 0.0, s: 0.0, v: max, a: p.a };
        }
        Self {
            h: hue(&p, max, delta),
            s: delta / max,
            v: max,
            a: p.a,
        }
    }

    fn to_pixel(self) -> PixelF {
        let Self { h, s, v, a } = self;
        if s == 0.0 {
            return PixelF::gray_alpha(v, a);
        }
        let mut sector = wrap_unit(h) * 6.0;
        if sector >= 6.0 {
            sector = 0.0;
        }
        let index = sector.floor();
        let fraction = sector - index;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * fraction);
        let t = v * (1.0 - s * (1.0 - fraction));
        let (r, g, b) = match index as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        PixelF::new(r, g, b, a)
    }
}

impl ColorSpace for Hsl {
    fn from_pixel(p: PixelF) -> Self {
        let (min, max) = min_max(&p);
        let delta = max - min;
        let l = (max + min) / 2.0;
        if delta == 0.0 {
            return Self { h: 0.0, s: 0.0, l, a: p.a };
        }
        let s = if l < 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };
        Self {
            h: hue(&p, max, delta),
            s,
            l,
            a: p.a,
        }
    }

    fn to_pixel(self) -> PixelF {
        let Self { h, s, l, a } = self;
        if s == 0.0 {
            return PixelF::gray_alpha(l, a);
        }
        let v2 = if l < 0.5 { l * (1.0 + s) } else { l + s - s * l };
        let v1 = 2.0 * l - v2;
        PixelF::new(
            hue_to_rgb(v1, v2, h + 1.0 / 3.0),
            hue_to_rgb(v1, v2, h),
            hue_to_rgb(v1, v2, h - 1.0 / 3.0),
            a,
        )
    }
}

impl ColorSpace for Xyz {
    fn from_pixel(p: PixelF) -> Self {
        let r = srgb_to_linear(p.r) * 100.0;
        let g = srgb_to_linear(p.g) * 100.0;
        let b = srgb_to_linear(p.b) * 100.0;
        Self {
            x: r * 0.4124 + g * 0.3576 + b * 0.1805,
            y: r * 0.2126 + g * 0.7152 + b * 0.0722,
            z: r * 0.0193 + g * 0.1192 + b * 0.9505,
            a: p.a,
        }
    }

    fn to_pixel(self) -> PixelF {
        let (x, y, z) = (self.x / 100.0, self.y / 100.0, self.z / 100.0);
        PixelF::new(
            linear_to_srgb(x * 3.2406 + y * -1.5372 + z * -0.4986),
            linear_to_srgb(x * -0.9689 + y * 1.8758 + z * 0.0415),
            linear_to_srgb(x * 0.0557 + y * -0.2040 + z * 1.0570),
            self.a,
        )
    }
}

impl From<Xyz> for Yxy {
    fn from(xyz: Xyz) -> Self {
        let sum = xyz.x + xyz.y + xyz.z;
        if sum == 0.0 {
            return Self { a: xyz.a, ..Default::default() };
        }
        Self {
            luminance: xyz.y,
            x: xyz.x / sum,
            y: xyz.y / sum,
            a: xyz.a,
        }
    }
}

impl From<Yxy> for Xyz {
    fn from(yxy: Yxy) -> Self {
        if yxy.y == 0.0 {
            return Self { a: yxy.a, ..Default::default() };
        }
        Self {
            x: yxy.x * yxy.luminance / yxy.y,
            y: yxy.luminance,
            z: (1.0 - yxy.x - yxy.y) * yxy.luminance / yxy.y,
            a: yxy.a,
        }
    }
}

impl ColorSpace for Yxy {
    fn from_pixel(p: PixelF) -> Self {
        Xyz::from_pixel(p).into()
    }

    fn to_pixel(self) -> PixelF {
        Xyz::from(self).to_pixel()
    }
}

impl ColorSpace for Cmy {
    fn from_pixel(p: PixelF) -> Self {
        Self {
            c: 1.0 - p.r,
            m: 1.0 - p.g,
            y: 1.0 - p.b,
            a: p.a,
        }
    }

    fn to_pixel(self) -> PixelF {
        PixelF::new(1.0 - self.c, 1.0 - self.m, 1.0 - self.y, self.a)
    }
}

impl From<Cmy> for Cmyk {
    fn from(cmy: Cmy) -> Self {
        let k = cmy.c.min(cmy.m).min(cmy.y).min(1.0);
        if k == 1.0 {
            return Self { c: 0.0, m: 0.0, y: 0.0, k, a: cmy.a };
        }
        Self {
            c: (cmy.c - k) / (1.0 - k),
            m: (cmy.m - k) / (1.0 - k),
            y: (cmy.y - k) / (1.0 - k),
            k,
            a: cmy.a,
        }
    }
}

impl From<Cmyk> for Cmy {
    fn from(cmyk: Cmyk) -> Self {
        let k = cmyk.k;
        Self {
            c: cmyk.c * (1.0 - k) + k,
            m: cmyk.m * (1.0 - k) + k,
            y: cmyk.y * (1.0 - k) + k,
            a: cmyk.a,
        }
    }
}

impl ColorSpace for Cmyk {
    fn from_pixel(p: PixelF) -> Self {
        Cmy::from_pixel(p).into()
    }

    fn to_pixel(self) -> PixelF {
        Cmy::from(self).to_pixel()
    }
}

impl<T: Component> Pixel<T> {
    /// Converts the pixel to the color space `C`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tinct_pixel::{Hsv, Pixel8};
    ///
    /// let hsv: Hsv = Pixel8::new(255, 0, 0, 255).to_color();
    /// assert_eq!((hsv.h, hsv.s, hsv.v), (0.0, 1.0, 1.0));
    /// ```
    pub fn to_color<C: ColorSpace>(&self) -> C {
        C::from_pixel(self.convert())
    }

    /// Creates a pixel from a color space value.
    pub fn from_color<C: ColorSpace>(color: C) -> Self {
        color.to_pixel().convert()
    }

    /// The pixel in HSV.
    pub fn to_hsv(&self) -> Hsv {
        self.to_color()
    }

    /// The pixel in HSL.
    pub fn to_hsl(&self) -> Hsl {
        self.to_color()
    }

    /// The pixel in CIE XYZ.
    pub fn to_xyz(&self) -> Xyz {
        self.to_color()
    }

    /// The pixel in CIE Yxy.
    pub fn to_yxy(&self) -> Yxy {
        self.to_color()
    }

    /// The pixel in CMY.
    pub fn to_cmy(&self) -> Cmy {
        self.to_color()
    }

    /// The pixel in CMYK.
    pub fn to_cmyk(&self) -> Cmyk {
        self.to_color()
    }
}

macro_rules! impl_pixel_from_color {
    ($($space:ty),*) => {
        $(
            impl<T: Component> From<$space> for Pixel<T> {
                fn from(color: $space) -> Self {
                    Pixel::from_color(color)
                }
            }
        )*
    };
}

impl_pixel_from_color!(Hsv, Hsl, Xyz, Yxy, Cmy, Cmyk);

#[cfg(test)]
mod tests {
    use super::{Cmy, Cmyk, ColorSpace, Hsl, Hsv, Xyz, Yxy};
    use crate::pixel::{Pixel8, PixelF};
    use approx::assert_abs_diff_eq;

    fn assert_round_trip<C: ColorSpace>(p: PixelF) {
        let back = C::from_pixel(p).to_pixel();
        assert_abs_diff_eq!(back.r, p.r, epsilon = 0.01);
        assert_abs_diff_eq!(back.g, p.g, epsilon = 0.01);
        assert_abs_diff_eq!(back.b, p.b, epsilon = 0.01);
        assert_abs_diff_eq!(back.a, p.a, epsilon = 0.01);
    }

    #[test]
    fn white() {
        let white = PixelF::new(1.0, 1.0, 1.0, 1.0);
        let xyz = white.to_xyz();
        assert_abs_diff_eq!(xyz.x, 95.05, epsilon = 1e-3);
        assert_abs_diff_eq!(xyz.y, 100.0, epsilon = 1e-3);
        assert_abs_diff_eq!(xyz.z, 108.9, epsilon = 1e-3);
        let yxy = white.to_yxy();
        assert_abs_diff_eq!(yxy.luminance, 100.0, epsilon = 1e-3);
        assert_abs_diff_eq!(yxy.x, 0.3127, epsilon = 1e-4);
        assert_abs_diff_eq!(yxy.y, 0.329, epsilon = 1e-3);
        assert_eq!(white.to_hsv(), Hsv { h: 0.0, s: 0.0, v: 1.0, a: 1.0 });
        assert_eq!(white.to_hsl(), Hsl { h: 0.0, s: 0.0, l: 1.0, a: 1.0 });
    }

    #[test]
    fn mixed_color() {
        let p = PixelF::new(0.25, 0.75, 0.5, 0.3);

        let hsv = p.to_hsv();
        assert_abs_diff_eq!(hsv.h, 0.416_666_7, epsilon = 1e-4);
        assert_abs_diff_eq!(hsv.s, 0.666_666_7, epsilon = 1e-4);
        assert_abs_diff_eq!(hsv.v, 0.75, epsilon = 1e-6);
        assert_abs_diff_eq!(hsv.a, 0.3);

        let hsl = p.to_hsl();
        assert_abs_diff_eq!(hsl.h, 0.416_666_7, epsilon = 1e-4);
        assert_abs_diff_eq!(hsl.s, 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(hsl.l, 0.5, epsilon = 1e-6);

        let xyz = p.to_xyz();
        assert_abs_diff_eq!(xyz.x, 24.647, epsilon = 1e-2);
        assert_abs_diff_eq!(xyz.y, 39.998, epsilon = 1e-2);
        assert_abs_diff_eq!(xyz.z, 26.671, epsilon = 1e-2);

        let yxy = p.to_yxy();
        assert_abs_diff_eq!(yxy.luminance, 39.998, epsilon = 1e-2);
        assert_abs_diff_eq!(yxy.x, 0.27, epsilon = 1e-3);
        assert_abs_diff_eq!(yxy.y, 0.438, epsilon = 1e-3);

        let cmyk = p.to_cmyk();
        assert_abs_diff_eq!(cmyk.c, 0.666_666_7, epsilon = 1e-4);
        assert_abs_diff_eq!(cmyk.m, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(cmyk.y, 0.333_333_3, epsilon = 1e-4);
        assert_abs_diff_eq!(cmyk.k, 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(cmyk.a, 0.3);
    }

    #[test]
    fn transparent_black() {
        let p = PixelF::transparent();
        assert_eq!(p.to_hsv(), Hsv::default());
        assert_eq!(p.to_hsl(), Hsl::default());
        assert_eq!(p.to_xyz(), Xyz::default());
        assert_eq!(p.to_yxy(), Yxy::default());
        assert_eq!(p.to_cmy(), Cmy { c: 1.0, m: 1.0, y: 1.0, a: 0.0 });
        assert_eq!(
            p.to_cmyk(),
            Cmyk { c: 0.0, m: 0.0, y: 0.0, k: 1.0, a: 0.0 }
        );
        assert_eq!(PixelF::from(Cmyk { k: 1.0, ..Default::default() }), p);
    }

    #[test]
    fn hsv_primaries() {
        let hues = [
            (Pixel8::new(255, 0, 0, 255), 0.0),
            (Pixel8::new(255, 255, 0, 255), 1.0 / 6.0),
            (Pixel8::new(0, 255, 0, 255), 1.0 / 3.0),
            (Pixel8::new(0, 255, 255, 255), 0.5),
            (Pixel8::new(0, 0, 255, 255), 2.0 / 3.0),
            (Pixel8::new(255, 0, 255, 255), 5.0 / 6.0),
        ];
        for (pixel, h) in hues {
            let hsv = pixel.to_hsv();
            assert_abs_diff_eq!(hsv.h, h, epsilon = 1e-5);
            assert_eq!(Pixel8::from(hsv), pixel);
            assert_eq!(Pixel8::from(pixel.to_hsl()), pixel);
        }
    }

    #[test]
    fn round_trips() {
        let pixels = [
            PixelF::new(0.25, 0.75, 0.5, 0.3),
            PixelF::new(0.9, 0.1, 0.4, 1.0),
            PixelF::new(0.5, 0.5, 0.5, 0.5),
            PixelF::new(0.02, 0.6, 0.99, 0.01),
            PixelF::new(1.0, 1.0, 1.0, 1.0),
        ];
        for p in pixels {
            assert_round_trip::<Hsv>(p);
            assert_round_trip::<Hsl>(p);
            assert_round_trip::<Xyz>(p);
            assert_round_trip::<Yxy>(p);
            assert_round_trip::<Cmy>(p);
            assert_round_trip::<Cmyk>(p);
        }
    }

    #[test]
    fn from_color_any_precision() {
        let hsv = Hsv { h: 0.5, s: 1.0, v: 1.0, a: 0.5 };
        assert_eq!(Pixel8::from_color(hsv), Pixel8::new(0, 255, 255, 128));
    }
}
