// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use tiny_canvas_path::NormalizedF32;

/// 8-bit type for an alpha value. 255 is 100% opaque, zero is 100% transparent.
pub type AlphaU8 = u8;

/// Represents fully transparent AlphaU8 value.
pub const ALPHA_U8_TRANSPARENT: AlphaU8 = 0x00;

/// Represents fully opaque AlphaU8 value.
pub const ALPHA_U8_OPAQUE: AlphaU8 = 0xFF;

/// A 32-bit RGBA color value.
///
/// Byteorder: ABGR
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq)]
pub struct ColorU8(u32);

impl ColorU8 {
    /// Creates a new color.
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        ColorU8(pack_rgba(r, g, b, a))
    }

    /// Returns color's red component.
    pub const fn red(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Returns color's green component.
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Returns color's blue component.
    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Returns color's alpha component.
    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Converts into a premultiplied color.
    pub fn premultiply(&self) -> PremultipliedColorU8 {
        let a = self.alpha();
        if a != ALPHA_U8_OPAQUE {
            PremultipliedColorU8::from_rgba_unchecked(
                premultiply_u8(self.red(), a),
                premultiply_u8(self.green(), a),
                premultiply_u8(self.blue(), a),
                a,
            )
        } else {
            PremultipliedColorU8::from_rgba_unchecked(self.red(), self.green(), self.blue(), a)
        }
    }
}

impl core::fmt::Debug for ColorU8 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ColorU8")
            .field("r", &self.red())
            .field("g", &self.green())
            .field("b", &self.blue())
            .field("a", &self.alpha())
            .finish()
    }
}

/// A 32-bit premultiplied RGBA color value.
///
/// Byteorder: ABGR
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq)]
pub struct PremultipliedColorU8(u32);

// Bytemuck casts in `Pixmap` rely on the transparent u32 layout.
unsafe impl bytemuck::Zeroable for PremultipliedColorU8 {}
unsafe impl bytemuck::Pod for PremultipliedColorU8 {}

impl PremultipliedColorU8 {
    /// A transparent color.
    pub const TRANSPARENT: Self = PremultipliedColorU8::from_rgba_unchecked(0, 0, 0, 0);

    /// Creates a new color.
    ///
    /// RGB components must be <= alpha, which is not checked.
    pub(crate) const fn from_rgba_unchecked(r: u8, g: u8, b: u8, a: u8) -> Self {
        PremultipliedColorU8(pack_rgba(r, g, b, a))
    }

    /// Returns color's red component.
    ///
    /// The value is <= alpha.
    pub const fn red(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Returns color's green component.
    ///
    /// The value is <= alpha.
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Returns color's blue component.
    ///
    /// The value is <= alpha.
    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Returns color's alpha component.
    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Returns a demultiplied color.
    pub fn demultiply(&self) -> ColorU8 {
        let a = self.alpha();
        match a {
            ALPHA_U8_TRANSPARENT => ColorU8::from_rgba(0, 0, 0, 0),
            ALPHA_U8_OPAQUE => ColorU8::from_rgba(self.red(), self.green(), self.blue(), a),
            _ => {
                // Round-trips exactly with `ColorU8::premultiply`.
                let inv = 255.0 / a as f32;
                ColorU8::from_rgba(
                    (self.red() as f32 * inv + 0.5) as u8,
                    (self.green() as f32 * inv + 0.5) as u8,
                    (self.blue() as f32 * inv + 0.5) as u8,
                    a,
                )
            }
        }
    }
}

impl core::fmt::Debug for PremultipliedColorU8 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PremultipliedColorU8")
            .field("r", &self.red())
            .field("g", &self.green())
            .field("b", &self.blue())
            .field("a", &self.alpha())
            .finish()
    }
}

/// An RGBA color value, holding four floating point components.
///
/// Not premultiplied. The container guarantees that all components are in
/// the 0..=1 range.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color {
    r: NormalizedF32,
    g: NormalizedF32,
    b: NormalizedF32,
    a: NormalizedF32,
}

impl Color {
    /// A transparent color.
    pub const TRANSPARENT: Color = Color {
        r: NormalizedF32::ZERO,
        g: NormalizedF32::ZERO,
        b: NormalizedF32::ZERO,
        a: NormalizedF32::ZERO,
    };

    /// A black color.
    pub const BLACK: Color = Color {
        r: NormalizedF32::ZERO,
        g: NormalizedF32::ZERO,
        b: NormalizedF32::ZERO,
        a: NormalizedF32::ONE,
    };

    /// A white color.
    pub const WHITE: Color = Color {
        r: NormalizedF32::ONE,
        g: NormalizedF32::ONE,
        b: NormalizedF32::ONE,
        a: NormalizedF32::ONE,
    };

    /// Creates a new color from 4 components.
    ///
    /// All values must be in the 0..=1 range.
    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Option<Self> {
        Some(Color {
            r: NormalizedF32::new(r)?,
            g: NormalizedF32::new(g)?,
            b: NormalizedF32::new(b)?,
            a: NormalizedF32::new(a)?,
        })
    }

    /// Creates a new color from 4 components.
    ///
    /// u8 will be divided by 255 to get the float component.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color {
            r: normalize_u8(r),
            g: normalize_u8(g),
            b: normalize_u8(b),
            a: normalize_u8(a),
        }
    }

    /// Returns color's red component.
    pub fn red(&self) -> f32 {
        self.r.get()
    }

    /// Returns color's green component.
    pub fn green(&self) -> f32 {
        self.g.get()
    }

    /// Returns color's blue component.
    pub fn blue(&self) -> f32 {
        self.b.get()
    }

    /// Returns color's alpha component.
    pub fn alpha(&self) -> f32 {
        self.a.get()
    }

    /// Check that color is opaque.
    ///
    /// Alpha == 1.0
    pub fn is_opaque(&self) -> bool {
        self.a == NormalizedF32::ONE
    }

    /// Check that color is fully transparent.
    ///
    /// Alpha == 0.0
    pub fn is_transparent(&self) -> bool {
        self.a == NormalizedF32::ZERO
    }

    /// Scales the alpha component.
    ///
    /// `opacity` will be clamped to the 0..=1 range.
    pub fn apply_opacity(&mut self, opacity: f32) {
        self.a = NormalizedF32::new_clamped(self.a.get() * opacity);
    }

    /// Interpolates towards `other` in non-premultiplied sRGB component
    /// space, which is how canvas gradients blend across transparent stops.
    pub fn lerp(&self, other: Color, t: f32) -> Color {
        let t = NormalizedF32::new_clamped(t).get();
        Color {
            r: NormalizedF32::new_clamped(self.red() + (other.red() - self.red()) * t),
            g: NormalizedF32::new_clamped(self.green() + (other.green() - self.green()) * t),
            b: NormalizedF32::new_clamped(self.blue() + (other.blue() - self.blue()) * t),
            a: NormalizedF32::new_clamped(self.alpha() + (other.alpha() - self.alpha()) * t),
        }
    }

    /// Converts into `ColorU8`.
    pub fn to_color_u8(&self) -> ColorU8 {
        ColorU8::from_rgba(
            (self.red() * 255.0 + 0.5) as u8,
            (self.green() * 255.0 + 0.5) as u8,
            (self.blue() * 255.0 + 0.5) as u8,
            (self.alpha() * 255.0 + 0.5) as u8,
        )
    }

    /// Converts into a premultiplied `PremultipliedColorU8`.
    pub fn premultiply_u8(&self) -> PremultipliedColorU8 {
        let a = self.alpha();
        PremultipliedColorU8::from_rgba_unchecked(
            (self.red() * a * 255.0 + 0.5) as u8,
            (self.green() * a * 255.0 + 0.5) as u8,
            (self.blue() * a * 255.0 + 0.5) as u8,
            (a * 255.0 + 0.5) as u8,
        )
    }
}

#[inline]
fn normalize_u8(n: u8) -> NormalizedF32 {
    NormalizedF32::new_clamped(n as f32 / 255.0)
}

/// Return a*b/255, rounding any fractional bits.
pub fn premultiply_u8(c: u8, a: u8) -> u8 {
    let prod = u32::from(c) * u32::from(a) + 128;
    ((prod + (prod >> 8)) >> 8) as u8
}

#[inline]
const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | (r as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiply() {
        assert_eq!(
            ColorU8::from_rgba(10, 20, 30, 40).premultiply(),
            PremultipliedColorU8::from_rgba_unchecked(2, 3, 5, 40)
        );
        assert_eq!(
            ColorU8::from_rgba(10, 20, 30, 255).premultiply(),
            PremultipliedColorU8::from_rgba_unchecked(10, 20, 30, 255)
        );
    }

    #[test]
    fn demultiply_round_trips() {
        for a in 1..=255u8 {
            for c in [0u8, 1, 7, 120, 254] {
                if c > a {
                    continue;
                }
                let p = PremultipliedColorU8::from_rgba_unchecked(c, c, c, a);
                assert_eq!(p.demultiply().premultiply(), p, "a={} c={}", a, c);
            }
        }
    }

    #[test]
    fn lerp_uses_straight_alpha() {
        let red = Color::from_rgba8(255, 0, 0, 255);
        let transparent_blue = Color::from_rgba8(0, 0, 255, 0);
        let mid = red.lerp(transparent_blue, 0.5);
        // The blue channel survives even though the endpoint is transparent.
        assert!((mid.blue() - 0.5).abs() < 1e-6);
        assert!((mid.alpha() - 0.5).abs() < 1e-6);
    }
}
