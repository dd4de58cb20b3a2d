// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::Color;
use crate::int_rect::IntRect;
use crate::mask::Mask;
use crate::shaders::PreparedShader;

/// Shadow parameters, as held by the drawing state.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Shadow {
    /// The shadow color.
    ///
    /// Default: transparent black, which disables the shadow.
    pub color: Color,

    /// Horizontal offset in device-independent units.
    pub offset_x: f32,

    /// Vertical offset.
    pub offset_y: f32,

    /// The blur amount. The blur approximates a Gaussian with a standard
    /// deviation of half this value.
    pub blur: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Shadow {
            color: Color::TRANSPARENT,
            offset_x: 0.0,
            offset_y: 0.0,
            blur: 0.0,
        }
    }
}

impl Shadow {
    /// Whether drawing should run the shadow pass at all.
    pub fn is_enabled(&self) -> bool {
        !self.color.is_transparent()
            && (self.blur > 0.0 || self.offset_x != 0.0 || self.offset_y != 0.0)
    }
}

/// Builds the blurred shadow coverage for a draw.
///
/// Copies the source coverage, scaled by the paint's per-pixel alpha, into
/// `out` at the shadow offset and blurs it with three box passes whose
/// combined kernel approximates a Gaussian with sigma = blur / 2.
///
/// Offsets are not snapped to the pixel grid: a fractional offset blends
/// the four integer-shifted copies of the coverage, weighted bilinearly,
/// so a half-pixel offset splits evenly across neighboring pixels.
///
/// Returns the bounding rectangle of the shadow coverage.
pub(crate) fn prepare_shadow_mask(
    coverage: &Mask,
    coverage_bounds: IntRect,
    shadow: &Shadow,
    shader: &PreparedShader,
    out: &mut Mask,
    scratch: &mut Mask,
) -> Option<IntRect> {
    debug_assert!(shadow.is_enabled());

    out.clear();

    let surface = IntRect::from_xywh(0, 0, coverage.width(), coverage.height())?;

    let dx = shadow.offset_x.floor();
    let dy = shadow.offset_y.floor();
    let fx = shadow.offset_x - dx;
    let fy = shadow.offset_y - dy;
    let dx = dx as i32;
    let dy = dy as i32;

    // A fractional offset spills one extra pixel to the right/bottom.
    let shifted = IntRect::from_xywh(
        coverage_bounds.x().checked_add(dx)?,
        coverage_bounds.y().checked_add(dy)?,
        coverage_bounds.width().checked_add((fx > 0.0) as u32)?,
        coverage_bounds.height().checked_add((fy > 0.0) as u32)?,
    )?;

    let taps = [
        ((0, 0), (1.0 - fx) * (1.0 - fy)),
        ((1, 0), fx * (1.0 - fy)),
        ((0, 1), (1.0 - fx) * fy),
        ((1, 1), fx * fy),
    ];

    let alpha = shader.constant_alpha();

    if let Some(visible) = shifted.intersect(&surface) {
        let width = coverage.width() as usize;
        for y in visible.top()..visible.bottom() {
            for x in visible.left()..visible.right() {
                let mut acc = 0.0;
                for &((ox, oy), weight) in &taps {
                    if weight <= 0.0 {
                        continue;
                    }

                    let sx = x - dx - ox;
                    let sy = y - dy - oy;
                    if sx < 0 || sy < 0 {
                        continue;
                    }

                    let cov = coverage.coverage_at(sx as u32, sy as u32);
                    if cov == 0 {
                        continue;
                    }

                    let a = match alpha {
                        Some(a) => a,
                        None => shader.sample(sx as f32 + 0.5, sy as f32 + 0.5).alpha(),
                    };

                    acc += weight * cov as f32 * a;
                }

                if acc > 0.0 {
                    out.data_mut()[y as usize * width + x as usize] = (acc + 0.5) as u8;
                }
            }
        }
    } else if shadow.blur <= 0.0 {
        return None;
    }

    let sigma = shadow.blur * 0.5;
    let mut inflate = 0i32;
    if sigma > 0.0 {
        let mut total_radius = 0usize;
        for size in box_sizes_for_gauss(sigma) {
            let radius = (size - 1) / 2;
            total_radius += radius;
            if radius > 0 {
                box_blur(out, scratch, radius);
            }
        }
        inflate = total_radius as i32;
    }

    let blurred = IntRect::from_ltrb(
        shifted.left().saturating_sub(inflate),
        shifted.top().saturating_sub(inflate),
        shifted.right().saturating_add(inflate),
        shifted.bottom().saturating_add(inflate),
    )?;
    blurred.intersect(&surface)
}

// Box kernel sizes whose triple application approximates a Gaussian.
// All sizes are odd, so each box is symmetric around its center.
fn box_sizes_for_gauss(sigma: f32) -> [usize; 3] {
    let n = 3.0f32;
    let w_ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i32;
    if wl % 2 == 0 {
        wl -= 1;
    }
    wl = wl.max(1);
    let wu = wl + 2;

    let m_ideal = (12.0 * sigma * sigma - n * (wl * wl) as f32 - 4.0 * n * wl as f32 - 3.0 * n)
        / (-4.0 * wl as f32 - 4.0);
    let m = m_ideal.round().clamp(0.0, n) as usize;

    let mut sizes = [0usize; 3];
    for (i, size) in sizes.iter_mut().enumerate() {
        *size = if i < m { wl as usize } else { wu as usize };
    }
    sizes
}

// One separable box blur pass over the whole mask,
// first horizontally into `scratch`, then vertically back.
fn box_blur(mask: &mut Mask, scratch: &mut Mask, radius: usize) {
    let w = mask.width() as usize;
    let h = mask.height() as usize;
    let window = (radius * 2 + 1) as u32;

    debug_assert_eq!(scratch.width() as usize, w);
    debug_assert_eq!(scratch.height() as usize, h);

    // Horizontal.
    {
        let src = mask.data();
        let dst = scratch.data_mut();
        for y in 0..h {
            let row = &src[y * w..(y + 1) * w];
            let mut sum: u32 = 0;
            for x in 0..w.min(radius + 1) {
                sum += row[x] as u32;
            }

            for x in 0..w {
                dst[y * w + x] = ((sum + window / 2) / window) as u8;

                let add = x + radius + 1;
                if add < w {
                    sum += row[add] as u32;
                }
                if x >= radius {
                    sum -= row[x - radius] as u32;
                }
            }
        }
    }

    // Vertical.
    {
        let src = scratch.data();
        let dst = mask.data_mut();
        for x in 0..w {
            let mut sum: u32 = 0;
            for y in 0..h.min(radius + 1) {
                sum += src[y * w + x] as u32;
            }

            for y in 0..h {
                dst[y * w + x] = ((sum + window / 2) / window) as u8;

                let add = y + radius + 1;
                if add < h {
                    sum += src[add * w + x] as u32;
                }
                if y >= radius {
                    sum -= src[(y - radius) * w + x] as u32;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaders::Shader;
    use tiny_canvas_path::Transform;

    #[test]
    fn disabled_states() {
        let mut shadow = Shadow::default();
        assert!(!shadow.is_enabled());

        shadow.color = Color::BLACK;
        assert!(!shadow.is_enabled());

        shadow.offset_x = 2.0;
        assert!(shadow.is_enabled());

        shadow.offset_x = 0.0;
        shadow.blur = 3.0;
        assert!(shadow.is_enabled());
    }

    #[test]
    fn offset_only_shifts_coverage() {
        let mut coverage = Mask::new(20, 20);
        coverage.data_mut()[5 * 20 + 5] = 255;
        let bounds = IntRect::from_xywh(5, 5, 1, 1).unwrap();

        let shadow = Shadow {
            color: Color::BLACK,
            offset_x: 3.0,
            offset_y: 2.0,
            blur: 0.0,
        };

        let shader = Shader::SolidColor(Color::BLACK);
        let prepared = shader.prepare(Transform::identity()).unwrap();

        let mut out = Mask::new(20, 20);
        let mut scratch = Mask::new(20, 20);
        let out_bounds =
            prepare_shadow_mask(&coverage, bounds, &shadow, &prepared, &mut out, &mut scratch)
                .unwrap();

        assert_eq!(out_bounds, IntRect::from_xywh(8, 7, 1, 1).unwrap());
        assert_eq!(out.coverage_at(8, 7), 255);
        assert_eq!(out.coverage_at(5, 5), 0);
    }

    #[test]
    fn fractional_offset_splits_between_pixels() {
        let mut coverage = Mask::new(20, 20);
        coverage.data_mut()[5 * 20 + 5] = 255;
        let bounds = IntRect::from_xywh(5, 5, 1, 1).unwrap();

        let shadow = Shadow {
            color: Color::BLACK,
            offset_x: 2.5,
            offset_y: 0.0,
            blur: 0.0,
        };

        let shader = Shader::SolidColor(Color::BLACK);
        let prepared = shader.prepare(Transform::identity()).unwrap();

        let mut out = Mask::new(20, 20);
        let mut scratch = Mask::new(20, 20);
        let out_bounds =
            prepare_shadow_mask(&coverage, bounds, &shadow, &prepared, &mut out, &mut scratch)
                .unwrap();

        // Half a pixel each onto columns 7 and 8, nothing snapped.
        assert_eq!(out_bounds, IntRect::from_xywh(7, 5, 2, 1).unwrap());
        assert_eq!(out.coverage_at(7, 5), 128);
        assert_eq!(out.coverage_at(8, 5), 128);
        assert_eq!(out.coverage_at(6, 5), 0);
        assert_eq!(out.coverage_at(9, 5), 0);
    }

    #[test]
    fn negative_fractional_offset() {
        let mut coverage = Mask::new(20, 20);
        coverage.data_mut()[5 * 20 + 5] = 255;
        let bounds = IntRect::from_xywh(5, 5, 1, 1).unwrap();

        let shadow = Shadow {
            color: Color::BLACK,
            offset_x: -1.25,
            offset_y: 0.0,
            blur: 0.0,
        };

        let shader = Shader::SolidColor(Color::BLACK);
        let prepared = shader.prepare(Transform::identity()).unwrap();

        let mut out = Mask::new(20, 20);
        let mut scratch = Mask::new(20, 20);
        prepare_shadow_mask(&coverage, bounds, &shadow, &prepared, &mut out, &mut scratch)
            .unwrap();

        // -1.25 lands a quarter of the way from column 4 towards column 3.
        assert_eq!(out.coverage_at(3, 5), 64);
        assert_eq!(out.coverage_at(4, 5), 191);
        assert_eq!(out.coverage_at(5, 5), 0);
    }

    #[test]
    fn blur_spreads_the_coverage() {
        let mut coverage = Mask::new(31, 31);
        coverage.data_mut()[15 * 31 + 15] = 255;
        let bounds = IntRect::from_xywh(15, 15, 1, 1).unwrap();

        let shadow = Shadow {
            color: Color::BLACK,
            offset_x: 0.0,
            offset_y: 0.0,
            blur: 4.0,
        };

        let shader = Shader::SolidColor(Color::BLACK);
        let prepared = shader.prepare(Transform::identity()).unwrap();

        let mut out = Mask::new(31, 31);
        let mut scratch = Mask::new(31, 31);
        prepare_shadow_mask(&coverage, bounds, &shadow, &prepared, &mut out, &mut scratch)
            .unwrap();

        // The center is no longer fully opaque and neighbors picked up
        // some of it.
        assert!(out.coverage_at(15, 15) < 100);
        assert!(out.coverage_at(13, 15) > 0);
        assert!(out.coverage_at(15, 18) > 0);
    }

    #[test]
    fn paint_alpha_scales_the_shadow() {
        let mut coverage = Mask::new(10, 10);
        coverage.data_mut()[3 * 10 + 3] = 255;
        let bounds = IntRect::from_xywh(3, 3, 1, 1).unwrap();

        let shadow = Shadow {
            color: Color::BLACK,
            offset_x: 1.0,
            offset_y: 0.0,
            blur: 0.0,
        };

        let shader = Shader::SolidColor(Color::from_rgba(0.0, 0.0, 0.0, 0.5).unwrap());
        let prepared = shader.prepare(Transform::identity()).unwrap();

        let mut out = Mask::new(10, 10);
        let mut scratch = Mask::new(10, 10);
        prepare_shadow_mask(&coverage, bounds, &shadow, &prepared, &mut out, &mut scratch)
            .unwrap();

        let v = out.coverage_at(4, 3);
        assert!((v as i32 - 128).abs() <= 1, "v = {}", v);
    }
}
