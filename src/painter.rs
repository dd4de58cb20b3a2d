// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::blend_mode::CompositeOperation;
use crate::color::PremultipliedColorU8;
use crate::int_rect::IntRect;
use crate::mask::Mask;
use crate::pixmap::Pixmap;
use crate::shaders::PreparedShader;

/// Composites a coverage mask through a paint source onto the pixmap.
///
/// `coverage_bounds` is the rasterizer's dirty rect; `coverage_scale`
/// additionally scales the coverage, which is how sub-pixel-wide strokes
/// keep their relative intensity.
///
/// Local operations touch only pixels inside `coverage_bounds`. Global
/// operations (see [`CompositeOperation::is_global`]) walk the whole
/// clip region, because zero source alpha still rewrites the destination
/// there. Pixels where the clip mask is zero are never touched.
pub(crate) fn composite_mask(
    pixmap: &mut Pixmap,
    coverage: &Mask,
    coverage_bounds: Option<IntRect>,
    coverage_scale: f32,
    shader: &PreparedShader,
    opacity: f32,
    blend_mode: CompositeOperation,
    clip: Option<&Mask>,
) {
    let surface = match IntRect::from_xywh(0, 0, pixmap.width(), pixmap.height()) {
        Some(r) => r,
        None => return,
    };

    let region = if blend_mode.is_global() {
        surface
    } else {
        match coverage_bounds.and_then(|b| b.intersect(&surface)) {
            Some(r) => r,
            None => return,
        }
    };

    let solid = match shader {
        PreparedShader::Solid(c) => Some(*c),
        _ => None,
    };

    let opacity = opacity.clamp(0.0, 1.0);
    let width = pixmap.width() as usize;
    let pixels = pixmap.pixels_mut();

    for y in region.top()..region.bottom() {
        for x in region.left()..region.right() {
            let idx = y as usize * width + x as usize;

            let m = match clip {
                Some(clip_mask) => {
                    let m = clip_mask.data()[idx];
                    if m == 0 {
                        // Outside the clip: untouched.
                        continue;
                    }
                    m as f32 / 255.0
                }
                None => 1.0,
            };

            let cov = coverage.data()[idx] as f32 / 255.0 * coverage_scale;
            if cov <= 0.0 && !blend_mode.is_global() {
                continue;
            }

            let color = match solid {
                Some(c) => c,
                None => shader.sample(x as f32 + 0.5, y as f32 + 0.5),
            };

            let sa_factor = color.alpha() * cov.min(1.0) * opacity * m;
            let s = [
                color.red() * sa_factor,
                color.green() * sa_factor,
                color.blue() * sa_factor,
                sa_factor,
            ];

            let d_px = pixels[idx];
            let d = [
                d_px.red() as f32 / 255.0,
                d_px.green() as f32 / 255.0,
                d_px.blue() as f32 / 255.0,
                d_px.alpha() as f32 / 255.0,
            ];

            let o = blend_mode.blend(s, d);
            pixels[idx] = PremultipliedColorU8::from_rgba_unchecked(
                (o[0] * 255.0 + 0.5) as u8,
                (o[1] * 255.0 + 0.5) as u8,
                (o[2] * 255.0 + 0.5) as u8,
                (o[3] * 255.0 + 0.5) as u8,
            );
        }
    }
}
