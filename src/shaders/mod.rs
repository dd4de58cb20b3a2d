// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

mod conic_gradient;
mod gradient;
mod linear_gradient;
mod pattern;
mod radial_gradient;

pub use conic_gradient::ConicGradient;
pub use gradient::GradientStop;
pub use linear_gradient::LinearGradient;
pub use pattern::{Pattern, RepeatMode};
pub use radial_gradient::RadialGradient;

use tiny_canvas_path::Transform;

use crate::color::Color;

/// A paint source: the color(s) for what is being drawn.
///
/// Expressed as a tagged union with a single sampling operation, rather
/// than a trait object, since the set of sources is closed.
#[derive(Clone, Debug)]
pub enum Shader {
    /// A solid color.
    SolidColor(Color),
    /// A linear gradient.
    LinearGradient(LinearGradient),
    /// A radial gradient.
    RadialGradient(RadialGradient),
    /// A conic gradient.
    ConicGradient(ConicGradient),
    /// An image pattern.
    Pattern(Pattern),
}

impl Shader {
    /// Resolves the shader against the transform active at draw time.
    ///
    /// Returns `None` when the shader cannot produce any color: a gradient
    /// without stops, degenerate geometry, or a non-invertible transform.
    /// In that case the draw paints nothing.
    pub(crate) fn prepare(&self, ts: Transform) -> Option<PreparedShader> {
        match self {
            Shader::SolidColor(color) => Some(PreparedShader::Solid(*color)),
            Shader::LinearGradient(g) => {
                let p = g.prepare(ts);
                if p.is_none() {
                    log::warn!("a degenerate linear gradient will not be rendered");
                }
                p.map(PreparedShader::Linear)
            }
            Shader::RadialGradient(g) => {
                let p = g.prepare(ts);
                if p.is_none() {
                    log::warn!("a degenerate radial gradient will not be rendered");
                }
                p.map(PreparedShader::Radial)
            }
            Shader::ConicGradient(g) => g.prepare(ts).map(PreparedShader::Conic),
            Shader::Pattern(p) => p.prepare(ts).map(PreparedShader::Pattern),
        }
    }
}

impl From<Color> for Shader {
    fn from(color: Color) -> Self {
        Shader::SolidColor(color)
    }
}

/// A shader resolved for one draw call.
///
/// Samples colors at device-space positions; pixel centers are expected,
/// i.e. `x + 0.5, y + 0.5`.
#[derive(Clone, Debug)]
pub(crate) enum PreparedShader {
    Solid(Color),
    Linear(linear_gradient::PreparedLinearGradient),
    Radial(radial_gradient::PreparedRadialGradient),
    Conic(conic_gradient::PreparedConicGradient),
    Pattern(pattern::PreparedPattern),
}

impl PreparedShader {
    /// Returns the non-premultiplied color at a device-space position.
    pub fn sample(&self, x: f32, y: f32) -> Color {
        match self {
            PreparedShader::Solid(color) => *color,
            PreparedShader::Linear(g) => g.sample(x, y),
            PreparedShader::Radial(g) => g.sample(x, y),
            PreparedShader::Conic(g) => g.sample(x, y),
            PreparedShader::Pattern(p) => p.sample(x, y),
        }
    }

    /// Checks whether every sampled color has the same alpha.
    ///
    /// Solid colors do; the shadow pass uses this to avoid re-sampling.
    pub fn constant_alpha(&self) -> Option<f32> {
        match self {
            PreparedShader::Solid(color) => Some(color.alpha()),
            _ => None,
        }
    }
}
