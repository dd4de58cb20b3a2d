// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use tiny_canvas_path::{Point, Scalar, Transform};

use crate::color::Color;
use crate::error::CanvasError;
use crate::shaders::gradient::{checked_stop, GradientStop, StopSampler};

/// A two-circle radial gradient paint source.
///
/// Follows the HTML5 `createRadialGradient` model: the color at a point is
/// taken from the outermost circle of the expanding family
/// `C(t) = lerp(c0, c1, t)`, `r(t) = lerp(r0, r1, t)` that passes through
/// it. Points outside every circle with a non-negative radius are
/// transparent.
#[derive(Clone, Debug)]
pub struct RadialGradient {
    start: Point,
    start_radius: f32,
    end: Point,
    end_radius: f32,
    stops: Vec<GradientStop>,
}

impl RadialGradient {
    /// Creates a new radial gradient between two circles, without any stops.
    pub fn new(x0: f32, y0: f32, r0: f32, x1: f32, y1: f32, r1: f32) -> Self {
        RadialGradient {
            start: Point::from_xy(x0, y0),
            start_radius: r0,
            end: Point::from_xy(x1, y1),
            end_radius: r1,
            stops: Vec::new(),
        }
    }

    /// Adds a color stop.
    ///
    /// Stops are kept in insertion order; at equal offsets the stop added
    /// later wins.
    pub fn add_color_stop(&mut self, offset: f32, color: Color) -> Result<(), CanvasError> {
        self.stops.push(checked_stop(offset, color)?);
        Ok(())
    }

    pub(crate) fn prepare(&self, ts: Transform) -> Option<PreparedRadialGradient> {
        if self.start_radius < 0.0 || self.end_radius < 0.0 {
            return None;
        }

        if !self.start.is_finite()
            || !self.end.is_finite()
            || !self.start_radius.is_finite()
            || !self.end_radius.is_finite()
        {
            return None;
        }

        // Identical circles expand nowhere.
        if self.start == self.end && self.start_radius == self.end_radius {
            return None;
        }

        let inv = ts.invert()?;
        let sampler = StopSampler::new(&self.stops)?;

        let cd = self.end - self.start;
        let dr = self.end_radius - self.start_radius;

        Some(PreparedRadialGradient {
            inv,
            start: self.start,
            start_radius: self.start_radius,
            cd,
            dr,
            a: cd.dot(cd) - dr.sqr(),
            sampler,
        })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PreparedRadialGradient {
    inv: Transform,
    start: Point,
    start_radius: f32,
    cd: Point,
    dr: f32,
    a: f32,
    sampler: StopSampler,
}

impl PreparedRadialGradient {
    pub fn sample(&self, x: f32, y: f32) -> Color {
        let p = self.inv.map_point(Point::from_xy(x, y));
        let f = p - self.start;

        // |f - t*cd| = r0 + t*dr, expanded into a*t^2 - 2*b*t + c = 0.
        let b = f.dot(self.cd) + self.start_radius * self.dr;
        let c = f.dot(f) - self.start_radius.sqr();

        let t = if self.a.abs() <= 1e-6 {
            // The circle family degenerates into a linear equation.
            if b.abs() <= 1e-12 {
                return Color::TRANSPARENT;
            }
            c / (2.0 * b)
        } else {
            let discriminant = b.sqr() - self.a * c;
            if discriminant < 0.0 {
                return Color::TRANSPARENT;
            }
            let sqrt_d = discriminant.sqrt();
            let t1 = (b + sqrt_d) / self.a;
            let t2 = (b - sqrt_d) / self.a;
            // Prefer the larger root: the outermost circle wins.
            let (t_hi, t_lo) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };
            if self.start_radius + t_hi * self.dr >= 0.0 {
                t_hi
            } else if self.start_radius + t_lo * self.dr >= 0.0 {
                t_lo
            } else {
                return Color::TRANSPARENT;
            }
        };

        if self.start_radius + t * self.dr < 0.0 {
            return Color::TRANSPARENT;
        }

        self.sampler.sample(t.bound(0.0, 1.0))
    }
}
