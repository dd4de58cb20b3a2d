// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use tiny_canvas_path::{Point, Transform};

use crate::color::Color;
use crate::error::CanvasError;
use crate::shaders::gradient::{checked_stop, GradientStop, StopSampler};

const TAU: f32 = std::f32::consts::PI * 2.0;

/// A conic (angular sweep) gradient paint source.
///
/// The parameter runs from 0 at `start_angle` once around the center,
/// increasing clockwise in the y-down coordinate system, which matches
/// `createConicGradient`.
#[derive(Clone, Debug)]
pub struct ConicGradient {
    start_angle: f32,
    center: Point,
    stops: Vec<GradientStop>,
}

impl ConicGradient {
    /// Creates a new conic gradient, without any stops.
    pub fn new(start_angle: f32, cx: f32, cy: f32) -> Self {
        ConicGradient {
            start_angle,
            center: Point::from_xy(cx, cy),
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

    pub(crate) fn prepare(&self, ts: Transform) -> Option<PreparedConicGradient> {
        if !self.start_angle.is_finite() || !self.center.is_finite() {
            return None;
        }

        let inv = ts.invert()?;
        let sampler = StopSampler::new(&self.stops)?;

        Some(PreparedConicGradient {
            inv,
            center: self.center,
            start_angle: self.start_angle,
            sampler,
        })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PreparedConicGradient {
    inv: Transform,
    center: Point,
    start_angle: f32,
    sampler: StopSampler,
}

impl PreparedConicGradient {
    pub fn sample(&self, x: f32, y: f32) -> Color {
        let p = self.inv.map_point(Point::from_xy(x, y));
        let d = p - self.center;

        let mut angle = d.y.atan2(d.x) - self.start_angle;
        angle %= TAU;
        if angle < 0.0 {
            angle += TAU;
        }

        self.sampler.sample(angle / TAU)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrants() {
        let mut g = ConicGradient::new(0.0, 50.0, 50.0);
        g.add_color_stop(0.0, Color::from_rgba8(0, 0, 0, 255)).unwrap();
        g.add_color_stop(1.0, Color::from_rgba8(255, 255, 255, 255))
            .unwrap();

        let p = g.prepare(Transform::identity()).unwrap();

        // t = 0 towards +x.
        assert!(p.sample(100.0, 50.0).red() < 0.01);
        // A quarter turn clockwise (y-down) is +y.
        assert!((p.sample(50.0, 100.0).red() - 0.25).abs() < 0.01);
        // Three quarters.
        assert!((p.sample(50.0, 0.0).red() - 0.75).abs() < 0.01);
    }
}
