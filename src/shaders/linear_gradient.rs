// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use tiny_canvas_path::{Point, Scalar, Transform};

use crate::color::Color;
use crate::error::CanvasError;
use crate::shaders::gradient::{checked_stop, GradientStop, StopSampler};

/// A linear gradient paint source.
///
/// Defined in user space; the transform active at draw time decides where
/// it lands on the surface.
#[derive(Clone, Debug)]
pub struct LinearGradient {
    start: Point,
    end: Point,
    stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Creates a new linear gradient between two points, without any stops.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        LinearGradient {
            start: Point::from_xy(x0, y0),
            end: Point::from_xy(x1, y1),
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

    pub(crate) fn prepare(&self, ts: Transform) -> Option<PreparedLinearGradient> {
        let inv = ts.invert()?;
        let sampler = StopSampler::new(&self.stops)?;

        let d = self.end - self.start;
        let len_sqd = d.dot(d);
        if !len_sqd.is_finite() || len_sqd.is_nearly_zero() {
            // A degenerate gradient paints nothing.
            return None;
        }

        Some(PreparedLinearGradient {
            inv,
            start: self.start,
            dir: d,
            inv_len_sqd: len_sqd.invert(),
            sampler,
        })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PreparedLinearGradient {
    inv: Transform,
    start: Point,
    dir: Point,
    inv_len_sqd: f32,
    sampler: StopSampler,
}

impl PreparedLinearGradient {
    pub fn sample(&self, x: f32, y: f32) -> Color {
        let p = self.inv.map_point(Point::from_xy(x, y));
        let t = (p - self.start).dot(self.dir) * self.inv_len_sqd;
        self.sampler.sample(t)
    }
}
