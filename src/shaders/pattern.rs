// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::sync::Arc;

use tiny_canvas_path::{Point, Transform};

use crate::color::Color;
use crate::pixmap::Pixmap;

/// How a pattern tiles the plane outside its image.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum RepeatMode {
    /// Tiles in both directions.
    Repeat,
    /// Tiles horizontally only.
    RepeatX,
    /// Tiles vertically only.
    RepeatY,
    /// Draws the image once.
    NoRepeat,
    /// Tiles in both directions, flipping every other tile.
    Mirror,
}

impl Default for RepeatMode {
    fn default() -> Self {
        RepeatMode::Repeat
    }
}

/// An image-based paint source.
///
/// The image is sampled with nearest-neighbor filtering. An own transform
/// positions the pattern in user space, on top of the transform active at
/// draw time.
#[derive(Clone, Debug)]
pub struct Pattern {
    image: Arc<Pixmap>,
    repeat: RepeatMode,
    transform: Transform,
}

impl Pattern {
    /// Creates a new pattern from an image.
    pub fn new(image: Pixmap, repeat: RepeatMode) -> Self {
        Pattern {
            image: Arc::new(image),
            repeat,
            transform: Transform::identity(),
        }
    }

    /// Sets the pattern's own transform.
    pub fn set_transform(&mut self, ts: Transform) {
        self.transform = ts;
    }

    pub(crate) fn prepare(&self, ts: Transform) -> Option<PreparedPattern> {
        // device -> user -> pattern image space
        let inv = ts.pre_concat(&self.transform)?.invert()?;
        Some(PreparedPattern {
            image: self.image.clone(),
            repeat: self.repeat,
            inv,
        })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PreparedPattern {
    image: Arc<Pixmap>,
    repeat: RepeatMode,
    inv: Transform,
}

impl PreparedPattern {
    pub fn sample(&self, x: f32, y: f32) -> Color {
        let p = self.inv.map_point(Point::from_xy(x, y));
        if !p.x.is_finite() || !p.y.is_finite() {
            return Color::TRANSPARENT;
        }

        let w = self.image.width() as i64;
        let h = self.image.height() as i64;

        let ix = p.x.floor() as i64;
        let iy = p.y.floor() as i64;

        let (tile_x, tile_y) = match self.repeat {
            RepeatMode::Repeat => (wrap(ix, w), wrap(iy, h)),
            RepeatMode::RepeatX => (wrap(ix, w), iy),
            RepeatMode::RepeatY => (ix, wrap(iy, h)),
            RepeatMode::NoRepeat => (ix, iy),
            RepeatMode::Mirror => (mirror(ix, w), mirror(iy, h)),
        };

        if tile_x < 0 || tile_x >= w || tile_y < 0 || tile_y >= h {
            return Color::TRANSPARENT;
        }

        match self.image.pixel(tile_x as u32, tile_y as u32) {
            Some(pixel) => {
                let c = pixel.demultiply();
                Color::from_rgba8(c.red(), c.green(), c.blue(), c.alpha())
            }
            None => Color::TRANSPARENT,
        }
    }
}

fn wrap(v: i64, len: i64) -> i64 {
    v.rem_euclid(len)
}

fn mirror(v: i64, len: i64) -> i64 {
    let m = v.rem_euclid(len * 2);
    if m >= len {
        len * 2 - 1 - m
    } else {
        m
    }
}
