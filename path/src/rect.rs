// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{Point, SCALAR_MAX};

/// A rectangle defined by left, top, right and bottom edges.
///
/// Can have zero width and/or height. But not a negative one.
///
/// # Guarantees
///
/// - All values are finite.
/// - Left edge is <= right.
/// - Top edge is <= bottom.
/// - Width and height are <= f32::MAX.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Rect {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl Rect {
    /// Creates new `Rect`.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Option<Self> {
        if left <= right && top <= bottom {
            let r = Rect {
                left,
                top,
                right,
                bottom,
            };
            r.is_valid().then(|| r)
        } else {
            None
        }
    }

    /// Creates new `Rect`.
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Option<Self> {
        Rect::from_ltrb(x, y, w + x, h + y)
    }

    fn is_valid(&self) -> bool {
        let all_finite = self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite();

        all_finite && self.width() <= SCALAR_MAX && self.height() <= SCALAR_MAX
    }

    /// Returns the left edge.
    pub fn left(&self) -> f32 {
        self.left
    }

    /// Returns the top edge.
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Returns the right edge.
    pub fn right(&self) -> f32 {
        self.right
    }

    /// Returns the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Returns rect's width.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Returns rect's height.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Creates a Rect from Point array.
    ///
    /// Returns None if count is zero or if Point array contains an infinity or NaN.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min = points[0];
        let mut max = points[0];
        // `min`/`max` silently drop NaN operands, so track finiteness separately.
        let mut all_finite = true;
        for p in points {
            all_finite &= p.is_finite();
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        if all_finite {
            Rect::from_ltrb(min.x, min.y, max.x, max.y)
        } else {
            None
        }
    }

    /// Returns an intersection of two rectangles.
    ///
    /// Returns None otherwise.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);

        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);

        Rect::from_ltrb(left, top, right, bottom)
    }
}
