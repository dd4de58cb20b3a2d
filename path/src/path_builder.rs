// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use crate::floating_point::FLOAT_PI;
use crate::path::PathVerb;
use crate::scalar::Scalar;
use crate::{Path, Point, Rect};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use crate::NoStdFloat;

const FLOAT_TAU: f32 = FLOAT_PI * 2.0;

// Control point offset for a cubic approximation of a quarter circle,
// 4/3 * (sqrt(2) - 1).
const CUBIC_ARC_FACTOR: f32 = 0.5522847498;

/// A path builder.
///
/// Records HTML5-Canvas-style drawing commands. Arcs, ellipses and rounded
/// rectangles are lowered to cubic curves immediately, so the finished
/// [`Path`] stores only moves, lines, quads, cubics and closes.
#[derive(Clone, Default, Debug)]
pub struct PathBuilder {
    pub(crate) verbs: Vec<PathVerb>,
    pub(crate) points: Vec<Point>,
    pub(crate) last_move_to_index: usize,
    pub(crate) move_to_required: bool,
}

impl PathBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        PathBuilder {
            verbs: Vec::new(),
            points: Vec::new(),
            last_move_to_index: 0,
            move_to_required: true,
        }
    }

    /// Creates a new builder with a specified capacity.
    ///
    /// Number of points depends on a verb type:
    ///
    /// - Move - 1
    /// - Line - 1
    /// - Quad - 2
    /// - Cubic - 3
    /// - Close - 0
    pub fn with_capacity(verbs_capacity: usize, points_capacity: usize) -> Self {
        PathBuilder {
            verbs: Vec::with_capacity(verbs_capacity),
            points: Vec::with_capacity(points_capacity),
            last_move_to_index: 0,
            move_to_required: true,
        }
    }

    pub(crate) fn from_parts(verbs: Vec<PathVerb>, points: Vec<Point>) -> Self {
        debug_assert!(verbs.is_empty() && points.is_empty());
        PathBuilder {
            verbs,
            points,
            last_move_to_index: 0,
            move_to_required: true,
        }
    }

    /// Returns the current number of segments in the builder.
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Checks if the builder has any segments added.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Adds beginning of a subpath.
    ///
    /// Multiple continuous MoveTo segments are not allowed.
    /// If the previous segment was also MoveTo, it will be overwritten with the current one.
    pub fn move_to(&mut self, x: f32, y: f32) {
        if let Some(PathVerb::Move) = self.verbs.last() {
            let last_idx = self.points.len() - 1;
            self.points[last_idx] = Point::from_xy(x, y);
        } else {
            self.last_move_to_index = self.points.len();
            self.move_to_required = false;

            self.verbs.push(PathVerb::Move);
            self.points.push(Point::from_xy(x, y));
        }
    }

    fn inject_move_to_if_needed(&mut self) {
        if self.move_to_required {
            match self.points.get(self.last_move_to_index).cloned() {
                Some(p) => self.move_to(p.x, p.y),
                None => self.move_to(0.0, 0.0),
            }
        }
    }

    /// Adds a line from the last point.
    ///
    /// - If `Path` is empty - adds Move(0, 0) first.
    /// - If `Path` ends with Close - adds Move(subpath_start) first.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.inject_move_to_if_needed();

        self.verbs.push(PathVerb::Line);
        self.points.push(Point::from_xy(x, y));
    }

    /// Adds a quad curve from the last point to `x`, `y`.
    ///
    /// - If `Path` is empty - adds Move(0, 0) first.
    /// - If `Path` ends with Close - adds Move(subpath_start) first.
    pub fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.inject_move_to_if_needed();

        self.verbs.push(PathVerb::Quad);
        self.points.push(Point::from_xy(x1, y1));
        self.points.push(Point::from_xy(x, y));
    }

    /// Adds a cubic curve from the last point to `x`, `y`.
    ///
    /// - If `Path` is empty - adds Move(0, 0) first.
    /// - If `Path` ends with Close - adds Move(subpath_start) first.
    pub fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.inject_move_to_if_needed();

        self.verbs.push(PathVerb::Cubic);
        self.points.push(Point::from_xy(x1, y1));
        self.points.push(Point::from_xy(x2, y2));
        self.points.push(Point::from_xy(x, y));
    }

    fn cubic_to_pt(&mut self, p1: Point, p2: Point, p: Point) {
        self.cubic_to(p1.x, p1.y, p2.x, p2.y, p.x, p.y);
    }

    /// Closes the current subpath.
    ///
    /// A closed subpath connects the first and the last Point
    /// with a line, forming a continuous loop.
    ///
    /// Does nothing when `Path` is empty or already closed.
    pub fn close(&mut self) {
        // don't add a close if it's the first verb or a repeat
        if !self.verbs.is_empty() {
            if self.verbs.last().cloned() != Some(PathVerb::Close) {
                self.verbs.push(PathVerb::Close);
            }
        }

        self.move_to_required = true;
    }

    /// Returns the last point if any.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().cloned()
    }

    /// Adds a rectangle subpath.
    ///
    /// Records the four corners as given, so negative width/height simply
    /// produce a subpath with the opposite winding, matching the HTML5
    /// `rect()` call.
    ///
    /// Does nothing when any value is not finite.
    pub fn push_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return;
        }

        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.close();
    }

    /// Adds a rounded rectangle subpath.
    ///
    /// `radii` holds 1 to 4 corner radii, expanded CSS-style:
    /// one value for all corners, two for top-left/bottom-right and
    /// top-right/bottom-left, three for top-left, top-right/bottom-left and
    /// bottom-right, four for each corner clockwise from top-left.
    /// Radii that together exceed a side are scaled down proportionally.
    ///
    /// Does nothing when any value is not finite, a radius is negative,
    /// or `radii` is empty or holds more than 4 values.
    pub fn push_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radii: &[f32]) {
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return;
        }

        if radii.is_empty() || radii.len() > 4 {
            return;
        }

        if radii.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return;
        }

        let (mut tl, mut tr, mut br, mut bl) = match *radii {
            [r] => (r, r, r, r),
            [r1, r2] => (r1, r2, r1, r2),
            [r1, r2, r3] => (r1, r2, r3, r2),
            [r1, r2, r3, r4] => (r1, r2, r3, r4),
            _ => unreachable!(),
        };

        // Negative sizes flip the rect; record it normalized.
        let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
        let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };

        // Scale the radii down when they overlap, keeping their ratios.
        let mut scale = 1.0f32;
        for &(sum, side) in &[(tl + tr, w), (bl + br, w), (tl + bl, h), (tr + br, h)] {
            if sum > side {
                scale = scale.min(side / sum);
            }
        }
        tl *= scale;
        tr *= scale;
        br *= scale;
        bl *= scale;

        let k = CUBIC_ARC_FACTOR;
        self.move_to(x + tl, y);
        self.line_to(x + w - tr, y);
        if tr > 0.0 {
            self.cubic_to(
                x + w - tr + k * tr,
                y,
                x + w,
                y + tr - k * tr,
                x + w,
                y + tr,
            );
        }
        self.line_to(x + w, y + h - br);
        if br > 0.0 {
            self.cubic_to(
                x + w,
                y + h - br + k * br,
                x + w - br + k * br,
                y + h,
                x + w - br,
                y + h,
            );
        }
        self.line_to(x + bl, y + h);
        if bl > 0.0 {
            self.cubic_to(
                x + bl - k * bl,
                y + h,
                x,
                y + h - bl + k * bl,
                x,
                y + h - bl,
            );
        }
        self.line_to(x, y + tl);
        if tl > 0.0 {
            self.cubic_to(x, y + tl - k * tl, x + tl - k * tl, y, x + tl, y);
        }
        self.close();
    }

    /// Adds a circular arc.
    ///
    /// Angles are in radians. The default direction is clockwise in the
    /// y-down screen coordinate system; `ccw` reverses it. A sweep of two
    /// full turns or more is clamped to a single full circle. A zero-length
    /// arc adds no curves, but still establishes the arc's start point.
    ///
    /// Does nothing when any value is not finite or the radius is negative.
    pub fn arc(&mut self, cx: f32, cy: f32, r: f32, start_angle: f32, end_angle: f32, ccw: bool) {
        self.ellipse(cx, cy, r, r, 0.0, start_angle, end_angle, ccw);
    }

    /// Adds an elliptical arc.
    ///
    /// Like [`arc`](Self::arc), with distinct x/y radii and an ellipse
    /// rotation in radians.
    pub fn ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        rotation: f32,
        start_angle: f32,
        end_angle: f32,
        ccw: bool,
    ) {
        let all_finite = cx.is_finite()
            && cy.is_finite()
            && rx.is_finite()
            && ry.is_finite()
            && rotation.is_finite()
            && start_angle.is_finite()
            && end_angle.is_finite();
        if !all_finite || rx < 0.0 || ry < 0.0 {
            return;
        }

        let sweep = arc_sweep(start_angle, end_angle, ccw);

        let (rot_sin, rot_cos) = (rotation.sin(), rotation.cos());
        let eval = |angle: f32| -> Point {
            let (x, y) = (rx * angle.cos(), ry * angle.sin());
            Point::from_xy(
                cx + x * rot_cos - y * rot_sin,
                cy + x * rot_sin + y * rot_cos,
            )
        };
        let derivative = |angle: f32| -> Point {
            let (x, y) = (-rx * angle.sin(), ry * angle.cos());
            Point::from_xy(x * rot_cos - y * rot_sin, x * rot_sin + y * rot_cos)
        };

        let start = eval(start_angle);
        if self.is_empty() {
            self.move_to(start.x, start.y);
        } else {
            self.line_to(start.x, start.y);
        }

        if sweep == 0.0 {
            return;
        }

        // Split into segments of at most a quarter turn.
        let segments = (sweep.abs() / (FLOAT_PI * 0.5)).ceil().max(1.0) as usize;
        let step = sweep / segments as f32;
        let k = 4.0 / 3.0 * (step * 0.25).tan();

        let mut a0 = start_angle;
        for _ in 0..segments {
            let a1 = a0 + step;
            let p0 = eval(a0);
            let p1 = eval(a1);
            let c1 = p0 + derivative(a0).scaled(k);
            let c2 = p1 - derivative(a1).scaled(k);
            self.cubic_to_pt(c1, c2, p1);
            a0 = a1;
        }
    }

    /// Adds an arc with the given radius, tangent to the two lines defined by
    /// the current point, `(x1, y1)` and `(x2, y2)`.
    ///
    /// Collinear points, a zero radius, or a missing current point degrade
    /// to a straight line towards `(x1, y1)`, matching the HTML5 `arcTo()`
    /// fallbacks.
    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, r: f32) {
        let all_finite =
            x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite() && r.is_finite();
        if !all_finite || r < 0.0 {
            return;
        }

        let p0 = match self.current_point() {
            Some(p) => p,
            None => {
                self.move_to(x1, y1);
                return;
            }
        };

        let p1 = Point::from_xy(x1, y1);
        let p2 = Point::from_xy(x2, y2);

        let mut v1 = p0 - p1;
        let mut v2 = p2 - p1;
        let cross = v1.cross(v2);

        if r == 0.0 || !v1.normalize() || !v2.normalize() || cross.is_nearly_zero() {
            self.line_to(x1, y1);
            return;
        }

        // Distance from the corner to each tangent point.
        let cos_angle = v1.dot(v2).bound(-1.0, 1.0);
        let half_angle = cos_angle.acos().half();
        let dist = r / half_angle.tan();

        let t1 = p1 + v1.scaled(dist);
        let t2 = p1 + v2.scaled(dist);

        let mut bisector = v1 + v2;
        if !bisector.normalize() {
            self.line_to(x1, y1);
            return;
        }
        let center = p1 + bisector.scaled(r / half_angle.sin());

        self.line_to(t1.x, t1.y);

        let a0 = (t1.y - center.y).atan2(t1.x - center.x);
        let a1 = (t2.y - center.y).atan2(t2.x - center.x);

        // The tangent arc always spans less than half a turn,
        // so take the shortest direction.
        let mut sweep = a1 - a0;
        if sweep > FLOAT_PI {
            sweep -= FLOAT_TAU;
        } else if sweep < -FLOAT_PI {
            sweep += FLOAT_TAU;
        }

        self.ellipse(center.x, center.y, r, r, 0.0, a0, a0 + sweep, sweep < 0.0);
    }

    // The point the next segment continues from. After a close this is the
    // start of the just-closed subpath.
    fn current_point(&self) -> Option<Point> {
        if self.move_to_required {
            self.points.get(self.last_move_to_index).cloned()
        } else {
            self.last_point()
        }
    }

    /// Reset the builder.
    ///
    /// Memory is not deallocated.
    pub fn clear(&mut self) {
        self.verbs.clear();
        self.points.clear();
        self.last_move_to_index = 0;
        self.move_to_required = true;
    }

    /// Finishes the builder and returns a `Path`.
    ///
    /// Returns `None` when `Path` is empty or has invalid bounds.
    pub fn finish(self) -> Option<Path> {
        if self.is_empty() {
            return None;
        }

        // Just a move to? Bail.
        if self.verbs.len() == 1 {
            return None;
        }

        let bounds = Rect::from_points(&self.points)?;

        Some(Path {
            bounds,
            verbs: self.verbs,
            points: self.points,
        })
    }
}

/// Computes the signed sweep of an HTML5 canvas arc.
///
/// A sweep of a full turn or more in the chosen direction is clamped to
/// exactly one turn; anything else wraps into `(-2pi, 2pi)`.
fn arc_sweep(start_angle: f32, end_angle: f32, ccw: bool) -> f32 {
    let delta = end_angle - start_angle;
    if !ccw {
        if delta >= FLOAT_TAU {
            FLOAT_TAU
        } else {
            rem_euclid_tau(delta)
        }
    } else {
        if -delta >= FLOAT_TAU {
            -FLOAT_TAU
        } else {
            -rem_euclid_tau(-delta)
        }
    }
}

fn rem_euclid_tau(n: f32) -> f32 {
    let mut m = n % FLOAT_TAU;
    if m < 0.0 {
        m += FLOAT_TAU;
    }
    m
}
