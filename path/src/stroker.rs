// Copyright 2008 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use crate::dash::StrokeDash;
use crate::flatten::FlattenedPath;
use crate::floating_point::FLOAT_PI;
use crate::scalar::Scalar;
use crate::Point;

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use crate::NoStdFloat;

// Consecutive points closer than this are folded together, so that edge
// normals stay computable. Short edges survive in the flattened geometry
// itself; only the stroke outline folds them.
const MERGE_EPSILON: f32 = 1e-6;

/// Draws at the beginning and end of an open subpath.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineCap {
    /// No stroke extension.
    Butt,
    /// Adds a semicircle.
    Round,
    /// Extends by half the stroke width.
    Square,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Butt
    }
}

/// Specifies how corners are drawn when a shape is stroked.
///
/// Choose miter join to draw sharp corners. Choose round join to draw a
/// circle with a radius equal to half the stroke width on top of the corner.
/// Choose bevel join to minimally connect the thick strokes.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineJoin {
    /// Extends to the miter limit, then falls back to bevel.
    Miter,
    /// Adds a circular fan.
    Round,
    /// Connects outside edges.
    Bevel,
}

impl Default for LineJoin {
    fn default() -> Self {
        LineJoin::Miter
    }
}

/// Stroke properties.
#[derive(Clone, PartialEq, Debug)]
pub struct Stroke {
    /// A stroke thickness.
    ///
    /// Must be > 0.
    ///
    /// Default: 1.0
    pub width: f32,

    /// The ratio of miter spike length to half the stroke width at which a
    /// sharp corner is drawn beveled instead.
    ///
    /// Default: 10.0
    pub miter_limit: f32,

    /// A stroke line cap.
    ///
    /// Default: Butt
    pub line_cap: LineCap,

    /// A stroke line join.
    ///
    /// Default: Miter
    pub line_join: LineJoin,

    /// A stroke dashing properties.
    ///
    /// Default: None
    pub dash: Option<StrokeDash>,
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke {
            width: 1.0,
            miter_limit: 10.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            dash: None,
        }
    }
}

/// Expands flattened subpaths into a stroke outline.
///
/// The outline is emitted as closed polygons into another
/// [`FlattenedPath`]; filling them with the nonzero rule produces the
/// stroked shape. Keeps internal allocations between calls.
#[derive(Clone, Default, Debug)]
pub struct Stroker {
    points: Vec<Point>,
    dirs: Vec<Point>,
    dashed: FlattenedPath,
}

impl Stroker {
    /// Creates a new stroker.
    pub fn new() -> Self {
        Stroker::default()
    }

    /// Expands `path` into a stroke outline polygon.
    ///
    /// When the stroke has a dash pattern, the path is dashed first.
    /// `tolerance` bounds the deviation of round joins and caps from true
    /// circles. `out` is cleared first.
    pub fn stroke(
        &mut self,
        path: &FlattenedPath,
        stroke: &Stroke,
        tolerance: f32,
        out: &mut FlattenedPath,
    ) {
        if let Some(ref dash) = stroke.dash {
            let mut dashed = core::mem::take(&mut self.dashed);
            path.dash(dash, &mut dashed);
            self.stroke_undashed(&dashed, stroke, tolerance, out);
            self.dashed = dashed;
        } else {
            self.stroke_undashed(path, stroke, tolerance, out);
        }
    }

    fn stroke_undashed(
        &mut self,
        path: &FlattenedPath,
        stroke: &Stroke,
        tolerance: f32,
        out: &mut FlattenedPath,
    ) {
        out.clear();

        if !(stroke.width > 0.0) || !stroke.width.is_finite() {
            return;
        }

        let radius = stroke.width.half();
        // miter check: ratio <= limit  <=>  1 + dot(n_in, n_out) >= 2 / limit^2
        let miter_dot_limit = if stroke.miter_limit >= 1.0 {
            2.0 / stroke.miter_limit.sqr() - 1.0
        } else {
            1.0
        };

        // One subpath at a time, so the scratch buffers can be reused.
        let subpath_count = path.subpaths().count();
        for i in 0..subpath_count {
            let (points, closed) = path.subpaths().nth(i).unwrap();
            self.prepare_subpath(points, closed);
            if self.points.len() < 2 {
                continue;
            }

            let closed = closed && self.points.len() >= 3;
            if closed {
                self.stroke_closed(stroke, radius, miter_dot_limit, tolerance, out);
            } else {
                self.stroke_open(stroke, radius, miter_dot_limit, tolerance, out);
            }
        }
    }

    // Copies a subpath into the scratch buffer, folding degenerate edges,
    // and computes per-edge unit directions.
    fn prepare_subpath(&mut self, points: &[Point], closed: bool) {
        self.points.clear();
        self.dirs.clear();

        for &p in points {
            match self.points.last() {
                Some(last) if last.distance_to_sqd(p) <= MERGE_EPSILON * MERGE_EPSILON => {}
                _ => self.points.push(p),
            }
        }

        if closed && self.points.len() > 1 {
            let first = self.points[0];
            let last = *self.points.last().unwrap();
            if first.distance_to_sqd(last) <= MERGE_EPSILON * MERGE_EPSILON {
                self.points.pop();
            }
        }

        let n = self.points.len();
        if n < 2 {
            return;
        }

        let edges = if closed && n >= 3 { n } else { n - 1 };
        for i in 0..edges {
            let mut d = self.points[(i + 1) % n] - self.points[i];
            if !d.normalize() {
                // prepare_subpath folded true duplicates already; anything
                // left is as good as its neighbor.
                d = Point::from_xy(1.0, 0.0);
            }
            self.dirs.push(d);
        }
    }

    fn stroke_open(
        &self,
        stroke: &Stroke,
        radius: f32,
        miter_dot_limit: f32,
        tolerance: f32,
        out: &mut FlattenedPath,
    ) {
        let n = self.points.len();

        // Forward along the left side.
        out.push_point(offset(self.points[0], left_normal(self.dirs[0]), radius));
        for i in 1..n - 1 {
            emit_join(
                self.points[i],
                self.dirs[i - 1],
                self.dirs[i],
                radius,
                stroke.line_join,
                miter_dot_limit,
                tolerance,
                out,
            );
        }
        out.push_point(offset(
            self.points[n - 1],
            left_normal(self.dirs[n - 2]),
            radius,
        ));

        emit_cap(
            self.points[n - 1],
            self.dirs[n - 2],
            radius,
            stroke.line_cap,
            tolerance,
            out,
        );

        // Back along the right side, which is the left side of the
        // reversed direction.
        out.push_point(offset(
            self.points[n - 1],
            left_normal(reversed(self.dirs[n - 2])),
            radius,
        ));
        for i in (1..n - 1).rev() {
            emit_join(
                self.points[i],
                reversed(self.dirs[i]),
                reversed(self.dirs[i - 1]),
                radius,
                stroke.line_join,
                miter_dot_limit,
                tolerance,
                out,
            );
        }
        out.push_point(offset(
            self.points[0],
            left_normal(reversed(self.dirs[0])),
            radius,
        ));

        emit_cap(
            self.points[0],
            reversed(self.dirs[0]),
            radius,
            stroke.line_cap,
            tolerance,
            out,
        );

        out.finish_subpath(true);
    }

    fn stroke_closed(
        &self,
        stroke: &Stroke,
        radius: f32,
        miter_dot_limit: f32,
        tolerance: f32,
        out: &mut FlattenedPath,
    ) {
        let n = self.points.len();

        // Outer ring: left side walking forward.
        for i in 0..n {
            let prev = (i + n - 1) % n;
            emit_join(
                self.points[i],
                self.dirs[prev],
                self.dirs[i],
                radius,
                stroke.line_join,
                miter_dot_limit,
                tolerance,
                out,
            );
        }
        out.finish_subpath(true);

        // Inner ring: left side walking backward. Filling both rings with
        // the nonzero rule leaves the area between them.
        for i in (0..n).rev() {
            let prev = (i + n - 1) % n;
            emit_join(
                self.points[i],
                reversed(self.dirs[i]),
                reversed(self.dirs[prev]),
                radius,
                stroke.line_join,
                miter_dot_limit,
                tolerance,
                out,
            );
        }
        out.finish_subpath(true);
    }
}

fn reversed(d: Point) -> Point {
    -d
}

// The normal pointing to the left of the travel direction
// in y-down coordinates.
fn left_normal(d: Point) -> Point {
    Point::from_xy(d.y, -d.x)
}

fn offset(p: Point, n: Point, radius: f32) -> Point {
    p + n.scaled(radius)
}

// Rotates `v` by `angle`; positive angles rotate from the left normal
// towards the travel direction.
fn rotated(v: Point, angle: f32) -> Point {
    let (sin, cos) = (angle.sin(), angle.cos());
    Point::from_xy(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

fn emit_join(
    pivot: Point,
    dir_in: Point,
    dir_out: Point,
    radius: f32,
    join: LineJoin,
    miter_dot_limit: f32,
    tolerance: f32,
    out: &mut FlattenedPath,
) {
    let n_in = left_normal(dir_in);
    let n_out = left_normal(dir_out);
    let a = offset(pivot, n_in, radius);
    let b = offset(pivot, n_out, radius);

    // The left side is the outside of a clockwise (y-down) turn.
    let is_outer = dir_in.cross(dir_out) > 0.0;
    if !is_outer {
        // Route the inner side through the pivot, so the wedge between the
        // two offset segments stays covered under the nonzero fill.
        out.push_point(a);
        out.push_point(pivot);
        out.push_point(b);
        return;
    }

    match join {
        LineJoin::Miter => {
            let dot = n_in.dot(n_out);
            if dot >= miter_dot_limit && dot > -1.0 + 1e-6 {
                let scale = radius / (1.0 + dot);
                let miter = pivot + (n_in + n_out).scaled(scale);
                out.push_point(a);
                out.push_point(miter);
                out.push_point(b);
            } else {
                out.push_point(a);
                out.push_point(b);
            }
        }
        LineJoin::Bevel => {
            out.push_point(a);
            out.push_point(b);
        }
        LineJoin::Round => {
            emit_arc(pivot, n_in, n_out, radius, tolerance, out);
        }
    }
}

fn emit_cap(
    pivot: Point,
    dir: Point,
    radius: f32,
    cap: LineCap,
    tolerance: f32,
    out: &mut FlattenedPath,
) {
    let n = left_normal(dir);
    match cap {
        LineCap::Butt => {}
        LineCap::Square => {
            let ext = dir.scaled(radius);
            out.push_point(pivot + n.scaled(radius) + ext);
            out.push_point(pivot - n.scaled(radius) + ext);
        }
        LineCap::Round => {
            emit_arc(pivot, n, -n, radius, tolerance, out);
        }
    }
}

// A circular fan from `pivot + radius*n_from` to `pivot + radius*n_to`,
// rotating positively (through the travel direction), flattened so the
// chords stay within `tolerance` of the circle.
fn emit_arc(
    pivot: Point,
    n_from: Point,
    n_to: Point,
    radius: f32,
    tolerance: f32,
    out: &mut FlattenedPath,
) {
    out.push_point(offset(pivot, n_from, radius));

    let mut sweep = n_from.cross(n_to).atan2(n_from.dot(n_to));
    if sweep < 0.0 {
        sweep += 2.0 * FLOAT_PI;
    }
    if sweep.is_nearly_zero() {
        out.push_point(offset(pivot, n_to, radius));
        return;
    }

    // Max angular step so the chord sags at most `tolerance` below the arc.
    let max_step = if radius > tolerance {
        2.0 * (1.0 - tolerance / radius).acos()
    } else {
        FLOAT_PI.half()
    };
    let steps = (sweep / max_step).ceil().max(1.0) as usize;
    let step = sweep / steps as f32;

    for i in 1..steps {
        let n = rotated(n_from, step * i as f32);
        out.push_point(offset(pivot, n, radius));
    }

    out.push_point(offset(pivot, n_to, radius));
}
