// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use arrayvec::ArrayVec;

use crate::path::{Path, PathSegment};
use crate::transform::Transform;
use crate::{Point, Rect};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use crate::NoStdFloat;

/// Maximum distance between a curve and its polyline approximation,
/// in device-space units.
pub const PATH_FLATTENING_TOLERANCE: f32 = 0.25;

// Subdivision produces one extra stack entry per split, and every split
// divides the error by ~16, so this is far deeper than any curve needs.
const MAX_SUBDIVISION_STACK: usize = 32;

/// A range of [`FlattenedPath`] points that forms a single subpath.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SubPath {
    pub(crate) start: usize,
    pub(crate) end: usize,
    /// Whether the subpath was explicitly closed.
    ///
    /// Closed subpaths have an implicit edge from the last point back to
    /// the first one.
    pub closed: bool,
}

/// A path flattened into polyline subpaths.
///
/// Stores all subpath points in a single vector, so the container can be
/// reused across draws without reallocating.
#[derive(Clone, Default, Debug)]
pub struct FlattenedPath {
    points: Vec<Point>,
    subpaths: Vec<SubPath>,
}

impl FlattenedPath {
    /// Creates an empty flattened path.
    pub fn new() -> Self {
        FlattenedPath::default()
    }

    /// Clears the container, keeping the allocated memory.
    pub fn clear(&mut self) {
        self.points.clear();
        self.subpaths.clear();
    }

    /// Checks if there are any subpaths.
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Returns all points of all subpaths.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns an iterator over subpaths as point slices.
    pub fn subpaths(&self) -> impl Iterator<Item = (&[Point], bool)> {
        self.subpaths
            .iter()
            .map(move |s| (&self.points[s.start..s.end], s.closed))
    }

    /// Returns the bounding rectangle of all points.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_points(&self.points)
    }

    /// Appends a point to the current subpath.
    ///
    /// Consecutive duplicates are ignored.
    pub fn push_point(&mut self, p: Point) {
        let start = self.subpaths.last().map(|s| s.end).unwrap_or(0);
        if let Some(last) = self.points.last() {
            if self.points.len() > start && *last == p {
                return;
            }
        }

        self.points.push(p);
    }

    /// Transforms all points in-place.
    pub fn transform(&mut self, ts: Transform) {
        ts.map_points(&mut self.points);
    }

    /// Finishes the current subpath.
    ///
    /// Subpaths with fewer than two points are dropped.
    pub fn finish_subpath(&mut self, closed: bool) {
        let start = self.subpaths.last().map(|s| s.end).unwrap_or(0);
        let end = self.points.len();
        if end - start >= 2 {
            self.subpaths.push(SubPath { start, end, closed });
        } else {
            self.points.truncate(start);
        }
    }
}

/// Flattens recorded paths into [`FlattenedPath`] polylines.
///
/// Flattening happens after the provided transform is applied, so the
/// tolerance is honored in device space and the subdivision density does
/// not depend on the zoom level.
#[derive(Clone, Default, Debug)]
pub struct PathFlattener {}

impl PathFlattener {
    /// Creates a new flattener.
    pub fn new() -> Self {
        PathFlattener {}
    }

    /// Flattens `path` through `ts` into `out`.
    ///
    /// `out` is cleared first.
    pub fn flatten(&self, path: &Path, ts: Transform, tolerance: f32, out: &mut FlattenedPath) {
        debug_assert!(tolerance > 0.0);

        out.clear();

        let mut last = Point::zero();
        let mut have_subpath = false;
        for segment in path.segments() {
            match segment {
                PathSegment::MoveTo(p) => {
                    if have_subpath {
                        out.finish_subpath(false);
                    }
                    have_subpath = true;

                    last = ts.map_point(p);
                    out.push_point(last);
                }
                PathSegment::LineTo(p) => {
                    last = ts.map_point(p);
                    out.push_point(last);
                }
                PathSegment::QuadTo(p1, p2) => {
                    // Elevate the quad to a cubic and share the subdivision code.
                    let p1 = ts.map_point(p1);
                    let p2 = ts.map_point(p2);
                    let c1 = last + (p1 - last).scaled(2.0 / 3.0);
                    let c2 = p2 + (p1 - p2).scaled(2.0 / 3.0);
                    flatten_cubic(last, c1, c2, p2, tolerance, out);
                    last = p2;
                }
                PathSegment::CubicTo(p1, p2, p3) => {
                    let p1 = ts.map_point(p1);
                    let p2 = ts.map_point(p2);
                    let p3 = ts.map_point(p3);
                    flatten_cubic(last, p1, p2, p3, tolerance, out);
                    last = p3;
                }
                PathSegment::Close => {
                    if have_subpath {
                        out.finish_subpath(true);
                        have_subpath = false;
                    }
                }
            }
        }

        if have_subpath {
            out.finish_subpath(false);
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Cubic {
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
}

impl Cubic {
    // Distance-from-chord flatness test.
    fn is_flat(&self, tolerance: f32) -> bool {
        let chord = self.p3 - self.p0;
        let len_sqd = chord.dot(chord);

        if len_sqd <= tolerance * tolerance {
            // Degenerate chord. Judge by how far the control points stray.
            return self.p1.distance_to_sqd(self.p0) <= tolerance * tolerance
                && self.p2.distance_to_sqd(self.p3) <= tolerance * tolerance;
        }

        // Distance of a control point from the chord line:
        // |cross(p - p0, chord)| / |chord|, compared without the sqrt.
        let d1 = (self.p1 - self.p0).cross(chord);
        let d2 = (self.p2 - self.p0).cross(chord);
        let max_d = d1.abs().max(d2.abs());
        max_d * max_d <= tolerance * tolerance * len_sqd
    }

    fn split_half(&self) -> (Cubic, Cubic) {
        let ab = mid(self.p0, self.p1);
        let bc = mid(self.p1, self.p2);
        let cd = mid(self.p2, self.p3);
        let abc = mid(ab, bc);
        let bcd = mid(bc, cd);
        let abcd = mid(abc, bcd);

        (
            Cubic {
                p0: self.p0,
                p1: ab,
                p2: abc,
                p3: abcd,
            },
            Cubic {
                p0: abcd,
                p1: bcd,
                p2: cd,
                p3: self.p3,
            },
        )
    }
}

fn mid(a: Point, b: Point) -> Point {
    Point::from_xy((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

fn flatten_cubic(p0: Point, p1: Point, p2: Point, p3: Point, tolerance: f32, out: &mut FlattenedPath) {
    if !(p0.is_finite() && p1.is_finite() && p2.is_finite() && p3.is_finite()) {
        // A non-finite curve cannot be subdivided. Keep the endpoint so the
        // subpath stays connected.
        out.push_point(p3);
        return;
    }

    let mut stack: ArrayVec<Cubic, MAX_SUBDIVISION_STACK> = ArrayVec::new();
    stack.push(Cubic { p0, p1, p2, p3 });

    while let Some(c) = stack.pop() {
        if c.is_flat(tolerance) || stack.len() + 2 > stack.capacity() {
            out.push_point(c.p3);
        } else {
            let (left, right) = c.split_half();
            stack.push(right);
            stack.push(left);
        }
    }
}
