// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{Point, Scalar};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use crate::NoStdFloat;

// A transform is treated as non-invertible below this determinant.
const DET_EPSILON: f64 = 1e-10;

/// An affine transformation matrix.
///
/// Maps `(x, y)` to `(sx*x + kx*y + tx, ky*x + sy*y + ty)`,
/// which matches the HTML5 canvas `(a, b, c, d, e, f)` ordering
/// with `a=sx, b=ky, c=kx, d=sy, e=tx, f=ty`.
///
/// # Guarantees
///
/// - All values are finite.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform {
    sx: f32,
    ky: f32,
    kx: f32,
    sy: f32,
    tx: f32,
    ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

impl Transform {
    /// Creates an identity transform.
    pub fn identity() -> Self {
        Transform {
            sx: 1.0,
            ky: 0.0,
            kx: 0.0,
            sy: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Creates a new `Transform`.
    ///
    /// The argument order matches the HTML5 canvas `transform(a, b, c, d, e, f)` call.
    ///
    /// # Checks
    ///
    /// - All values must be finite.
    pub fn from_row(sx: f32, ky: f32, kx: f32, sy: f32, tx: f32, ty: f32) -> Option<Self> {
        let all_finite = sx.is_finite()
            && ky.is_finite()
            && kx.is_finite()
            && sy.is_finite()
            && tx.is_finite()
            && ty.is_finite();

        if all_finite {
            Some(Transform {
                sx,
                ky,
                kx,
                sy,
                tx,
                ty,
            })
        } else {
            None
        }
    }

    /// Creates a new translating `Transform`.
    pub fn from_translate(tx: f32, ty: f32) -> Option<Self> {
        Transform::from_row(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Creates a new scaling `Transform`.
    pub fn from_scale(sx: f32, sy: f32) -> Option<Self> {
        Transform::from_row(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Creates a new rotating `Transform` around the origin.
    ///
    /// `angle` is in radians, positive values rotate clockwise in the
    /// y-down screen coordinate system.
    pub fn from_rotate(angle: f32) -> Option<Self> {
        let (sin, cos) = (angle.sin(), angle.cos());
        Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Returns the matrix values in the HTML5 `(a, b, c, d, e, f)` order.
    pub fn get_row(&self) -> (f32, f32, f32, f32, f32, f32) {
        (self.sx, self.ky, self.kx, self.sy, self.tx, self.ty)
    }

    /// Checks that the transform is the identity.
    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }

    /// Checks that the transform is translate-only.
    pub fn is_translate(&self) -> bool {
        self.sx == 1.0 && self.ky == 0.0 && self.kx == 0.0 && self.sy == 1.0
    }

    /// Concatenates the transform with `other`, so that `other` is applied first.
    ///
    /// Returns `None` when the product overflows to a non-finite value.
    #[must_use]
    pub fn pre_concat(&self, other: &Self) -> Option<Self> {
        concat(self, other)
    }

    /// Concatenates the transform with `other`, so that `other` is applied last.
    ///
    /// Returns `None` when the product overflows to a non-finite value.
    #[must_use]
    pub fn post_concat(&self, other: &Self) -> Option<Self> {
        concat(other, self)
    }

    /// Appends a translation, applied before the current transform.
    #[must_use]
    pub fn pre_translate(&self, tx: f32, ty: f32) -> Option<Self> {
        self.pre_concat(&Transform::from_translate(tx, ty)?)
    }

    /// Appends a scale, applied before the current transform.
    #[must_use]
    pub fn pre_scale(&self, sx: f32, sy: f32) -> Option<Self> {
        self.pre_concat(&Transform::from_scale(sx, sy)?)
    }

    /// Appends a rotation, applied before the current transform.
    #[must_use]
    pub fn pre_rotate(&self, angle: f32) -> Option<Self> {
        self.pre_concat(&Transform::from_rotate(angle)?)
    }

    /// Returns an inverted transform.
    ///
    /// Returns `None` when the determinant is too close to zero.
    pub fn invert(&self) -> Option<Self> {
        if self.is_identity() {
            return Some(*self);
        }

        // Compute in f64 so that a tiny determinant doesn't lose all precision.
        let sx = f64::from(self.sx);
        let ky = f64::from(self.ky);
        let kx = f64::from(self.kx);
        let sy = f64::from(self.sy);
        let tx = f64::from(self.tx);
        let ty = f64::from(self.ty);

        let det = sx * sy - kx * ky;
        if det.abs() <= DET_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        Transform::from_row(
            (sy * inv_det) as f32,
            (-ky * inv_det) as f32,
            (-kx * inv_det) as f32,
            (sx * inv_det) as f32,
            ((kx * ty - sy * tx) * inv_det) as f32,
            ((ky * tx - sx * ty) * inv_det) as f32,
        )
    }

    /// Transforms a single point.
    pub fn map_point(&self, p: Point) -> Point {
        if self.is_identity() {
            p
        } else {
            Point::from_xy(
                self.sx * p.x + self.kx * p.y + self.tx,
                self.ky * p.x + self.sy * p.y + self.ty,
            )
        }
    }

    /// Transforms a slice of points in-place.
    pub fn map_points(&self, points: &mut [Point]) {
        if self.is_identity() {
            return;
        }

        for p in points {
            *p = Point::from_xy(
                self.sx * p.x + self.kx * p.y + self.tx,
                self.ky * p.x + self.sy * p.y + self.ty,
            );
        }
    }

    /// Returns the largest scale factor the transform applies to any direction.
    ///
    /// Used to pick a flattening density for geometry that is transformed
    /// after flattening.
    pub fn max_scale(&self) -> f32 {
        let x = (self.sx.sqr() + self.ky.sqr()).sqrt();
        let y = (self.kx.sqr() + self.sy.sqr()).sqrt();
        let scale = x.max(y);
        if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        }
    }
}

fn concat(a: &Transform, b: &Transform) -> Option<Transform> {
    if a.is_identity() {
        return Some(*b);
    }
    if b.is_identity() {
        return Some(*a);
    }

    Transform::from_row(
        a.sx * b.sx + a.kx * b.ky,
        a.ky * b.sx + a.sy * b.ky,
        a.sx * b.kx + a.kx * b.sy,
        a.ky * b.kx + a.sy * b.sy,
        a.sx * b.tx + a.kx * b.ty + a.tx,
        a.ky * b.tx + a.sy * b.ty + a.ty,
    )
}
