// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// Errors reported at the public API boundary.
///
/// Inside the rendering pipeline, degenerate inputs never error: a draw
/// that cannot be performed simply produces no pixels. Only construction
/// and state-mutation calls with plainly invalid arguments surface one of
/// these.
#[derive(thiserror::Error, Copy, Clone, PartialEq, Eq, Debug)]
pub enum CanvasError {
    /// A surface width or height is zero.
    #[error("surface dimensions must be positive")]
    InvalidDimensions,

    /// A surface dimension exceeds [`MAX_DIMENSION`](crate::MAX_DIMENSION).
    #[error("surface dimensions must not exceed the supported maximum")]
    SurfaceTooLarge,

    /// The transform's determinant is too close to zero to invert.
    #[error("the transform is not invertible")]
    NonInvertible,

    /// A dash array value is negative or not finite.
    #[error("dash intervals must be finite and non-negative")]
    InvalidDash,

    /// A gradient stop offset is outside 0..=1, or its color failed to parse.
    #[error("invalid gradient stop")]
    InvalidStop,

    /// A color string failed to parse.
    #[error("invalid color")]
    InvalidColor,
}
