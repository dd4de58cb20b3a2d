// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use crate::NoStdFloat;

pub use strict_num::{FiniteF32, NonZeroPositiveF32, NormalizedF32};

pub(crate) const FLOAT_PI: f32 = 3.14159265;

const MAX_I32_FITS_IN_F32: f32 = 2147483520.0;
const MIN_I32_FITS_IN_F32: f32 = -MAX_I32_FITS_IN_F32;

/// Custom float to integer conversion routines.
pub trait SaturateCast<T>: Sized {
    /// Return the closest integer for the given float.
    fn saturate_from(n: T) -> Self;
}

impl SaturateCast<f32> for i32 {
    /// Return the closest integer for the given float.
    ///
    /// Returns MAX_I32_FITS_IN_F32 for NaN.
    fn saturate_from(mut x: f32) -> Self {
        x = if x < MAX_I32_FITS_IN_F32 {
            x
        } else {
            MAX_I32_FITS_IN_F32
        };
        x = if x > MIN_I32_FITS_IN_F32 {
            x
        } else {
            MIN_I32_FITS_IN_F32
        };
        x as i32
    }
}

/// Custom float to integer rounding routines.
#[allow(missing_docs)]
pub trait SaturateRound<T>: SaturateCast<T> {
    fn saturate_floor(n: T) -> Self;
    fn saturate_ceil(n: T) -> Self;
    fn saturate_round(n: T) -> Self;
}

impl SaturateRound<f32> for i32 {
    fn saturate_floor(x: f32) -> Self {
        Self::saturate_from(x.floor())
    }

    fn saturate_ceil(x: f32) -> Self {
        Self::saturate_from(x.ceil())
    }

    fn saturate_round(x: f32) -> Self {
        Self::saturate_from(x.floor() + 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturate() {
        assert_eq!(i32::saturate_from(2.2), 2);
        assert_eq!(i32::saturate_from(-2.2), -2);
        assert_eq!(i32::saturate_from(f32::NAN), 2147483520);
        assert_eq!(i32::saturate_floor(2.7), 2);
        assert_eq!(i32::saturate_ceil(2.2), 3);
        assert_eq!(i32::saturate_round(2.5), 3);
    }
}
