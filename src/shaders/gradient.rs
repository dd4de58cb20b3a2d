// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use tiny_canvas_path::NormalizedF32;

use crate::color::Color;
use crate::error::CanvasError;

/// A gradient stop.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GradientStop {
    pub(crate) position: NormalizedF32,
    pub(crate) color: Color,
}

impl GradientStop {
    /// Creates a new gradient stop.
    ///
    /// `position` will be clamped to a 0..=1 range.
    pub fn new(position: f32, color: Color) -> Self {
        GradientStop {
            position: NormalizedF32::new_clamped(position),
            color,
        }
    }
}

// Validates an `addColorStop` offset: unlike `GradientStop::new`,
// out-of-range offsets are an error rather than being clamped.
pub(crate) fn checked_stop(offset: f32, color: Color) -> Result<GradientStop, CanvasError> {
    if !offset.is_finite() || offset < 0.0 || offset > 1.0 {
        return Err(CanvasError::InvalidStop);
    }

    Ok(GradientStop::new(offset, color))
}

/// Samples a stop list at arbitrary positions.
///
/// Stops are sorted by position with a stable sort, so stops sharing a
/// position keep their insertion order and the later one wins exactly at
/// the shared offset. Interpolation is linear over non-premultiplied sRGB
/// components.
#[derive(Clone, Debug)]
pub(crate) struct StopSampler {
    stops: Vec<GradientStop>,
}

impl StopSampler {
    // Returns `None` when there are no stops, in which case nothing
    // should be painted.
    pub fn new(stops: &[GradientStop]) -> Option<Self> {
        if stops.is_empty() {
            return None;
        }

        let mut stops = stops.to_vec();
        stops.sort_by(|a, b| a.position.get().partial_cmp(&b.position.get()).unwrap());

        Some(StopSampler { stops })
    }

    pub fn sample(&self, t: f32) -> Color {
        let t = if t.is_finite() { t } else { 0.0 };

        let first = &self.stops[0];
        if t <= first.position.get() && !position_repeats(&self.stops, 0) {
            return first.color;
        }

        let last = &self.stops[self.stops.len() - 1];
        if t >= last.position.get() {
            return last.color;
        }

        // Find the last stop at or before `t`, so that with equal
        // positions the later stop shadows the earlier ones.
        let mut lo = 0;
        for (i, stop) in self.stops.iter().enumerate() {
            if stop.position.get() <= t {
                lo = i;
            } else {
                break;
            }
        }

        let left = &self.stops[lo];
        let right = &self.stops[lo + 1];
        let span = right.position.get() - left.position.get();
        if span <= 0.0 {
            return left.color;
        }

        let local = (t - left.position.get()) / span;
        left.color.lerp(right.color, local)
    }
}

fn position_repeats(stops: &[GradientStop], index: usize) -> bool {
    stops
        .get(index + 1)
        .map(|next| next.position == stops[index].position)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::from_rgba8(r, g, b, 255)
    }

    #[test]
    fn two_stops() {
        let sampler = StopSampler::new(&[
            GradientStop::new(0.0, rgb(0, 0, 0)),
            GradientStop::new(1.0, rgb(255, 255, 255)),
        ])
        .unwrap();

        assert_eq!(sampler.sample(-1.0), rgb(0, 0, 0));
        assert_eq!(sampler.sample(1.5), rgb(255, 255, 255));
        let mid = sampler.sample(0.5);
        assert!((mid.red() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn later_stop_wins_on_equal_offsets() {
        let sampler = StopSampler::new(&[
            GradientStop::new(0.0, rgb(10, 0, 0)),
            GradientStop::new(0.5, rgb(20, 0, 0)),
            GradientStop::new(0.5, rgb(30, 0, 0)),
            GradientStop::new(1.0, rgb(40, 0, 0)),
        ])
        .unwrap();

        // Exactly at the shared offset, the later stop shadows the earlier.
        assert_eq!(sampler.sample(0.5), rgb(30, 0, 0));

        // Just below it, we interpolate towards the earlier stop.
        let below = sampler.sample(0.49999);
        assert!(below.red() < 30.0 / 255.0 * 1.5);
    }

    #[test]
    fn unsorted_insertion_is_sorted_stably() {
        let sampler = StopSampler::new(&[
            GradientStop::new(1.0, rgb(255, 0, 0)),
            GradientStop::new(0.0, rgb(0, 0, 0)),
        ])
        .unwrap();

        assert_eq!(sampler.sample(0.0), rgb(0, 0, 0));
        assert_eq!(sampler.sample(1.0), rgb(255, 0, 0));
    }

    #[test]
    fn stop_validation() {
        assert!(checked_stop(0.0, Color::BLACK).is_ok());
        assert!(checked_stop(1.0, Color::BLACK).is_ok());
        assert_eq!(
            checked_stop(1.5, Color::BLACK).unwrap_err(),
            CanvasError::InvalidStop
        );
        assert_eq!(
            checked_stop(f32::NAN, Color::BLACK).unwrap_err(),
            CanvasError::InvalidStop
        );
    }
}
