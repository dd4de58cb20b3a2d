// Copyright 2014 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use crate::flatten::FlattenedPath;
use crate::{Point, Scalar};

/// Stroke dashing properties.
///
/// Contains an array of alternating "on" and "off" interval lengths and a
/// phase offset.
///
/// # Guarantees
///
/// - The dash array always has an even number of values.
/// - All dash array values are finite and >= 0.
/// - There are at least two dash array values.
/// - The sum of all dash array values is positive and finite.
#[derive(Clone, PartialEq, Debug)]
pub struct StrokeDash {
    array: Vec<f32>,
    first_index: usize,
    first_len: f32,
}

impl StrokeDash {
    /// Creates a new stroke dashing object.
    ///
    /// Returns `None` when the array is empty, odd-length, contains
    /// negative or non-finite values, or sums to zero. Odd-length arrays
    /// should be duplicated by the caller beforehand, which is how the
    /// HTML5 `setLineDash` normalizes them.
    pub fn new(dash_array: Vec<f32>, dash_offset: f32) -> Option<Self> {
        if !dash_offset.is_finite() {
            return None;
        }

        if dash_array.len() < 2 || dash_array.len() % 2 != 0 {
            return None;
        }

        if dash_array.iter().any(|n| !n.is_finite() || *n < 0.0) {
            return None;
        }

        let interval_len: f32 = dash_array.iter().sum();
        if !(interval_len > 0.0) || !interval_len.is_finite() {
            return None;
        }

        let dash_offset = adjust_dash_offset(dash_offset, interval_len);
        debug_assert!(dash_offset >= 0.0);
        debug_assert!(dash_offset < interval_len);

        let (first_len, first_index) = find_first_interval(&dash_array, dash_offset);
        debug_assert!(first_len >= 0.0);
        debug_assert!(first_index < dash_array.len());

        Some(StrokeDash {
            array: dash_array,
            first_index,
            first_len,
        })
    }

    pub(crate) fn array(&self) -> &[f32] {
        &self.array
    }

    pub(crate) fn first_interval(&self) -> (usize, f32) {
        (self.first_index, self.first_len)
    }
}

// Adjust the phase to be in 0..len, "flipping" negative values.
// e.g., if len is 100, then a phase of -20 (or -120) is equivalent to 80.
fn adjust_dash_offset(mut offset: f32, len: f32) -> f32 {
    if offset < 0.0 {
        offset = -offset;
        if offset > len {
            offset %= len;
        }

        offset = len - offset;

        // Due to finite precision, it's possible that offset == len
        // even after the subtract (if len >>> offset), so fix that here.
        debug_assert!(offset <= len);
        if offset == len {
            offset = 0.0;
        }

        offset
    } else if offset >= len {
        offset % len
    } else {
        offset
    }
}

fn find_first_interval(dash_array: &[f32], mut dash_offset: f32) -> (f32, usize) {
    for (i, gap) in dash_array.iter().copied().enumerate() {
        if dash_offset > gap || (dash_offset == gap && gap != 0.0) {
            dash_offset -= gap;
        } else {
            return (gap - dash_offset, i);
        }
    }

    // If we get here, the phase "appears" to be larger than the interval
    // length due to accumulated float errors. Just eat the error.
    (dash_array[0], 0)
}

impl FlattenedPath {
    /// Splits the subpaths into dashed subpaths.
    ///
    /// Closed subpaths are walked through their implicit closing edge.
    /// When the pattern is "on" both at the start and at the end of a
    /// closed subpath, the two runs are stitched into one, so no phase
    /// seam appears at the closure.
    pub fn dash(&self, dash: &StrokeDash, out: &mut FlattenedPath) {
        dash_impl(self, dash, out)
    }
}

fn dash_impl(path: &FlattenedPath, dash: &StrokeDash, out: &mut FlattenedPath) {
    out.clear();

    let mut run_points: Vec<Point> = Vec::new();
    let mut runs: Vec<(usize, usize)> = Vec::new();

    for (points, closed) in path.subpaths() {
        run_points.clear();
        runs.clear();

        let n = points.len();
        let edge_count = if closed { n } else { n - 1 };

        let (mut index, mut remaining) = dash.first_interval();
        let mut is_on = index % 2 == 0;

        // A zero-length first interval is an immediate toggle.
        while remaining <= 0.0 {
            index = (index + 1) % dash.array().len();
            is_on = !is_on;
            remaining = dash.array()[index];
        }

        let started_on = is_on;
        let mut run_start = 0;
        let mut run_open = false;

        for ei in 0..edge_count {
            let p = points[ei];
            let q = points[(ei + 1) % n];

            let mut dir = q - p;
            let len = dir.length();
            if len <= f32::EPSILON {
                continue;
            }
            dir.scale(len.invert());

            let mut dist = 0.0;
            loop {
                if is_on && !run_open {
                    run_start = run_points.len();
                    run_points.push(p + dir.scaled(dist));
                    run_open = true;
                }

                let left_on_edge = len - dist;
                if remaining > left_on_edge {
                    remaining -= left_on_edge;
                    if run_open {
                        run_points.push(q);
                    }
                    break;
                }

                dist += remaining;
                let split = p + dir.scaled(dist);
                if run_open {
                    run_points.push(split);
                    runs.push((run_start, run_points.len()));
                    run_open = false;
                }

                loop {
                    index = (index + 1) % dash.array().len();
                    is_on = !is_on;
                    remaining = dash.array()[index];
                    if remaining > 0.0 {
                        break;
                    }
                }
            }
        }

        if run_open && runs.is_empty() && closed && started_on {
            // The pattern never toggled: the whole loop is one "on" run.
            for point in &run_points[run_start..run_points.len() - 1] {
                out.push_point(*point);
            }
            out.finish_subpath(true);
            continue;
        }

        if run_open && closed && started_on && !runs.is_empty() {
            // Stitch the wrap-around run into the run that began the loop.
            for point in &run_points[run_start..] {
                out.push_point(*point);
            }
            let (first_start, first_end) = runs[0];
            // The wrap run ends where the first one begins; skip the duplicate.
            for point in &run_points[first_start + 1..first_end] {
                out.push_point(*point);
            }
            out.finish_subpath(false);
            runs.remove(0);
            run_open = false;
        }

        if run_open {
            runs.push((run_start, run_points.len()));
        }

        for &(start, end) in &runs {
            for point in &run_points[start..end] {
                out.push_point(*point);
            }
            out.finish_subpath(false);
        }
    }
}
