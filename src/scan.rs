// Copyright 2011 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use tiny_canvas_path::{FlattenedPath, Point};

use crate::int_rect::IntRect;
use crate::mask::Mask;
use crate::screen_int_rect::ScreenIntRect;

/// Coverage below this is treated as zero, which prevents speckle
/// artifacts from nearly-parallel edges.
pub const FILL_EPSILON: f32 = 1e-4;

/// A fill rule for resolving self-overlapping polygons.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum FillRule {
    /// A point is inside when the sum of signed edge crossings is non-zero.
    NonZero,
    /// A point is inside when the number of edge crossings is odd.
    EvenOdd,
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::NonZero
    }
}

// An edge oriented top-to-bottom, with the original direction kept
// in `winding`.
#[derive(Copy, Clone, Debug)]
struct Edge {
    top_y: f32,
    bottom_y: f32,
    top_x: f32,
    dxdy: f32,
    winding: f32, // +1.0 for downward edges, -1.0 for upward ones
}

impl Edge {
    fn new(p0: Point, p1: Point) -> Option<Self> {
        if !(p0.is_finite() && p1.is_finite()) {
            return None;
        }

        // Horizontal edges contribute no winding.
        if p0.y == p1.y {
            return None;
        }

        let (top, bottom, winding) = if p0.y < p1.y {
            (p0, p1, 1.0)
        } else {
            (p1, p0, -1.0)
        };

        Some(Edge {
            top_y: top.y,
            bottom_y: bottom.y,
            top_x: top.x,
            dxdy: (bottom.x - top.x) / (bottom.y - top.y),
            winding,
        })
    }

    fn x_at(&self, y: f32) -> f32 {
        self.top_x + (y - self.top_y) * self.dxdy
    }
}

// Per-column accumulator for one scanline.
//
// `area` is the coverage contributed inside the column itself and `cover`
// is the full winding carried to every column to the right.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
struct Cell {
    area: f32,
    cover: f32,
}

/// A scanline polygon rasterizer.
///
/// Builds a global edge table, advances an active edge list one scanline
/// at a time and accumulates exact trapezoid coverage into a row of cells,
/// which is then resolved through the fill rule into an 8-bit mask.
///
/// Keeps internal allocations between calls.
#[derive(Clone, Default, Debug)]
pub struct Rasterizer {
    edges: Vec<Edge>,
    order: Vec<usize>,
    active: Vec<usize>,
    cells: Vec<Cell>,
}

impl Rasterizer {
    /// Creates a new rasterizer.
    pub fn new() -> Self {
        Rasterizer::default()
    }

    /// Rasterizes `path` into `mask`, which is cleared first.
    ///
    /// All subpaths are treated as closed, which is how filling works.
    /// Returns the bounding rectangle of the produced coverage, or `None`
    /// when nothing was covered.
    pub fn fill_path(
        &mut self,
        path: &FlattenedPath,
        fill_rule: FillRule,
        clip: ScreenIntRect,
        mask: &mut Mask,
    ) -> Option<IntRect> {
        debug_assert!(mask.width() >= clip.right() && mask.height() >= clip.bottom());

        mask.clear();

        self.edges.clear();
        for (points, _) in path.subpaths() {
            for i in 0..points.len() {
                let p0 = points[i];
                let p1 = points[(i + 1) % points.len()];
                if let Some(edge) = Edge::new(p0, p1) {
                    self.edges.push(edge);
                }
            }
        }

        if self.edges.is_empty() {
            return None;
        }

        self.order.clear();
        self.order.extend(0..self.edges.len());
        let edges = &self.edges;
        self.order
            .sort_unstable_by(|a, b| match edges[*a].top_y.partial_cmp(&edges[*b].top_y) {
                Some(core::cmp::Ordering::Equal) | None => a.cmp(b),
                Some(ord) => ord,
            });

        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for e in &self.edges {
            min_y = min_y.min(e.top_y);
            max_y = max_y.max(e.bottom_y);
        }

        let y_start = (min_y.floor() as i64).max(clip.y() as i64) as i32;
        let y_end = (max_y.ceil() as i64).min(clip.bottom() as i64) as i32;
        if y_start >= y_end {
            return None;
        }

        self.cells.clear();
        self.cells
            .resize(clip.right() as usize + 1, Cell::default());

        self.active.clear();
        let mut next_edge = 0;

        let mut dirty: Option<IntRect> = None;

        for y in y_start..y_end {
            let row_top = y as f32;
            let row_bottom = row_top + 1.0;

            // Retire finished edges and pick up the ones starting in this row.
            self.active.retain(|i| edges[*i].bottom_y > row_top);
            while next_edge < self.order.len() {
                let i = self.order[next_edge];
                if self.edges[i].top_y < row_bottom {
                    if self.edges[i].bottom_y > row_top {
                        self.active.push(i);
                    }
                    next_edge += 1;
                } else {
                    break;
                }
            }

            if self.active.is_empty() {
                continue;
            }

            let mut row_min = clip.right() as i32;
            let mut row_max = clip.x() as i32 - 1;

            for &i in &self.active {
                let e = self.edges[i];
                let ya = e.top_y.max(row_top);
                let yb = e.bottom_y.min(row_bottom);
                if yb <= ya {
                    continue;
                }

                let xa = e.x_at(ya);
                let xb = e.x_at(yb);
                let dy = (yb - ya) * e.winding;

                accumulate(
                    &mut self.cells,
                    clip.x() as f32,
                    clip.right() as f32,
                    xa,
                    xb,
                    dy,
                    &mut row_min,
                    &mut row_max,
                );
            }

            if row_min > row_max {
                continue;
            }

            // Resolve the accumulated cells into coverage.
            let mask_width = mask.width() as usize;
            let row = &mut mask.data_mut()[y as usize * mask_width..(y as usize + 1) * mask_width];
            let mut acc = 0.0;
            let mut row_dirty: Option<(i32, i32)> = None;
            for x in row_min..=row_max {
                let cell = &mut self.cells[x as usize];
                let coverage = apply_fill_rule(acc + cell.area, fill_rule);
                acc += cell.cover;
                *cell = Cell::default();

                if coverage > 0.0 && (x as u32) < clip.right() {
                    row[x as usize] = (coverage * 255.0 + 0.5) as u8;
                    row_dirty = match row_dirty {
                        Some((min, max)) => Some((min.min(x), max.max(x))),
                        None => Some((x, x)),
                    };
                }
            }

            if let Some((min_x, max_x)) = row_dirty {
                if let Some(row_rect) = IntRect::from_ltrb(min_x, y, max_x + 1, y + 1) {
                    dirty = Some(match dirty {
                        Some(d) => d.join(&row_rect),
                        None => row_rect,
                    });
                }
            }
        }

        dirty
    }
}

fn apply_fill_rule(winding: f32, fill_rule: FillRule) -> f32 {
    let coverage = match fill_rule {
        FillRule::NonZero => winding.abs().min(1.0),
        FillRule::EvenOdd => {
            let mut m = winding.abs() % 2.0;
            if m > 1.0 {
                m = 2.0 - m;
            }
            m
        }
    };

    if coverage <= FILL_EPSILON {
        0.0
    } else {
        coverage
    }
}

// Distributes the signed vertical span `dy` of an edge fragment running
// from `xa` to `xb` over the columns it crosses. Each column receives the
// trapezoid area to the right of the fragment in `area` and its winding
// share in `cover`.
fn accumulate(
    cells: &mut [Cell],
    clip_left: f32,
    clip_right: f32,
    xa: f32,
    xb: f32,
    dy: f32,
    row_min: &mut i32,
    row_max: &mut i32,
) {
    // Clamping into the clip range keeps the winding of off-screen
    // geometry while pinning its coverage to the boundary column.
    let mut x0 = xa.max(clip_left).min(clip_right);
    let mut x1 = xb.max(clip_left).min(clip_right);
    if x0 > x1 {
        core::mem::swap(&mut x0, &mut x1);
    }

    // Columns at or past the right clip edge are never emitted, so their
    // cells must stay untouched, or stale values would leak into the rows
    // resolved later. The span reaching such a fragment still has to be
    // resolved, all the way to the boundary, since the winding it would
    // cancel only settles off-screen.
    let limit = clip_right as i32;
    let mut add = |cells: &mut [Cell], ix: i32, area: f32, cover: f32| {
        if ix >= limit {
            if limit - 1 > *row_max {
                *row_max = limit - 1;
            }
            return;
        }
        let cell = &mut cells[ix as usize];
        cell.area += area;
        cell.cover += cover;
        if ix < *row_min {
            *row_min = ix;
        }
        if ix > *row_max {
            *row_max = ix;
        }
    };

    let ix0 = x0.floor() as i32;
    let ix1 = x1.floor() as i32;

    if ix0 == ix1 {
        let fx0 = x0 - ix0 as f32;
        let fx1 = x1 - ix0 as f32;
        add(cells, ix0, dy * (1.0 - (fx0 + fx1) * 0.5), dy);
        return;
    }

    let dy_per_x = dy / (x1 - x0);

    // First, partially covered column.
    let fx0 = x0 - ix0 as f32;
    let dy0 = dy_per_x * (1.0 - fx0);
    add(cells, ix0, dy0 * (1.0 - fx0) * 0.5, dy0);

    // Full middle columns. The fragment enters at the left boundary and
    // leaves at the right one, covering half of each column on average.
    for ix in ix0 + 1..ix1 {
        add(cells, ix, dy_per_x * 0.5, dy_per_x);
    }

    // Last column.
    let fx1 = x1 - ix1 as f32;
    let dy1 = dy_per_x * fx1;
    add(cells, ix1, dy1 * (1.0 - fx1 * 0.5), dy1);
}
