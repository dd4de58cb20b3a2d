/*!
`tiny-canvas` is a tiny, software-only HTML5 Canvas 2D renderer.

It rasterizes Canvas-style drawing commands — paths, fills, strokes with
dashes, clips, gradients, patterns, shadows and the Porter-Duff
compositing operations — into a premultiplied RGBA8 [`Pixmap`], entirely
on the CPU and deterministically.

## Overview

- [`Pixmap`] owns the pixels.
- [`Context`] holds the drawing state (transform, styles, line and shadow
  parameters, compositing operation), a save/restore stack and the
  current path, and orchestrates every draw.
- Geometry lives in the `tiny-canvas-path` crate: recorded [`Path`]s,
  flattening, stroke expansion and dashing.

## Example

```rust
use tiny_canvas::{Context, FillRule};

let mut ctx = Context::new(200, 200).unwrap();
ctx.set_fill_style_str("#2a6").unwrap();
ctx.begin_path();
ctx.arc(100.0, 100.0, 80.0, 0.0, 7.0, false);
ctx.fill(FillRule::NonZero);
let pixel = ctx.pixmap().pixel(100, 100).unwrap();
assert_eq!(pixel.demultiply().green(), 170);
```
*/

#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![allow(clippy::approx_constant)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::float_cmp)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

mod blend_mode;
mod color;
mod color_parser;
mod context;
mod error;
mod int_rect;
mod mask;
mod painter;
mod pixmap;
mod scan;
mod screen_int_rect;
mod shaders;
mod shadow;

pub use tiny_canvas_path::{
    FlattenedPath, IntSize, LineCap, LineJoin, Path, PathBuilder, PathFlattener, PathSegment,
    PathVerb, Point, Rect, Stroke, StrokeDash, Stroker, SubPath, Transform,
    PATH_FLATTENING_TOLERANCE,
};

pub use blend_mode::CompositeOperation;
pub use color::{
    premultiply_u8, AlphaU8, Color, ColorU8, PremultipliedColorU8, ALPHA_U8_OPAQUE,
    ALPHA_U8_TRANSPARENT,
};
pub use color_parser::parse_color;
pub use context::{Context, ImageData};
pub use error::CanvasError;
pub use int_rect::IntRect;
pub use pixmap::{Pixmap, PixmapRef, BYTES_PER_PIXEL, MAX_DIMENSION};
pub use scan::{FillRule, FILL_EPSILON};
pub use shaders::{
    ConicGradient, GradientStop, LinearGradient, Pattern, RadialGradient, RepeatMode, Shader,
};
pub use shadow::Shadow;
