// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use tiny_canvas_path::{
    FlattenedPath, LineCap, LineJoin, Path, PathBuilder, PathFlattener, Stroke, StrokeDash,
    Stroker, Transform, PATH_FLATTENING_TOLERANCE,
};

use crate::blend_mode::CompositeOperation;
use crate::color::Color;
use crate::color_parser::parse_color;
use crate::error::CanvasError;
use crate::mask::{ClipStack, Mask};
use crate::painter;
use crate::pixmap::Pixmap;
use crate::scan::{FillRule, Rasterizer};
use crate::shaders::{
    ConicGradient, LinearGradient, Pattern, RadialGradient, RepeatMode, Shader,
};
use crate::shadow::{self, Shadow};

/// A block of non-premultiplied RGBA pixels, as exchanged through
/// `get_image_data`/`put_image_data`.
#[derive(Clone, PartialEq, Debug)]
pub struct ImageData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageData {
    /// Creates transparent-black image data.
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions);
        }

        Ok(ImageData {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA bytes, not premultiplied.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the mutable RGBA bytes, not premultiplied.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

// The value-typed state record pushed by save() and popped by restore().
#[derive(Clone, Debug)]
struct DrawingState {
    transform: Transform,
    fill_style: Shader,
    stroke_style: Shader,
    global_alpha: f32,
    composite_operation: CompositeOperation,
    line_width: f32,
    line_cap: LineCap,
    line_join: LineJoin,
    miter_limit: f32,
    dash_array: Vec<f32>,
    dash_offset: f32,
    shadow: Shadow,
    clip_depth: usize,
}

impl Default for DrawingState {
    fn default() -> Self {
        DrawingState {
            transform: Transform::identity(),
            fill_style: Shader::SolidColor(Color::BLACK),
            stroke_style: Shader::SolidColor(Color::BLACK),
            global_alpha: 1.0,
            composite_operation: CompositeOperation::SourceOver,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            dash_array: Vec::new(),
            dash_offset: 0.0,
            shadow: Shadow::default(),
            clip_depth: 0,
        }
    }
}

/// A 2D drawing context over an owned [`Pixmap`].
///
/// Mirrors the HTML5 `CanvasRenderingContext2D` model: a mutable current
/// state (transform, styles, line and shadow parameters, compositing
/// operation), a LIFO stack of state snapshots driven by
/// [`save`](Self::save)/[`restore`](Self::restore), and a current path
/// that deliberately survives both.
///
/// All drawing is synchronous; when a call returns, its pixels are
/// committed to the pixmap. State setters follow the HTML5 convention of
/// silently ignoring non-finite or out-of-range values, while structural
/// errors (invalid dash arrays, unparsable colors, bad gradient stops)
/// are reported.
pub struct Context {
    pixmap: Pixmap,
    state: DrawingState,
    saved_states: Vec<DrawingState>,
    path: PathBuilder,
    clip_stack: ClipStack,

    // Per-draw machinery, pooled across calls.
    flattener: PathFlattener,
    rasterizer: Rasterizer,
    stroker: Stroker,
    coverage: Mask,
    shadow_mask: Mask,
    shadow_scratch: Mask,
}

impl From<Pixmap> for Context {
    fn from(pixmap: Pixmap) -> Self {
        let w = pixmap.width();
        let h = pixmap.height();
        Context {
            pixmap,
            state: DrawingState::default(),
            saved_states: Vec::new(),
            path: PathBuilder::new(),
            clip_stack: ClipStack::new(),
            flattener: PathFlattener::new(),
            rasterizer: Rasterizer::new(),
            stroker: Stroker::new(),
            coverage: Mask::new(w, h),
            shadow_mask: Mask::new(w, h),
            shadow_scratch: Mask::new(w, h),
        }
    }
}

impl Context {
    /// Creates a new context with a transparent-black pixmap.
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        Ok(Context::from(Pixmap::new(width, height)?))
    }

    /// Returns the underlying pixmap.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Consumes the context, returning the pixmap.
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Returns pixmap's width.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Returns pixmap's height.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    // State management.

    /// Pushes a snapshot of the current state.
    ///
    /// The current path is not part of the state and is unaffected.
    pub fn save(&mut self) {
        self.saved_states.push(self.state.clone());
    }

    /// Pops the most recent snapshot, restoring every state value and
    /// dropping any clips applied since the matching [`save`](Self::save).
    ///
    /// An unmatched restore is a no-op.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved_states.pop() {
            self.clip_stack.truncate(state.clip_depth);
            self.state = state;
        }
    }

    // Transforms.

    /// Returns the current transform.
    pub fn current_transform(&self) -> Transform {
        self.state.transform
    }

    /// Replaces the current transform.
    pub fn set_current_transform(&mut self, ts: Transform) {
        self.state.transform = ts;
    }

    /// Returns the inverse of the current transform, which maps
    /// device-space positions back to user space.
    pub fn current_transform_inverse(&self) -> Result<Transform, CanvasError> {
        self.state
            .transform
            .invert()
            .ok_or(CanvasError::NonInvertible)
    }

    /// Multiplies the current transform by the given matrix.
    ///
    /// Non-finite values are silently ignored.
    pub fn transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        if let Some(m) = Transform::from_row(a, b, c, d, e, f) {
            if let Some(ts) = self.state.transform.pre_concat(&m) {
                self.state.transform = ts;
            }
        }
    }

    /// Replaces the current transform with the given matrix.
    ///
    /// Non-finite values are silently ignored.
    pub fn set_transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        if let Some(m) = Transform::from_row(a, b, c, d, e, f) {
            self.state.transform = m;
        }
    }

    /// Resets the current transform to identity.
    pub fn reset_transform(&mut self) {
        self.state.transform = Transform::identity();
    }

    /// Translates the coordinate system.
    pub fn translate(&mut self, tx: f32, ty: f32) {
        if let Some(ts) = self.state.transform.pre_translate(tx, ty) {
            self.state.transform = ts;
        }
    }

    /// Scales the coordinate system.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        if let Some(ts) = self.state.transform.pre_scale(sx, sy) {
            self.state.transform = ts;
        }
    }

    /// Rotates the coordinate system clockwise by `angle` radians.
    pub fn rotate(&mut self, angle: f32) {
        if let Some(ts) = self.state.transform.pre_rotate(angle) {
            self.state.transform = ts;
        }
    }

    // Compositing parameters.

    /// Returns the global alpha.
    pub fn global_alpha(&self) -> f32 {
        self.state.global_alpha
    }

    /// Sets the global alpha.
    ///
    /// Values outside 0..=1 and non-finite values are silently ignored.
    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    /// Returns the compositing operation.
    pub fn global_composite_operation(&self) -> CompositeOperation {
        self.state.composite_operation
    }

    /// Sets the compositing operation.
    pub fn set_global_composite_operation(&mut self, op: CompositeOperation) {
        self.state.composite_operation = op;
    }

    // Styles.

    /// Returns the fill style.
    pub fn fill_style(&self) -> &Shader {
        &self.state.fill_style
    }

    /// Sets the fill style to a paint source.
    pub fn set_fill_style(&mut self, style: Shader) {
        self.state.fill_style = style;
    }

    /// Sets the fill style from a CSS color string.
    pub fn set_fill_style_str(&mut self, css: &str) -> Result<(), CanvasError> {
        let color = parse_color(css).ok_or(CanvasError::InvalidColor)?;
        self.state.fill_style = Shader::SolidColor(color);
        Ok(())
    }

    /// Returns the stroke style.
    pub fn stroke_style(&self) -> &Shader {
        &self.state.stroke_style
    }

    /// Sets the stroke style to a paint source.
    pub fn set_stroke_style(&mut self, style: Shader) {
        self.state.stroke_style = style;
    }

    /// Sets the stroke style from a CSS color string.
    pub fn set_stroke_style_str(&mut self, css: &str) -> Result<(), CanvasError> {
        let color = parse_color(css).ok_or(CanvasError::InvalidColor)?;
        self.state.stroke_style = Shader::SolidColor(color);
        Ok(())
    }

    // Line parameters.

    /// Returns the line width.
    pub fn line_width(&self) -> f32 {
        self.state.line_width
    }

    /// Sets the line width.
    ///
    /// Zero, negative and non-finite values are silently ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    /// Returns the line cap.
    pub fn line_cap(&self) -> LineCap {
        self.state.line_cap
    }

    /// Sets the line cap.
    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    /// Returns the line join.
    pub fn line_join(&self) -> LineJoin {
        self.state.line_join
    }

    /// Sets the line join.
    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    /// Returns the miter limit.
    pub fn miter_limit(&self) -> f32 {
        self.state.miter_limit
    }

    /// Sets the miter limit.
    ///
    /// Zero, negative and non-finite values are silently ignored.
    pub fn set_miter_limit(&mut self, limit: f32) {
        if limit.is_finite() && limit > 0.0 {
            self.state.miter_limit = limit;
        }
    }

    /// Sets the line dash pattern.
    ///
    /// An odd number of intervals is duplicated, HTML5-style; an empty
    /// slice turns dashing off. Negative or non-finite values are an
    /// error and leave the pattern unchanged.
    pub fn set_line_dash(&mut self, intervals: &[f32]) -> Result<(), CanvasError> {
        if intervals.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(CanvasError::InvalidDash);
        }

        let mut dash_array = intervals.to_vec();
        if dash_array.len() % 2 != 0 {
            dash_array.extend_from_slice(intervals);
        }

        self.state.dash_array = dash_array;
        Ok(())
    }

    /// Returns the normalized line dash pattern.
    pub fn line_dash(&self) -> &[f32] {
        &self.state.dash_array
    }

    /// Returns the dash phase offset.
    pub fn line_dash_offset(&self) -> f32 {
        self.state.dash_offset
    }

    /// Sets the dash phase offset.
    ///
    /// Non-finite values are silently ignored, preserving the prior value.
    pub fn set_line_dash_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.dash_offset = offset;
        }
    }

    // Shadow parameters.

    /// Returns the shadow color.
    pub fn shadow_color(&self) -> Color {
        self.state.shadow.color
    }

    /// Sets the shadow color.
    pub fn set_shadow_color(&mut self, color: Color) {
        self.state.shadow.color = color;
    }

    /// Sets the shadow color from a CSS color string.
    pub fn set_shadow_color_str(&mut self, css: &str) -> Result<(), CanvasError> {
        self.state.shadow.color = parse_color(css).ok_or(CanvasError::InvalidColor)?;
        Ok(())
    }

    /// Returns the shadow blur amount.
    pub fn shadow_blur(&self) -> f32 {
        self.state.shadow.blur
    }

    /// Sets the shadow blur amount.
    ///
    /// Negative and non-finite values are silently ignored.
    pub fn set_shadow_blur(&mut self, blur: f32) {
        if blur.is_finite() && blur >= 0.0 {
            self.state.shadow.blur = blur;
        }
    }

    /// Returns the horizontal shadow offset.
    pub fn shadow_offset_x(&self) -> f32 {
        self.state.shadow.offset_x
    }

    /// Sets the horizontal shadow offset.
    ///
    /// Non-finite values are silently ignored.
    pub fn set_shadow_offset_x(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.shadow.offset_x = offset;
        }
    }

    /// Returns the vertical shadow offset.
    pub fn shadow_offset_y(&self) -> f32 {
        self.state.shadow.offset_y
    }

    /// Sets the vertical shadow offset.
    ///
    /// Non-finite values are silently ignored.
    pub fn set_shadow_offset_y(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.shadow.offset_y = offset;
        }
    }

    // Gradient and pattern factories.

    /// Creates a linear gradient between two points.
    pub fn create_linear_gradient(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> LinearGradient {
        LinearGradient::new(x0, y0, x1, y1)
    }

    /// Creates a radial gradient between two circles.
    pub fn create_radial_gradient(
        &self,
        x0: f32,
        y0: f32,
        r0: f32,
        x1: f32,
        y1: f32,
        r1: f32,
    ) -> RadialGradient {
        RadialGradient::new(x0, y0, r0, x1, y1, r1)
    }

    /// Creates a conic gradient around a center point.
    pub fn create_conic_gradient(&self, start_angle: f32, cx: f32, cy: f32) -> ConicGradient {
        ConicGradient::new(start_angle, cx, cy)
    }

    /// Creates a pattern from an image.
    pub fn create_pattern(&self, image: Pixmap, repeat: RepeatMode) -> Pattern {
        Pattern::new(image, repeat)
    }

    // Path construction. Coordinates are recorded as given and pushed
    // through the transform current at draw time.

    /// Starts a fresh current path.
    pub fn begin_path(&mut self) {
        self.path.clear();
    }

    /// See [`PathBuilder::move_to`].
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(x, y);
    }

    /// See [`PathBuilder::line_to`].
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(x, y);
    }

    /// See [`PathBuilder::quad_to`].
    pub fn quadratic_curve_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.path.quad_to(cx, cy, x, y);
    }

    /// See [`PathBuilder::cubic_to`].
    pub fn bezier_curve_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.path.cubic_to(c1x, c1y, c2x, c2y, x, y);
    }

    /// See [`PathBuilder::arc`].
    pub fn arc(&mut self, cx: f32, cy: f32, r: f32, start_angle: f32, end_angle: f32, ccw: bool) {
        self.path.arc(cx, cy, r, start_angle, end_angle, ccw);
    }

    /// See [`PathBuilder::ellipse`].
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
        self.path
            .ellipse(cx, cy, rx, ry, rotation, start_angle, end_angle, ccw);
    }

    /// See [`PathBuilder::arc_to`].
    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, r: f32) {
        self.path.arc_to(x1, y1, x2, y2, r);
    }

    /// See [`PathBuilder::push_rect`].
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.path.push_rect(x, y, w, h);
    }

    /// See [`PathBuilder::push_round_rect`].
    pub fn round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radii: &[f32]) {
        self.path.push_round_rect(x, y, w, h, radii);
    }

    /// See [`PathBuilder::close`].
    pub fn close_path(&mut self) {
        self.path.close();
    }

    // Drawing.

    /// Fills the current path.
    pub fn fill(&mut self, rule: FillRule) {
        if let Some(path) = self.path.clone().finish() {
            self.fill_path(&path, rule);
        }
    }

    /// Fills a retained path with the fill style.
    pub fn fill_path(&mut self, path: &Path, rule: FillRule) {
        let mut flat = FlattenedPath::new();
        self.flattener.flatten(
            path,
            self.state.transform,
            PATH_FLATTENING_TOLERANCE,
            &mut flat,
        );

        let style = self.state.fill_style.clone();
        self.render(
            &flat,
            rule,
            &style,
            1.0,
            self.state.composite_operation,
            self.state.global_alpha,
            true,
        );
    }

    /// Strokes the current path.
    pub fn stroke(&mut self) {
        if let Some(path) = self.path.clone().finish() {
            self.stroke_path(&path);
        }
    }

    /// Strokes a retained path with the stroke style.
    pub fn stroke_path(&mut self, path: &Path) {
        let style = self.state.stroke_style.clone();
        let op = self.state.composite_operation;
        let opacity = self.state.global_alpha;
        if let Some((outline, coverage_scale)) = self.build_stroke_outline(path) {
            self.render(
                &outline,
                FillRule::NonZero,
                &style,
                coverage_scale,
                op,
                opacity,
                true,
            );
        }
    }

    /// Fills a rectangle directly, without touching the current path.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let mut pb = PathBuilder::new();
        pb.push_rect(x, y, w, h);
        if let Some(path) = pb.finish() {
            self.fill_path(&path, FillRule::NonZero);
        }
    }

    /// Strokes a rectangle directly, without touching the current path.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let mut pb = PathBuilder::new();
        pb.push_rect(x, y, w, h);
        if let Some(path) = pb.finish() {
            self.stroke_path(&path);
        }
    }

    /// Clears a rectangle to transparent black.
    ///
    /// Honors the current transform and clip, but not the compositing
    /// operation, global alpha or shadow.
    pub fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let mut pb = PathBuilder::new();
        pb.push_rect(x, y, w, h);
        let path = match pb.finish() {
            Some(path) => path,
            None => return,
        };

        let mut flat = FlattenedPath::new();
        self.flattener.flatten(
            &path,
            self.state.transform,
            PATH_FLATTENING_TOLERANCE,
            &mut flat,
        );

        // Erasing is destination-out with an opaque source, applied at
        // full opacity no matter what the global alpha says.
        let style = Shader::SolidColor(Color::BLACK);
        self.render(
            &flat,
            FillRule::NonZero,
            &style,
            1.0,
            CompositeOperation::DestinationOut,
            1.0,
            false,
        );
    }

    /// Intersects the clip region with the current path.
    pub fn clip(&mut self, rule: FillRule) {
        let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height());

        if let Some(path) = self.path.clone().finish() {
            let mut flat = FlattenedPath::new();
            self.flattener.flatten(
                &path,
                self.state.transform,
                PATH_FLATTENING_TOLERANCE,
                &mut flat,
            );
            self.rasterizer
                .fill_path(&flat, rule, self.pixmap.rect(), &mut mask);
        }

        self.clip_stack.push(mask);
        self.state.clip_depth = self.clip_stack.depth();
    }

    // Queries.

    /// Checks whether a device-space point is inside the current path
    /// under the given fill rule and the current transform.
    pub fn is_point_in_path(&self, x: f32, y: f32, rule: FillRule) -> bool {
        let path = match self.path.clone().finish() {
            Some(path) => path,
            None => return false,
        };

        let mut flat = FlattenedPath::new();
        self.flattener.flatten(
            &path,
            self.state.transform,
            PATH_FLATTENING_TOLERANCE,
            &mut flat,
        );

        point_in_polygon(&flat, x, y, rule)
    }

    /// Checks whether a device-space point is inside the stroke of the
    /// current path, with the current line parameters and transform.
    pub fn is_point_in_stroke(&mut self, x: f32, y: f32) -> bool {
        let path = match self.path.clone().finish() {
            Some(path) => path,
            None => return false,
        };

        match self.build_stroke_outline(&path) {
            Some((outline, _)) => point_in_polygon(&outline, x, y, FillRule::NonZero),
            None => false,
        }
    }

    // Images.

    /// Reads back a block of pixels, demultiplied.
    ///
    /// The region may extend outside the surface; the out-of-range part
    /// is transparent black.
    pub fn get_image_data(
        &self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    ) -> Result<ImageData, CanvasError> {
        let mut image = ImageData::new(width, height)?;

        for row in 0..height {
            for col in 0..width {
                let sx = x.checked_add(col as i32);
                let sy = y.checked_add(row as i32);
                let pixel = match (sx, sy) {
                    (Some(sx), Some(sy)) if sx >= 0 && sy >= 0 => {
                        self.pixmap.pixel(sx as u32, sy as u32)
                    }
                    _ => None,
                };

                if let Some(pixel) = pixel {
                    let c = pixel.demultiply();
                    let idx = (row as usize * width as usize + col as usize) * 4;
                    image.data[idx] = c.red();
                    image.data[idx + 1] = c.green();
                    image.data[idx + 2] = c.blue();
                    image.data[idx + 3] = c.alpha();
                }
            }
        }

        Ok(image)
    }

    /// Writes a block of pixels verbatim.
    ///
    /// Not a drawing operation: ignores the transform, clip, global
    /// alpha and compositing operation, exactly like the HTML5 call.
    pub fn put_image_data(&mut self, image: &ImageData, x: i32, y: i32) {
        let width = self.pixmap.width() as i32;
        let height = self.pixmap.height() as i32;
        let stride = self.pixmap.width() as usize;
        let pixels = self.pixmap.pixels_mut();

        for row in 0..image.height {
            let dy = match y.checked_add(row as i32) {
                Some(dy) if dy >= 0 && dy < height => dy,
                _ => continue,
            };

            for col in 0..image.width {
                let dx = match x.checked_add(col as i32) {
                    Some(dx) if dx >= 0 && dx < width => dx,
                    _ => continue,
                };

                let idx = (row as usize * image.width as usize + col as usize) * 4;
                let color = Color::from_rgba8(
                    image.data[idx],
                    image.data[idx + 1],
                    image.data[idx + 2],
                    image.data[idx + 3],
                );
                pixels[dy as usize * stride + dx as usize] = color.premultiply_u8();
            }
        }
    }

    /// Draws an image at a position, at its natural size.
    pub fn draw_image(&mut self, image: &Pixmap, dx: f32, dy: f32) {
        let (w, h) = (image.width() as f32, image.height() as f32);
        self.draw_image_sub_rect(image, 0.0, 0.0, w, h, dx, dy, w, h);
    }

    /// Draws an image scaled into a destination rectangle.
    pub fn draw_image_rect(&mut self, image: &Pixmap, dx: f32, dy: f32, dw: f32, dh: f32) {
        let (w, h) = (image.width() as f32, image.height() as f32);
        self.draw_image_sub_rect(image, 0.0, 0.0, w, h, dx, dy, dw, dh);
    }

    /// Draws a sub-rectangle of an image into a destination rectangle.
    ///
    /// The source rectangle is clamped to the image bounds. Degenerate
    /// source or destination rectangles draw nothing.
    pub fn draw_image_sub_rect(
        &mut self,
        image: &Pixmap,
        sx: f32,
        sy: f32,
        sw: f32,
        sh: f32,
        dx: f32,
        dy: f32,
        dw: f32,
        dh: f32,
    ) {
        let all_finite = sx.is_finite()
            && sy.is_finite()
            && sw.is_finite()
            && sh.is_finite()
            && dx.is_finite()
            && dy.is_finite()
            && dw.is_finite()
            && dh.is_finite();
        if !all_finite {
            return;
        }

        // Clamp the source rect to the image.
        let (iw, ih) = (image.width() as f32, image.height() as f32);
        let sx0 = sx.max(0.0);
        let sy0 = sy.max(0.0);
        let sx1 = (sx + sw).min(iw);
        let sy1 = (sy + sh).min(ih);
        let (sw, sh) = (sx1 - sx0, sy1 - sy0);
        if sw <= 0.0 || sh <= 0.0 || dw == 0.0 || dh == 0.0 {
            return;
        }

        // image space -> destination rect in user space
        let pattern_ts = Transform::from_translate(dx, dy)
            .and_then(|ts| ts.pre_scale(dw / sw, dh / sh))
            .and_then(|ts| ts.pre_translate(-sx0, -sy0));
        let pattern_ts = match pattern_ts {
            Some(ts) => ts,
            None => return,
        };

        let mut pattern = Pattern::new(image.clone(), RepeatMode::NoRepeat);
        pattern.set_transform(pattern_ts);

        let mut pb = PathBuilder::new();
        pb.push_rect(dx, dy, dw, dh);
        let path = match pb.finish() {
            Some(path) => path,
            None => return,
        };

        let mut flat = FlattenedPath::new();
        self.flattener.flatten(
            &path,
            self.state.transform,
            PATH_FLATTENING_TOLERANCE,
            &mut flat,
        );

        let style = Shader::Pattern(pattern);
        self.render(
            &flat,
            FillRule::NonZero,
            &style,
            1.0,
            self.state.composite_operation,
            self.state.global_alpha,
            true,
        );
    }

    // The shared back half of every drawing operation: rasterize the
    // device-space polygon, run the shadow pass, then composite.
    fn render(
        &mut self,
        device_path: &FlattenedPath,
        rule: FillRule,
        style: &Shader,
        coverage_scale: f32,
        op: CompositeOperation,
        opacity: f32,
        with_shadow: bool,
    ) {
        let prepared = match style.prepare(self.state.transform) {
            Some(prepared) => prepared,
            None => return,
        };

        let bounds =
            self.rasterizer
                .fill_path(device_path, rule, self.pixmap.rect(), &mut self.coverage);

        if bounds.is_none() && !op.is_global() {
            return;
        }

        let clip = self.clip_stack.top();

        if with_shadow && self.state.shadow.is_enabled() {
            if let Some(coverage_bounds) = bounds {
                let shadow_bounds = shadow::prepare_shadow_mask(
                    &self.coverage,
                    coverage_bounds,
                    &self.state.shadow,
                    &prepared,
                    &mut self.shadow_mask,
                    &mut self.shadow_scratch,
                );

                if let Some(shadow_bounds) = shadow_bounds {
                    let shadow_shader = Shader::SolidColor(self.state.shadow.color);
                    if let Some(shadow_prepared) = shadow_shader.prepare(Transform::identity()) {
                        painter::composite_mask(
                            &mut self.pixmap,
                            &self.shadow_mask,
                            Some(shadow_bounds),
                            coverage_scale,
                            &shadow_prepared,
                            opacity,
                            op,
                            clip,
                        );
                    }
                }
            }
        }

        painter::composite_mask(
            &mut self.pixmap,
            &self.coverage,
            bounds,
            coverage_scale,
            &prepared,
            opacity,
            op,
            clip,
        );
    }

    // Flattens, dashes and expands the current-state stroke of `path`,
    // returning the device-space outline and the coverage scale that
    // keeps sub-pixel-wide strokes proportionally faint.
    fn build_stroke_outline(&mut self, path: &Path) -> Option<(FlattenedPath, f32)> {
        let ts = self.state.transform;
        let res_scale = ts.max_scale();

        // Stroke geometry lives in user space, so the flattening density
        // has to anticipate the transform that is applied afterwards.
        let tolerance = PATH_FLATTENING_TOLERANCE / res_scale;

        let mut flat = FlattenedPath::new();
        self.flattener
            .flatten(path, Transform::identity(), tolerance, &mut flat);

        let dash = if self.state.dash_array.is_empty() {
            None
        } else {
            StrokeDash::new(self.state.dash_array.clone(), self.state.dash_offset)
        };

        let device_width = self.state.line_width * res_scale;
        let (width, coverage_scale) = if device_width < 1.0 {
            // Sub-pixel strokes render at one device pixel and scale the
            // coverage instead, so hairlines stay visible.
            (1.0 / res_scale, device_width)
        } else {
            (self.state.line_width, 1.0)
        };

        let stroke = Stroke {
            width,
            miter_limit: self.state.miter_limit,
            line_cap: self.state.line_cap,
            line_join: self.state.line_join,
            dash,
        };

        let mut outline = FlattenedPath::new();
        self.stroker.stroke(&flat, &stroke, tolerance, &mut outline);
        if outline.is_empty() {
            return None;
        }

        outline.transform(ts);
        Some((outline, coverage_scale))
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("pixmap", &self.pixmap)
            .field("saved_states", &self.saved_states.len())
            .finish()
    }
}

// An even-odd / non-zero point-in-polygon test over flattened subpaths,
// using the same implicit closing edge as the rasterizer.
fn point_in_polygon(flat: &FlattenedPath, x: f32, y: f32, rule: FillRule) -> bool {
    let mut winding = 0i32;
    let mut crossings = 0u32;

    for (points, _) in flat.subpaths() {
        for i in 0..points.len() {
            let p0 = points[i];
            let p1 = points[(i + 1) % points.len()];
            if p0.y == p1.y {
                continue;
            }

            let (lower, upper, dir) = if p0.y < p1.y {
                (p0, p1, 1)
            } else {
                (p1, p0, -1)
            };

            if y >= lower.y && y < upper.y {
                let t = (y - lower.y) / (upper.y - lower.y);
                let cross_x = lower.x + t * (upper.x - lower.x);
                if cross_x > x {
                    winding += dir;
                    crossings += 1;
                }
            }
        }
    }

    match rule {
        FillRule::NonZero => winding != 0,
        FillRule::EvenOdd => crossings % 2 == 1,
    }
}
