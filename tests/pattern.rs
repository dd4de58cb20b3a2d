use tiny_canvas::*;

fn rgba(ctx: &Context, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let c = ctx.pixmap().pixel(x, y).unwrap().demultiply();
    (c.red(), c.green(), c.blue(), c.alpha())
}

// A 2x2 image: red, green / blue, white.
fn checker() -> Pixmap {
    let mut pixmap = Pixmap::new(2, 2).unwrap();
    let px = pixmap.pixels_mut();
    px[0] = Color::from_rgba8(255, 0, 0, 255).premultiply_u8();
    px[1] = Color::from_rgba8(0, 255, 0, 255).premultiply_u8();
    px[2] = Color::from_rgba8(0, 0, 255, 255).premultiply_u8();
    px[3] = Color::from_rgba8(255, 255, 255, 255).premultiply_u8();
    pixmap
}

#[test]
fn repeating_pattern_tiles() {
    let mut ctx = Context::new(8, 8).unwrap();
    let pattern = ctx.create_pattern(checker(), RepeatMode::Repeat);
    ctx.set_fill_style(Shader::Pattern(pattern));
    ctx.fill_rect(0.0, 0.0, 8.0, 8.0);

    assert_eq!(rgba(&ctx, 0, 0), (255, 0, 0, 255));
    assert_eq!(rgba(&ctx, 1, 0), (0, 255, 0, 255));
    assert_eq!(rgba(&ctx, 0, 1), (0, 0, 255, 255));
    assert_eq!(rgba(&ctx, 1, 1), (255, 255, 255, 255));
    // One tile over.
    assert_eq!(rgba(&ctx, 2, 0), (255, 0, 0, 255));
    assert_eq!(rgba(&ctx, 6, 4), (255, 0, 0, 255));
    assert_eq!(rgba(&ctx, 7, 7), (255, 255, 255, 255));
}

#[test]
fn no_repeat_pattern_draws_once() {
    let mut ctx = Context::new(8, 8).unwrap();
    let pattern = ctx.create_pattern(checker(), RepeatMode::NoRepeat);
    ctx.set_fill_style(Shader::Pattern(pattern));
    ctx.fill_rect(0.0, 0.0, 8.0, 8.0);

    assert_eq!(rgba(&ctx, 1, 1), (255, 255, 255, 255));
    // Outside the single tile, the pattern is transparent.
    assert_eq!(ctx.pixmap().pixel(4, 4).unwrap().alpha(), 0);
}

#[test]
fn repeat_x_only_tiles_horizontally() {
    let mut ctx = Context::new(8, 8).unwrap();
    let pattern = ctx.create_pattern(checker(), RepeatMode::RepeatX);
    ctx.set_fill_style(Shader::Pattern(pattern));
    ctx.fill_rect(0.0, 0.0, 8.0, 8.0);

    assert_eq!(rgba(&ctx, 6, 0), (255, 0, 0, 255));
    assert_eq!(ctx.pixmap().pixel(6, 5).unwrap().alpha(), 0);
}

#[test]
fn pattern_follows_the_transform() {
    let mut ctx = Context::new(8, 8).unwrap();
    let pattern = ctx.create_pattern(checker(), RepeatMode::Repeat);
    ctx.set_fill_style(Shader::Pattern(pattern));
    ctx.translate(1.0, 0.0);
    ctx.fill_rect(-1.0, 0.0, 9.0, 8.0);

    // The tile origin moved right by one pixel.
    assert_eq!(rgba(&ctx, 1, 0), (255, 0, 0, 255));
    assert_eq!(rgba(&ctx, 2, 0), (0, 255, 0, 255));
}

#[test]
fn draw_image_at_natural_size() {
    let mut ctx = Context::new(10, 10).unwrap();
    ctx.draw_image(&checker(), 4.0, 4.0);

    assert_eq!(rgba(&ctx, 4, 4), (255, 0, 0, 255));
    assert_eq!(rgba(&ctx, 5, 4), (0, 255, 0, 255));
    assert_eq!(rgba(&ctx, 4, 5), (0, 0, 255, 255));
    assert_eq!(rgba(&ctx, 5, 5), (255, 255, 255, 255));
    assert_eq!(ctx.pixmap().pixel(6, 6).unwrap().alpha(), 0);
    assert_eq!(ctx.pixmap().pixel(3, 3).unwrap().alpha(), 0);
}

#[test]
fn draw_image_scaled() {
    let mut ctx = Context::new(20, 20).unwrap();
    ctx.draw_image_rect(&checker(), 0.0, 0.0, 8.0, 8.0);

    // Each source pixel now covers a 4x4 block.
    assert_eq!(rgba(&ctx, 1, 1), (255, 0, 0, 255));
    assert_eq!(rgba(&ctx, 6, 1), (0, 255, 0, 255));
    assert_eq!(rgba(&ctx, 1, 6), (0, 0, 255, 255));
    assert_eq!(rgba(&ctx, 6, 6), (255, 255, 255, 255));
}

#[test]
fn draw_image_sub_rect_selects_the_source() {
    let mut ctx = Context::new(10, 10).unwrap();
    // Blow the green source pixel up to 6x6.
    ctx.draw_image_sub_rect(&checker(), 1.0, 0.0, 1.0, 1.0, 2.0, 2.0, 6.0, 6.0);

    assert_eq!(rgba(&ctx, 4, 4), (0, 255, 0, 255));
    assert_eq!(rgba(&ctx, 2, 2), (0, 255, 0, 255));
    assert_eq!(ctx.pixmap().pixel(1, 1).unwrap().alpha(), 0);
}

#[test]
fn draw_image_respects_transform_and_alpha() {
    let mut ctx = Context::new(20, 20).unwrap();
    ctx.translate(10.0, 0.0);
    ctx.set_global_alpha(0.5);
    ctx.draw_image(&checker(), 0.0, 0.0);

    let p = ctx.pixmap().pixel(10, 0).unwrap();
    assert!((p.alpha() as i32 - 128).abs() <= 1);
    assert_eq!(ctx.pixmap().pixel(0, 0).unwrap().alpha(), 0);
}

#[test]
fn degenerate_draw_image_is_skipped() {
    let mut ctx = Context::new(10, 10).unwrap();
    ctx.draw_image_sub_rect(&checker(), 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 5.0, 5.0);
    ctx.draw_image_rect(&checker(), 0.0, 0.0, 0.0, 5.0);

    for p in ctx.pixmap().pixels() {
        assert_eq!(p.alpha(), 0);
    }
}
