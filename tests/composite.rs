use tiny_canvas::*;

fn rgba(ctx: &Context, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let c = ctx.pixmap().pixel(x, y).unwrap().demultiply();
    (c.red(), c.green(), c.blue(), c.alpha())
}

fn premul(ctx: &Context, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let p = ctx.pixmap().pixel(x, y).unwrap();
    (p.red(), p.green(), p.blue(), p.alpha())
}

#[test]
fn xor_cancels_where_shapes_overlap() {
    let mut ctx = Context::new(150, 150).unwrap();

    ctx.set_fill_style_str("blue").unwrap();
    ctx.fill_rect(30.0, 30.0, 60.0, 60.0);

    ctx.set_global_composite_operation(CompositeOperation::Xor);
    ctx.set_fill_style_str("red").unwrap();
    ctx.begin_path();
    ctx.arc(75.0, 45.0, 25.0, 0.0, 7.0, false);
    ctx.fill(FillRule::NonZero);

    // Blue rect only.
    assert_eq!(rgba(&ctx, 40, 80), (0, 0, 255, 255));
    // Circle only, above the rect.
    assert_eq!(rgba(&ctx, 70, 27), (255, 0, 0, 255));
    // Overlap: cancelled to transparent.
    assert_eq!(premul(&ctx, 70, 45), (0, 0, 0, 0));
}

#[test]
fn copy_replaces_and_clears_the_rest() {
    let mut ctx = Context::new(300, 200).unwrap();

    ctx.set_fill_style(Shader::SolidColor(
        Color::from_rgba(128.0 / 255.0, 0.0, 128.0 / 255.0, 0.7).unwrap(),
    ));
    ctx.fill_rect(10.0, 160.0, 40.0, 30.0);

    ctx.set_global_composite_operation(CompositeOperation::Copy);
    ctx.set_fill_style(Shader::SolidColor(
        Color::from_rgba(1.0, 165.0 / 255.0, 0.0, 0.5).unwrap(),
    ));
    ctx.fill_rect(20.0, 170.0, 20.0, 10.0);

    // Premultiplied (255, 165, 0) at 50% alpha.
    let (r, g, b, a) = premul(&ctx, 30, 175);
    assert!((r as i32 - 128).abs() <= 1);
    assert!((g as i32 - 83).abs() <= 1);
    assert_eq!(b, 0);
    assert!((a as i32 - 128).abs() <= 1);

    // `copy` wipes pixels the source never covered, including the
    // earlier purple rect.
    assert_eq!(premul(&ctx, 12, 162), (0, 0, 0, 0));
    assert_eq!(premul(&ctx, 250, 20), (0, 0, 0, 0));
}

#[test]
fn destination_out_erases() {
    let mut ctx = Context::new(100, 100).unwrap();
    ctx.set_fill_style_str("green").unwrap();
    ctx.fill_rect(0.0, 0.0, 100.0, 100.0);

    ctx.set_global_composite_operation(CompositeOperation::DestinationOut);
    ctx.set_fill_style_str("black").unwrap();
    ctx.fill_rect(25.0, 25.0, 50.0, 50.0);

    assert_eq!(premul(&ctx, 50, 50), (0, 0, 0, 0));
    assert_eq!(rgba(&ctx, 10, 10), (0, 128, 0, 255));
}

#[test]
fn source_in_keeps_only_the_overlap() {
    let mut ctx = Context::new(100, 100).unwrap();
    ctx.set_fill_style_str("blue").unwrap();
    ctx.fill_rect(0.0, 0.0, 50.0, 100.0);

    ctx.set_global_composite_operation(CompositeOperation::SourceIn);
    ctx.set_fill_style_str("red").unwrap();
    ctx.fill_rect(25.0, 25.0, 50.0, 50.0);

    // Source over former destination: red survives.
    assert_eq!(rgba(&ctx, 30, 50), (255, 0, 0, 255));
    // Source outside destination: cleared.
    assert_eq!(premul(&ctx, 60, 50), (0, 0, 0, 0));
    // Destination outside source: cleared too.
    assert_eq!(premul(&ctx, 10, 10), (0, 0, 0, 0));
}

#[test]
fn destination_over_fills_the_gaps() {
    let mut ctx = Context::new(100, 100).unwrap();
    ctx.set_fill_style(Shader::SolidColor(Color::from_rgba(0.0, 0.0, 1.0, 0.5).unwrap()));
    ctx.fill_rect(0.0, 0.0, 50.0, 100.0);

    ctx.set_global_composite_operation(CompositeOperation::DestinationOver);
    ctx.set_fill_style_str("red").unwrap();
    ctx.fill_rect(25.0, 25.0, 50.0, 50.0);

    // Where the translucent blue exists, it stays in front.
    let (r, _, b, a) = rgba(&ctx, 30, 50);
    assert_eq!(a, 255);
    assert!(b > 100 && r > 100);
    // Where the destination was empty, red shows.
    assert_eq!(rgba(&ctx, 60, 50), (255, 0, 0, 255));
}

#[test]
fn lighter_adds_channels() {
    let mut ctx = Context::new(50, 50).unwrap();
    ctx.set_fill_style(Shader::SolidColor(Color::from_rgba(0.25, 0.5, 0.0, 1.0).unwrap()));
    ctx.fill_rect(0.0, 0.0, 50.0, 50.0);

    ctx.set_global_composite_operation(CompositeOperation::Lighter);
    ctx.set_fill_style(Shader::SolidColor(Color::from_rgba(0.25, 0.75, 0.0, 1.0).unwrap()));
    ctx.fill_rect(0.0, 0.0, 50.0, 50.0);

    let (r, g, _, a) = premul(&ctx, 25, 25);
    assert!((r as i32 - 128).abs() <= 2, "r = {}", r);
    // 0.5 + 0.75 saturates to 1.
    assert_eq!(g, 255);
    assert_eq!(a, 255);
}

#[test]
fn global_alpha_scales_the_source() {
    let mut ctx = Context::new(50, 50).unwrap();
    ctx.set_fill_style_str("white").unwrap();
    ctx.fill_rect(0.0, 0.0, 50.0, 50.0);

    ctx.set_global_alpha(0.5);
    ctx.set_fill_style_str("black").unwrap();
    ctx.fill_rect(0.0, 0.0, 50.0, 50.0);

    let (r, g, b, a) = premul(&ctx, 25, 25);
    assert_eq!(a, 255);
    for v in [r, g, b] {
        assert!((v as i32 - 128).abs() <= 1, "v = {}", v);
    }
}

#[test]
fn invalid_global_alpha_is_ignored() {
    let mut ctx = Context::new(10, 10).unwrap();
    ctx.set_global_alpha(0.25);
    ctx.set_global_alpha(-1.0);
    ctx.set_global_alpha(2.0);
    ctx.set_global_alpha(f32::NAN);
    assert_eq!(ctx.global_alpha(), 0.25);
}

#[test]
fn clear_rect_ignores_alpha_and_op() {
    let mut ctx = Context::new(100, 100).unwrap();
    ctx.set_fill_style_str("red").unwrap();
    ctx.fill_rect(0.0, 0.0, 100.0, 100.0);

    ctx.set_global_alpha(0.1);
    ctx.set_global_composite_operation(CompositeOperation::Lighter);
    ctx.clear_rect(25.0, 25.0, 50.0, 50.0);

    assert_eq!(premul(&ctx, 50, 50), (0, 0, 0, 0));
    assert_eq!(rgba(&ctx, 10, 10), (255, 0, 0, 255));
}
