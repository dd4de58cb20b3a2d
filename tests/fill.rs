use tiny_canvas::*;

fn rgba(ctx: &Context, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let c = ctx.pixmap().pixel(x, y).unwrap().demultiply();
    (c.red(), c.green(), c.blue(), c.alpha())
}

#[test]
fn overlapping_rects() {
    let mut ctx = Context::new(100, 100).unwrap();

    ctx.set_fill_style(Shader::SolidColor(Color::from_rgba8(255, 0, 0, 255)));
    ctx.fill_rect(0.0, 0.0, 100.0, 100.0);

    ctx.set_fill_style(Shader::SolidColor(Color::from_rgba8(0, 0, 255, 255)));
    ctx.fill_rect(25.0, 25.0, 50.0, 50.0);

    assert_eq!(rgba(&ctx, 10, 10), (255, 0, 0, 255));
    assert_eq!(rgba(&ctx, 50, 50), (0, 0, 255, 255));
    assert_eq!(rgba(&ctx, 80, 80), (255, 0, 0, 255));
}

#[test]
fn full_surface_fill_is_exact() {
    let mut ctx = Context::new(64, 32).unwrap();
    ctx.set_fill_style(Shader::SolidColor(Color::from_rgba8(12, 34, 56, 255)));
    ctx.fill_rect(0.0, 0.0, 64.0, 32.0);

    for y in 0..32 {
        for x in 0..64 {
            assert_eq!(rgba(&ctx, x, y), (12, 34, 56, 255), "at {} {}", x, y);
        }
    }
}

#[test]
fn even_odd_hole() {
    let mut ctx = Context::new(100, 100).unwrap();
    ctx.set_fill_style_str("white").unwrap();
    ctx.fill_rect(0.0, 0.0, 100.0, 100.0);

    ctx.set_fill_style_str("red").unwrap();
    ctx.begin_path();
    ctx.rect(20.0, 20.0, 60.0, 60.0);
    ctx.rect(30.0, 30.0, 40.0, 40.0);
    ctx.fill(FillRule::EvenOdd);

    assert_eq!(rgba(&ctx, 25, 50), (255, 0, 0, 255));
    assert_eq!(rgba(&ctx, 50, 50), (255, 255, 255, 255));
    assert_eq!(rgba(&ctx, 10, 10), (255, 255, 255, 255));
}

#[test]
fn non_zero_keeps_the_middle() {
    let mut ctx = Context::new(100, 100).unwrap();
    ctx.set_fill_style_str("red").unwrap();
    ctx.begin_path();
    ctx.rect(20.0, 20.0, 60.0, 60.0);
    ctx.rect(30.0, 30.0, 40.0, 40.0);
    ctx.fill(FillRule::NonZero);

    assert_eq!(rgba(&ctx, 50, 50), (255, 0, 0, 255));
}

#[test]
fn zero_sized_rect_draws_nothing() {
    let mut ctx = Context::new(50, 50).unwrap();
    ctx.set_fill_style_str("red").unwrap();
    ctx.fill_rect(10.0, 10.0, 0.0, 30.0);
    ctx.fill_rect(10.0, 10.0, 30.0, 0.0);

    for y in 0..50 {
        for x in 0..50 {
            assert_eq!(ctx.pixmap().pixel(x, y).unwrap().alpha(), 0);
        }
    }
}

#[test]
fn fill_honors_transform() {
    let mut ctx = Context::new(100, 100).unwrap();
    ctx.set_fill_style_str("lime").unwrap();
    ctx.translate(30.0, 40.0);
    ctx.fill_rect(0.0, 0.0, 10.0, 10.0);

    assert_eq!(rgba(&ctx, 35, 45), (0, 255, 0, 255));
    assert_eq!(ctx.pixmap().pixel(5, 5).unwrap().alpha(), 0);
}

#[test]
fn half_covered_edges_are_blended() {
    let mut ctx = Context::new(20, 20).unwrap();
    ctx.set_fill_style_str("black").unwrap();
    ctx.fill_rect(5.5, 5.0, 9.0, 9.0);

    // The column at x=5 is covered half, the interior fully.
    let edge = ctx.pixmap().pixel(5, 10).unwrap().alpha();
    assert!((edge as i32 - 128).abs() <= 1, "edge alpha = {}", edge);
    assert_eq!(ctx.pixmap().pixel(10, 10).unwrap().alpha(), 255);
}

#[test]
fn circle_fill_is_round() {
    let mut ctx = Context::new(100, 100).unwrap();
    ctx.set_fill_style_str("blue").unwrap();
    ctx.begin_path();
    ctx.arc(50.0, 50.0, 30.0, 0.0, 7.0, false);
    ctx.fill(FillRule::NonZero);

    // Center and a point well inside.
    assert_eq!(rgba(&ctx, 50, 50), (0, 0, 255, 255));
    assert_eq!(rgba(&ctx, 30, 50).3, 255);
    // Corners of the bounding box are outside the circle.
    assert_eq!(ctx.pixmap().pixel(25, 25).unwrap().alpha(), 0);
    assert_eq!(ctx.pixmap().pixel(75, 75).unwrap().alpha(), 0);
}

#[test]
fn arc_with_equal_angles_draws_nothing() {
    let mut ctx = Context::new(50, 50).unwrap();
    ctx.set_fill_style_str("red").unwrap();
    ctx.begin_path();
    ctx.arc(25.0, 25.0, 10.0, 1.0, 1.0, false);
    ctx.fill(FillRule::NonZero);

    for y in 0..50 {
        for x in 0..50 {
            assert_eq!(ctx.pixmap().pixel(x, y).unwrap().alpha(), 0);
        }
    }
}

#[test]
fn is_point_in_path_agrees_with_fill() {
    let mut ctx = Context::new(100, 100).unwrap();
    ctx.set_fill_style_str("black").unwrap();
    ctx.begin_path();
    ctx.arc(50.0, 50.0, 25.0, 0.0, 7.0, false);

    let inside = [(50.0, 50.0), (35.0, 50.0), (50.0, 70.0)];
    let outside = [(10.0, 10.0), (50.0, 80.0), (80.0, 50.0)];

    for &(x, y) in &inside {
        assert!(ctx.is_point_in_path(x, y, FillRule::NonZero), "{} {}", x, y);
    }
    for &(x, y) in &outside {
        assert!(!ctx.is_point_in_path(x, y, FillRule::NonZero), "{} {}", x, y);
    }

    ctx.fill(FillRule::NonZero);
    for &(x, y) in &inside {
        let alpha = ctx.pixmap().pixel(x as u32, y as u32).unwrap().alpha();
        assert!(alpha >= 128, "{} {} -> {}", x, y, alpha);
    }
}

#[test]
fn fill_preserves_premultiplication() {
    let mut ctx = Context::new(64, 64).unwrap();
    ctx.set_fill_style(Shader::SolidColor(Color::from_rgba(1.0, 0.8, 0.2, 0.4).unwrap()));
    ctx.begin_path();
    ctx.arc(32.0, 32.0, 20.0, 0.0, 7.0, false);
    ctx.fill(FillRule::NonZero);

    for p in ctx.pixmap().pixels() {
        assert!(p.red() <= p.alpha());
        assert!(p.green() <= p.alpha());
        assert!(p.blue() <= p.alpha());
    }
}
