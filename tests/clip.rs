use tiny_canvas::*;

fn rgba(ctx: &Context, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let c = ctx.pixmap().pixel(x, y).unwrap().demultiply();
    (c.red(), c.green(), c.blue(), c.alpha())
}

#[test]
fn clip_confines_fills() {
    let mut ctx = Context::new(100, 100).unwrap();
    ctx.set_fill_style_str("white").unwrap();
    ctx.fill_rect(0.0, 0.0, 100.0, 100.0);

    ctx.begin_path();
    ctx.rect(25.0, 25.0, 50.0, 50.0);
    ctx.clip(FillRule::NonZero);

    ctx.set_fill_style_str("red").unwrap();
    ctx.fill_rect(0.0, 0.0, 100.0, 100.0);

    assert_eq!(rgba(&ctx, 10, 10), (255, 255, 255, 255));
    assert_eq!(rgba(&ctx, 50, 50), (255, 0, 0, 255));
    assert_eq!(rgba(&ctx, 80, 80), (255, 255, 255, 255));
}

#[test]
fn nested_clips_only_narrow() {
    let mut ctx = Context::new(100, 100).unwrap();

    ctx.begin_path();
    ctx.rect(20.0, 20.0, 40.0, 40.0);
    ctx.clip(FillRule::NonZero);

    // A second, shifted clip narrows to the intersection; it can never
    // re-expand the region.
    ctx.begin_path();
    ctx.rect(40.0, 40.0, 40.0, 40.0);
    ctx.clip(FillRule::NonZero);

    ctx.set_fill_style_str("red").unwrap();
    ctx.fill_rect(0.0, 0.0, 100.0, 100.0);

    // Only [40, 60) x [40, 60) survives both clips.
    assert_eq!(rgba(&ctx, 50, 50), (255, 0, 0, 255));
    assert_eq!(ctx.pixmap().pixel(30, 30).unwrap().alpha(), 0);
    assert_eq!(ctx.pixmap().pixel(70, 70).unwrap().alpha(), 0);
}

#[test]
fn restore_reopens_the_clip() {
    let mut ctx = Context::new(100, 100).unwrap();

    ctx.save();
    ctx.begin_path();
    ctx.rect(25.0, 25.0, 50.0, 50.0);
    ctx.clip(FillRule::NonZero);
    ctx.restore();

    ctx.set_fill_style_str("red").unwrap();
    ctx.fill_rect(0.0, 0.0, 100.0, 100.0);

    // The clip died with the restore.
    assert_eq!(rgba(&ctx, 10, 10), (255, 0, 0, 255));
}

#[test]
fn clip_respects_the_transform() {
    let mut ctx = Context::new(100, 100).unwrap();

    ctx.translate(30.0, 30.0);
    ctx.begin_path();
    ctx.rect(0.0, 0.0, 20.0, 20.0);
    ctx.clip(FillRule::NonZero);
    ctx.reset_transform();

    ctx.set_fill_style_str("red").unwrap();
    ctx.fill_rect(0.0, 0.0, 100.0, 100.0);

    assert_eq!(rgba(&ctx, 40, 40), (255, 0, 0, 255));
    assert_eq!(ctx.pixmap().pixel(10, 10).unwrap().alpha(), 0);
    assert_eq!(ctx.pixmap().pixel(60, 60).unwrap().alpha(), 0);
}

#[test]
fn empty_clip_blocks_everything() {
    let mut ctx = Context::new(50, 50).unwrap();

    ctx.begin_path();
    ctx.clip(FillRule::NonZero);

    ctx.set_fill_style_str("red").unwrap();
    ctx.fill_rect(0.0, 0.0, 50.0, 50.0);

    for y in 0..50 {
        for x in 0..50 {
            assert_eq!(ctx.pixmap().pixel(x, y).unwrap().alpha(), 0);
        }
    }
}

#[test]
fn clip_applies_to_global_operations() {
    let mut ctx = Context::new(100, 100).unwrap();
    ctx.set_fill_style_str("blue").unwrap();
    ctx.fill_rect(0.0, 0.0, 100.0, 100.0);

    ctx.begin_path();
    ctx.rect(25.0, 25.0, 50.0, 50.0);
    ctx.clip(FillRule::NonZero);

    ctx.set_global_composite_operation(CompositeOperation::Copy);
    ctx.set_fill_style_str("red").unwrap();
    ctx.fill_rect(40.0, 40.0, 10.0, 10.0);

    // Inside the clip and the source: replaced.
    assert_eq!(rgba(&ctx, 45, 45), (255, 0, 0, 255));
    // Inside the clip, outside the source: cleared by the global op.
    assert_eq!(ctx.pixmap().pixel(30, 30).unwrap().alpha(), 0);
    // Outside the clip: untouched.
    assert_eq!(rgba(&ctx, 10, 10), (0, 0, 255, 255));
}

#[test]
fn clipped_evenodd_path() {
    let mut ctx = Context::new(100, 100).unwrap();

    ctx.begin_path();
    ctx.rect(10.0, 10.0, 80.0, 80.0);
    ctx.rect(30.0, 30.0, 40.0, 40.0);
    ctx.clip(FillRule::EvenOdd);

    ctx.set_fill_style_str("red").unwrap();
    ctx.fill_rect(0.0, 0.0, 100.0, 100.0);

    // The ring is painted, the hole is not.
    assert_eq!(rgba(&ctx, 15, 50), (255, 0, 0, 255));
    assert_eq!(ctx.pixmap().pixel(50, 50).unwrap().alpha(), 0);
}
