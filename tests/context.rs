use tiny_canvas::*;

#[test]
fn surface_creation_errors() {
    assert_eq!(Context::new(0, 10).unwrap_err(), CanvasError::InvalidDimensions);
    assert_eq!(Context::new(10, 0).unwrap_err(), CanvasError::InvalidDimensions);
    assert_eq!(
        Context::new(MAX_DIMENSION + 1, 10).unwrap_err(),
        CanvasError::SurfaceTooLarge
    );
    assert!(Context::new(10, 10).is_ok());
}

#[test]
fn save_restore_round_trips_all_state() {
    let mut ctx = Context::new(10, 10).unwrap();

    ctx.set_fill_style_str("#123456").unwrap();
    ctx.set_stroke_style_str("#654321").unwrap();
    ctx.set_global_alpha(0.7);
    ctx.set_global_composite_operation(CompositeOperation::Xor);
    ctx.set_line_width(3.5);
    ctx.set_line_cap(LineCap::Round);
    ctx.set_line_join(LineJoin::Bevel);
    ctx.set_miter_limit(2.0);
    ctx.set_line_dash(&[4.0, 2.0]).unwrap();
    ctx.set_line_dash_offset(1.5);
    ctx.set_shadow_color(Color::from_rgba8(1, 2, 3, 4));
    ctx.set_shadow_blur(2.0);
    ctx.set_shadow_offset_x(5.0);
    ctx.set_shadow_offset_y(-5.0);
    ctx.translate(7.0, 8.0);

    let transform = ctx.current_transform();

    ctx.save();

    ctx.set_fill_style_str("red").unwrap();
    ctx.set_stroke_style_str("blue").unwrap();
    ctx.set_global_alpha(0.1);
    ctx.set_global_composite_operation(CompositeOperation::Copy);
    ctx.set_line_width(9.0);
    ctx.set_line_cap(LineCap::Square);
    ctx.set_line_join(LineJoin::Round);
    ctx.set_miter_limit(99.0);
    ctx.set_line_dash(&[1.0]).unwrap();
    ctx.set_line_dash_offset(9.0);
    ctx.set_shadow_color(Color::BLACK);
    ctx.set_shadow_blur(8.0);
    ctx.set_shadow_offset_x(-1.0);
    ctx.set_shadow_offset_y(1.0);
    ctx.rotate(1.0);

    ctx.restore();

    match ctx.fill_style() {
        Shader::SolidColor(c) => assert_eq!(*c, Color::from_rgba8(0x12, 0x34, 0x56, 255)),
        _ => panic!("unexpected fill style"),
    }
    match ctx.stroke_style() {
        Shader::SolidColor(c) => assert_eq!(*c, Color::from_rgba8(0x65, 0x43, 0x21, 255)),
        _ => panic!("unexpected stroke style"),
    }
    assert_eq!(ctx.global_alpha(), 0.7);
    assert_eq!(ctx.global_composite_operation(), CompositeOperation::Xor);
    assert_eq!(ctx.line_width(), 3.5);
    assert_eq!(ctx.line_cap(), LineCap::Round);
    assert_eq!(ctx.line_join(), LineJoin::Bevel);
    assert_eq!(ctx.miter_limit(), 2.0);
    assert_eq!(ctx.line_dash(), &[4.0, 2.0]);
    assert_eq!(ctx.line_dash_offset(), 1.5);
    assert_eq!(ctx.shadow_color(), Color::from_rgba8(1, 2, 3, 4));
    assert_eq!(ctx.shadow_blur(), 2.0);
    assert_eq!(ctx.shadow_offset_x(), 5.0);
    assert_eq!(ctx.shadow_offset_y(), -5.0);
    assert_eq!(ctx.current_transform(), transform);
}

#[test]
fn unmatched_restore_is_a_no_op() {
    let mut ctx = Context::new(10, 10).unwrap();
    ctx.set_line_width(5.0);
    ctx.restore();
    ctx.restore();
    assert_eq!(ctx.line_width(), 5.0);
}

#[test]
fn path_survives_save_restore() {
    let mut ctx = Context::new(50, 50).unwrap();
    ctx.set_fill_style_str("red").unwrap();

    ctx.begin_path();
    ctx.rect(10.0, 10.0, 20.0, 20.0);
    ctx.save();
    ctx.restore();
    ctx.fill(FillRule::NonZero);

    assert_eq!(ctx.pixmap().pixel(15, 15).unwrap().alpha(), 255);
}

#[test]
fn transform_composition_matches_single_matrix() {
    let mut a = Context::new(80, 80).unwrap();
    a.set_fill_style_str("black").unwrap();
    a.transform(2.0, 0.0, 0.0, 2.0, 5.0, 5.0);
    a.transform(1.0, 0.0, 0.0, 1.0, 10.0, 0.0);
    a.fill_rect(0.0, 0.0, 10.0, 10.0);

    // The product matrix applied in one call: M * N.
    let mut b = Context::new(80, 80).unwrap();
    b.set_fill_style_str("black").unwrap();
    b.transform(2.0, 0.0, 0.0, 2.0, 25.0, 5.0);
    b.fill_rect(0.0, 0.0, 10.0, 10.0);

    assert_eq!(a.pixmap().data(), b.pixmap().data());
}

#[test]
fn reset_transform_restores_identity() {
    let mut ctx = Context::new(10, 10).unwrap();
    ctx.translate(3.0, 4.0);
    ctx.scale(2.0, 2.0);
    ctx.rotate(1.0);
    ctx.reset_transform();
    assert_eq!(ctx.current_transform(), Transform::identity());
    assert_eq!(
        ctx.current_transform().get_row(),
        (1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    );
}

#[test]
fn set_transform_replaces() {
    let mut ctx = Context::new(10, 10).unwrap();
    ctx.translate(3.0, 4.0);
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 9.0, 9.0);
    assert_eq!(ctx.current_transform().get_row(), (1.0, 0.0, 0.0, 1.0, 9.0, 9.0));

    // Non-finite input is ignored.
    ctx.set_transform(f32::NAN, 0.0, 0.0, 1.0, 0.0, 0.0);
    assert_eq!(ctx.current_transform().get_row(), (1.0, 0.0, 0.0, 1.0, 9.0, 9.0));
}

#[test]
fn non_invertible_transform_draws_nothing() {
    let mut ctx = Context::new(50, 50).unwrap();
    ctx.set_fill_style_str("red").unwrap();
    ctx.transform(0.0, 0.0, 0.0, 0.0, 10.0, 10.0);
    ctx.fill_rect(0.0, 0.0, 50.0, 50.0);

    for y in 0..50 {
        for x in 0..50 {
            assert_eq!(ctx.pixmap().pixel(x, y).unwrap().alpha(), 0);
        }
    }
}

#[test]
fn invalid_style_strings_error_and_preserve() {
    let mut ctx = Context::new(10, 10).unwrap();
    ctx.set_fill_style_str("teal").unwrap();
    assert_eq!(
        ctx.set_fill_style_str("no-such-color"),
        Err(CanvasError::InvalidColor)
    );
    match ctx.fill_style() {
        Shader::SolidColor(c) => assert_eq!(*c, Color::from_rgba8(0, 128, 128, 255)),
        _ => panic!("unexpected fill style"),
    }
}

#[test]
fn gradient_stop_validation() {
    let mut g = LinearGradient::new(0.0, 0.0, 10.0, 0.0);
    assert!(g.add_color_stop(0.0, Color::BLACK).is_ok());
    assert!(g.add_color_stop(1.0, Color::WHITE).is_ok());
    assert_eq!(
        g.add_color_stop(-0.1, Color::BLACK).unwrap_err(),
        CanvasError::InvalidStop
    );
    assert_eq!(
        g.add_color_stop(1.1, Color::BLACK).unwrap_err(),
        CanvasError::InvalidStop
    );
}

#[test]
fn image_data_round_trip_is_a_no_op() {
    let mut ctx = Context::new(60, 60).unwrap();
    ctx.set_fill_style(Shader::SolidColor(Color::from_rgba(0.9, 0.3, 0.1, 0.6).unwrap()));
    ctx.begin_path();
    ctx.arc(30.0, 30.0, 20.0, 0.0, 7.0, false);
    ctx.fill(FillRule::NonZero);

    let before = ctx.pixmap().data().to_vec();
    let region = ctx.get_image_data(10, 10, 40, 40).unwrap();
    ctx.put_image_data(&region, 10, 10);

    assert_eq!(ctx.pixmap().data(), before.as_slice());
}

#[test]
fn get_image_data_outside_is_transparent() {
    let mut ctx = Context::new(20, 20).unwrap();
    ctx.set_fill_style_str("red").unwrap();
    ctx.fill_rect(0.0, 0.0, 20.0, 20.0);

    let image = ctx.get_image_data(-5, -5, 10, 10).unwrap();
    // Top-left quadrant comes from off-surface: transparent black.
    assert_eq!(&image.data()[0..4], &[0, 0, 0, 0]);
    // Bottom-right quadrant maps to (0..5, 0..5): red.
    let idx = (9 * 10 + 9) * 4;
    assert_eq!(&image.data()[idx..idx + 4], &[255, 0, 0, 255]);
}

#[test]
fn get_image_data_rejects_empty() {
    let ctx = Context::new(20, 20).unwrap();
    assert_eq!(
        ctx.get_image_data(0, 0, 0, 10).unwrap_err(),
        CanvasError::InvalidDimensions
    );
}

#[test]
fn put_image_data_is_not_a_composite() {
    let mut ctx = Context::new(20, 20).unwrap();
    ctx.set_fill_style_str("blue").unwrap();
    ctx.fill_rect(0.0, 0.0, 20.0, 20.0);

    // Semi-transparent data must overwrite, not blend.
    let mut image = ImageData::new(4, 4).unwrap();
    for px in image.data_mut().chunks_mut(4) {
        px.copy_from_slice(&[255, 0, 0, 128]);
    }

    // Transform, clip and alpha must all be ignored.
    ctx.translate(100.0, 100.0);
    ctx.set_global_alpha(0.1);
    ctx.put_image_data(&image, 2, 2);

    let p = ctx.pixmap().pixel(3, 3).unwrap();
    assert_eq!(p.alpha(), 128);
    assert_eq!(p.demultiply().red(), 255);
    assert_eq!(p.demultiply().blue(), 0);
}

#[test]
fn non_invertible_matrix_error() {
    let ts = Transform::from_row(1.0, 2.0, 2.0, 4.0, 0.0, 0.0).unwrap();
    assert!(ts.invert().is_none());

    let mut ctx = Context::new(10, 10).unwrap();
    ctx.transform(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);
    assert_eq!(
        ctx.current_transform_inverse().unwrap_err(),
        CanvasError::NonInvertible
    );

    ctx.reset_transform();
    ctx.translate(5.0, 0.0);
    let inv = ctx.current_transform_inverse().unwrap();
    assert_eq!(inv.get_row(), (1.0, 0.0, 0.0, 1.0, -5.0, 0.0));
}
