use tiny_canvas::{Color, Context, FillRule, Shader};

fn main() {
    let mut ctx = Context::new(500, 300).unwrap();

    ctx.set_fill_style_str("#eee").unwrap();
    ctx.fill_rect(0.0, 0.0, 500.0, 300.0);

    ctx.set_shadow_color(Color::from_rgba(0.0, 0.0, 0.0, 0.5).unwrap());
    ctx.set_shadow_offset_x(8.0);
    ctx.set_shadow_offset_y(8.0);
    ctx.set_shadow_blur(16.0);

    let mut g = ctx.create_linear_gradient(100.0, 60.0, 100.0, 240.0);
    g.add_color_stop(0.0, Color::from_rgba8(255, 200, 80, 255)).unwrap();
    g.add_color_stop(1.0, Color::from_rgba8(230, 100, 40, 255)).unwrap();
    ctx.set_fill_style(Shader::LinearGradient(g));

    ctx.begin_path();
    ctx.round_rect(60.0, 60.0, 180.0, 180.0, &[24.0]);
    ctx.fill(FillRule::NonZero);

    ctx.set_fill_style_str("seagreen").unwrap();
    ctx.begin_path();
    ctx.arc(360.0, 150.0, 90.0, 0.0, 7.0, false);
    ctx.fill(FillRule::NonZero);

    ctx.pixmap().save_png("shadow.png").unwrap();
}
