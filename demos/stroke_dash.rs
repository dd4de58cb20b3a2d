use tiny_canvas::{Context, LineCap, LineJoin};

fn main() {
    let mut ctx = Context::new(500, 500).unwrap();

    ctx.set_fill_style_str("#fff").unwrap();
    ctx.fill_rect(0.0, 0.0, 500.0, 500.0);

    ctx.set_stroke_style_str("#344").unwrap();
    ctx.set_line_width(12.0);
    ctx.set_line_join(LineJoin::Round);
    ctx.set_line_cap(LineCap::Round);
    ctx.begin_path();
    ctx.move_to(60.0, 400.0);
    ctx.line_to(180.0, 120.0);
    ctx.line_to(300.0, 360.0);
    ctx.line_to(440.0, 80.0);
    ctx.stroke();

    ctx.set_stroke_style_str("crimson").unwrap();
    ctx.set_line_width(4.0);
    ctx.set_line_dash(&[24.0, 12.0]).unwrap();
    ctx.begin_path();
    ctx.rect(40.0, 40.0, 420.0, 420.0);
    ctx.stroke();

    ctx.pixmap().save_png("stroke_dash.png").unwrap();
}
