use tiny_canvas::{Context, FillRule};

fn main() {
    let mut ctx = Context::new(500, 500).unwrap();

    ctx.set_fill_style_str("#fff").unwrap();
    ctx.fill_rect(0.0, 0.0, 500.0, 500.0);

    ctx.set_fill_style_str("rgba(220, 60, 60, 0.9)").unwrap();
    ctx.begin_path();
    ctx.arc(250.0, 250.0, 180.0, 0.0, 7.0, false);
    ctx.fill(FillRule::NonZero);

    // A ring punched out with the even-odd rule.
    ctx.set_fill_style_str("steelblue").unwrap();
    ctx.begin_path();
    ctx.arc(250.0, 250.0, 120.0, 0.0, 7.0, false);
    ctx.arc(250.0, 250.0, 60.0, 0.0, 7.0, false);
    ctx.fill(FillRule::EvenOdd);

    ctx.pixmap().save_png("fill.png").unwrap();
}
