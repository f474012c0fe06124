//! Canvas charts for the training and results screens.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, String> {
    Ok(canvas
        .get_context("2d")
        .map_err(|_| "get_context failed")?
        .ok_or("no 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| "cast failed")?)
}

fn draw_grid(ctx: &CanvasRenderingContext2d, w: f64, h: f64, grid_color: &str) {
    ctx.set_stroke_style_str(grid_color);
    ctx.set_line_width(0.5);
    let dash = js_sys::Array::of2(&JsValue::from_f64(3.0), &JsValue::from_f64(3.0));
    let _ = ctx.set_line_dash(&dash);
    for i in 1..5 {
        let y = h * (i as f64) / 5.0;
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(w, y);
        ctx.stroke();
    }
    let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Draw several line series sharing one y-range, each `(values, color)`.
///
/// Points are spread over the full width with the first at x=0, one per
/// epoch, so a growing series stretches as it fills in.
pub fn draw_line_series(
    canvas: &HtmlCanvasElement,
    series: &[(&[f32], &str)],
    max_val: f32,
    bg_color: &str,
    grid_color: &str,
) -> Result<(), String> {
    let ctx = context_2d(canvas)?;

    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    ctx.set_fill_style_str(bg_color);
    ctx.fill_rect(0.0, 0.0, w, h);
    draw_grid(&ctx, w, h, grid_color);

    let range = max_val.max(0.001);
    let pad = 6.0;

    for (data, color) in series {
        if data.is_empty() {
            continue;
        }
        let step_x = if data.len() > 1 {
            (w - 2.0 * pad) / ((data.len() - 1) as f64)
        } else {
            0.0
        };

        ctx.set_stroke_style_str(color);
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for (i, &val) in data.iter().enumerate() {
            let norm = (val / range).clamp(0.0, 1.0) as f64;
            let x = pad + (i as f64) * step_x;
            let y = h - pad - norm * (h - 2.0 * pad);
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();
    }

    Ok(())
}

/// Draw one bar per value, left to right, each with its own fill color.
pub fn draw_colored_bars(
    canvas: &HtmlCanvasElement,
    bars: &[(f32, &str)],
    bg_color: &str,
    grid_color: &str,
) -> Result<(), String> {
    let ctx = context_2d(canvas)?;

    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    ctx.set_fill_style_str(bg_color);
    ctx.fill_rect(0.0, 0.0, w, h);
    draw_grid(&ctx, w, h, grid_color);

    if bars.is_empty() {
        return Ok(());
    }

    let max_val = bars.iter().map(|(v, _)| *v).fold(0.01f32, f32::max);
    let slot = w / (bars.len() as f64);
    let bar_width = (slot * 0.8).max(1.0);

    for (i, (val, color)) in bars.iter().enumerate() {
        let norm = (val / max_val).clamp(0.0, 1.0) as f64;
        let bar_h = norm * (h - 8.0);
        let x = (i as f64) * slot + (slot - bar_width) / 2.0;
        ctx.set_fill_style_str(color);
        ctx.fill_rect(x, h - bar_h, bar_width, bar_h);
    }

    Ok(())
}
