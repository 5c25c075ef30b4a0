use crate::constants::{CHART_GRID_STEP, CHART_LINE_WIDTH};
use mole_core::AccelHistory;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Dev-monitor plot of recent acceleration magnitudes against the threshold.
pub struct AccelChart {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    label: Option<web::Element>,
}

impl AccelChart {
    pub fn new(document: &web::Document, canvas_id: &str, label_id: &str) -> anyhow::Result<Self> {
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| anyhow::anyhow!("missing #{}", canvas_id))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            canvas,
            ctx,
            label: document.get_element_by_id(label_id),
        })
    }

    pub fn draw(&self, history: &AccelHistory) {
        if let Some(label) = &self.label {
            label.set_text_content(Some(&history.label()));
        }

        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        let max = history.max_scale();
        let y_of = |v: f64| height - v / max * height;
        let ctx = &self.ctx;

        ctx.clear_rect(0.0, 0.0, width, height);

        ctx.set_stroke_style_str("rgba(255, 255, 255, 0.1)");
        ctx.set_line_width(1.0);
        let mut level = 0.0;
        while level < max {
            let y = y_of(level);
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(width, y);
            ctx.stroke();
            level += CHART_GRID_STEP;
        }

        ctx.begin_path();
        ctx.set_stroke_style_str("white");
        ctx.set_line_width(CHART_LINE_WIDTH);
        let step = width / history.len().max(1) as f64;
        for (i, v) in history.samples().enumerate() {
            let (x, y) = (i as f64 * step, y_of(v));
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();

        let threshold_y = y_of(history.threshold());
        ctx.begin_path();
        ctx.set_stroke_style_str("red");
        ctx.move_to(0.0, threshold_y);
        ctx.line_to(width, threshold_y);
        ctx.stroke();

        ctx.set_font("12px monospace");
        ctx.set_fill_style_str("white");
        _ = ctx.fill_text(&format!("{:.0}", max), 5.0, 15.0);
        _ = ctx.fill_text("0", 5.0, height - 5.0);
        ctx.set_fill_style_str("red");
        _ = ctx.fill_text(&format!("{:.0}", history.threshold()), 5.0, threshold_y - 5.0);
    }
}
