//! HTML canvas 2D backend

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Align, DrawCmd, Frame, RenderSink};
use crate::layout::{Rect, Viewport};
use crate::palette::Rgba;

const FONT_FAMILY: &str = "'Segoe UI', 'Helvetica Neue', Arial, sans-serif";

/// Rasterizes frames onto a canvas, letterboxed to the design space
pub struct CanvasSink {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl CanvasSink {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let viewport = Viewport::new(canvas.width() as f32, canvas.height() as f32);
        log::info!(
            "Canvas renderer: {}x{} (scale {:.2})",
            canvas.width(),
            canvas.height(),
            viewport.scale()
        );
        Ok(Self {
            canvas,
            ctx,
            viewport,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn rounded_path(&self, rect: &Rect, radius: f32) -> Result<(), JsValue> {
        let (x, y, w, h) = (rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        let r = (radius as f64).min(w / 2.0).min(h / 2.0).max(0.0);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.arc_to(x + w, y, x + w, y + h, r)?;
        ctx.arc_to(x + w, y + h, x, y + h, r)?;
        ctx.arc_to(x, y + h, x, y, r)?;
        ctx.arc_to(x, y, x + w, y, r)?;
        ctx.close_path();
        Ok(())
    }

    fn poly_path(&self, points: &[Vec2]) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                ctx.move_to(p.x as f64, p.y as f64);
            } else {
                ctx.line_to(p.x as f64, p.y as f64);
            }
        }
        ctx.close_path();
    }

    fn fill(&self, color: &Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn draw(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Rect {
                rect,
                radius,
                fill,
                stroke,
            } => {
                self.rounded_path(rect, *radius)?;
                if let Some(fill) = fill {
                    self.fill(fill);
                }
                if let Some((color, width)) = stroke {
                    ctx.set_stroke_style_str(&color.css());
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
            }
            DrawCmd::Circle {
                center,
                radius,
                fill,
            } => {
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)?;
                self.fill(fill);
            }
            DrawCmd::Arc {
                center,
                radius,
                width,
                ratio,
                color,
            } => {
                let start = -FRAC_PI_2;
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    start,
                    start + TAU * ratio.clamp(0.0, 1.0) as f64,
                )?;
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width(*width as f64);
                ctx.stroke();
            }
            DrawCmd::Line {
                from,
                to,
                width,
                color,
            } => {
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width(*width as f64);
                ctx.stroke();
            }
            DrawCmd::Ellipse {
                center,
                radii,
                fill,
            } => {
                ctx.begin_path();
                ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x.max(0.0) as f64,
                    radii.y.max(0.0) as f64,
                    0.0,
                    0.0,
                    TAU,
                )?;
                self.fill(fill);
            }
            DrawCmd::Polygon { points, fill } => {
                if points.len() >= 3 {
                    self.poly_path(points);
                    self.fill(fill);
                }
            }
            DrawCmd::Text {
                text,
                pos,
                size,
                align,
                color,
            } => {
                ctx.set_font(&format!("bold {}px {}", size.px(), FONT_FAMILY));
                ctx.set_text_align(match align {
                    Align::Left => "left",
                    Align::Center => "center",
                    Align::Right => "right",
                });
                ctx.set_fill_style_str(&color.css());
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }
}

impl RenderSink for CanvasSink {
    fn present(&mut self, frame: &Frame) {
        let ctx = &self.ctx;
        let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        ctx.set_fill_style_str("#000");
        ctx.fill_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);

        let scale = self.viewport.scale() as f64;
        let offset = self.viewport.offset();
        let _ = ctx.set_transform(scale, 0.0, 0.0, scale, offset.x as f64, offset.y as f64);
        ctx.set_fill_style_str(&frame.clear.opaque().css());
        ctx.fill_rect(0.0, 0.0, crate::consts::SCREEN_W as f64, crate::consts::SCREEN_H as f64);
        ctx.set_text_baseline("middle");

        for cmd in &frame.cmds {
            if let Err(e) = self.draw(cmd) {
                log::warn!("Canvas draw failed: {:?}", e);
                return;
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.viewport = Viewport::new(width as f32, height as f32);
    }
}
