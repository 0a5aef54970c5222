//! Canvas 2D backend
//!
//! Executes a frame's display list against a `CanvasRenderingContext2d`.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{DrawCmd, FrameView, build_frame};
use crate::EngineError;
use crate::sim::GameState;

/// Owns the 2D context of the session's canvas
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    /// Acquire the 2D context; fails when the canvas cannot provide one
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, EngineError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| EngineError::ContextUnavailable)?
            .ok_or(EngineError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::ContextUnavailable)?;
        Ok(Self { ctx })
    }

    /// Render one frame of `state`
    pub fn render(&self, state: &GameState, view: &FrameView) {
        for cmd in build_frame(state, view) {
            if let Err(err) = self.draw(&cmd) {
                log::warn!("Draw failed: {:?}", err);
            }
        }
    }

    fn draw(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear { width, height } => {
                ctx.clear_rect(0.0, 0.0, f64::from(*width), f64::from(*height));
            }
            DrawCmd::VerticalGradient {
                width,
                height,
                top,
                bottom,
            } => {
                let grad = ctx.create_linear_gradient(0.0, 0.0, 0.0, f64::from(*height));
                grad.add_color_stop(0.0, top)?;
                grad.add_color_stop(1.0, bottom)?;
                ctx.set_fill_style_canvas_gradient(&grad);
                ctx.fill_rect(0.0, 0.0, f64::from(*width), f64::from(*height));
            }
            DrawCmd::Rect { x, y, w, h, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(f64::from(*x), f64::from(*y), f64::from(*w), f64::from(*h));
            }
            DrawCmd::Circle {
                x,
                y,
                radius,
                color,
                alpha,
            } => {
                ctx.begin_path();
                ctx.arc(f64::from(*x), f64::from(*y), f64::from(*radius), 0.0, TAU)?;
                ctx.set_global_alpha(f64::from(*alpha));
                ctx.set_fill_style_str(color);
                ctx.fill();
                ctx.set_global_alpha(1.0);
            }
            DrawCmd::Text {
                text,
                x,
                y,
                font,
                color,
                align,
            } => {
                // Resizing the canvas resets context state
                ctx.set_text_baseline("middle");
                ctx.set_font(font);
                ctx.set_text_align(align.as_str());
                ctx.set_fill_style_str(color);
                ctx.fill_text(text, f64::from(*x), f64::from(*y))?;
            }
        }
        Ok(())
    }
}
