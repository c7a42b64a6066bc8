//! Couples a `Board` to an HTML canvas: fit-to-container sizing, full redraws, and
//! mapping pointer positions into canvas space.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::board::Board;
use crate::config::GameConfig;
use crate::surface::{CanvasSurface, Surface};

#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub colors: Vec<String>,
    pub widths: Vec<f64>,
    pub font: String,
    pub debug_borders: bool,
}

impl From<&GameConfig> for LineStyle {
    fn from(cfg: &GameConfig) -> Self {
        Self {
            colors: cfg.line_colors.clone(),
            widths: cfg.line_widths.clone(),
            font: cfg.token_font.clone(),
            debug_borders: cfg.debug_borders,
        }
    }
}

pub struct BoardCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    style: LineStyle,
}

impl BoardCanvas {
    pub fn new(canvas: HtmlCanvasElement, style: LineStyle) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx, style })
    }

    /// Sizes the canvas to the largest square its container allows, lays the board
    /// out to match, and redraws everything.
    pub fn render(&self, board: &mut Board) {
        let (avail_w, avail_h) = match self.canvas.parent_element() {
            Some(parent) => (parent.client_width() as f64, parent.client_height() as f64),
            None => (self.canvas.width() as f64, self.canvas.height() as f64),
        };
        let side = fit_square(avail_w, avail_h);
        // resizing the backing store also resets the context state
        self.canvas.set_width(side as u32);
        self.canvas.set_height(side as u32);
        board.resize(side, side);

        let mut surface = CanvasSurface::new(&self.ctx, &self.style.font);
        surface.clear_rect(0.0, 0.0, side, side);
        board.draw(&mut surface, &self.style.colors, &self.style.widths);
        if self.style.debug_borders {
            board.draw_debug_borders(&mut surface, true);
        }
    }

    /// Maps viewport (client) coordinates into the canvas's own pixel space.
    pub fn to_local(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        let rect = self.canvas.get_bounding_client_rect();
        map_to_canvas(
            (client_x, client_y),
            (rect.left(), rect.top(), rect.width(), rect.height()),
            (self.canvas.width() as f64, self.canvas.height() as f64),
        )
    }
}

pub fn fit_square(width: f64, height: f64) -> f64 {
    width.min(height).max(0.0).floor()
}

/// `rect` is the element's on-screen box (left, top, width, height); `backing` is the
/// canvas's pixel size, which can differ from its CSS size.
pub fn map_to_canvas(client: (f64, f64), rect: (f64, f64, f64, f64), backing: (f64, f64)) -> (f64, f64) {
    let (left, top, css_w, css_h) = rect;
    let sx = if css_w > 0.0 { backing.0 / css_w } else { 1.0 };
    let sy = if css_h > 0.0 { backing.1 / css_h } else { 1.0 };
    ((client.0 - left) * sx, (client.1 - top) * sy)
}
