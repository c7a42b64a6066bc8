//! Drawing primitives the board needs from its host.

use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    fn stroke_style(&self) -> String;
    fn set_stroke_style(&mut self, style: &str);
    fn line_width(&self) -> f64;
    fn set_line_width(&mut self, width: f64);
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Text is anchored at its horizontal center.
    fn stroke_text(&mut self, text: &str, x: f64, y: f64);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// `Surface` over a 2d canvas context. The stroke style is tracked here since the
/// context only hands it back as an untyped value.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    stroke: String,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, font: &str) -> Self {
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_font(font);
        ctx.set_stroke_style_str("black");
        Self { ctx, stroke: "black".to_string() }
    }
}

impl Surface for CanvasSurface<'_> {
    fn stroke_style(&self) -> String {
        self.stroke.clone()
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
        self.stroke = style.to_string();
    }

    fn line_width(&self) -> f64 {
        self.ctx.line_width()
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(x1, y1);
        self.ctx.line_to(x2, y2);
        self.ctx.stroke();
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.stroke_rect(x, y, width, height);
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) {
        self.ctx.stroke_text(text, x, y).ok();
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }
}

/// Records every primitive so tests can inspect what a draw pass produced.
#[cfg(test)]
#[derive(Debug)]
pub struct Recorder {
    pub style: String,
    pub width: f64,
    /// (x1, y1, x2, y2, style, width)
    pub lines: Vec<(f64, f64, f64, f64, String, f64)>,
    pub rects: Vec<(f64, f64, f64, f64)>,
    pub texts: Vec<(String, f64, f64, String)>,
    pub clears: usize,
}

#[cfg(test)]
impl Default for Recorder {
    fn default() -> Self {
        Self {
            style: "black".to_string(),
            width: 1.0,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
            clears: 0,
        }
    }
}

#[cfg(test)]
impl Surface for Recorder {
    fn stroke_style(&self) -> String {
        self.style.clone()
    }
    fn set_stroke_style(&mut self, style: &str) {
        self.style = style.to_string();
    }
    fn line_width(&self) -> f64 {
        self.width
    }
    fn set_line_width(&mut self, width: f64) {
        self.width = width;
    }
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.lines.push((x1, y1, x2, y2, self.style.clone(), self.width));
    }
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.rects.push((x, y, width, height));
    }
    fn stroke_text(&mut self, text: &str, x: f64, y: f64) {
        self.texts.push((text.to_string(), x, y, self.style.clone()));
    }
    fn clear_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {
        self.clears += 1;
    }
}
