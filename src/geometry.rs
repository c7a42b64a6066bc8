//! Padded axis-aligned rectangles: the unit of hit-testing and drawing.

use crate::surface::Surface;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Padding {
    pub fn uniform(p: f64) -> Self {
        Self { top: p, bottom: p, left: p, right: p }
    }
}

/// A rectangle in canvas coordinates with independent padding on each side.
/// The padded interior is what `contains_point` tests against.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub pad: Padding,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64, pad: Padding) -> Self {
        Self { x, y, width, height, pad }
    }

    /// Zero-sized bounds carrying only padding; geometry is filled in by the owning board.
    pub fn padded(pad: Padding) -> Self {
        Self { pad, ..Default::default() }
    }

    /// Strict test against the padded interior. Points on the padded edge are outside,
    /// so two neighbouring cells never both claim a point.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x > self.x + self.pad.left
            && x < self.x + self.width - self.pad.right
            && y > self.y + self.pad.top
            && y < self.y + self.height - self.pad.bottom
    }

    /// Midpoint of the full (unpadded) rectangle.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Padded interior as (x, y, width, height).
    pub fn inner(&self) -> (f64, f64, f64, f64) {
        (
            self.x + self.pad.left,
            self.y + self.pad.top,
            self.width - self.pad.left - self.pad.right,
            self.height - self.pad.top - self.pad.bottom,
        )
    }

    pub fn set_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
    }

    // Debug outline: red for the full rect, blue for the padded interior.
    pub fn draw_border<S: Surface + ?Sized>(&self, surface: &mut S, padded: bool) {
        let old_style = surface.stroke_style();
        if padded {
            surface.set_stroke_style("blue");
            let (x, y, w, h) = self.inner();
            surface.stroke_rect(x, y, w, h);
        } else {
            surface.set_stroke_style("red");
            surface.stroke_rect(self.x, self.y, self.width, self.height);
        }
        surface.set_stroke_style(&old_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Recorder;

    fn cell() -> Bounds {
        Bounds::new(10.0, 20.0, 100.0, 50.0, Padding { top: 2.0, bottom: 3.0, left: 4.0, right: 5.0 })
    }

    #[test]
    fn contains_point_excludes_padded_edges() {
        let b = cell();
        assert!(b.contains_point(50.0, 40.0));
        // exactly on the padded boundary
        assert!(!b.contains_point(14.0, 40.0));
        assert!(!b.contains_point(105.0, 40.0));
        assert!(!b.contains_point(50.0, 22.0));
        assert!(!b.contains_point(50.0, 67.0));
        // inside the rect but within padding
        assert!(!b.contains_point(12.0, 40.0));
        assert!(!b.contains_point(50.0, 68.5));
    }

    #[test]
    fn degenerate_padding_contains_nothing() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0, Padding::uniform(6.0));
        assert!(!b.contains_point(5.0, 5.0));
    }

    #[test]
    fn center_ignores_padding() {
        assert_eq!(cell().center(), (60.0, 45.0));
        assert_eq!(cell().inner(), (14.0, 22.0, 91.0, 45.0));
    }

    #[test]
    fn draw_border_restores_style() {
        let mut r = Recorder::default();
        r.set_stroke_style("green");
        cell().draw_border(&mut r, true);
        assert_eq!(r.rects, vec![(14.0, 22.0, 91.0, 45.0)]);
        assert_eq!(r.stroke_style(), "green");
    }
}
