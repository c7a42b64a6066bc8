//! Recursive tic-tac-toe board.
//!
//! A `Board` splits its rectangle into a `rows x cols` grid. Interior boards hold a
//! child `Board` per grid cell; leaf boards hold a plain `Bounds` per cell plus the
//! token played there. Child geometry is always derived from the parent on
//! `resize`, and a click resolves to a path of `(row, col)` pairs, one per level.

use crate::geometry::{Bounds, Padding};
use crate::surface::Surface;

/// `(row, col)` inside one board.
pub type CellIndex = (usize, usize);

const TOKEN_STYLE: &str = "black";

pub const MAX_SIDE: usize = 9;
pub const MAX_SUBLEVELS: usize = 4;
/// Upper bound on leaf cells across the whole tree.
pub const MAX_LEAF_CELLS: usize = 59_049;

/// Clamps a board shape so the tree stays small enough to build and draw: sides to
/// `1..=MAX_SIDE`, then nesting depth down until the leaf count fits.
pub fn clamp_shape(rows: usize, cols: usize, sublevels: usize) -> (usize, usize, usize) {
    let rows = rows.clamp(1, MAX_SIDE);
    let cols = cols.clamp(1, MAX_SIDE);
    let mut sublevels = sublevels.min(MAX_SUBLEVELS);
    while sublevels > 0 && leaf_cells(rows, cols, sublevels).is_none_or(|n| n > MAX_LEAF_CELLS) {
        sublevels -= 1;
    }
    (rows, cols, sublevels)
}

fn leaf_cells(rows: usize, cols: usize, sublevels: usize) -> Option<usize> {
    let levels = u32::try_from(sublevels.checked_add(1)?).ok()?;
    rows.checked_mul(cols)?.checked_pow(levels)
}

#[derive(Clone, Debug)]
pub struct Board {
    bounds: Bounds,
    rows: usize,
    cols: usize,
    sublevels: usize,
    level: usize,
    node: Node,
}

// Grids are row-major: index = row * cols + col.
#[derive(Clone, Debug)]
enum Node {
    Leaf { cells: Vec<Bounds>, state: Vec<String> },
    Interior { children: Vec<Board> },
}

impl Board {
    /// Builds a root board (level 1) with `sublevels` nested levels below it and lays
    /// out every descendant. The shape is bounded by [`clamp_shape`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        sublevels: usize,
        pad: Padding,
        rows: usize,
        cols: usize,
    ) -> Self {
        let (rows, cols, sublevels) = clamp_shape(rows, cols, sublevels);
        let mut board = Self::build(sublevels, pad, rows, cols, 1);
        board.bounds.set_rect(x, y, width, height);
        board.layout();
        board
    }

    fn build(sublevels: usize, pad: Padding, rows: usize, cols: usize, level: usize) -> Self {
        let n = rows * cols;
        let mut board = Self {
            bounds: Bounds::padded(pad),
            rows,
            cols,
            sublevels,
            level,
            node: Node::Interior { children: Vec::new() },
        };
        board.node = if sublevels > 0 {
            Node::Interior {
                children: (0..n)
                    .map(|k| Self::build(sublevels - 1, board.child_pad(k), rows, cols, level + 1))
                    .collect(),
            }
        } else {
            Node::Leaf {
                cells: (0..n).map(|k| Bounds::padded(board.child_pad(k))).collect(),
                state: vec![String::new(); n],
            }
        };
        board
    }

    // Only the outward-facing edges of the outer cells get the level-scaled padding.
    fn child_pad(&self, k: usize) -> Padding {
        let (i, j) = self.index_of(k);
        let pad = self.bounds.pad;
        let scale = self.level as f64;
        Padding {
            top: if i == 0 { pad.top * scale } else { pad.top },
            bottom: if i == self.rows - 1 { pad.bottom * scale } else { pad.bottom },
            left: if j == 0 { pad.left * scale } else { pad.left },
            right: if j == self.cols - 1 { pad.right * scale } else { pad.right },
        }
    }

    /// Number of `(row, col)` pairs in a full path from this board to a leaf cell.
    pub fn depth(&self) -> usize {
        self.sublevels + 1
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds.width = width;
        self.bounds.height = height;
        self.layout();
    }

    fn layout(&mut self) {
        let Bounds { x, y, width, height, .. } = self.bounds;
        let (rows, cols) = (self.rows as f64, self.cols as f64);
        let ncols = self.cols;
        let place = |k: usize, b: &mut Bounds| {
            let (i, j) = ((k / ncols) as f64, (k % ncols) as f64);
            b.set_rect(x + width * j / cols, y + height * i / rows, width / cols, height / rows);
        };
        match &mut self.node {
            Node::Leaf { cells, .. } => {
                for (k, cell) in cells.iter_mut().enumerate() {
                    place(k, cell);
                }
            }
            Node::Interior { children } => {
                for (k, child) in children.iter_mut().enumerate() {
                    place(k, &mut child.bounds);
                    child.layout();
                }
            }
        }
    }

    fn index_of(&self, k: usize) -> CellIndex {
        (k / self.cols, k % self.cols)
    }

    fn slot(&self, (row, col): CellIndex) -> Option<usize> {
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Hit-tests `(x, y)` down to a leaf cell. Returns `None` if the point lands in
    /// padding or a seam at any level.
    pub fn get_cell(&self, x: f64, y: f64) -> Option<Vec<CellIndex>> {
        if !self.bounds.contains_point(x, y) {
            return None;
        }
        match &self.node {
            Node::Leaf { cells, .. } => {
                let k = cells.iter().position(|c| c.contains_point(x, y))?;
                Some(vec![self.index_of(k)])
            }
            Node::Interior { children } => {
                let k = children.iter().position(|c| c.bounds.contains_point(x, y))?;
                let mut path = vec![self.index_of(k)];
                path.extend(children[k].get_cell(x, y)?);
                Some(path)
            }
        }
    }

    /// Writes `token` into the leaf cell addressed by `path`, replacing whatever was
    /// there. Short paths and out-of-range indices are ignored; returns whether a
    /// cell was written.
    pub fn play(&mut self, path: &[CellIndex], token: &str) -> bool {
        if path.len() < self.depth() {
            return false;
        }
        let Some(k) = self.slot(path[0]) else {
            return false;
        };
        match &mut self.node {
            Node::Leaf { state, .. } => {
                state[k] = token.to_string();
                true
            }
            Node::Interior { children } => children[k].play(&path[1..], token),
        }
    }

    /// Token at the leaf cell addressed by `path`; empty string if unplayed.
    pub fn token_at(&self, path: &[CellIndex]) -> Option<&str> {
        if path.len() < self.depth() {
            return None;
        }
        let k = self.slot(path[0])?;
        match &self.node {
            Node::Leaf { state, .. } => Some(state[k].as_str()),
            Node::Interior { children } => children[k].token_at(&path[1..]),
        }
    }

    pub fn clear(&mut self) {
        match &mut self.node {
            Node::Leaf { state, .. } => state.iter_mut().for_each(String::clear),
            Node::Interior { children } => children.iter_mut().for_each(Board::clear),
        }
    }

    /// Draws grid lines for this board and all descendants, then the played tokens.
    /// `colors[0]`/`widths[0]` apply to this level; deeper levels take the next entry,
    /// reusing the last one once a list runs out.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, colors: &[String], widths: &[f64]) {
        let old_style = surface.stroke_style();
        let old_width = surface.line_width();
        if let Some(color) = colors.first() {
            surface.set_stroke_style(color);
        }
        if let Some(width) = widths.first() {
            surface.set_line_width(*width);
        }

        let (x, y, w, h) = self.bounds.inner();
        for j in 1..self.cols {
            let lx = x + w * j as f64 / self.cols as f64;
            surface.stroke_line(lx, y, lx, y + h);
        }
        for i in 1..self.rows {
            let ly = y + h * i as f64 / self.rows as f64;
            surface.stroke_line(x, ly, x + w, ly);
        }

        match &self.node {
            Node::Interior { children } => {
                let (colors, widths) = (next_level(colors), next_level(widths));
                for child in children {
                    child.draw(surface, colors, widths);
                }
            }
            Node::Leaf { cells, state } => {
                surface.set_stroke_style(TOKEN_STYLE);
                for (cell, token) in cells.iter().zip(state).filter(|(_, t)| !t.is_empty()) {
                    let (cx, cy) = cell.center();
                    surface.stroke_text(token, cx, cy);
                }
            }
        }

        surface.set_stroke_style(&old_style);
        surface.set_line_width(old_width);
    }

    /// Outlines every leaf cell, with or without its padding.
    pub fn draw_debug_borders<S: Surface + ?Sized>(&self, surface: &mut S, padded: bool) {
        match &self.node {
            Node::Leaf { cells, .. } => cells.iter().for_each(|c| c.draw_border(surface, padded)),
            Node::Interior { children } => {
                children.iter().for_each(|c| c.draw_debug_borders(surface, padded))
            }
        }
    }
}

fn next_level<T>(list: &[T]) -> &[T] {
    if list.len() > 1 { &list[1..] } else { list }
}
