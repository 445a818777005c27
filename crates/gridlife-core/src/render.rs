//! Renderer interface and window geometry.
//!
//! The engine does not draw. A renderer receives a [`Frame`] (read-only grid
//! view, cell size, gridline flag) once per frame, strictly between steps.
//! [`TextRenderer`] is the headless implementation used by the harness.

use std::fmt::Write as _;

use crate::engine::SimulationEngine;
use crate::grid::{Grid, ALIVE};

/// Default window edge in pixels
pub const DEFAULT_WINDOW_SIZE: u32 = 800;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors a windowed renderer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub alive: Rgb,
    pub dead: Rgb,
    pub gridline: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb(30, 30, 30),
            alive: Rgb(200, 200, 200),
            dead: Rgb(50, 50, 50),
            gridline: Rgb(40, 40, 40),
        }
    }
}

/// Window size in pixels; cells are sized to fill it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_SIZE,
            height: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel size of one cell, at least 1x1
    pub fn cell_size(&self, grid: &Grid) -> (u32, u32) {
        let (cols, rows) = grid.dimensions();
        self.cell_size_for(cols, rows)
    }

    /// Pixel size of one cell of a `cols x rows` grid, at least 1x1
    pub fn cell_size_for(&self, cols: usize, rows: usize) -> (u32, u32) {
        let span = |n: usize| u32::try_from(n.max(1)).unwrap_or(u32::MAX);
        (
            (self.width / span(cols)).max(1),
            (self.height / span(rows)).max(1),
        )
    }

    /// Cell under a pointer position, or `None` when it lands outside the grid
    pub fn cell_at(&self, px: u32, py: u32, grid: &Grid) -> Option<(usize, usize)> {
        let (cell_w, cell_h) = self.cell_size(grid);
        let x = (px / cell_w) as usize;
        let y = (py / cell_h) as usize;
        grid.contains(x, y).then_some((x, y))
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub grid: &'a Grid,
    pub cell_width: u32,
    pub cell_height: u32,
    pub show_gridlines: bool,
}

/// Draws frames. Called once per frame, never during a step.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

impl SimulationEngine {
    /// Frame describing the current grid for `viewport`
    pub fn frame(&self, viewport: &Viewport) -> Frame<'_> {
        let (cell_width, cell_height) = viewport.cell_size(self.grid());
        Frame {
            grid: self.grid(),
            cell_width,
            cell_height,
            show_gridlines: self.show_gridlines(),
        }
    }
}

/// Renders frames as text, one line per row
#[derive(Debug, Clone)]
pub struct TextRenderer {
    pub alive: char,
    pub dead: char,
    output: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            alive: '#',
            dead: '.',
            output: String::new(),
        }
    }
}

impl TextRenderer {
    /// Text of the last rendered frame
    pub fn output(&self) -> &str {
        &self.output
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.output.clear();
        for row in frame.grid.rows() {
            for (i, &cell) in row.iter().enumerate() {
                if frame.show_gridlines && i > 0 {
                    self.output.push('|');
                }
                self.output
                    .push(if cell == ALIVE { self.alive } else { self.dead });
            }
            let _ = writeln!(self.output);
        }
    }
}
