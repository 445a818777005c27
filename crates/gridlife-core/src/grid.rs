//! Fixed-size grid of cell states.
//!
//! Cells are stored row-major: `(x, y)` lives at `y * width + x`. The
//! dimensions are fixed at construction and never change afterwards.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// State of a single cell.
pub type Cell = u8;

pub const DEAD: Cell = 0;
pub const ALIVE: Cell = 1;

/// Largest state a cell may hold.
pub const MAX_STATE: Cell = ALIVE;

/// A 2D board of cell states.
///
/// Deserializing goes through [`Grid::from_cells`], so a decoded grid always
/// has `width * height` cells in {0, 1}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridParts")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Unchecked wire shape of a [`Grid`]
#[derive(Deserialize)]
struct GridParts {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TryFrom<GridParts> for Grid {
    type Error = GridError;

    fn try_from(parts: GridParts) -> Result<Self, Self::Error> {
        Grid::from_cells(parts.width, parts.height, parts.cells)
    }
}

/// Number of cells in a `width x height` grid, if it fits in `usize`.
pub fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
    width
        .checked_mul(height)
        .ok_or(GridError::TooLarge { width, height })
}

impl Grid {
    /// Create an all-dead grid.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`. Use [`Grid::try_new`]
    /// for dimensions that come from outside the program.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(grid) => grid,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create an all-dead grid, rejecting dimensions whose cell count overflows
    pub fn try_new(width: usize, height: usize) -> Result<Self, GridError> {
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![DEAD; len],
        })
    }

    /// Build a grid from row-major cells, validating shape and state alphabet.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        let expected = cell_count(width, height)?;
        if cells.len() != expected {
            return Err(GridError::ShapeMismatch {
                expected,
                found: cells.len(),
            });
        }
        if let Some((index, &value)) = cells.iter().enumerate().find(|&(_, &c)| c > MAX_STATE) {
            return Err(GridError::InvalidCell { index, value });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse a picture where each line is a row (`y`) and each character a
    /// column (`x`). `#`, `O` and `1` are alive, anything else is dead.
    ///
    /// Blank lines and surrounding whitespace are ignored; rows shorter
    /// than the longest are padded with dead cells.
    pub fn from_ascii(picture: &str) -> Self {
        let rows: Vec<&str> = picture
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if matches!(ch, '#' | 'O' | '1') {
                    grid.set(x, y, ALIVE);
                }
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// State at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if self.contains(x, y) {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Some(ALIVE)
    }

    /// Set a cell. Out-of-range coordinates and states outside the alphabet
    /// are ignored; returns whether the write happened.
    pub fn set(&mut self, x: usize, y: usize, state: Cell) -> bool {
        if !self.contains(x, y) || state > MAX_STATE {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = state;
        true
    }

    /// Flip a cell between alive and dead. Out-of-range is a no-op.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = ALIVE - self.cells[idx];
        true
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(DEAD);
    }

    /// Set each cell alive or dead with equal probability.
    pub fn fill_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.fill_random_with_density(rng, 0.5);
    }

    /// Set each cell alive with probability `density` (clamped to `[0, 1]`).
    pub fn fill_random_with_density<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        for cell in &mut self.cells {
            *cell = if rng.gen_bool(density) { ALIVE } else { DEAD };
        }
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c == ALIVE).count()
    }

    /// Row-major cell slice
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Cells of row `y`
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks_exact panics on zero, and a zero-width grid has no rows to yield anyway
        self.cells.chunks_exact(self.width.max(1)).take(self.height)
    }

    /// Overwrite this grid with `other`. Both must share dimensions.
    pub(crate) fn copy_from(&mut self, other: &Grid) {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        self.cells.copy_from_slice(&other.cells);
    }
}

/// Errors from building a grid out of raw cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    ShapeMismatch { expected: usize, found: usize },
    InvalidCell { index: usize, value: Cell },
    /// `width * height` does not fit in `usize`
    TooLarge { width: usize, height: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::ShapeMismatch { expected, found } => {
                write!(f, "Expected {} cells, found {}", expected, found)
            }
            GridError::InvalidCell { index, value } => {
                write!(f, "Cell {} holds invalid state {}", index, value)
            }
            GridError::TooLarge { width, height } => {
                write!(f, "Grid of {}x{} cells is too large", width, height)
            }
        }
    }
}

impl std::error::Error for GridError {}
