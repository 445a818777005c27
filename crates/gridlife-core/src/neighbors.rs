//! Neighbor counting over an arbitrary kernel.
//!
//! Counts always read from the grid passed in, which the engine guarantees is
//! the pre-step buffer. A cell's count is never affected by neighbors already
//! updated in the same step.

use crate::boundary::{BoundaryMode, Domain};
use crate::grid::Grid;
use crate::kernel::Kernel;

/// Sum of the cell values at each kernel offset around `(x, y)`.
///
/// Under `Clamp`, neighbors that fall outside the grid contribute nothing;
/// cells inside the clamp domain never have such neighbors.
pub fn count_neighbors(
    grid: &Grid,
    x: usize,
    y: usize,
    kernel: &Kernel,
    boundary: BoundaryMode,
) -> u32 {
    let (width, height) = grid.dimensions();
    let cells = grid.cells();
    kernel
        .offsets()
        .iter()
        .filter_map(|&offset| boundary.resolve(x, y, offset, width, height))
        .map(|(nx, ny)| cells[ny * width + nx] as u32)
        .sum()
}

/// Neighbor counter bound to one kernel, boundary and grid shape.
///
/// Kernel offsets are pre-flattened into row-major index deltas so that
/// cells at least `radius` away from every edge are counted without any
/// bounds or modulo arithmetic. Other cells fall back to
/// [`count_neighbors`].
#[derive(Debug, Clone)]
pub struct NeighborCounter {
    kernel: Kernel,
    boundary: BoundaryMode,
    width: usize,
    height: usize,
    deltas: Vec<isize>,
    interior: Domain,
}

impl NeighborCounter {
    pub fn new(kernel: Kernel, boundary: BoundaryMode, width: usize, height: usize) -> Self {
        let deltas = kernel
            .offsets()
            .iter()
            .map(|o| o.dy as isize * width as isize + o.dx as isize)
            .collect();
        let interior = BoundaryMode::Clamp.domain(width, height, kernel.radius());
        Self {
            kernel,
            boundary,
            width,
            height,
            deltas,
            interior,
        }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Cells the owning engine updates each step.
    pub fn domain(&self) -> Domain {
        self.boundary
            .domain(self.width, self.height, self.kernel.radius())
    }

    /// Count the neighbors of `(x, y)` in `grid`, which must have the shape
    /// this counter was built for.
    #[inline]
    pub fn count(&self, grid: &Grid, x: usize, y: usize) -> u32 {
        debug_assert_eq!(grid.dimensions(), (self.width, self.height));
        if self.interior.contains(x, y) {
            let cells = grid.cells();
            let center = (y * self.width + x) as isize;
            self.deltas
                .iter()
                .map(|&d| cells[(center + d) as usize] as u32)
                .sum()
        } else {
            count_neighbors(grid, x, y, &self.kernel, self.boundary)
        }
    }
}
