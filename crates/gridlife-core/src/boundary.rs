//! Boundary policies: how neighbor addresses near the edge are resolved
//! and which cells a step is allowed to update.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::kernel::Offset;

/// Edge handling, chosen once per simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Opposite edges are adjacent (torus). Every cell is updated.
    Wrap,
    /// Only cells whose whole kernel lies inside the grid are updated.
    /// The border keeps its value forever.
    #[default]
    Clamp,
}

impl BoundaryMode {
    /// Concrete address of `(x, y) + offset`.
    ///
    /// Under `Wrap` this is always `Some`. Under `Clamp` it is `None` when
    /// the neighbor falls outside the grid, which never happens for cells
    /// inside [`BoundaryMode::domain`].
    #[inline]
    pub fn resolve(
        self,
        x: usize,
        y: usize,
        offset: Offset,
        width: usize,
        height: usize,
    ) -> Option<(usize, usize)> {
        let nx = x as i64 + offset.dx as i64;
        let ny = y as i64 + offset.dy as i64;
        match self {
            BoundaryMode::Wrap => {
                if width == 0 || height == 0 {
                    return None;
                }
                Some((
                    nx.rem_euclid(width as i64) as usize,
                    ny.rem_euclid(height as i64) as usize,
                ))
            }
            BoundaryMode::Clamp => {
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    None
                } else {
                    Some((nx as usize, ny as usize))
                }
            }
        }
    }

    /// Cells a step updates for a kernel of the given radius.
    pub fn domain(self, width: usize, height: usize, radius: usize) -> Domain {
        match self {
            BoundaryMode::Wrap => Domain {
                xs: 0..width,
                ys: 0..height,
            },
            BoundaryMode::Clamp => Domain {
                xs: radius..width.saturating_sub(radius).max(radius),
                ys: radius..height.saturating_sub(radius).max(radius),
            },
        }
    }
}

/// Rectangular set of cells updated by a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub xs: Range<usize>,
    pub ys: Range<usize>,
}

impl Domain {
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.xs.contains(&x) && self.ys.contains(&y)
    }

    pub fn len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the domain is the full `width x height` grid.
    pub fn covers(&self, width: usize, height: usize) -> bool {
        self.xs == (0..width) && self.ys == (0..height)
    }

    /// Row-major walk: `y` outer, `x` inner.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.ys
            .clone()
            .flat_map(move |y| self.xs.clone().map(move |x| (x, y)))
    }
}
