//! Named seed patterns stamped onto a grid.

use crate::grid::{Grid, ALIVE};

/// Live cells of a pattern, as `(x, y)` relative to its top-left corner
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

/// Travels one cell right and one down every 4 generations
pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

/// Period 2 oscillator
pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    cells: &[(0, 0), (1, 0), (2, 0)],
};

/// Still life
pub const BLOCK: Pattern = Pattern {
    name: "Block",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
};

pub const TOAD: Pattern = Pattern {
    name: "Toad",
    cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
};

pub const BEACON: Pattern = Pattern {
    name: "Beacon",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
};

/// Lightweight spaceship, travels left
pub const LWSS: Pattern = Pattern {
    name: "LWSS",
    cells: &[
        (1, 0),
        (4, 0),
        (0, 1),
        (0, 2),
        (4, 2),
        (0, 3),
        (1, 3),
        (2, 3),
        (3, 3),
    ],
};

/// Methuselah that settles after 1103 generations
pub const R_PENTOMINO: Pattern = Pattern {
    name: "R-pentomino",
    cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
};

pub const PATTERNS: &[Pattern] = &[GLIDER, BLINKER, BLOCK, TOAD, BEACON, LWSS, R_PENTOMINO];

impl Pattern {
    /// Look up a pattern by name, ignoring case
    pub fn find(name: &str) -> Option<&'static Pattern> {
        PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Bounding box `(width, height)`
    pub fn size(&self) -> (usize, usize) {
        let w = self.cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
        let h = self.cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
        (w, h)
    }

    /// Set the pattern's cells alive with its top-left corner at `(x, y)`.
    /// Cells past an edge wrap around. Other cells are left as they are.
    pub fn stamp(&self, grid: &mut Grid, x: usize, y: usize) {
        let (width, height) = grid.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        for &(dx, dy) in self.cells {
            grid.set((x + dx) % width, (y + dy) % height, ALIVE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_and_size() {
        assert_eq!(Pattern::find("glider").map(|p| p.name), Some("Glider"));
        assert!(Pattern::find("gun").is_none());
        assert_eq!(GLIDER.size(), (3, 3));
        assert_eq!(LWSS.size(), (5, 4));
    }

    #[test]
    fn test_stamp_wraps() {
        let mut grid = Grid::new(4, 4);
        BLOCK.stamp(&mut grid, 3, 3);
        assert_eq!(grid.population(), 4);
        assert!(grid.is_alive(3, 3));
        assert!(grid.is_alive(0, 0));
        assert!(grid.is_alive(0, 3));
        assert!(grid.is_alive(3, 0));
    }
}
