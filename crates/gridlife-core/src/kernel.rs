//! Neighborhood kernels built from stencil masks.
//!
//! A kernel is the ordered list of `(dx, dy)` offsets whose cells count
//! toward a cell's neighbor total. Kernels are derived once from a square
//! 0/1 mask and never change afterwards.
//!
//! ```
//! use gridlife_core::kernel::{build_kernel, Kernel};
//!
//! let mask: Vec<Vec<u8>> = vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]];
//! let kernel = build_kernel(&mask).unwrap();
//! assert_eq!(kernel, Kernel::moore());
//! assert_eq!(kernel.radius(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Relative position of a neighbor. `dx` follows the mask's rows,
/// `dy` its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// Immutable set of neighbor offsets. Never contains `(0, 0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    offsets: Vec<Offset>,
    radius: usize,
}

impl Kernel {
    /// The 8-cell Moore neighborhood.
    pub fn moore() -> Self {
        Self::ring(1)
    }

    /// A full square of side `2 * radius + 1` minus its center.
    ///
    /// `ring(5)` is the 11x11 neighborhood used by the Larger-than-Life rules.
    pub fn ring(radius: usize) -> Self {
        let side = 2 * radius + 1;
        let mut mask = vec![vec![1u8; side]; side];
        mask[radius][radius] = 0;
        // A square mask of ones is never degenerate.
        Self::from_mask_unchecked(&mask)
    }

    /// Offsets in row-major mask order.
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Number of neighbors, i.e. the largest count a cell can reach.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Largest absolute offset component. Under the clamp boundary this
    /// is the depth of the frozen border.
    pub fn radius(&self) -> usize {
        self.radius
    }

    fn from_mask_unchecked(mask: &[Vec<u8>]) -> Self {
        let center_row = mask.len() / 2;
        let center_col = mask.first().map_or(0, |row| row.len() / 2);

        let offsets: Vec<Offset> = mask
            .iter()
            .enumerate()
            .flat_map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .filter(|&(_, &v)| v == 1)
                    .map(move |(col, _)| {
                        Offset::new(row as i32 - center_row as i32, col as i32 - center_col as i32)
                    })
            })
            .filter(|o| o.dx != 0 || o.dy != 0)
            .collect();

        let radius = offsets
            .iter()
            .map(|o| o.dx.unsigned_abs().max(o.dy.unsigned_abs()) as usize)
            .max()
            .unwrap_or(0);

        Self { offsets, radius }
    }
}

/// Derive a kernel from a stencil mask.
///
/// The mask center is `(rows / 2, cols / 2)`. Every cell equal to 1 emits
/// `(row - center_row, col - center_col)`; a 1 at the center itself is
/// ignored since a cell never counts itself.
pub fn build_kernel(mask: &[Vec<u8>]) -> Result<Kernel, KernelError> {
    let cols = mask.first().map_or(0, Vec::len);
    if mask.is_empty() || cols == 0 {
        return Err(KernelError::EmptyMask);
    }

    for (row, values) in mask.iter().enumerate() {
        if values.len() != cols {
            return Err(KernelError::RaggedMask {
                row,
                expected: cols,
                found: values.len(),
            });
        }
        if let Some((col, &value)) = values.iter().enumerate().find(|&(_, &v)| v > 1) {
            return Err(KernelError::InvalidMaskValue { row, col, value });
        }
    }

    Ok(Kernel::from_mask_unchecked(mask))
}

/// Errors raised while building a kernel from a mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    EmptyMask,
    RaggedMask {
        row: usize,
        expected: usize,
        found: usize,
    },
    InvalidMaskValue {
        row: usize,
        col: usize,
        value: u8,
    },
}

impl std::fmt::Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::EmptyMask => write!(f, "Kernel mask is empty"),
            KernelError::RaggedMask {
                row,
                expected,
                found,
            } => write!(
                f,
                "Kernel mask row {} has {} columns, expected {}",
                row, found, expected
            ),
            KernelError::InvalidMaskValue { row, col, value } => write!(
                f,
                "Kernel mask value {} at ({}, {}) is not 0 or 1",
                value, row, col
            ),
        }
    }
}

impl std::error::Error for KernelError {}
