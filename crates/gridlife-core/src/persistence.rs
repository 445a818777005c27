//! Save/Load of raw grid snapshots
//!
//! Uses bincode for an uncompressed binary record: a format version, the grid
//! dimensions and the row-major cell bytes. Snapshots carry no rule or kernel,
//! only cell values.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Grid, GridError};

/// Version number for snapshot format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Directory interactive drivers keep snapshots in
pub const SNAPSHOT_DIR: &str = "bugs";

/// File extension for snapshots
pub const SNAPSHOT_EXTENSION: &str = "bin";

/// Serializable snapshot of a grid
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Snapshot format version
    pub version: u32,
    pub width: usize,
    pub height: usize,
    /// Row-major cell states
    pub cells: Vec<Cell>,
}

impl From<&Grid> for SaveData {
    fn from(grid: &Grid) -> Self {
        Self {
            version: SAVE_VERSION,
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().to_vec(),
        }
    }
}

/// Path of the snapshot called `name` inside `dir`, e.g. `bugs/glider.bin`
pub fn snapshot_path(dir: impl AsRef<Path>, name: &str) -> PathBuf {
    dir.as_ref()
        .join(format!("{}.{}", name, SNAPSHOT_EXTENSION))
}

/// Save a grid to a writer
pub fn save_grid<W: Write>(writer: W, grid: &Grid) -> Result<(), SaveError> {
    bincode::serialize_into(writer, &SaveData::from(grid))?;
    Ok(())
}

/// Load a grid from a reader. The grid takes the snapshot's own dimensions.
pub fn load_grid<R: Read>(reader: R) -> Result<Grid, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let grid = Grid::from_cells(save_data.width, save_data.height, save_data.cells)?;
    Ok(grid)
}

/// Save a grid to `path`, creating missing parent directories
pub fn save_to_path(path: impl AsRef<Path>, grid: &Grid) -> Result<(), SaveError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    save_grid(&mut writer, grid)?;
    writer.flush()?;

    log::info!("Grid saved to {}", path.display());
    Ok(())
}

/// Load a grid from `path`
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Grid, SaveError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SaveError::NotFound(path.to_path_buf()),
        _ => SaveError::Io(e),
    })?;

    let grid = load_grid(BufReader::new(file))?;
    log::info!(
        "Grid loaded from {} ({}x{})",
        path.display(),
        grid.width(),
        grid.height()
    );
    Ok(grid)
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch {
        expected: u32,
        found: u32,
    },
    NotFound(PathBuf),
    /// Snapshot shape differs from the live grid
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    InvalidGrid(GridError),
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl From<GridError> for SaveError {
    fn from(e: GridError) -> Self {
        SaveError::InvalidGrid(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SaveError::NotFound(path) => write!(f, "{} not found", path.display()),
            SaveError::DimensionMismatch { expected, found } => write!(
                f,
                "Snapshot is {}x{}, grid is {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            SaveError::InvalidGrid(e) => write!(f, "Invalid snapshot: {}", e),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            SaveError::Bincode(e) => Some(e),
            SaveError::InvalidGrid(e) => Some(e),
            _ => None,
        }
    }
}
