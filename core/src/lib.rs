#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use types::*;

mod engine;
mod error;
mod types;

/// A 3×3 board of signed cell values.
///
/// Value semantics throughout: the transition engine never mutates a caller's
/// grid, every changing operation returns a freshly constructed successor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<CellValue>,
}

impl Grid {
    /// The all-zero starting board.
    pub fn zeroed() -> Self {
        Self {
            cells: Array2::default((GRID_SIZE, GRID_SIZE)),
        }
    }

    pub fn from_rows(rows: [[CellValue; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self {
            cells: Array2::from_shape_fn((GRID_SIZE, GRID_SIZE), |(row, col)| rows[row][col]),
        }
    }

    /// Builds a board from exactly `CELL_TOTAL` values in row-major order.
    pub fn from_flat(values: &[CellValue]) -> Result<Self> {
        let cells = Array2::from_shape_vec((GRID_SIZE, GRID_SIZE), values.to_vec())
            .map_err(|_| GridError::InvalidShape)?;
        Ok(Self { cells })
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if is_valid_position(coords.0, coords.1) {
            Ok(coords)
        } else {
            Err(GridError::InvalidCoords)
        }
    }

    /// Total accessor: `None` off the board.
    pub fn get(&self, coords: Coord2) -> Option<CellValue> {
        is_valid_position(coords.0, coords.1).then(|| self.cells[coords.to_nd_index()])
    }

    /// Strict accessor for callers that treat bad coordinates as a bug.
    pub fn value_at(&self, coords: Coord2) -> Result<CellValue> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Row-major iteration with coordinates, for renderers.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, CellValue)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), &value)| ((row as Coord, col as Coord), value))
    }

    pub fn to_rows(&self) -> [[CellValue; GRID_SIZE]; GRID_SIZE] {
        let mut rows = [[0; GRID_SIZE]; GRID_SIZE];
        for ((row, col), &value) in self.cells.indexed_iter() {
            rows[row][col] = value;
        }
        rows
    }

    pub fn locked_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|&&value| is_locked(value))
            .count()
            .try_into()
            .unwrap()
    }

    pub fn stats(&self) -> GridStats {
        GridStats {
            locked_count: self.locked_count(),
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Index<Coord2> for Grid {
    type Output = CellValue;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

/// Aggregate read over the board, no mutation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridStats {
    pub locked_count: CellCount,
}

impl GridStats {
    pub const fn all_locked(self) -> bool {
        self.locked_count == CELL_TOTAL
    }
}

/// Session-level status derived from lock coverage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardStatus {
    Operational,
    Terminated,
}

impl BoardStatus {
    pub const fn is_terminated(self) -> bool {
        matches!(self, Self::Terminated)
    }
}

impl Default for BoardStatus {
    fn default() -> Self {
        Self::Operational
    }
}

/// Outcome of a click applied to the session state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    NoChange,
    Applied,
}

impl ClickOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Applied => true,
        }
    }
}
