//! Game of Life simulation core.
//!
//! The crate owns grid state, generation advance (bounded or toroidal),
//! and a bounded rewind history. Rendering lives in the host; it drives
//! [`SimulationController::tick`] once per frame and draws the grid it
//! gets back. [`Universe`] is the same controller exported to JS.

pub mod cell;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod history;
pub mod neighbors;
pub mod patterns;
pub mod rules;
pub mod universe;

use std::fmt;

pub use cell::CellState;
pub use config::SimConfig;
pub use controller::{RunState, SimulationController};
pub use engine::{next_generation, next_generation_with};
pub use error::LifeError;
pub use history::HistoryBuffer;
pub use neighbors::{count_neighbors, Topology};
pub use patterns::Pattern;
pub use rules::Rule;
pub use universe::Universe;

/// Row-major 2D grid of cells. Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// All-dead grid of `rows × cols`.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Dead; rows * cols],
        }
    }

    /// Build from a row-major cell vector already sized `rows * cols`.
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check(&self, row: usize, col: usize) -> Result<usize, LifeError> {
        if self.in_bounds(row, col) {
            Ok(self.index(row, col))
        } else {
            Err(LifeError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Unchecked read for callers that have already resolved coordinates.
    pub(crate) fn at(&self, row: usize, col: usize) -> CellState {
        self.cells[self.index(row, col)]
    }

    /// # Errors
    ///
    /// `OutOfBounds` if `(row, col)` is outside `[0, rows) × [0, cols)`.
    pub fn get(&self, row: usize, col: usize) -> Result<CellState, LifeError> {
        let idx = self.check(row, col)?;
        Ok(self.cells[idx])
    }

    /// Overwrite a single cell in place.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `(row, col)` is outside the grid; the grid is unchanged.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), LifeError> {
        let idx = self.check(row, col)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Flip a cell and return its new state.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `(row, col)` is outside the grid.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<CellState, LifeError> {
        let idx = self.check(row, col)?;
        let next = self.cells[idx].toggled();
        self.cells[idx] = next;
        Ok(next)
    }

    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    pub fn clear(&mut self) {
        self.fill(CellState::Dead);
    }

    /// Row-major view of all cells.
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[CellState]> {
        (row < self.rows).then(|| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// `(row, col)` of every live cell in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| (i / cols, i % cols))
    }

    /// One byte per cell (0 dead, 1 alive), row-major.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.cells.iter().map(|&c| u8::from(c)).collect()
    }

    /// Pointer to the cell bytes; valid until the grid is dropped or replaced.
    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.cells.as_ptr().cast::<u8>()
    }
}

/// Renders rows of `#` (alive) and `.` (dead).
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }
            for c in 0..self.cols {
                let ch = if self.at(r, c).is_alive() { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
