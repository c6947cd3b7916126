//! Moore-neighborhood counting under bounded or toroidal edges.

use serde::{Deserialize, Serialize};

use crate::error::LifeError;
use crate::Grid;

/// How the grid edges behave when a neighbor offset leaves the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Out-of-bounds neighbors are treated as dead.
    #[default]
    Bounded,
    /// Opposite edges are adjacent (torus).
    Wrapped,
}

impl Topology {
    #[must_use]
    pub fn from_wrap(wrap: bool) -> Self {
        if wrap {
            Self::Wrapped
        } else {
            Self::Bounded
        }
    }

    #[must_use]
    pub fn is_wrapped(self) -> bool {
        self == Self::Wrapped
    }
}

/// The 8 Moore offsets as `(d_row, d_col)`.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Resolve one axis. `None` means the neighbor does not exist (bounded edge).
fn resolve_axis(val: isize, len: usize, topology: Topology) -> Option<usize> {
    let n = len as isize;
    if (0..n).contains(&val) {
        return Some(val as usize);
    }
    match topology {
        Topology::Bounded => None,
        Topology::Wrapped => Some(val.rem_euclid(n) as usize),
    }
}

/// Live neighbors of an in-bounds cell. Callers guarantee the coordinates.
pub(crate) fn live_neighbors(grid: &Grid, row: usize, col: usize, topology: Topology) -> u8 {
    let (r, c) = (row as isize, col as isize);
    let mut count = 0;
    for (dr, dc) in OFFSETS {
        let nr = resolve_axis(r + dr, grid.rows(), topology);
        let nc = resolve_axis(c + dc, grid.cols(), topology);
        if let (Some(nr), Some(nc)) = (nr, nc) {
            if grid.at(nr, nc).is_alive() {
                count += 1;
            }
        }
    }
    count
}

/// Count live cells in the Moore neighborhood of `(row, col)`. Result is in `0..=8`.
///
/// In wrapped mode coordinates are taken modulo the grid size, so on grids
/// narrower than 3 cells the same cell can be visited more than once.
///
/// # Errors
///
/// `OutOfBounds` if `(row, col)` is not a cell of `grid`.
pub fn count_neighbors(
    grid: &Grid,
    row: usize,
    col: usize,
    topology: Topology,
) -> Result<u8, LifeError> {
    if !grid.in_bounds(row, col) {
        return Err(LifeError::OutOfBounds {
            row,
            col,
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }
    Ok(live_neighbors(grid, row, col, topology))
}
