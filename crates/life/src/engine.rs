//! Generation advance.
//!
//! Reads only the previous grid and writes a fresh one, so no cell ever
//! observes a sibling's update from the same pass.

use crate::neighbors::{live_neighbors, Topology};
use crate::rules::Rule;
use crate::Grid;

/// Next generation under Conway's rule (`B3/S23`).
#[must_use]
pub fn next_generation(grid: &Grid, topology: Topology) -> Grid {
    next_generation_with(grid, topology, Rule::CONWAY)
}

/// Next generation under an arbitrary life-like rule.
#[must_use]
pub fn next_generation_with(grid: &Grid, topology: Topology, rule: Rule) -> Grid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let cells = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .map(|(r, c)| rule.next_state(grid.at(r, c), live_neighbors(grid, r, c, topology)))
        .collect();
    Grid::from_cells(rows, cols, cells)
}
