//! Built-in starting patterns.
//!
//! Cells are `(row, col)` offsets from the pattern's top-left corner.

use crate::error::LifeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Rows spanned by the pattern's bounding box.
    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0)
    }

    /// Columns spanned by the pattern's bounding box.
    #[must_use]
    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0)
    }

    /// Look up a built-in pattern by name, ignoring case.
    ///
    /// # Errors
    ///
    /// `UnknownPattern` if no built-in has that name.
    pub fn find(name: &str) -> Result<&'static Pattern, LifeError> {
        PATTERNS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| LifeError::UnknownPattern(name.to_string()))
    }
}

pub const BLOCK: Pattern = Pattern {
    name: "block",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
};

pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    cells: &[(0, 0), (0, 1), (0, 2)],
};

pub const TOAD: Pattern = Pattern {
    name: "toad",
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
};

pub const BEACON: Pattern = Pattern {
    name: "beacon",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
};

/// Travels one cell down and right every 4 generations.
pub const GLIDER: Pattern = Pattern {
    name: "glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "r-pentomino",
    cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
};

/// Lightweight spaceship, travelling left.
pub const LWSS: Pattern = Pattern {
    name: "lwss",
    cells: &[
        (0, 1),
        (0, 4),
        (1, 0),
        (2, 0),
        (2, 4),
        (3, 0),
        (3, 1),
        (3, 2),
        (3, 3),
    ],
};

pub const PATTERNS: &[Pattern] = &[BLOCK, BLINKER, TOAD, BEACON, GLIDER, R_PENTOMINO, LWSS];
