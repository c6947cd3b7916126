//! Error types for grid, history and controller operations.

use std::fmt;

/// Errors arising from simulation operations. None are fatal; callers may
/// clamp, ignore or report them.
#[derive(Debug, Clone, PartialEq)]
pub enum LifeError {
    /// A cell index is outside the grid.
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// A rectangle (seed region or pattern footprint) does not fit the grid.
    RegionOutOfBounds {
        origin_row: usize,
        origin_col: usize,
        height: usize,
        width: usize,
        rows: usize,
        cols: usize,
    },
    /// The requested generation was evicted from history or never recorded.
    HistoryUnavailable {
        generation: u64,
        /// Retained `(oldest, newest)` generations, `None` when history is empty.
        window: Option<(u64, u64)>,
    },
    /// Seeding density is not a probability.
    InvalidDensity(f64),
    /// A rule string could not be parsed.
    InvalidRule { rule: String, reason: String },
    /// A configuration value is rejected.
    InvalidConfig { reason: String },
    /// No built-in pattern has this name.
    UnknownPattern(String),
}

impl LifeError {
    /// True for both the cell and the rectangle bounds variants.
    #[must_use]
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::RegionOutOfBounds { .. })
    }
}

impl fmt::Display for LifeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "cell ({row}, {col}) out of bounds: grid is [0, {rows}) x [0, {cols})"
            ),
            Self::RegionOutOfBounds {
                origin_row,
                origin_col,
                height,
                width,
                rows,
                cols,
            } => write!(
                f,
                "{height}x{width} region at ({origin_row}, {origin_col}) exceeds {rows}x{cols} grid"
            ),
            Self::HistoryUnavailable {
                generation,
                window: Some((oldest, newest)),
            } => write!(
                f,
                "generation {generation} not in history (retained {oldest}..={newest})"
            ),
            Self::HistoryUnavailable {
                generation,
                window: None,
            } => write!(f, "generation {generation} not in history (history is empty)"),
            Self::InvalidDensity(density) => {
                write!(f, "density must be within [0, 1], got {density}")
            }
            Self::InvalidRule { rule, reason } => write!(f, "invalid rule {rule:?}: {reason}"),
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
            Self::UnknownPattern(name) => write!(f, "unknown pattern {name:?}"),
        }
    }
}

impl std::error::Error for LifeError {}
