//! Cell state for the life grid.

use std::fmt;

/// Discriminant values are the bytes handed to the renderer — do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dead => write!(f, "Dead"),
            Self::Alive => write!(f, "Alive"),
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> Self {
        state as u8
    }
}

impl CellState {
    #[must_use]
    pub fn is_alive(self) -> bool {
        self == Self::Alive
    }

    /// The opposite state; used by cell toggling.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dead => Self::Alive,
            Self::Alive => Self::Dead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cell_is_1_byte() {
        assert_eq!(std::mem::size_of::<CellState>(), 1);
    }

    #[test]
    fn discriminant_values() {
        assert_eq!(CellState::Dead as u8, 0);
        assert_eq!(CellState::Alive as u8, 1);
        assert_eq!(u8::from(CellState::Alive), 1);
    }

    #[test]
    fn default_is_dead() {
        assert_eq!(CellState::default(), CellState::Dead);
        assert!(!CellState::default().is_alive());
    }

    #[test]
    fn state_display() {
        assert_eq!(format!("{}", CellState::Alive), "Alive");
        assert_eq!(format!("{}", CellState::Dead), "Dead");
    }

    proptest! {
        #[test]
        fn prop_toggle_twice_is_identity(alive in any::<bool>()) {
            let state = CellState::from(alive);
            prop_assert_ne!(state.toggled(), state);
            prop_assert_eq!(state.toggled().toggled(), state);
            prop_assert_eq!(state.is_alive(), alive);
        }
    }
}
