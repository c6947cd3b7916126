//! Life-like transition rules in `B/S` notation.
//!
//! A rule is two neighbor-count sets: counts at which a dead cell is born
//! and counts at which a live cell survives. Every other case ends dead.
//! [`Rule::CONWAY`] (`B3/S23`) is the default.


use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell::CellState;
use crate::error::LifeError;

/// Neighbor counts run 0..=8, one bit each.
const MAX_NEIGHBORS: u8 = 8;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    birth: u16,
    survival: u16,
}

impl Rule {
    /// Conway's Game of Life: born with 3, survives with 2 or 3.
    pub const CONWAY: Self = Self {
        birth: 1 << 3,
        survival: (1 << 2) | (1 << 3),
    };

    /// HighLife (`B36/S23`).
    pub const HIGHLIFE: Self = Self {
        birth: (1 << 3) | (1 << 6),
        survival: (1 << 2) | (1 << 3),
    };

    /// Build from explicit count lists. Counts above 8 are ignored.
    #[must_use]
    pub fn new(birth: &[u8], survival: &[u8]) -> Self {
        Self {
            birth: mask(birth),
            survival: mask(survival),
        }
    }

    #[must_use]
    pub fn births_on(self, neighbors: u8) -> bool {
        neighbors <= MAX_NEIGHBORS && self.birth & (1 << neighbors) != 0
    }

    #[must_use]
    pub fn survives_on(self, neighbors: u8) -> bool {
        neighbors <= MAX_NEIGHBORS && self.survival & (1 << neighbors) != 0
    }

    /// State of a cell in the next generation.
    #[must_use]
    pub fn next_state(self, current: CellState, neighbors: u8) -> CellState {
        let alive = match current {
            CellState::Alive => self.survives_on(neighbors),
            CellState::Dead => self.births_on(neighbors),
        };
        CellState::from(alive)
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::CONWAY
    }
}

fn mask(counts: &[u8]) -> u16 {
    counts
        .iter()
        .filter(|&&n| n <= MAX_NEIGHBORS)
        .fold(0, |acc, &n| acc | (1 << n))
}

fn write_counts(f: &mut fmt::Formatter<'_>, mask: u16) -> fmt::Result {
    for n in 0..=MAX_NEIGHBORS {
        if mask & (1 << n) != 0 {
            write!(f, "{n}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        write_counts(f, self.birth)?;
        write!(f, "/S")?;
        write_counts(f, self.survival)
    }
}

/// Parses `B3/S23`, case-insensitive, halves in either order.
impl FromStr for Rule {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| LifeError::InvalidRule {
            rule: s.to_string(),
            reason: reason.to_string(),
        };

        let mut birth = None;
        let mut survival = None;
        for part in s.trim().split('/') {
            let mut chars = part.trim().chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survival,
                _ => return Err(invalid("each half must start with B or S")),
            };
            if slot.is_some() {
                return Err(invalid("B and S may appear only once"));
            }
            let mut bits = 0u16;
            for c in chars {
                let n = c
                    .to_digit(10)
                    .filter(|&d| d <= u32::from(MAX_NEIGHBORS))
                    .ok_or_else(|| invalid("neighbor counts must be digits 0-8"))?;
                bits |= 1 << n;
            }
            *slot = Some(bits);
        }

        match (birth, survival) {
            (Some(birth), Some(survival)) => Ok(Self { birth, survival }),
            _ => Err(invalid("expected both a B and an S half")),
        }
    }
}

impl TryFrom<String> for Rule {
    type Error = LifeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.to_string()
    }
}
