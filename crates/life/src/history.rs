//! Bounded rewind history.
//!
//! Snapshots are stored for a contiguous run of generations
//! `oldest..=newest`. When the buffer is full the oldest snapshot is
//! evicted, so lookups map a generation to `generation - oldest`.

use std::collections::VecDeque;

use crate::error::LifeError;
use crate::Grid;

/// Default number of retained snapshots.
pub const DEFAULT_MAX_HISTORY: usize = 1000;

#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    snapshots: VecDeque<Grid>,
    /// Generation of `snapshots[0]`; meaningless while empty.
    oldest: u64,
    capacity: usize,
}

impl HistoryBuffer {
    /// A capacity of zero retains nothing.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity.min(DEFAULT_MAX_HISTORY)),
            oldest: 0,
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Retained `(oldest, newest)` generations.
    #[must_use]
    pub fn window(&self) -> Option<(u64, u64)> {
        let len = self.snapshots.len() as u64;
        (len > 0).then(|| (self.oldest, self.oldest + len - 1))
    }

    /// Record the grid as it was at `generation`.
    ///
    /// Generations must follow on from the newest entry. Anything else
    /// (a gap, or a generation already recorded) restarts the buffer.
    pub fn push(&mut self, generation: u64, snapshot: Grid) {
        if self.capacity == 0 {
            return;
        }
        match self.window() {
            None => self.oldest = generation,
            Some((_, newest)) if newest.checked_add(1) == Some(generation) => {}
            Some((oldest, newest)) => {
                log::warn!(
                    "history restarted at generation {generation}, was {oldest}..={newest}"
                );
                self.snapshots.clear();
                self.oldest = generation;
            }
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
            self.oldest += 1;
        }
        self.snapshots.push_back(snapshot);
    }

    /// # Errors
    ///
    /// `HistoryUnavailable` if `generation` is outside the retained window.
    pub fn get(&self, generation: u64) -> Result<&Grid, LifeError> {
        generation
            .checked_sub(self.oldest)
            .and_then(|idx| usize::try_from(idx).ok())
            .and_then(|idx| self.snapshots.get(idx))
            .ok_or_else(|| LifeError::HistoryUnavailable {
                generation,
                window: self.window(),
            })
    }

    #[must_use]
    pub fn contains(&self, generation: u64) -> bool {
        self.get(generation).is_ok()
    }

    /// Drop every snapshot at or after `generation`.
    pub fn truncate_from(&mut self, generation: u64) {
        let keep = generation.saturating_sub(self.oldest);
        let keep = usize::try_from(keep).unwrap_or(usize::MAX);
        self.snapshots.truncate(keep);
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.oldest = 0;
    }

    /// `(generation, snapshot)` pairs from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Grid)> + '_ {
        (self.oldest..).zip(self.snapshots.iter())
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}
