//! Play/pause state, tick pacing and user edits.
//!
//! The controller is the single owner of the live grid, the generation
//! counter and the rewind history. Hosts drive it with [`tick`] on every
//! frame; edits (toggle, randomize, clear, rewind) apply immediately and
//! ignore pacing.
//!
//! A host that shares the controller between threads must put the whole
//! value behind one lock; grid and history are not independently safe to
//! interleave.
//!
//! [`tick`]: SimulationController::tick

use std::mem;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cell::CellState;
use crate::config::{check_density, check_interval, SimConfig};
use crate::engine::next_generation_with;
use crate::error::LifeError;
use crate::history::HistoryBuffer;
use crate::neighbors::Topology;
use crate::patterns::Pattern;
use crate::rules::Rule;
use crate::Grid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

#[derive(Debug)]
pub struct SimulationController {
    grid: Grid,
    generation: u64,
    state: RunState,
    interval_ms: f64,
    last_tick_ms: f64,
    history: HistoryBuffer,
    topology: Topology,
    rule: Rule,
    rng: ChaCha8Rng,
}

impl SimulationController {
    /// Paused controller with an all-dead grid.
    ///
    /// # Errors
    ///
    /// Any [`SimConfig::validate`] error.
    pub fn new(config: &SimConfig) -> Result<Self, LifeError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &SimConfig) -> Self {
        Self {
            grid: Grid::new(config.rows, config.cols),
            generation: 0,
            state: RunState::Paused,
            interval_ms: config.interval_ms,
            last_tick_ms: 0.0,
            history: HistoryBuffer::new(config.max_history),
            topology: config.topology,
            rule: config.rule,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    #[must_use]
    pub fn current_grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    #[must_use]
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    #[must_use]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[must_use]
    pub fn rule(&self) -> Rule {
        self.rule
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.grid.live_count()
    }

    pub fn play(&mut self) {
        if self.state == RunState::Paused {
            log::debug!("play at generation {}", self.generation);
        }
        self.state = RunState::Running;
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            log::debug!("pause at generation {}", self.generation);
        }
        self.state = RunState::Paused;
    }

    pub fn toggle(&mut self) {
        match self.state {
            RunState::Running => self.pause(),
            RunState::Paused => self.play(),
        }
    }

    /// Takes effect on the next tick; the last tick time is kept.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for negative or non-finite intervals.
    pub fn set_interval(&mut self, interval_ms: f64) -> Result<(), LifeError> {
        check_interval(interval_ms)?;
        log::debug!("interval {} -> {interval_ms} ms", self.interval_ms);
        self.interval_ms = interval_ms;
        Ok(())
    }

    pub fn set_topology(&mut self, topology: Topology) {
        log::debug!("topology {:?} -> {topology:?}", self.topology);
        self.topology = topology;
    }

    pub fn set_rule(&mut self, rule: Rule) {
        log::debug!("rule {} -> {rule}", self.rule);
        self.rule = rule;
    }

    /// Restart the random stream used by `randomize` and seeding.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Frame hook. Advances one generation when running and at least one
    /// interval has passed since the last advance, returning the new grid.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<&Grid> {
        let elapsed = timestamp_ms - self.last_tick_ms;
        if self.state != RunState::Running || elapsed.is_nan() || elapsed < self.interval_ms {
            return None;
        }
        self.last_tick_ms = timestamp_ms;
        Some(self.step())
    }

    /// Advance exactly one generation, whatever the run state.
    pub fn step(&mut self) -> &Grid {
        let next = next_generation_with(&self.grid, self.topology, self.rule);
        let previous = mem::replace(&mut self.grid, next);
        self.history.push(self.generation, previous);
        self.generation += 1;
        log::trace!(
            "generation {} ({} alive)",
            self.generation,
            self.grid.live_count()
        );
        &self.grid
    }

    /// Flip one cell of the live grid. History and generation are untouched.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if the cell is outside the grid.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<CellState, LifeError> {
        self.grid.toggle(row, col)
    }

    /// # Errors
    ///
    /// `OutOfBounds` if the cell is outside the grid.
    pub fn set_cell(&mut self, row: usize, col: usize, state: CellState) -> Result<(), LifeError> {
        self.grid.set(row, col, state)
    }

    /// Every cell becomes alive with probability `density`.
    ///
    /// # Errors
    ///
    /// `InvalidDensity` unless `density` is within `[0, 1]`.
    pub fn randomize(&mut self, density: f64) -> Result<(), LifeError> {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        self.seed_pattern(cols, rows, 0, 0, density)
    }

    /// Randomize only the `height × width` rectangle at `(origin_row, origin_col)`.
    ///
    /// # Errors
    ///
    /// `RegionOutOfBounds` if the rectangle leaves the grid, `InvalidDensity`
    /// for a bad density. Nothing is changed on error.
    pub fn seed_pattern(
        &mut self,
        width: usize,
        height: usize,
        origin_row: usize,
        origin_col: usize,
        density: f64,
    ) -> Result<(), LifeError> {
        self.check_region(origin_row, origin_col, height, width)?;
        check_density(density)?;
        for r in origin_row..origin_row + height {
            for c in origin_col..origin_col + width {
                let state = CellState::from(self.rng.random_bool(density));
                self.grid.set(r, c, state)?;
            }
        }
        log::debug!("seeded {height}x{width} at ({origin_row}, {origin_col}), density {density}");
        Ok(())
    }

    /// [`seed_pattern`](Self::seed_pattern) on a rectangle centred in the grid.
    ///
    /// # Errors
    ///
    /// As for `seed_pattern`.
    pub fn seed_center(
        &mut self,
        width: usize,
        height: usize,
        density: f64,
    ) -> Result<(), LifeError> {
        let origin_row = self.grid.rows().saturating_sub(height) / 2;
        let origin_col = self.grid.cols().saturating_sub(width) / 2;
        self.seed_pattern(width, height, origin_row, origin_col, density)
    }

    /// Set the pattern's cells alive with its top-left at `(origin_row, origin_col)`.
    /// Cells outside the pattern are left as they are.
    ///
    /// # Errors
    ///
    /// `RegionOutOfBounds` if the pattern does not fit.
    pub fn place_pattern(
        &mut self,
        pattern: &Pattern,
        origin_row: usize,
        origin_col: usize,
    ) -> Result<(), LifeError> {
        self.check_region(origin_row, origin_col, pattern.height(), pattern.width())?;
        for &(r, c) in pattern.cells {
            self.grid.set(origin_row + r, origin_col + c, CellState::Alive)?;
        }
        log::debug!("placed {} at ({origin_row}, {origin_col})", pattern.name);
        Ok(())
    }

    fn check_region(
        &self,
        origin_row: usize,
        origin_col: usize,
        height: usize,
        width: usize,
    ) -> Result<(), LifeError> {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let fits = origin_row.checked_add(height).is_some_and(|end| end <= rows)
            && origin_col.checked_add(width).is_some_and(|end| end <= cols);
        if fits {
            Ok(())
        } else {
            Err(LifeError::RegionOutOfBounds {
                origin_row,
                origin_col,
                height,
                width,
                rows,
                cols,
            })
        }
    }

    /// All-dead grid, generation 0, empty history. Run state is kept.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
        self.history.clear();
        log::debug!("cleared");
    }

    /// Pause and restore the grid recorded at `target`.
    ///
    /// Snapshots from `target` onwards are dropped: playing again records a
    /// new future from `target`. Rewinding to the current generation only
    /// pauses.
    ///
    /// # Errors
    ///
    /// `HistoryUnavailable` if `target` is neither current nor retained.
    /// The controller is paused either way.
    pub fn rewind(&mut self, target: u64) -> Result<&Grid, LifeError> {
        self.pause();
        if target != self.generation {
            let snapshot = self.history.get(target)?.clone();
            self.history.truncate_from(target);
            self.grid = snapshot;
            log::debug!("rewound {} -> {target}", self.generation);
            self.generation = target;
        }
        Ok(&self.grid)
    }
}

impl Default for SimulationController {
    fn default() -> Self {
        Self::build(&SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{BLINKER, GLIDER};
    use proptest::prelude::*;

    fn controller(rows: usize, cols: usize) -> SimulationController {
        SimulationController::new(&SimConfig {
            rows,
            cols,
            interval_ms: 100.0,
            ..SimConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn starts_paused_and_empty() {
        let sim = SimulationController::default();
        assert_eq!(sim.state(), RunState::Paused);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.live_count(), 0);
        assert_eq!(sim.current_grid().rows(), 50);
        assert!(sim.history().is_empty());
    }

    #[test]
    fn rejects_invalid_config() {
        let err = SimulationController::new(&SimConfig {
            cols: 0,
            ..SimConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, LifeError::InvalidConfig { .. }));
    }

    #[test]
    fn play_pause_toggle() {
        let mut sim = controller(5, 5);
        sim.play();
        assert!(sim.is_running());
        sim.pause();
        assert!(!sim.is_running());
        sim.toggle();
        assert_eq!(sim.state(), RunState::Running);
        sim.toggle();
        assert_eq!(sim.state(), RunState::Paused);
    }

    #[test]
    fn tick_is_noop_while_paused() {
        let mut sim = controller(5, 5);
        assert!(sim.tick(1_000.0).is_none());
        assert!(sim.tick(100_000.0).is_none());
        assert_eq!(sim.generation(), 0);
        assert!(sim.history().is_empty());
    }

    #[test]
    fn tick_respects_interval() {
        let mut sim = controller(5, 5);
        sim.play();
        assert!(sim.tick(50.0).is_none());
        assert!(sim.tick(100.0).is_some());
        assert_eq!(sim.generation(), 1);
        assert!(sim.tick(150.0).is_none());
        assert!(sim.is_running());
        assert!(sim.tick(200.0).is_some());
        assert_eq!(sim.generation(), 2);
        assert_eq!(sim.history().window(), Some((0, 1)));
        assert!(sim.tick(f64::NAN).is_none());
    }

    #[test]
    fn set_interval_keeps_last_tick() {
        let mut sim = controller(5, 5);
        sim.play();
        assert!(sim.tick(100.0).is_some());
        sim.set_interval(500.0).unwrap();
        assert!(sim.tick(400.0).is_none());
        assert!(sim.tick(600.0).is_some());
        sim.set_interval(0.0).unwrap();
        assert!(sim.tick(600.0).is_some());
        assert_eq!(sim.generation(), 3);

        assert!(sim.set_interval(-5.0).is_err());
        assert!(sim.set_interval(f64::INFINITY).is_err());
        assert!((sim.interval_ms() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tick_returns_the_advanced_grid() {
        let mut sim = controller(5, 5);
        sim.place_pattern(&BLINKER, 2, 1).unwrap();
        sim.play();
        let grid = sim.tick(100.0).unwrap();
        assert_eq!(
            grid.live_cells().collect::<Vec<_>>(),
            vec![(1, 2), (2, 2), (3, 2)]
        );
    }

    #[test]
    fn toggle_cell_skips_history() {
        let mut sim = controller(4, 4);
        sim.play();
        assert_eq!(sim.toggle_cell(1, 2).unwrap(), CellState::Alive);
        assert_eq!(sim.current_grid().get(1, 2).unwrap(), CellState::Alive);
        assert_eq!(sim.generation(), 0);
        assert!(sim.history().is_empty());
        assert!(sim.toggle_cell(4, 0).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn randomize_extremes() {
        let mut sim = controller(6, 7);
        sim.randomize(1.0).unwrap();
        assert_eq!(sim.live_count(), 42);
        sim.randomize(0.0).unwrap();
        assert_eq!(sim.live_count(), 0);
        assert_eq!(sim.generation(), 0);
        assert!(sim.history().is_empty());
    }

    #[test]
    fn randomize_rejects_bad_density() {
        let mut sim = controller(4, 4);
        assert_eq!(sim.randomize(1.5), Err(LifeError::InvalidDensity(1.5)));
        assert!(sim.randomize(f64::NAN).is_err());
        assert!(sim.randomize(-0.1).is_err());
    }

    #[test]
    fn same_seed_same_grid() {
        let mut a = controller(20, 20);
        let mut b = controller(20, 20);
        a.randomize(0.3).unwrap();
        b.randomize(0.3).unwrap();
        assert_eq!(a.current_grid(), b.current_grid());

        b.reseed(99);
        b.randomize(0.3).unwrap();
        assert_ne!(a.current_grid(), b.current_grid());
    }

    #[test]
    fn seed_pattern_touches_only_the_region() {
        let mut sim = controller(10, 10);
        sim.seed_pattern(3, 2, 4, 5, 1.0).unwrap();
        let live: Vec<_> = sim.current_grid().live_cells().collect();
        assert_eq!(
            live,
            vec![(4, 5), (4, 6), (4, 7), (5, 5), (5, 6), (5, 7)]
        );
    }

    #[test]
    fn seed_pattern_out_of_bounds() {
        let mut sim = controller(10, 10);
        let err = sim.seed_pattern(4, 4, 8, 0, 1.0).unwrap_err();
        assert_eq!(
            err,
            LifeError::RegionOutOfBounds {
                origin_row: 8,
                origin_col: 0,
                height: 4,
                width: 4,
                rows: 10,
                cols: 10
            }
        );
        assert!(sim.seed_pattern(1, 1, 0, usize::MAX, 1.0).is_err());
        assert_eq!(sim.live_count(), 0);
    }

    #[test]
    fn seed_center_is_centred() {
        let mut sim = controller(10, 10);
        sim.seed_center(4, 2, 1.0).unwrap();
        let live: Vec<_> = sim.current_grid().live_cells().collect();
        assert_eq!(live.first(), Some(&(4, 3)));
        assert_eq!(live.last(), Some(&(5, 6)));
        assert_eq!(live.len(), 8);
        assert!(sim.seed_center(11, 1, 0.5).is_err());
    }

    #[test]
    fn place_pattern_checks_fit() {
        let mut sim = controller(5, 5);
        sim.place_pattern(&GLIDER, 2, 2).unwrap();
        assert_eq!(sim.live_count(), 5);
        assert!(sim.place_pattern(&GLIDER, 3, 0).is_err());
    }

    #[test]
    fn clear_resets_everything() {
        let mut sim = controller(6, 6);
        sim.randomize(0.5).unwrap();
        for _ in 0..4 {
            sim.step();
        }
        sim.clear();
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.current_grid(), &Grid::new(6, 6));
        assert!(sim.history().is_empty());
    }

    #[test]
    fn rewind_restores_recorded_grid() {
        let mut sim = controller(12, 12);
        sim.randomize(0.4).unwrap();
        let mut recorded = vec![sim.current_grid().clone()];
        for _ in 0..6 {
            recorded.push(sim.step().clone());
        }
        sim.play();

        let grid = sim.rewind(2).unwrap().clone();
        assert_eq!(grid, recorded[2]);
        assert_eq!(sim.generation(), 2);
        assert!(!sim.is_running());
        assert_eq!(sim.history().window(), Some((0, 1)));

        // Replaying from the rewound point records a fresh, contiguous future.
        sim.step();
        assert_eq!(sim.history().window(), Some((0, 2)));
        assert_eq!(sim.history().get(2).unwrap(), &recorded[2]);
        assert_eq!(sim.current_grid(), &recorded[3]);
    }

    #[test]
    fn rewind_to_current_generation_only_pauses() {
        let mut sim = controller(5, 5);
        sim.place_pattern(&BLINKER, 2, 1).unwrap();
        sim.step();
        let current = sim.current_grid().clone();
        sim.play();
        assert_eq!(sim.rewind(1).unwrap(), &current);
        assert!(!sim.is_running());
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn rewind_past_eviction_fails() {
        let mut sim = SimulationController::new(&SimConfig {
            rows: 5,
            cols: 5,
            max_history: 3,
            ..SimConfig::default()
        })
        .unwrap();
        for _ in 0..5 {
            sim.step();
        }
        sim.play();
        assert_eq!(sim.history().window(), Some((2, 4)));
        let err = sim.rewind(1).unwrap_err();
        assert_eq!(
            err,
            LifeError::HistoryUnavailable {
                generation: 1,
                window: Some((2, 4))
            }
        );
        assert!(!sim.is_running());
        assert_eq!(sim.generation(), 5);
        assert!(sim.rewind(9).is_err());
    }

    #[test]
    fn wrap_setting_is_used_by_step() {
        let mut sim = controller(5, 5);
        sim.set_topology(Topology::Wrapped);
        for r in 1..=3 {
            sim.set_cell(r, 0, CellState::Alive).unwrap();
        }
        sim.step();
        assert_eq!(sim.live_count(), 3);
        assert!(sim.current_grid().get(2, 4).unwrap().is_alive());
    }

    #[test]
    fn controller_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SimulationController>();
    }

    proptest! {
        #[test]
        fn prop_rewind_matches_history(
            steps in 1u64..30,
            capacity in 1usize..10,
            pick in any::<prop::sample::Index>(),
        ) {
            let mut sim = SimulationController::new(&SimConfig {
                rows: 8,
                cols: 8,
                max_history: capacity,
                ..SimConfig::default()
            })
            .unwrap();
            sim.randomize(0.35).unwrap();
            let mut recorded = vec![sim.current_grid().clone()];
            for _ in 0..steps {
                recorded.push(sim.step().clone());
            }
            prop_assert!(sim.history().len() <= capacity);

            let (oldest, newest) = sim.history().window().unwrap();
            prop_assert_eq!(newest, steps - 1);
            let target = oldest + pick.index((newest - oldest + 1) as usize) as u64;
            let grid = sim.rewind(target).unwrap().clone();
            prop_assert_eq!(sim.generation(), target);
            prop_assert_eq!(&grid, &recorded[target as usize]);

            if oldest > 0 {
                prop_assert!(sim.rewind(oldest - 1).is_err());
            }
        }
    }
}
