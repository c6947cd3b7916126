//! JS-facing wrapper around [`SimulationController`].
//!
//! The browser calls `tick(performance.now())` from its animation-frame
//! loop and redraws from `cells()` (or a view over `cells_ptr()`) when it
//! returns true. Errors reach JS as thrown `Error`s.

use wasm_bindgen::prelude::*;

use crate::cell::CellState;
use crate::config::SimConfig;
use crate::controller::SimulationController;
use crate::error::LifeError;
use crate::neighbors::Topology;
use crate::patterns::Pattern;
use crate::rules::Rule;

#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    sim: SimulationController,
}

#[wasm_bindgen]
impl Universe {
    /// Default configuration at `rows × cols`, randomly populated.
    ///
    /// # Errors
    ///
    /// Throws for an empty grid.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, cols: usize) -> Result<Universe, JsError> {
        Ok(Self::with_config(&SimConfig {
            rows,
            cols,
            ..SimConfig::default()
        })?)
    }

    /// # Errors
    ///
    /// Throws for malformed or invalid configuration.
    pub fn from_config_json(json: &str) -> Result<Universe, JsError> {
        Ok(Self::with_config(&SimConfig::from_json(json)?)?)
    }

    /// # Errors
    ///
    /// Never in practice; the default configuration always serializes.
    pub fn default_config_json() -> Result<String, JsError> {
        Ok(SimConfig::default().to_json()?)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.sim.current_grid().rows()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.sim.current_grid().cols()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.sim.generation()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    pub fn play(&mut self) {
        self.sim.play();
    }

    pub fn pause(&mut self) {
        self.sim.pause();
    }

    pub fn toggle(&mut self) {
        self.sim.toggle();
    }

    /// True when a new generation was produced and the grid should be redrawn.
    pub fn tick(&mut self, timestamp_ms: f64) -> bool {
        self.sim.tick(timestamp_ms).is_some()
    }

    pub fn step(&mut self) {
        self.sim.step();
    }

    #[must_use]
    pub fn interval_ms(&self) -> f64 {
        self.sim.interval_ms()
    }

    /// # Errors
    ///
    /// Throws for negative or non-finite intervals.
    pub fn set_interval(&mut self, interval_ms: f64) -> Result<(), JsError> {
        Ok(self.sim.set_interval(interval_ms)?)
    }

    /// Returns whether the cell is now alive.
    ///
    /// # Errors
    ///
    /// Throws when the cell is outside the grid.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool, JsError> {
        Ok(self.sim.toggle_cell(row, col)?.is_alive())
    }

    /// # Errors
    ///
    /// Throws when the cell is outside the grid.
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<(), JsError> {
        Ok(self.sim.set_cell(row, col, CellState::from(alive))?)
    }

    /// # Errors
    ///
    /// Throws unless `density` is within `[0, 1]`.
    pub fn randomize(&mut self, density: f64) -> Result<(), JsError> {
        Ok(self.sim.randomize(density)?)
    }

    /// # Errors
    ///
    /// Throws when the rectangle leaves the grid or the density is invalid.
    pub fn seed_pattern(
        &mut self,
        width: usize,
        height: usize,
        origin_row: usize,
        origin_col: usize,
        density: f64,
    ) -> Result<(), JsError> {
        Ok(self
            .sim
            .seed_pattern(width, height, origin_row, origin_col, density)?)
    }

    /// # Errors
    ///
    /// Throws when the rectangle is larger than the grid or the density is invalid.
    pub fn seed_center(
        &mut self,
        width: usize,
        height: usize,
        density: f64,
    ) -> Result<(), JsError> {
        Ok(self.sim.seed_center(width, height, density)?)
    }

    /// Stamp a built-in pattern (`glider`, `blinker`, ...) by name.
    ///
    /// # Errors
    ///
    /// Throws for an unknown name or when the pattern does not fit.
    pub fn place_pattern(
        &mut self,
        name: &str,
        origin_row: usize,
        origin_col: usize,
    ) -> Result<(), JsError> {
        let pattern = Pattern::find(name)?;
        Ok(self.sim.place_pattern(pattern, origin_row, origin_col)?)
    }

    pub fn clear(&mut self) {
        self.sim.clear();
    }

    /// # Errors
    ///
    /// Throws when `target` is no longer in history.
    pub fn rewind(&mut self, target: u64) -> Result<(), JsError> {
        self.sim.rewind(target)?;
        Ok(())
    }

    /// Oldest generation still available to `rewind`.
    #[must_use]
    pub fn oldest_generation(&self) -> Option<u64> {
        self.sim.history().window().map(|(oldest, _)| oldest)
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.sim.history().len()
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.sim.set_topology(Topology::from_wrap(wrap));
    }

    #[must_use]
    pub fn is_wrapped(&self) -> bool {
        self.sim.topology().is_wrapped()
    }

    /// # Errors
    ///
    /// Throws for anything that is not `B…/S…` notation.
    pub fn set_rule(&mut self, rule: &str) -> Result<(), JsError> {
        self.sim.set_rule(rule.parse::<Rule>()?);
        Ok(())
    }

    #[must_use]
    pub fn rule(&self) -> String {
        self.sim.rule().to_string()
    }

    pub fn reseed(&mut self, seed: u64) {
        self.sim.reseed(seed);
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.sim.live_count()
    }

    /// Copy of the grid, one byte per cell (0 dead, 1 alive), row-major.
    #[must_use]
    pub fn cells(&self) -> Vec<u8> {
        self.sim.current_grid().to_bytes()
    }

    /// Zero-copy view for `new Uint8Array(memory.buffer, ptr, rows * cols)`.
    /// Invalidated by the next call that advances, rewinds or rebuilds the grid.
    #[must_use]
    pub fn cells_ptr(&self) -> *const u8 {
        self.sim.current_grid().as_ptr()
    }
}

impl Universe {
    /// Build from a native config; the grid is randomized at `config.density`.
    ///
    /// # Errors
    ///
    /// Any [`SimConfig::validate`] error.
    pub fn with_config(config: &SimConfig) -> Result<Universe, LifeError> {
        let mut sim = SimulationController::new(config)?;
        sim.randomize(config.density)?;
        log::debug!(
            "universe {}x{} ({:?}, {}), density {}",
            config.rows,
            config.cols,
            config.topology,
            config.rule,
            config.density
        );
        Ok(Self { sim })
    }

    #[must_use]
    pub fn controller(&self) -> &SimulationController {
        &self.sim
    }

    pub fn controller_mut(&mut self) -> &mut SimulationController {
        &mut self.sim
    }
}
