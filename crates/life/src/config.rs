//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::error::LifeError;
use crate::history::DEFAULT_MAX_HISTORY;
use crate::neighbors::Topology;
use crate::rules::Rule;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub rows: usize,
    pub cols: usize,
    pub topology: Topology,
    /// Minimum milliseconds between generations while running.
    pub interval_ms: f64,
    pub max_history: usize,
    /// Alive probability used by `randomize` on startup and by the host's seed actions.
    pub density: f64,
    pub seed: u64,
    pub rule: Rule,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            topology: Topology::Bounded,
            interval_ms: 250.0,
            max_history: DEFAULT_MAX_HISTORY,
            density: 0.3,
            seed: 42,
            rule: Rule::CONWAY,
        }
    }
}

pub(crate) fn check_density(density: f64) -> Result<(), LifeError> {
    if (0.0..=1.0).contains(&density) {
        Ok(())
    } else {
        Err(LifeError::InvalidDensity(density))
    }
}

pub(crate) fn check_interval(interval_ms: f64) -> Result<(), LifeError> {
    if interval_ms.is_finite() && interval_ms >= 0.0 {
        Ok(())
    } else {
        Err(LifeError::InvalidConfig {
            reason: format!("interval_ms must be finite and >= 0, got {interval_ms}"),
        })
    }
}

impl SimConfig {
    /// # Errors
    ///
    /// `InvalidConfig` for empty grids, zero history or a bad interval;
    /// `InvalidDensity` when `density` is not in `[0, 1]`.
    pub fn validate(&self) -> Result<(), LifeError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LifeError::InvalidConfig {
                reason: format!(
                    "grid must have at least one cell, got {}x{}",
                    self.rows, self.cols
                ),
            });
        }
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(LifeError::InvalidConfig {
                reason: format!("grid {}x{} is too large", self.rows, self.cols),
            });
        }
        if self.max_history == 0 {
            return Err(LifeError::InvalidConfig {
                reason: "max_history must be at least 1".to_string(),
            });
        }
        check_interval(self.interval_ms)?;
        check_density(self.density)
    }

    /// Parse and validate. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for malformed JSON, or any [`SimConfig::validate`] error.
    pub fn from_json(json: &str) -> Result<Self, LifeError> {
        let config: Self = serde_json::from_str(json).map_err(|e| LifeError::InvalidConfig {
            reason: format!("invalid config json: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// `InvalidConfig` if serialization fails (non-finite floats).
    pub fn to_json(&self) -> Result<String, LifeError> {
        serde_json::to_string(self).map_err(|e| LifeError::InvalidConfig {
            reason: format!("failed to serialize config: {e}"),
        })
    }
}
