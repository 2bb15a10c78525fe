//! CLI configuration from environment.

use riskpath_core::{TerrainConfig, DEFAULT_GRID_SIZE, DEFAULT_TICK_INTERVAL_MS, MAX_GRID_SIZE};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub grid_size: usize,
    pub seed: Option<u64>,
    pub tick_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            seed: None,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Missing or unparsable values, zero
    /// intervals and sizes outside `1..=MAX_GRID_SIZE` fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            grid_size: lookup("RISKPATH_GRID_SIZE")
                .and_then(|s| s.trim().parse().ok())
                .filter(|size| (1..=MAX_GRID_SIZE).contains(size))
                .unwrap_or(defaults.grid_size),
            seed: lookup("RISKPATH_SEED").and_then(|s| s.trim().parse().ok()),
            tick_interval_ms: lookup("RISKPATH_TICK_MS")
                .and_then(|s| s.trim().parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.tick_interval_ms),
        }
    }

    /// Apply command-line values on top of the environment. An oversized grid
    /// is passed through so terrain generation can report it.
    pub fn with_overrides(
        mut self,
        grid_size: Option<usize>,
        seed: Option<u64>,
        tick_interval_ms: Option<u64>,
    ) -> Self {
        if let Some(size) = grid_size.filter(|size| *size > 0) {
            self.grid_size = size;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(ms) = tick_interval_ms.filter(|ms| *ms > 0) {
            self.tick_interval_ms = ms;
        }
        self
    }

    pub fn terrain(&self) -> TerrainConfig {
        TerrainConfig {
            size: self.grid_size,
            seed: self.seed,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
