//! Simulation configuration.

use crate::core::config::EngineConfig;
use crate::core::constants::STARTING_ROD_ID;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent sessions to simulate
    pub num_runs: u32,

    /// Casts per session
    pub casts: u32,

    /// Rod equipped for the whole session
    pub rod_id: String,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Level the simulated player starts at
    pub starting_level: u32,

    /// Engine rules; the cooldown is skipped by advancing the clock
    pub engine: EngineConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            casts: 1_000,
            rod_id: STARTING_ROD_ID.to_string(),
            seed: None,
            starting_level: 1,
            engine: EngineConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// A small seeded run for smoke checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 10,
            casts: 200,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// One rod at the level it unlocks.
    pub fn rod_at_unlock(rod_id: &str, unlock_level: u32) -> Self {
        Self {
            rod_id: rod_id.to_string(),
            starting_level: unlock_level,
            ..Default::default()
        }
    }
}
