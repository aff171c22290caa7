//! Engine configuration.
//!
//! Every tunable the cast and shop transactions depend on lives here so tests
//! and deployments can inject their own values. `Default` yields the reference
//! balance from `core::constants`.

use super::constants::*;
use crate::error::ConfigError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable constants for casting, progression and new-player defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum time between two casts, in milliseconds
    pub cooldown_ms: i64,

    /// Chance (0-100) that a cast with a zero-bonus rod catches anything
    pub base_success_rate: f64,

    /// Incremental XP needed to go from level 1 to level 2
    pub xp_curve_base: f64,

    /// Growth factor applied per level beyond 2
    pub xp_curve_scale: f64,

    /// Currency granted for every level gained in a cast
    pub level_up_bonus: u64,

    pub starting_currency: u64,
    pub starting_level: u32,
    pub starting_xp: u64,
    pub starter_rod_id: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: CAST_COOLDOWN_MS,
            base_success_rate: BASE_SUCCESS_RATE,
            xp_curve_base: XP_CURVE_BASE,
            xp_curve_scale: XP_CURVE_SCALE,
            level_up_bonus: LEVEL_UP_CURRENCY_BONUS,
            starting_currency: STARTING_CURRENCY,
            starting_level: STARTING_LEVEL,
            starting_xp: STARTING_XP,
            starter_rod_id: STARTING_ROD_ID.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load a config from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Config with no cooldown, for simulations and tests that cast back to back.
    pub fn without_cooldown() -> Self {
        Self {
            cooldown_ms: 0,
            ..Default::default()
        }
    }

    pub fn cooldown(&self) -> Duration {
        Duration::milliseconds(self.cooldown_ms)
    }

    /// Rejects values that would make the XP curve degenerate or the odds meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cooldown_ms < 0 {
            return Err(ConfigError::Invalid(format!(
                "cooldown_ms must be non-negative, got {}",
                self.cooldown_ms
            )));
        }
        if !(0.0..=100.0).contains(&self.base_success_rate) {
            return Err(ConfigError::Invalid(format!(
                "base_success_rate must be within 0-100, got {}",
                self.base_success_rate
            )));
        }
        // A base below 1 floors to 0 XP per level and the level walk never ends.
        if self.xp_curve_base.is_nan() || self.xp_curve_base < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "xp_curve_base must be at least 1, got {}",
                self.xp_curve_base
            )));
        }
        if !self.xp_curve_scale.is_finite() || self.xp_curve_scale < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "xp_curve_scale must be a finite value of at least 1, got {}",
                self.xp_curve_scale
            )));
        }
        if self.starting_level == 0 {
            return Err(ConfigError::Invalid(
                "starting_level must be at least 1".to_string(),
            ));
        }
        if self.starter_rod_id.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "starter_rod_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
