//! Player level curve.
//!
//! Each level costs `floor(base * scale^(level - 2))` XP on top of the previous
//! one. Levels are derived from cumulative XP by walking that incremental table,
//! so the per-level flooring is reproduced exactly. A flat curve (`scale == 1`)
//! costs the same every level and is solved by division instead.

use crate::core::config::EngineConfig;
use serde::{Deserialize, Serialize};

/// Exponential XP curve parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XpCurve {
    pub base: f64,
    pub scale: f64,
}

/// Where a player stands within their current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    /// XP earned since reaching `level`
    pub xp_into_level: u64,
    /// XP the next level costs in total
    pub xp_for_next_level: u64,
}

impl Default for XpCurve {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl XpCurve {
    pub fn new(base: f64, scale: f64) -> Self {
        Self { base, scale }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.xp_curve_base, config.xp_curve_scale)
    }

    /// Incremental XP needed to go from `level - 1` to `level`.
    pub fn xp_required_for_level(&self, level: u32) -> u64 {
        if level <= 1 {
            return 0;
        }
        let exponent = (level - 2) as f64;
        // `as` saturates, so absurd levels cost u64::MAX rather than wrapping.
        (self.base * self.scale.powf(exponent)).floor() as u64
    }

    /// Cumulative XP needed to reach `level` from level 1.
    pub fn total_xp_for_level(&self, level: u32) -> u64 {
        if level <= 1 {
            return 0;
        }
        if self.is_flat() {
            return (level as u64 - 1).saturating_mul(self.xp_required_for_level(2));
        }
        (2..=level).fold(0u64, |total, l| {
            total.saturating_add(self.xp_required_for_level(l))
        })
    }

    fn is_flat(&self) -> bool {
        self.scale == 1.0
    }

    /// The highest level whose cumulative cost fits in `xp`.
    pub fn level_from_total_xp(&self, xp: u64) -> u32 {
        self.walk(xp).0
    }

    pub fn progress(&self, xp: u64) -> LevelProgress {
        let (level, spent) = self.walk(xp);
        LevelProgress {
            level,
            xp_into_level: xp - spent,
            xp_for_next_level: self.xp_required_for_level(level.saturating_add(1)),
        }
    }

    /// Returns the reached level and the cumulative XP it cost.
    fn walk(&self, xp: u64) -> (u32, u64) {
        if self.is_flat() {
            let cost = self.xp_required_for_level(2);
            if cost == 0 {
                return (1, 0);
            }
            let gained = (xp / cost).min((u32::MAX - 1) as u64);
            return (gained as u32 + 1, gained * cost);
        }

        let mut level = 1;
        let mut spent = 0u64;
        while level < u32::MAX {
            let next = self.xp_required_for_level(level + 1);
            // A zero-cost level would loop forever; config validation rules it out.
            if next == 0 {
                break;
            }
            match spent.checked_add(next) {
                Some(total) if total <= xp => {
                    spent = total;
                    level += 1;
                }
                _ => break,
            }
        }
        (level, spent)
    }
}
