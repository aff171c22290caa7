//! Results reported by the cast transaction.

use crate::catalog::FishSpecies;
use crate::profile::CatchRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the catch resolver decided for one cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatchOutcome<'a> {
    /// The success roll failed, nothing bit
    Miss,
    /// A species was landed; rewards are still unscaled
    Caught(&'a FishSpecies),
}

impl<'a> CatchOutcome<'a> {
    pub fn species(&self) -> Option<&'a FishSpecies> {
        match self {
            CatchOutcome::Miss => None,
            CatchOutcome::Caught(species) => Some(species),
        }
    }

    pub fn is_catch(&self) -> bool {
        matches!(self, CatchOutcome::Caught(_))
    }
}

/// Outcome of a completed cast, as returned to the request layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastResult {
    pub success: bool,
    pub catch: Option<CatchRecord>,
    pub xp_gained: u64,
    /// Fish reward plus any level-up bonus
    pub currency_gained: u64,
    pub level_up: bool,
    /// Set only when the cast crossed at least one level
    pub new_level: Option<u32>,
    pub message: String,
}

/// Whether a wallet may cast right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownStatus {
    pub can_cast: bool,
    /// Zero when `can_cast` is true
    pub remaining_ms: i64,
    /// When casting becomes legal again; `None` when it already is
    pub next_cast_at: Option<DateTime<Utc>>,
}

impl CooldownStatus {
    pub fn ready() -> Self {
        Self {
            can_cast: true,
            remaining_ms: 0,
            next_cast_at: None,
        }
    }
}
