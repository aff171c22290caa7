//! Error types for the catalog, configuration, persistence and game layers.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Reference tables that break a catalog invariant.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate species id: {0}")]
    DuplicateSpecies(String),

    #[error("Duplicate rod id: {0}")]
    DuplicateRod(String),

    #[error("Species {0} must have a positive catch weight")]
    InvalidWeight(String),

    #[error("Rod {0} must have an XP multiplier of at least 1.0")]
    InvalidXpMultiplier(String),

    #[error("Rod {0} must have a tier and unlock level of at least 1")]
    InvalidTier(String),

    #[error("Rod tiers must be unique, {0} is used twice")]
    DuplicateTier(u32),

    #[error("Catalog needs exactly one free starter rod at unlock level 1, found {0}")]
    StarterRod(usize),

    #[error("Catalog has no species")]
    Empty,

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Engine configuration that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures reported by a profile store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored version moved on since the caller's read.
    #[error("Concurrent update lost for {wallet}")]
    Conflict { wallet: String },

    #[error("Profile already exists: {0}")]
    AlreadyExists(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the engine can report back to the request layer.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid wallet address: {0:?}")]
    InvalidWallet(String),

    #[error("Player not found: {0}")]
    ProfileNotFound(String),

    #[error("Unknown rod: {0}")]
    UnknownRod(String),

    #[error("Invalid display name: {0}")]
    InvalidDisplayName(String),

    #[error("Cast on cooldown for another {remaining_ms} ms")]
    CooldownActive {
        remaining_ms: i64,
        next_cast_at: DateTime<Utc>,
    },

    #[error("Rod {0} is already owned")]
    AlreadyOwned(String),

    #[error("Rod {0} is not owned")]
    NotOwned(String),

    #[error("Insufficient balance: price {price}, balance {balance}")]
    InsufficientFunds { price: u64, balance: u64 },

    #[error("Level {required} required, player is level {current}")]
    InsufficientLevel { required: u32, current: u32 },

    /// A concurrent request changed the profile first; retry from a fresh read.
    #[error("Profile {0} was modified concurrently")]
    Conflict(String),

    /// Catalog and profiles disagree, e.g. an equipped rod the catalog lacks.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { wallet } => GameError::Conflict(wallet),
            StoreError::NotFound(wallet) => GameError::ProfileNotFound(wallet),
            other => GameError::Store(other),
        }
    }
}

impl GameError {
    /// Only a lost race is worth retrying; everything else fails the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GameError::Conflict(_))
    }

    /// Whether this is an expected, caller-facing outcome rather than a fault.
    pub fn is_internal(&self) -> bool {
        matches!(self, GameError::Configuration(_) | GameError::Store(_))
    }

    /// Message safe to show a player. Internal failures are not described.
    pub fn public_message(&self) -> String {
        match self {
            GameError::CooldownActive {
                remaining_ms,
                next_cast_at,
            } => format!(
                "Your line is still drying. Cast again in {} (at {}).",
                format_wait(*remaining_ms),
                next_cast_at.format("%H:%M:%S UTC")
            ),
            GameError::InsufficientFunds { price, balance } => format!(
                "Insufficient balance: costs {}, you have {} ({} short).",
                price,
                balance,
                price.saturating_sub(*balance)
            ),
            GameError::InsufficientLevel { required, .. } => {
                format!("You must be level {} to purchase this rod.", required)
            }
            GameError::AlreadyOwned(_) => "You already own this rod.".to_string(),
            GameError::NotOwned(_) => "You do not own this rod.".to_string(),
            GameError::Conflict(_) => "Another action was in progress, please retry.".to_string(),
            GameError::Configuration(_) | GameError::Store(_) => {
                "Something went wrong, please try again later.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Formats a millisecond wait as `9m 05s`.
pub fn format_wait(remaining_ms: i64) -> String {
    let total_secs = (remaining_ms.max(0) + 999) / 1000;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, GameError>;
