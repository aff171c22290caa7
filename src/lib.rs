//! Hookline - fishing rewards and progression engine.
//!
//! Weighted catch resolution, rod modifiers, the XP curve and the
//! cooldown-gated cast transaction, over a pluggable profile store.

pub mod catalog;
pub mod core;
pub mod engine;
pub mod error;
pub mod fishing;
pub mod leaderboard;
pub mod profile;
pub mod progression;
pub mod shop;
pub mod simulator;
pub mod store;

pub use catalog::Catalog;
pub use engine::FishingEngine;
pub use error::{GameError, Result};
