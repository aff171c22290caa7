//! Balance simulator for Monte Carlo analysis of the catch economy.
//!
//! Runs many seeded casting sessions through the real engine to measure:
//! - Observed catch rate per rod
//! - Rarity distribution of catches
//! - XP, currency and level gained per session

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
