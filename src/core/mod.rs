//! Shared constants, configuration and time source.

pub mod clock;
pub mod config;
pub mod constants;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use constants::*;
