//! Casting: injectable rolls, weighted catch resolution and the cast transaction.

pub mod logic;
pub mod resolver;
pub mod rolls;
pub mod types;

pub use logic::{apply_cast, catch_message, cooldown_status, equipped_rod};
pub use resolver::CatchResolver;
pub use rolls::{RollSource, RngRolls, ScriptedRolls};
pub use types::{CastResult, CatchOutcome, CooldownStatus};
