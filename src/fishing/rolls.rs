//! Injectable randomness for casts.
//!
//! A cast consumes exactly two draws: the success roll in `[0, 100)` and, on
//! success, the species roll in `[0, total effective weight)`.

use rand::Rng;
use std::collections::VecDeque;

/// A source of uniform draws.
pub trait RollSource {
    /// Returns a value in `[0, upper)`.
    fn roll(&mut self, upper: f64) -> f64;
}

impl<T: RollSource + ?Sized> RollSource for &mut T {
    fn roll(&mut self, upper: f64) -> f64 {
        (**self).roll(upper)
    }
}

/// Draws from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngRolls<R>(pub R);

impl<R: Rng> RollSource for RngRolls<R> {
    fn roll(&mut self, upper: f64) -> f64 {
        if upper <= 0.0 {
            return 0.0;
        }
        self.0.gen_range(0.0..upper)
    }
}

/// Replays a fixed list of draws, ignoring `upper`. Returns 0.0 once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    rolls: VecDeque<f64>,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn push(&mut self, roll: f64) {
        self.rolls.push_back(roll);
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self, _upper: f64) -> f64 {
        self.rolls.pop_front().unwrap_or(0.0)
    }
}
