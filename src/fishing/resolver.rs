//! Weighted catch resolution.
//!
//! A cast first rolls against `base_success_rate + catch_rate_bonus`. On
//! success the species is drawn from the catalog with each scarce species'
//! weight boosted by the rod's rare bonus.

use super::rolls::RollSource;
use super::types::CatchOutcome;
use crate::catalog::{Catalog, FishSpecies, RodModifiers};

/// Upper bound of the success roll.
pub const SUCCESS_ROLL_RANGE: f64 = 100.0;

/// Picks what (if anything) a cast lands.
#[derive(Debug, Clone, Copy)]
pub struct CatchResolver<'a> {
    catalog: &'a Catalog,
    base_success_rate: f64,
}

impl<'a> CatchResolver<'a> {
    pub fn new(catalog: &'a Catalog, base_success_rate: f64) -> Self {
        Self {
            catalog,
            base_success_rate,
        }
    }

    /// Chance (percent) that a cast with this rod catches something.
    ///
    /// Not clamped: at 100 or above every roll in `[0, 100)` succeeds.
    pub fn success_rate(&self, modifiers: &RodModifiers) -> f64 {
        self.base_success_rate + modifiers.catch_rate_bonus
    }

    /// A species' weight after the rod's rare bonus.
    pub fn effective_weight(species: &FishSpecies, modifiers: &RodModifiers) -> f64 {
        if species.rarity.is_scarce() {
            species.weight * (1.0 + modifiers.rare_bonus_chance / 100.0)
        } else {
            species.weight
        }
    }

    pub fn total_effective_weight(&self, modifiers: &RodModifiers) -> f64 {
        self.catalog
            .all_species()
            .iter()
            .map(|s| Self::effective_weight(s, modifiers))
            .sum()
    }

    /// Resolves one cast, drawing the success roll and then the species roll.
    pub fn resolve(
        &self,
        modifiers: &RodModifiers,
        rolls: &mut impl RollSource,
    ) -> CatchOutcome<'a> {
        let success_roll = rolls.roll(SUCCESS_ROLL_RANGE);
        if success_roll > self.success_rate(modifiers) {
            return CatchOutcome::Miss;
        }

        let species_roll = rolls.roll(self.total_effective_weight(modifiers));
        CatchOutcome::Caught(self.pick_species(modifiers, species_roll))
    }

    /// Walks the catalog in order, subtracting effective weights from `roll`.
    ///
    /// The first species that brings the remainder to zero or below wins, so a
    /// roll landing exactly on a boundary goes to the earlier species. If float
    /// drift lets the roll run past the end, the first species is returned.
    pub fn pick_species(&self, modifiers: &RodModifiers, roll: f64) -> &'a FishSpecies {
        let species = self.catalog.all_species();
        let mut remaining = roll;
        for s in species {
            remaining -= Self::effective_weight(s, modifiers);
            if remaining <= 0.0 {
                return s;
            }
        }
        &species[0]
    }

    /// Probability (0-1) of landing each species on a single cast, misses included.
    pub fn catch_chances(&self, modifiers: &RodModifiers) -> Vec<(&'a FishSpecies, f64)> {
        let hit = (self.success_rate(modifiers) / SUCCESS_ROLL_RANGE).clamp(0.0, 1.0);
        let total = self.total_effective_weight(modifiers);
        self.catalog
            .all_species()
            .iter()
            .map(|s| (s, hit * Self::effective_weight(s, modifiers) / total))
            .collect()
    }
}
