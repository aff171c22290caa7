//! Static reference data: fish species and fishing rods.
//!
//! A `Catalog` is built once at startup (from the standard tables or a JSON
//! file), validated, and then shared read-only behind an `Arc`.

pub mod fish;
pub mod rods;

pub use fish::{standard_species, FishRarity, FishSpecies};
pub use rods::{standard_rods, FishingRod, RodModifiers};

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub species: Vec<FishSpecies>,
    pub rods: Vec<FishingRod>,
}

/// Immutable species and rod tables with id lookup.
#[derive(Debug, Clone)]
pub struct Catalog {
    species: Vec<FishSpecies>,
    rods: Vec<FishingRod>,
    species_index: HashMap<String, usize>,
    rod_index: HashMap<String, usize>,
}

impl Catalog {
    /// The built-in game tables.
    pub fn standard() -> Self {
        // The built-in tables are covered by tests, so this cannot fail in practice.
        Self::new(standard_species(), standard_rods())
            .unwrap_or_else(|e| panic!("standard catalog is invalid: {}", e))
    }

    /// Validates and indexes the given tables. Rods are ordered by tier.
    pub fn new(
        species: Vec<FishSpecies>,
        mut rods: Vec<FishingRod>,
    ) -> Result<Self, CatalogError> {
        if species.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut species_index = HashMap::with_capacity(species.len());
        for (i, s) in species.iter().enumerate() {
            if !(s.weight.is_finite() && s.weight > 0.0) {
                return Err(CatalogError::InvalidWeight(s.id.clone()));
            }
            if species_index.insert(s.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateSpecies(s.id.clone()));
            }
        }

        rods.sort_by_key(|r| r.tier);
        let mut rod_index = HashMap::with_capacity(rods.len());
        let mut tiers = HashSet::with_capacity(rods.len());
        for (i, rod) in rods.iter().enumerate() {
            if rod.tier == 0 || rod.unlock_level == 0 {
                return Err(CatalogError::InvalidTier(rod.id.clone()));
            }
            if !(rod.xp_multiplier.is_finite() && rod.xp_multiplier >= 1.0) {
                return Err(CatalogError::InvalidXpMultiplier(rod.id.clone()));
            }
            if !tiers.insert(rod.tier) {
                return Err(CatalogError::DuplicateTier(rod.tier));
            }
            if rod_index.insert(rod.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateRod(rod.id.clone()));
            }
        }

        let free: Vec<&FishingRod> = rods.iter().filter(|r| r.price == 0).collect();
        if free.len() != 1 || !free[0].is_starter() {
            return Err(CatalogError::StarterRod(free.len()));
        }

        Ok(Self {
            species,
            rods,
            species_index,
            rod_index,
        })
    }

    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        Self::new(data.species, data.rods)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            species: self.species.clone(),
            rods: self.rods.clone(),
        }
    }

    pub fn species_by_id(&self, id: &str) -> Option<&FishSpecies> {
        self.species_index.get(id).map(|&i| &self.species[i])
    }

    /// All species in catalog order.
    pub fn all_species(&self) -> &[FishSpecies] {
        &self.species
    }

    pub fn species_by_rarity(&self, rarity: FishRarity) -> impl Iterator<Item = &FishSpecies> {
        self.species.iter().filter(move |s| s.rarity == rarity)
    }

    /// Sum of unmodified catch weights.
    pub fn total_weight(&self) -> f64 {
        self.species.iter().map(|s| s.weight).sum()
    }

    pub fn rod_by_id(&self, id: &str) -> Option<&FishingRod> {
        self.rod_index.get(id).map(|&i| &self.rods[i])
    }

    /// All rods, tier ascending.
    pub fn all_rods(&self) -> &[FishingRod] {
        &self.rods
    }

    /// The single free rod every player owns.
    pub fn starter_rod(&self) -> &FishingRod {
        // `new` guarantees exactly one rod is the starter.
        self.rods
            .iter()
            .find(|r| r.is_starter())
            .unwrap_or(&self.rods[0])
    }

    /// Rods whose unlock level the player has reached.
    pub fn rods_available_at(&self, level: u32) -> impl Iterator<Item = &FishingRod> {
        self.rods.iter().filter(move |r| r.unlock_level <= level)
    }

    /// The rod one tier above the given one, if any.
    pub fn next_rod_upgrade(&self, rod_id: &str) -> Option<&FishingRod> {
        let current = self.rod_by_id(rod_id)?;
        self.rods.iter().find(|r| r.tier > current.tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(id: &str, rarity: FishRarity, weight: f64) -> FishSpecies {
        FishSpecies {
            id: id.to_string(),
            name: id.to_string(),
            rarity,
            weight,
            xp_reward: 10,
            currency_reward: 1,
            description: String::new(),
        }
    }

    fn rod(id: &str, tier: u32, price: u64, unlock_level: u32) -> FishingRod {
        FishingRod {
            id: id.to_string(),
            name: id.to_string(),
            tier,
            price,
            catch_rate_bonus: 0.0,
            rare_bonus_chance: 0.0,
            xp_multiplier: 1.0,
            unlock_level,
            description: String::new(),
        }
    }

    #[test]
    fn test_standard_catalog_lookups() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.all_species().len(), 20);
        assert_eq!(catalog.all_rods().len(), 20);
        assert_eq!(catalog.species_by_id("kraken").unwrap().name, "Kraken");
        assert!(catalog.species_by_id("goldfish").is_none());
        assert_eq!(catalog.rod_by_id("basic").unwrap().tier, 2);
        assert!(catalog.rod_by_id("broomstick").is_none());
        assert_eq!(catalog.starter_rod().id, "starter");
    }

    #[test]
    fn test_rods_sorted_by_tier() {
        let catalog = Catalog::new(
            vec![species("a", FishRarity::Common, 1.0)],
            vec![rod("gold", 3, 50, 2), rod("starter", 1, 0, 1), rod("tin", 2, 10, 1)],
        )
        .unwrap();
        let ids: Vec<_> = catalog.all_rods().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["starter", "tin", "gold"]);
        assert_eq!(catalog.rod_by_id("gold").unwrap().tier, 3);
    }

    #[test]
    fn test_total_weight() {
        let catalog = Catalog::standard();
        assert!((catalog.total_weight() - 138.8).abs() < 1e-9);
    }

    #[test]
    fn test_species_by_rarity() {
        let catalog = Catalog::standard();
        let mythic: Vec<_> = catalog
            .species_by_rarity(FishRarity::Mythic)
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(mythic, vec!["leviathan", "poseidon"]);
    }

    #[test]
    fn test_rejects_zero_weight() {
        let result = Catalog::new(
            vec![species("ghost", FishRarity::Rare, 0.0)],
            vec![rod("starter", 1, 0, 1)],
        );
        assert!(matches!(result, Err(CatalogError::InvalidWeight(id)) if id == "ghost"));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(
            vec![
                species("cod", FishRarity::Common, 1.0),
                species("cod", FishRarity::Common, 2.0),
            ],
            vec![rod("starter", 1, 0, 1)],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateSpecies(_))));

        let result = Catalog::new(
            vec![species("cod", FishRarity::Common, 1.0)],
            vec![rod("starter", 1, 0, 1), rod("starter", 2, 5, 1)],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateRod(_))));
    }

    #[test]
    fn test_requires_exactly_one_starter() {
        let result = Catalog::new(
            vec![species("cod", FishRarity::Common, 1.0)],
            vec![rod("a", 1, 0, 1), rod("b", 2, 0, 1)],
        );
        assert!(matches!(result, Err(CatalogError::StarterRod(2))));

        let result = Catalog::new(
            vec![species("cod", FishRarity::Common, 1.0)],
            vec![rod("a", 1, 10, 1)],
        );
        assert!(matches!(result, Err(CatalogError::StarterRod(0))));

        // Free but locked behind a level is not a starter.
        let result = Catalog::new(
            vec![species("cod", FishRarity::Common, 1.0)],
            vec![rod("a", 1, 0, 3)],
        );
        assert!(matches!(result, Err(CatalogError::StarterRod(1))));
    }

    #[test]
    fn test_rejects_duplicate_tier() {
        let result = Catalog::new(
            vec![species("cod", FishRarity::Common, 1.0)],
            vec![rod("starter", 1, 0, 1), rod("x", 2, 5, 1), rod("y", 2, 9, 1)],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateTier(2))));
    }

    #[test]
    fn test_rods_available_at_level() {
        let catalog = Catalog::standard();
        let ids: Vec<_> = catalog.rods_available_at(5).map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["starter", "basic", "improved"]);
    }

    #[test]
    fn test_next_rod_upgrade() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.next_rod_upgrade("starter").unwrap().id, "basic");
        assert_eq!(catalog.next_rod_upgrade("oracle").unwrap().id, "eclipse");
        assert!(catalog.next_rod_upgrade("omniscient").is_none());
        assert!(catalog.next_rod_upgrade("unknown").is_none());
    }

    #[test]
    fn test_json_catalog_roundtrip_validates() {
        let json = serde_json::to_string(&Catalog::standard().to_data()).unwrap();
        let catalog = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog.all_species().len(), 20);

        let bad = json.replace("\"weight\":25.0", "\"weight\":-1.0");
        assert!(Catalog::from_json(&bad).is_err());
    }
}
