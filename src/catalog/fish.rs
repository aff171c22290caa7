//! Fish species and their rarities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rarity tiers for fish, ordered by increasing scarcity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FishRarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
    Mythic = 5,
}

impl FishRarity {
    pub const ALL: [FishRarity; 6] = [
        FishRarity::Common,
        FishRarity::Uncommon,
        FishRarity::Rare,
        FishRarity::Epic,
        FishRarity::Legendary,
        FishRarity::Mythic,
    ];

    /// Rare and above get their catch weight boosted by a rod's rare bonus.
    pub fn is_scarce(self) -> bool {
        self >= FishRarity::Rare
    }

    pub fn label(self) -> &'static str {
        match self {
            FishRarity::Common => "Common",
            FishRarity::Uncommon => "Uncommon",
            FishRarity::Rare => "Rare",
            FishRarity::Epic => "Epic",
            FishRarity::Legendary => "Legendary",
            FishRarity::Mythic => "Mythic",
        }
    }
}

impl fmt::Display for FishRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

/// A catchable species from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishSpecies {
    pub id: String,
    pub name: String,
    pub rarity: FishRarity,
    /// Relative probability mass among successful catches
    pub weight: f64,
    pub xp_reward: u64,
    pub currency_reward: u64,
    #[serde(default)]
    pub description: String,
}

type SpeciesRow = (&'static str, &'static str, FishRarity, f64, u64, u64, &'static str);

/// The standard species table: id, name, rarity, weight, xp, currency, description.
const STANDARD_SPECIES: [SpeciesRow; 20] = [
    // Common (70 weight total)
    ("minnow", "Minnow", FishRarity::Common, 25.0, 10, 2, "A tiny fish that swims in schools"),
    ("sardine", "Sardine", FishRarity::Common, 20.0, 15, 3, "Small but plentiful in these waters"),
    ("herring", "Herring", FishRarity::Common, 15.0, 20, 4, "A silvery fish found near the surface"),
    ("perch", "Perch", FishRarity::Common, 10.0, 25, 5, "Striped and eager to bite"),
    // Uncommon
    ("bass", "Bass", FishRarity::Uncommon, 12.0, 40, 8, "A fighter that puts up a good struggle"),
    ("trout", "Trout", FishRarity::Uncommon, 10.0, 50, 10, "Spotted beauty of freshwater streams"),
    ("catfish", "Catfish", FishRarity::Uncommon, 8.0, 60, 12, "Bottom dweller with whisker-like barbels"),
    ("pike", "Pike", FishRarity::Uncommon, 5.0, 70, 14, "Aggressive predator with sharp teeth"),
    // Rare
    ("salmon", "Salmon", FishRarity::Rare, 8.0, 100, 20, "Prized for its strength and flavor"),
    ("tuna", "Tuna", FishRarity::Rare, 6.0, 120, 25, "Fast swimmer of the open ocean"),
    ("swordfish", "Swordfish", FishRarity::Rare, 4.0, 150, 30, "Majestic fish with a pointed bill"),
    ("marlin", "Marlin", FishRarity::Rare, 3.0, 180, 35, "Trophy fish that tests your skill"),
    // Epic
    ("shark", "Shark", FishRarity::Epic, 4.0, 250, 50, "Apex predator of the deep"),
    ("stingray", "Stingray", FishRarity::Epic, 3.0, 300, 60, "Graceful glider with a venomous tail"),
    ("octopus", "Giant Octopus", FishRarity::Epic, 2.0, 350, 70, "Intelligent creature with eight arms"),
    // Legendary
    ("whale", "Blue Whale", FishRarity::Legendary, 1.5, 500, 100, "The largest creature in the ocean"),
    ("kraken", "Kraken", FishRarity::Legendary, 1.0, 750, 150, "Legendary sea monster of myth"),
    ("megalodon", "Megalodon", FishRarity::Legendary, 0.8, 1000, 200, "Ancient giant shark thought extinct"),
    // Mythic
    ("leviathan", "Leviathan", FishRarity::Mythic, 0.3, 2000, 500, "Biblical sea serpent of immense power"),
    ("poseidon", "Poseidon's Trident Fish", FishRarity::Mythic, 0.2, 3000, 1000, "Blessed by the god of the sea himself"),
];

/// Builds the standard species list in catalog order.
pub fn standard_species() -> Vec<FishSpecies> {
    STANDARD_SPECIES
        .iter()
        .map(
            |&(id, name, rarity, weight, xp_reward, currency_reward, description)| FishSpecies {
                id: id.to_string(),
                name: name.to_string(),
                rarity,
                weight,
                xp_reward,
                currency_reward,
                description: description.to_string(),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(FishRarity::Common < FishRarity::Uncommon);
        assert!(FishRarity::Uncommon < FishRarity::Rare);
        assert!(FishRarity::Rare < FishRarity::Epic);
        assert!(FishRarity::Epic < FishRarity::Legendary);
        assert!(FishRarity::Legendary < FishRarity::Mythic);
    }

    #[test]
    fn test_scarce_set() {
        let scarce: Vec<_> = FishRarity::ALL
            .iter()
            .copied()
            .filter(|r| r.is_scarce())
            .collect();
        assert_eq!(
            scarce,
            vec![
                FishRarity::Rare,
                FishRarity::Epic,
                FishRarity::Legendary,
                FishRarity::Mythic
            ]
        );
    }

    #[test]
    fn test_rarity_serde_lowercase() {
        let json = serde_json::to_string(&FishRarity::Legendary).unwrap();
        assert_eq!(json, "\"legendary\"");
        let parsed: FishRarity = serde_json::from_str("\"mythic\"").unwrap();
        assert_eq!(parsed, FishRarity::Mythic);
        assert_eq!(FishRarity::Epic.to_string(), "epic");
    }

    #[test]
    fn test_standard_species_weights_positive() {
        let species = standard_species();
        assert_eq!(species.len(), 20);
        assert!(species.iter().all(|s| s.weight > 0.0));
        assert_eq!(species[0].id, "minnow");
    }
}
