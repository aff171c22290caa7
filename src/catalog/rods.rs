//! Fishing rods and their catch modifiers.

use serde::{Deserialize, Serialize};

const XP_MULTIPLIER_SCALE: u64 = 10_000;

/// The three bonuses a rod applies to a cast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RodModifiers {
    /// Percentage points added to the base success rate
    pub catch_rate_bonus: f64,
    /// Percent boost to the weight of rare-and-above species
    pub rare_bonus_chance: f64,
    pub xp_multiplier: f64,
}

impl RodModifiers {
    /// No bonuses at all, the starter rod's modifiers.
    pub const NONE: RodModifiers = RodModifiers {
        catch_rate_bonus: 0.0,
        rare_bonus_chance: 0.0,
        xp_multiplier: 1.0,
    };

    /// Applies the XP multiplier to a base reward, rounding down.
    ///
    /// The multiplier is snapped to 1/10000ths first so `floor(70 * 1.1)` is 77
    /// rather than whatever the binary expansion of 1.1 happens to produce.
    pub fn scale_xp(&self, base_xp: u64) -> u64 {
        let basis_points = (self.xp_multiplier * XP_MULTIPLIER_SCALE as f64)
            .round()
            .max(0.0) as u64;
        base_xp.saturating_mul(basis_points) / XP_MULTIPLIER_SCALE
    }
}

/// A purchasable rod from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishingRod {
    pub id: String,
    pub name: String,
    pub tier: u32,
    pub price: u64,
    pub catch_rate_bonus: f64,
    pub rare_bonus_chance: f64,
    pub xp_multiplier: f64,
    pub unlock_level: u32,
    #[serde(default)]
    pub description: String,
}

impl FishingRod {
    pub fn modifiers(&self) -> RodModifiers {
        RodModifiers {
            catch_rate_bonus: self.catch_rate_bonus,
            rare_bonus_chance: self.rare_bonus_chance,
            xp_multiplier: self.xp_multiplier,
        }
    }

    pub fn is_starter(&self) -> bool {
        self.price == 0 && self.unlock_level == 1
    }
}

type RodRow = (&'static str, &'static str, u32, u64, f64, f64, f64, u32, &'static str);

/// The standard rod table: id, name, tier, price, catch bonus, rare bonus, xp mult, unlock level.
const STANDARD_RODS: [RodRow; 20] = [
    ("starter", "Driftwood Initiate Rod", 1, 0, 0.0, 0.0, 1.0, 1, "A humble rod carved from driftwood."),
    ("basic", "Tidecaller Rod", 2, 100, 4.0, 2.0, 1.1, 3, "Whispers with the rhythm of the tides."),
    ("improved", "Coralbound Rod", 3, 300, 7.0, 4.0, 1.2, 5, "Reinforced with living coral."),
    ("advanced", "Stormline Rod", 4, 600, 10.0, 6.0, 1.3, 8, "Built to endure violent seas."),
    ("expert", "Abyssforged Rod", 5, 1200, 14.0, 9.0, 1.5, 12, "Forged beneath crushing depths."),
    ("master", "Leviathan Spine Rod", 6, 2500, 18.0, 12.0, 1.75, 16, "Fashioned from an ancient sea beast."),
    ("legendary", "Sunken King's Rod", 7, 5000, 23.0, 15.0, 2.0, 20, "Once wielded by a drowned ruler."),
    ("mythic", "Rod of the First Ocean", 8, 10000, 28.0, 20.0, 2.5, 25, "Said to predate the seas themselves."),
    ("divine", "Divine Rod of Poseidon", 9, 25000, 35.0, 25.0, 3.0, 30, "Blessed by Poseidon himself."),
    // Prestige tiers
    ("celestial", "Celestial Rod of the Tides", 10, 40000, 36.0, 26.0, 3.3, 35, "Channels cosmic currents."),
    ("voidcurrent", "Voidcurrent Rod", 11, 60000, 37.0, 27.0, 3.6, 40, "Draws from oceanic nothingness."),
    ("astral", "Astral Reef Rod", 12, 85000, 38.0, 28.0, 4.0, 45, "Half existing beyond reality."),
    ("oracle", "Oracle of the Deep Rod", 13, 160000, 40.0, 30.0, 4.8, 55, "Sees the future of the sea."),
    ("eclipse", "Eclipse Leviathan Rod", 14, 210000, 40.0, 31.0, 5.2, 60, "Empowered by celestial alignment."),
    ("eternal", "Eternal Sea Sovereign Rod", 15, 270000, 40.0, 32.0, 5.7, 65, "Absolute dominion over tides."),
    ("infinite", "Infinite Horizon Rod", 16, 340000, 40.0, 33.0, 6.2, 70, "No known limit."),
    ("primordial", "Primordial Sea Rod", 17, 420000, 40.0, 34.0, 6.8, 75, "Born with the first waves."),
    ("apex", "Apex Oceanlord Rod", 18, 520000, 40.0, 35.0, 7.5, 80, "Only legends may wield it."),
    ("mythos", "Mythos Tidebreaker Rod", 19, 650000, 40.0, 36.0, 8.2, 85, "Legends form with every cast."),
    ("omniscient", "Omniscient Rod of All Seas", 20, 800000, 40.0, 38.0, 9.0, 90, "Knows every depth and current."),
];

/// Builds the standard rod list, tier ascending.
pub fn standard_rods() -> Vec<FishingRod> {
    STANDARD_RODS
        .iter()
        .map(
            |&(id, name, tier, price, catch_rate_bonus, rare_bonus_chance, xp_multiplier, unlock_level, description)| {
                FishingRod {
                    id: id.to_string(),
                    name: name.to_string(),
                    tier,
                    price,
                    catch_rate_bonus,
                    rare_bonus_chance,
                    xp_multiplier,
                    unlock_level,
                    description: description.to_string(),
                }
            },
        )
        .collect()
}
