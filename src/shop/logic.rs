//! Pure shop transitions.
//!
//! Each function checks a profile snapshot against the catalog and returns the
//! updated copy; nothing is mutated on rejection.

use crate::catalog::{Catalog, FishingRod};
use crate::error::GameError;
use crate::profile::PlayerProfile;
use serde::Serialize;

/// Buys `rod_id`, spending its price.
///
/// Checks run in a fixed order: unknown rod, already owned, balance, then
/// level. Returns the updated profile and the price paid.
pub fn purchase(
    profile: &PlayerProfile,
    catalog: &Catalog,
    rod_id: &str,
) -> Result<(PlayerProfile, u64), GameError> {
    let rod = find_rod(catalog, rod_id)?;

    if profile.owns_rod(&rod.id) {
        return Err(GameError::AlreadyOwned(rod.id.clone()));
    }
    if profile.balance < rod.price {
        return Err(GameError::InsufficientFunds {
            price: rod.price,
            balance: profile.balance,
        });
    }
    if profile.level < rod.unlock_level {
        return Err(GameError::InsufficientLevel {
            required: rod.unlock_level,
            current: profile.level,
        });
    }

    let mut next = profile.clone();
    next.balance -= rod.price;
    next.owned_rods.insert(rod.id.clone());
    Ok((next, rod.price))
}

/// Switches the equipped rod. Only ownership matters; equipping the rod already
/// in hand is allowed and changes nothing.
pub fn equip(
    profile: &PlayerProfile,
    catalog: &Catalog,
    rod_id: &str,
) -> Result<PlayerProfile, GameError> {
    let rod = find_rod(catalog, rod_id)?;
    if !profile.owns_rod(&rod.id) {
        return Err(GameError::NotOwned(rod.id.clone()));
    }

    let mut next = profile.clone();
    next.equipped_rod_id = rod.id.clone();
    Ok(next)
}

fn find_rod<'a>(catalog: &'a Catalog, rod_id: &str) -> Result<&'a FishingRod, GameError> {
    catalog
        .rod_by_id(rod_id)
        .ok_or_else(|| GameError::UnknownRod(rod_id.to_string()))
}

/// Where a rod stands for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RodStatus {
    Equipped,
    Owned,
    /// Purchasable right now
    Available,
    TooExpensive,
    Locked,
}

impl RodStatus {
    pub fn label(self) -> &'static str {
        match self {
            RodStatus::Equipped => "equipped",
            RodStatus::Owned => "owned",
            RodStatus::Available => "available",
            RodStatus::TooExpensive => "too expensive",
            RodStatus::Locked => "locked",
        }
    }
}

/// One line of the storefront.
#[derive(Debug, Clone, Serialize)]
pub struct RodListing<'a> {
    pub rod: &'a FishingRod,
    pub status: RodStatus,
}

/// Every catalog rod, tier ascending, with its status for `profile`.
///
/// Level is checked before price so a locked rod never shows as merely expensive.
pub fn listings<'a>(profile: &PlayerProfile, catalog: &'a Catalog) -> Vec<RodListing<'a>> {
    catalog
        .all_rods()
        .iter()
        .map(|rod| {
            let status = if profile.equipped_rod_id == rod.id {
                RodStatus::Equipped
            } else if profile.owns_rod(&rod.id) {
                RodStatus::Owned
            } else if profile.level < rod.unlock_level {
                RodStatus::Locked
            } else if profile.balance < rod.price {
                RodStatus::TooExpensive
            } else {
                RodStatus::Available
            };
            RodListing { rod, status }
        })
        .collect()
}
