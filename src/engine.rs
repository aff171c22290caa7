//! The request-facing fishing engine.
//!
//! Every mutating operation follows the same shape: read a versioned profile,
//! compute the new profile with a pure transition, then commit it with
//! `compare_and_swap` on the version that was read. A request that loses the
//! race gets `GameError::Conflict` and nothing it computed is kept.

use crate::catalog::Catalog;
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::EngineConfig;
use crate::error::{GameError, Result, StoreError};
use crate::fishing::{self, CastResult, CooldownStatus, RollSource};
use crate::leaderboard::{self, LeaderboardEntry, LeaderboardSort};
use crate::profile::{validate_display_name, PlayerProfile, WalletId};
use crate::progression::{LevelProgress, XpCurve};
use crate::shop::{self, RodListing};
use crate::store::{ProfileStore, Versioned};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Fishing game operations over a profile store.
pub struct FishingEngine<S, C = SystemClock> {
    store: S,
    clock: C,
    catalog: Arc<Catalog>,
    config: EngineConfig,
    curve: XpCurve,
}

impl<S: ProfileStore> FishingEngine<S, SystemClock> {
    /// An engine on wall-clock time.
    pub fn with_system_clock(
        store: S,
        catalog: Arc<Catalog>,
        config: EngineConfig,
    ) -> Result<Self> {
        Self::new(store, SystemClock, catalog, config)
    }
}

impl<S: ProfileStore, C: Clock> FishingEngine<S, C> {
    /// Checks the configuration against itself and the catalog.
    ///
    /// The configured starter rod must be the catalog's free starter rod.
    pub fn new(store: S, clock: C, catalog: Arc<Catalog>, config: EngineConfig) -> Result<Self> {
        if let Err(e) = config.validate() {
            error!(error = %e, "rejecting engine configuration");
            return Err(GameError::Configuration(e.to_string()));
        }
        match catalog.rod_by_id(&config.starter_rod_id) {
            Some(rod) if rod.is_starter() => {}
            Some(rod) => {
                error!(rod = %rod.id, "configured starter rod is not free at level 1");
                return Err(GameError::Configuration(format!(
                    "starter rod {} must cost 0 and unlock at level 1",
                    rod.id
                )));
            }
            None => {
                error!(rod = %config.starter_rod_id, "configured starter rod is not in the catalog");
                return Err(GameError::Configuration(format!(
                    "starter rod {} is not in the catalog",
                    config.starter_rod_id
                )));
            }
        }

        let curve = XpCurve::from_config(&config);
        let derived_level = curve.level_from_total_xp(config.starting_xp);
        if derived_level != config.starting_level {
            warn!(
                starting_level = config.starting_level,
                starting_xp = config.starting_xp,
                derived_level,
                "starting_level disagrees with starting_xp; new players start at the derived level"
            );
        }
        Ok(Self {
            store,
            clock,
            catalog,
            config,
            curve,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn curve(&self) -> &XpCurve {
        &self.curve
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Creates a profile with starter defaults, or returns the existing one
    /// untouched. Without a name the truncated wallet address is used.
    pub fn register(&self, wallet: &str, display_name: Option<&str>) -> Result<PlayerProfile> {
        let wallet = WalletId::parse(wallet)?;
        if let Some(existing) = self.store.get(&wallet)? {
            return Ok(existing.value);
        }

        let name = match display_name {
            Some(name) => validate_display_name(name).map_err(GameError::InvalidDisplayName)?,
            None => wallet.truncated(),
        };
        let profile = PlayerProfile::new(wallet.clone(), name, &self.config, self.clock.now());

        match self.store.create(&wallet, profile) {
            Ok(created) => {
                info!(wallet = %wallet, name = %created.value.display_name, "registered player");
                Ok(created.value)
            }
            // Another request registered the same wallet first.
            Err(StoreError::AlreadyExists(_)) => Ok(self.load(&wallet)?.value),
            Err(e) => Err(e.into()),
        }
    }

    pub fn profile(&self, wallet: &str) -> Result<PlayerProfile> {
        let wallet = WalletId::parse(wallet)?;
        Ok(self.load(&wallet)?.value)
    }

    pub fn check_cooldown(&self, wallet: &str) -> Result<CooldownStatus> {
        let wallet = WalletId::parse(wallet)?;
        let current = self.load(&wallet)?;
        Ok(fishing::cooldown_status(
            &current.value,
            self.config.cooldown(),
            self.clock.now(),
        ))
    }

    /// Runs the cast transaction for `wallet`.
    pub fn attempt_cast(&self, wallet: &str, rolls: &mut impl RollSource) -> Result<CastResult> {
        let wallet = WalletId::parse(wallet)?;
        let current = self.load(&wallet)?;
        let now = self.clock.now();

        let (next, result) =
            match fishing::apply_cast(&current.value, &self.catalog, &self.config, rolls, now) {
                Ok(applied) => applied,
                Err(e) => {
                    self.log_rejection(&wallet, "cast", &e);
                    return Err(e);
                }
            };

        self.commit(&wallet, current.version, next)?;

        match &result.catch {
            Some(record) => info!(
                wallet = %wallet,
                rod = %record.rod_id,
                species = %record.species_id,
                rarity = %record.rarity,
                xp = result.xp_gained,
                currency = result.currency_gained,
                level_up = result.level_up,
                "cast landed a fish"
            ),
            None => info!(wallet = %wallet, "cast missed"),
        }
        Ok(result)
    }

    /// Buys a rod with the player's balance.
    pub fn purchase_rod(&self, wallet: &str, rod_id: &str) -> Result<PlayerProfile> {
        let wallet = WalletId::parse(wallet)?;
        let current = self.load(&wallet)?;

        let (next, price) = match shop::purchase(&current.value, &self.catalog, rod_id) {
            Ok(bought) => bought,
            Err(e) => {
                self.log_rejection(&wallet, "purchase", &e);
                return Err(e);
            }
        };

        let committed = self.commit(&wallet, current.version, next)?;
        info!(
            wallet = %wallet,
            rod = %rod_id,
            currency = price,
            balance = committed.balance,
            "purchased rod"
        );
        Ok(committed)
    }

    pub fn equip_rod(&self, wallet: &str, rod_id: &str) -> Result<PlayerProfile> {
        let wallet = WalletId::parse(wallet)?;
        let current = self.load(&wallet)?;

        let next = match shop::equip(&current.value, &self.catalog, rod_id) {
            Ok(next) => next,
            Err(e) => {
                self.log_rejection(&wallet, "equip", &e);
                return Err(e);
            }
        };

        let committed = self.commit(&wallet, current.version, next)?;
        info!(wallet = %wallet, rod = %rod_id, "equipped rod");
        Ok(committed)
    }

    pub fn set_display_name(&self, wallet: &str, name: &str) -> Result<PlayerProfile> {
        let wallet = WalletId::parse(wallet)?;
        let name = validate_display_name(name).map_err(GameError::InvalidDisplayName)?;
        let current = self.load(&wallet)?;

        let mut next = current.value.clone();
        next.display_name = name;
        let committed = self.commit(&wallet, current.version, next)?;
        info!(wallet = %wallet, name = %committed.display_name, "renamed player");
        Ok(committed)
    }

    /// Level, XP into the level and the next level's cost.
    pub fn progress(&self, wallet: &str) -> Result<LevelProgress> {
        let profile = self.profile(wallet)?;
        Ok(self.curve.progress(profile.xp))
    }

    /// The storefront as seen by `wallet`.
    pub fn rod_listings(&self, wallet: &str) -> Result<Vec<RodListing<'_>>> {
        let profile = self.profile(wallet)?;
        Ok(shop::listings(&profile, &self.catalog))
    }

    pub fn leaderboard(&self, sort: LeaderboardSort) -> Result<Vec<LeaderboardEntry>> {
        let profiles = self.store.all()?;
        Ok(leaderboard::rank(&profiles, sort))
    }

    pub fn rank_of(&self, wallet: &str, sort: LeaderboardSort) -> Result<Option<usize>> {
        let wallet = WalletId::parse(wallet)?;
        let profiles = self.store.all()?;
        Ok(leaderboard::rank_of(&profiles, &wallet, sort))
    }

    fn load(&self, wallet: &WalletId) -> Result<Versioned<PlayerProfile>> {
        self.store
            .get(wallet)?
            .ok_or_else(|| GameError::ProfileNotFound(wallet.to_string()))
    }

    fn commit(
        &self,
        wallet: &WalletId,
        expected_version: u64,
        profile: PlayerProfile,
    ) -> Result<PlayerProfile> {
        match self.store.compare_and_swap(wallet, expected_version, profile) {
            Ok(stored) => Ok(stored.value),
            Err(e) => {
                let err = GameError::from(e);
                if err.is_retryable() {
                    warn!(wallet = %wallet, version = expected_version, "lost concurrent update");
                } else {
                    error!(wallet = %wallet, error = %err, "failed to persist profile");
                }
                Err(err)
            }
        }
    }

    fn log_rejection(&self, wallet: &WalletId, action: &str, err: &GameError) {
        if err.is_internal() {
            error!(wallet = %wallet, action, error = %err, "request failed");
        } else {
            debug!(wallet = %wallet, action, error = %err, "request rejected");
        }
    }
}
