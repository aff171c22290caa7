//! Simulation runner driving the real `FishingEngine`.
//!
//! Each run gets a fresh in-memory store and a pinned clock that is pushed past
//! the cooldown after every cast, so the simulated player never waits.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::catalog::{Catalog, FishRarity};
use crate::core::clock::FixedClock;
use crate::core::config::EngineConfig;
use crate::engine::FishingEngine;
use crate::error::{GameError, Result};
use crate::fishing::RngRolls;
use crate::profile::WalletId;
use crate::progression::XpCurve;
use crate::store::{MemoryStore, ProfileStore};
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

const SIM_WALLET: &str = "0xsimulator";

/// Run every configured session and aggregate a report.
pub fn run_simulation(config: &SimConfig, catalog: Arc<Catalog>) -> Result<SimReport> {
    let rod = catalog
        .rod_by_id(&config.rod_id)
        .ok_or_else(|| GameError::UnknownRod(config.rod_id.clone()))?
        .clone();
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, catalog.clone(), &mut rng)?;
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {} catches of {} casts, Level {} -> {}, {} XP, {} HOOK",
                run_idx + 1,
                config.num_runs,
                run.catches,
                run.casts,
                run.starting_level,
                run.final_level,
                run.xp_gained,
                run.currency_gained
            );
        }
        all_runs.push(run);
    }

    let expected_catch_rate =
        ((config.engine.base_success_rate + rod.catch_rate_bonus) / 100.0).clamp(0.0, 1.0);
    Ok(SimReport::from_runs(
        all_runs,
        &rod,
        config.casts,
        expected_catch_rate,
    ))
}

/// One session: register, hand over the rod, then cast `config.casts` times.
fn simulate_single_run(
    config: &SimConfig,
    catalog: Arc<Catalog>,
    rng: &mut ChaCha8Rng,
) -> Result<RunStats> {
    let curve = XpCurve::from_config(&config.engine);
    let starting_level = config.starting_level.max(1);
    let engine_config = EngineConfig {
        starting_level,
        starting_xp: curve.total_xp_for_level(starting_level),
        ..config.engine.clone()
    };
    let cooldown = engine_config.cooldown();

    let engine = FishingEngine::new(
        MemoryStore::new(),
        FixedClock::new(DateTime::<Utc>::default()),
        catalog,
        engine_config,
    )?;
    let start = engine.register(SIM_WALLET, Some("Simulator"))?;
    if start.equipped_rod_id != config.rod_id {
        give_rod(engine.store(), &start.wallet, &config.rod_id)?;
    }

    let mut run = RunStats {
        starting_level: start.level,
        final_level: start.level,
        ..RunStats::default()
    };
    let mut rolls = RngRolls(rng);
    for _ in 0..config.casts {
        let result = engine.attempt_cast(SIM_WALLET, &mut rolls)?;
        run.casts += 1;
        run.xp_gained += result.xp_gained;
        run.currency_gained += result.currency_gained;
        if let Some(record) = &result.catch {
            run.catches += 1;
            run.rarity_counts[rarity_slot(record.rarity)] += 1;
        }
        if result.level_up {
            run.level_ups += 1;
        }
        engine.clock().advance(cooldown);
    }

    let end = engine.profile(SIM_WALLET)?;
    run.final_level = end.level;
    run.unique_species = end.unique_species.len();
    Ok(run)
}

/// Puts the rod in the simulated player's hands without paying for it.
fn give_rod(store: &MemoryStore, wallet: &WalletId, rod_id: &str) -> Result<()> {
    let current = store
        .get(wallet)?
        .ok_or_else(|| GameError::ProfileNotFound(wallet.to_string()))?;
    let mut profile = current.value;
    profile.owned_rods.insert(rod_id.to_string());
    profile.equipped_rod_id = rod_id.to_string();
    store.compare_and_swap(wallet, current.version, profile)?;
    Ok(())
}

pub(super) fn rarity_slot(rarity: FishRarity) -> usize {
    rarity as usize
}
