//! The cast transaction.
//!
//! `apply_cast` is pure: it takes a profile snapshot and returns the updated
//! profile plus the result to report. Persisting the new profile atomically is
//! the engine's job.

use super::resolver::CatchResolver;
use super::rolls::RollSource;
use super::types::{CastResult, CatchOutcome, CooldownStatus};
use crate::catalog::{Catalog, FishSpecies, FishingRod};
use crate::core::config::EngineConfig;
use crate::core::constants::MISS_MESSAGE;
use crate::error::GameError;
use crate::profile::{CatchRecord, PlayerProfile};
use crate::progression::XpCurve;
use chrono::{DateTime, Duration, Utc};

/// Whether `profile` may cast at `now`.
///
/// A profile that has never cast is always ready. A last cast stamped in the
/// future (clock skew) waits until that stamp plus the cooldown.
pub fn cooldown_status(
    profile: &PlayerProfile,
    cooldown: Duration,
    now: DateTime<Utc>,
) -> CooldownStatus {
    let Some(last) = profile.last_cast_at else {
        return CooldownStatus::ready();
    };

    let next_cast_at = last + cooldown;
    if now >= next_cast_at {
        return CooldownStatus::ready();
    }

    CooldownStatus {
        can_cast: false,
        remaining_ms: (next_cast_at - now).num_milliseconds(),
        next_cast_at: Some(next_cast_at),
    }
}

/// Looks up the profile's equipped rod. A rod the catalog does not know is a
/// configuration fault, not a player error.
pub fn equipped_rod<'a>(
    profile: &PlayerProfile,
    catalog: &'a Catalog,
) -> Result<&'a FishingRod, GameError> {
    catalog.rod_by_id(&profile.equipped_rod_id).ok_or_else(|| {
        GameError::Configuration(format!(
            "equipped rod {} of {} is not in the catalog",
            profile.equipped_rod_id, profile.wallet
        ))
    })
}

/// Runs one cast against a profile snapshot.
///
/// Fails with `CooldownActive` before drawing any roll, and with
/// `Configuration` if the equipped rod is unknown. On success the returned
/// profile has every counter, reward and timestamp applied together.
pub fn apply_cast(
    profile: &PlayerProfile,
    catalog: &Catalog,
    config: &EngineConfig,
    rolls: &mut impl RollSource,
    now: DateTime<Utc>,
) -> Result<(PlayerProfile, CastResult), GameError> {
    let status = cooldown_status(profile, config.cooldown(), now);
    if let Some(next_cast_at) = status.next_cast_at {
        return Err(GameError::CooldownActive {
            remaining_ms: status.remaining_ms,
            next_cast_at,
        });
    }

    let rod = equipped_rod(profile, catalog)?;
    let modifiers = rod.modifiers();
    let resolver = CatchResolver::new(catalog, config.base_success_rate);

    let mut next = profile.clone();
    next.last_cast_at = Some(now);
    next.total_casts = next.total_casts.saturating_add(1);

    let species = match resolver.resolve(&modifiers, rolls) {
        CatchOutcome::Miss => return Ok((next, miss_result())),
        CatchOutcome::Caught(species) => species,
    };

    let curve = XpCurve::from_config(config);
    let xp_gained = modifiers.scale_xp(species.xp_reward);
    let level_before = curve.level_from_total_xp(profile.xp);
    next.xp = profile.xp.saturating_add(xp_gained);
    let level_after = curve.level_from_total_xp(next.xp);
    next.level = level_after;

    let levels_gained = level_after.saturating_sub(level_before);
    let level_bonus = config.level_up_bonus.saturating_mul(levels_gained as u64);
    let currency_gained = species.currency_reward.saturating_add(level_bonus);
    next.balance = next.balance.saturating_add(currency_gained);

    let record = CatchRecord {
        species_id: species.id.clone(),
        species_name: species.name.clone(),
        rarity: species.rarity,
        caught_at: now,
        xp_awarded: xp_gained,
        currency_awarded: species.currency_reward,
        rod_id: rod.id.clone(),
    };
    next.catch_history.push(record.clone());
    next.unique_species.insert(species.id.clone());
    next.total_fish_caught = next.total_fish_caught.saturating_add(1);

    let level_up = levels_gained > 0;
    let result = CastResult {
        success: true,
        catch: Some(record),
        xp_gained,
        currency_gained,
        level_up,
        new_level: level_up.then_some(level_after),
        message: catch_message(species, level_up.then_some(level_after)),
    };
    Ok((next, result))
}

fn miss_result() -> CastResult {
    CastResult {
        success: false,
        catch: None,
        xp_gained: 0,
        currency_gained: 0,
        level_up: false,
        new_level: None,
        message: MISS_MESSAGE.to_string(),
    }
}

/// "You caught a rare Salmon!", with a level-up note when one happened.
pub fn catch_message(species: &FishSpecies, new_level: Option<u32>) -> String {
    let mut message = format!("You caught a {} {}!", species.rarity, species.name);
    if let Some(level) = new_level {
        message.push_str(&format!(" Level up! You are now level {}.", level));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishing::rolls::ScriptedRolls;
    use crate::profile::WalletId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn fresh_profile(config: &EngineConfig) -> PlayerProfile {
        PlayerProfile::new(
            WalletId::parse("0xabc123").unwrap(),
            "Tester".to_string(),
            config,
            now() - Duration::days(1),
        )
    }

    /// Success roll, then a species roll landing inside `species_id`'s band.
    fn rolls_for(catalog: &Catalog, species_id: &str) -> ScriptedRolls {
        let mut offset = 0.0;
        for s in catalog.all_species() {
            if s.id == species_id {
                return ScriptedRolls::new([0.0, offset + s.weight / 2.0]);
            }
            offset += s.weight;
        }
        panic!("unknown species {}", species_id);
    }

    #[test]
    fn test_never_cast_is_ready() {
        let config = EngineConfig::default();
        let profile = fresh_profile(&config);
        assert_eq!(
            cooldown_status(&profile, config.cooldown(), now()),
            CooldownStatus::ready()
        );
    }

    #[test]
    fn test_cooldown_remaining_and_next_cast() {
        let config = EngineConfig::default();
        let mut profile = fresh_profile(&config);
        profile.last_cast_at = Some(now() - Duration::minutes(4));

        let status = cooldown_status(&profile, config.cooldown(), now());
        assert!(!status.can_cast);
        assert_eq!(status.remaining_ms, 6 * 60 * 1000);
        assert_eq!(status.next_cast_at, Some(now() + Duration::minutes(6)));
    }

    #[test]
    fn test_cooldown_ends_exactly_at_boundary() {
        let config = EngineConfig::default();
        let mut profile = fresh_profile(&config);
        profile.last_cast_at = Some(now() - Duration::minutes(10));
        assert!(cooldown_status(&profile, config.cooldown(), now()).can_cast);

        profile.last_cast_at = Some(now() - Duration::minutes(10) + Duration::milliseconds(1));
        let status = cooldown_status(&profile, config.cooldown(), now());
        assert!(!status.can_cast);
        assert_eq!(status.remaining_ms, 1);
    }

    #[test]
    fn test_clock_skew_waits_past_future_stamp() {
        let config = EngineConfig::default();
        let mut profile = fresh_profile(&config);
        profile.last_cast_at = Some(now() + Duration::minutes(3));
        let status = cooldown_status(&profile, config.cooldown(), now());
        assert!(!status.can_cast);
        assert_eq!(status.remaining_ms, 13 * 60 * 1000);
        assert_eq!(status.next_cast_at, Some(now() + Duration::minutes(13)));
    }

    #[test]
    fn test_cast_on_cooldown_is_rejected_without_rolling() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        let mut profile = fresh_profile(&config);
        profile.last_cast_at = Some(now() - Duration::seconds(30));
        let mut rolls = ScriptedRolls::new([0.0, 0.0]);

        let err = apply_cast(&profile, &catalog, &config, &mut rolls, now()).unwrap_err();
        match err {
            GameError::CooldownActive {
                remaining_ms,
                next_cast_at,
            } => {
                assert_eq!(remaining_ms, 570_000);
                assert_eq!(next_cast_at, now() + Duration::seconds(570));
            }
            other => panic!("expected cooldown, got {:?}", other),
        }
        assert_eq!(rolls.remaining(), 2);
    }

    #[test]
    fn test_miss_touches_only_cast_bookkeeping() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        let profile = fresh_profile(&config);
        let mut rolls = ScriptedRolls::new([99.0]);

        let (next, result) = apply_cast(&profile, &catalog, &config, &mut rolls, now()).unwrap();
        assert!(!result.success);
        assert!(result.catch.is_none());
        assert_eq!(result.xp_gained, 0);
        assert_eq!(result.currency_gained, 0);
        assert_eq!(result.message, MISS_MESSAGE);

        let mut expected = profile.clone();
        expected.last_cast_at = Some(now());
        expected.total_casts = 1;
        assert_eq!(next, expected);
    }

    #[test]
    fn test_catch_applies_rewards() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        let profile = fresh_profile(&config);
        let mut rolls = rolls_for(&catalog, "sardine");

        let (next, result) = apply_cast(&profile, &catalog, &config, &mut rolls, now()).unwrap();
        assert!(result.success);
        assert_eq!(result.xp_gained, 15);
        assert_eq!(result.currency_gained, 3);
        assert!(!result.level_up);
        assert_eq!(result.new_level, None);
        assert_eq!(result.message, "You caught a common Sardine!");

        assert_eq!(next.xp, 15);
        assert_eq!(next.level, 1);
        assert_eq!(next.balance, 103);
        assert_eq!(next.total_casts, 1);
        assert_eq!(next.total_fish_caught, 1);
        assert!(next.has_caught("sardine"));
        assert_eq!(next.last_cast_at, Some(now()));

        let record = next.last_catch().unwrap();
        assert_eq!(record.species_id, "sardine");
        assert_eq!(record.rod_id, "starter");
        assert_eq!(record.caught_at, now());
        assert_eq!(Some(record), result.catch.as_ref());
    }

    #[test]
    fn test_level_up_grants_bonus_once() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        let profile = fresh_profile(&config);
        // Salmon: 100 XP, 20 currency; level 2 costs 100.
        let mut rolls = rolls_for(&catalog, "salmon");

        let (next, result) = apply_cast(&profile, &catalog, &config, &mut rolls, now()).unwrap();
        assert!(result.level_up);
        assert_eq!(result.new_level, Some(2));
        assert_eq!(result.currency_gained, 20 + 50);
        assert_eq!(next.balance, 100 + 70);
        assert_eq!(next.level, 2);
        assert!(result.message.ends_with("Level up! You are now level 2."));
        assert_eq!(next.last_catch().unwrap().currency_awarded, 20);
    }

    #[test]
    fn test_multi_level_jump_multiplies_bonus() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        let profile = fresh_profile(&config);
        // Leviathan: 2000 XP reaches level 6 (cumulative 1318, level 7 needs 2077).
        let mut rolls = rolls_for(&catalog, "leviathan");

        let (next, result) = apply_cast(&profile, &catalog, &config, &mut rolls, now()).unwrap();
        assert_eq!(next.level, 6);
        assert_eq!(result.new_level, Some(6));
        assert_eq!(result.currency_gained, 500 + 5 * 50);
    }

    #[test]
    fn test_rod_multiplier_scales_xp() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        let mut profile = fresh_profile(&config);
        profile.owned_rods.insert("basic".to_string());
        profile.equipped_rod_id = "basic".to_string();
        // Pike, 70 XP at x1.1.
        let basic = catalog.rod_by_id("basic").unwrap().modifiers();
        let resolver = CatchResolver::new(&catalog, config.base_success_rate);
        let mut offset = 0.0;
        for s in catalog.all_species() {
            if s.id == "pike" {
                break;
            }
            offset += CatchResolver::effective_weight(s, &basic);
        }
        assert_eq!(resolver.pick_species(&basic, offset + 1.0).id, "pike");
        let mut rolls = ScriptedRolls::new([0.0, offset + 1.0]);

        let (next, result) = apply_cast(&profile, &catalog, &config, &mut rolls, now()).unwrap();
        assert_eq!(result.xp_gained, 77);
        assert_eq!(next.last_catch().unwrap().rod_id, "basic");
    }

    #[test]
    fn test_unknown_equipped_rod_is_configuration_error() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        let mut profile = fresh_profile(&config);
        profile.equipped_rod_id = "ghost".to_string();
        let mut rolls = ScriptedRolls::new([0.0, 0.0]);

        let err = apply_cast(&profile, &catalog, &config, &mut rolls, now()).unwrap_err();
        assert!(matches!(err, GameError::Configuration(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_repeat_species_keeps_unique_set() {
        let catalog = Catalog::standard();
        let config = EngineConfig::without_cooldown();
        let profile = fresh_profile(&config);

        let (once, _) =
            apply_cast(&profile, &catalog, &config, &mut rolls_for(&catalog, "minnow"), now())
                .unwrap();
        let (twice, _) =
            apply_cast(&once, &catalog, &config, &mut rolls_for(&catalog, "minnow"), now())
                .unwrap();
        assert_eq!(twice.unique_species.len(), 1);
        assert_eq!(twice.catch_history.len(), 2);
        assert_eq!(twice.total_fish_caught, 2);
    }
}
