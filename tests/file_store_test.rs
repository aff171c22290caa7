//! JSON file store tests
//!
//! The engine over `JsonFileStore`: state survives reopening, versions advance
//! on disk, and a shared store still serialises racing writers.

use chrono::{TimeZone, Utc};
use hookline::catalog::Catalog;
use hookline::core::{EngineConfig, FixedClock};
use hookline::error::GameError;
use hookline::fishing::ScriptedRolls;
use hookline::profile::WalletId;
use hookline::store::{JsonFileStore, ProfileStore};
use hookline::FishingEngine;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// A fresh directory removed when dropped.
struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let n = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "hookline_file_store_{}_{}",
            std::process::id(),
            n
        ));
        fs::remove_dir_all(&dir).ok();
        Self(dir)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.0).ok();
    }
}

fn open_engine(dir: &TempDir, config: EngineConfig) -> FishingEngine<JsonFileStore, FixedClock> {
    FishingEngine::new(
        JsonFileStore::open(&dir.0).unwrap(),
        FixedClock::new(Utc.with_ymd_and_hms(2024, 10, 10, 10, 0, 0).unwrap()),
        Arc::new(Catalog::standard()),
        config,
    )
    .unwrap()
}

#[test]
fn test_profile_survives_reopen() {
    let dir = TempDir::new();
    {
        let engine = open_engine(&dir, EngineConfig::default());
        engine.register("0xDiskFan", Some("Disk Fan")).unwrap();
        engine
            .attempt_cast("0xdiskfan", &mut ScriptedRolls::new([0.0, 1.0]))
            .unwrap();
    }

    let engine = open_engine(&dir, EngineConfig::default());
    let profile = engine.profile("0xDISKFAN").unwrap();
    assert_eq!(profile.display_name, "Disk Fan");
    assert_eq!(profile.total_casts, 1);
    assert_eq!(profile.xp, 10);
    assert_eq!(profile.catch_history.len(), 1);

    // The cooldown is persisted too.
    assert!(matches!(
        engine.attempt_cast("0xdiskfan", &mut ScriptedRolls::new([0.0, 1.0])),
        Err(GameError::CooldownActive { .. })
    ));

    let wallet = WalletId::parse("0xdiskfan").unwrap();
    assert_eq!(engine.store().get(&wallet).unwrap().unwrap().version, 2);
    assert!(dir.0.join("0xdiskfan.json").exists());
}

#[test]
fn test_leaderboard_reads_every_file() {
    let dir = TempDir::new();
    let engine = open_engine(&dir, EngineConfig::without_cooldown());
    for (wallet, casts) in [("0xone", 1), ("0xtwo", 3), ("0xthree", 2)] {
        engine.register(wallet, None).unwrap();
        for _ in 0..casts {
            engine
                .attempt_cast(wallet, &mut ScriptedRolls::new([0.0, 1.0]))
                .unwrap();
        }
    }

    let board = engine
        .leaderboard(hookline::leaderboard::LeaderboardSort::FishCaught)
        .unwrap();
    let order: Vec<&str> = board.iter().map(|e| e.wallet.as_str()).collect();
    assert_eq!(order, vec!["0xtwo", "0xthree", "0xone"]);
}

#[test]
fn test_shared_file_store_serialises_racing_casts() {
    let dir = TempDir::new();
    let engine = open_engine(&dir, EngineConfig::default());
    engine.register("0xracer", None).unwrap();

    let barrier = Barrier::new(4);
    let outcomes: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    engine.attempt_cast("0xracer", &mut ScriptedRolls::new([0.0, 1.0]))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    let profile = engine.profile("0xracer").unwrap();
    assert_eq!(profile.total_casts, 1);
}

#[test]
fn test_catalog_and_config_load_from_files() {
    let dir = TempDir::new();
    fs::create_dir_all(&dir.0).unwrap();

    let catalog_path = dir.0.join("catalog.json");
    let data = Catalog::standard().to_data();
    fs::write(&catalog_path, serde_json::to_string_pretty(&data).unwrap()).unwrap();
    let catalog = Catalog::load(&catalog_path).unwrap();
    assert_eq!(catalog.all_rods().len(), 20);

    let config_path = dir.0.join("engine.json");
    fs::write(&config_path, r#"{ "cooldown_ms": 5000, "level_up_bonus": 75 }"#).unwrap();
    let config = EngineConfig::load(&config_path).unwrap();
    assert_eq!(config.cooldown_ms, 5000);
    assert_eq!(config.level_up_bonus, 75);
    assert_eq!(config.base_success_rate, 70.0);

    fs::write(&config_path, r#"{ "xp_curve_scale": 0.9 }"#).unwrap();
    assert!(EngineConfig::load(&config_path).is_err());
}
