use hookline::catalog::{Catalog, FishRarity};
use hookline::core::{EngineConfig, LEADERBOARD_PAGE_SIZE};
use hookline::engine::FishingEngine;
use hookline::error::{format_wait, GameError};
use hookline::fishing::{CatchResolver, RngRolls};
use hookline::leaderboard::{self, LeaderboardSort};
use hookline::profile::PlayerProfile;
use hookline::store::{retry_on_conflict, JsonFileStore};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

/// Attempts per mutating command before a conflict is reported.
const CONFLICT_RETRIES: u32 = 3;

type Engine = FishingEngine<JsonFileStore>;

struct Options {
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    command: Vec<String>,
}

fn main() {
    // Command output goes to stdout; keep logs quiet unless RUST_LOG asks.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    let Some(name) = options.command.first().map(String::as_str) else {
        print_help();
        process::exit(1);
    };
    match name {
        "--help" | "-h" | "help" => {
            print_help();
            return;
        }
        "--version" | "-V" => {
            println!("hookline {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {}
    }

    let engine = build_engine(&options).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        process::exit(2);
    });

    if let Err(e) = run(&engine, name, &options.command[1..]) {
        if e.is_internal() {
            tracing::error!(error = %e, "command failed");
        }
        eprintln!("{}", e.public_message());
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        data_dir: None,
        config_path: None,
        catalog_path: None,
        command: Vec::new(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    options.data_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    options.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--catalog" => {
                if i + 1 < args.len() {
                    options.catalog_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            other => options.command.push(other.to_string()),
        }
        i += 1;
    }

    options
}

fn build_engine(options: &Options) -> Result<Engine, String> {
    let config = match &options.config_path {
        Some(path) => EngineConfig::load(path).map_err(|e| format!("{}: {}", path.display(), e))?,
        None => EngineConfig::default(),
    };
    let catalog = match &options.catalog_path {
        Some(path) => Catalog::load(path).map_err(|e| format!("{}: {}", path.display(), e))?,
        None => Catalog::standard(),
    };
    let data_dir = match &options.data_dir {
        Some(dir) => dir.clone(),
        None => JsonFileStore::default_dir().map_err(|e| e.to_string())?,
    };
    let store = JsonFileStore::open(&data_dir)
        .map_err(|e| format!("{}: {}", data_dir.display(), e))?;

    FishingEngine::with_system_clock(store, Arc::new(catalog), config).map_err(|e| e.to_string())
}

fn arg<'a>(args: &'a [String], index: usize, what: &str) -> &'a str {
    args.get(index)
        .map(String::as_str)
        .unwrap_or_else(|| usage_error(&format!("missing <{}>", what)))
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'hookline --help' for usage.");
    process::exit(1);
}

fn run(engine: &Engine, command: &str, args: &[String]) -> Result<(), GameError> {
    match command {
        "register" => {
            let wallet = arg(args, 0, "wallet");
            let name = args.get(1).map(String::as_str);
            let profile = engine.register(wallet, name)?;
            println!("Welcome, {}!", profile.display_name);
            print_profile(engine, &profile);
        }
        "cast" => {
            let wallet = arg(args, 0, "wallet");
            let mut rolls = RngRolls(rand::thread_rng());
            let result = retry_on_conflict(CONFLICT_RETRIES, || {
                engine.attempt_cast(wallet, &mut rolls)
            })?;
            println!("{}", result.message);
            if result.success {
                println!(
                    "  +{} XP, +{} HOOK",
                    result.xp_gained, result.currency_gained
                );
            }
        }
        "cooldown" => {
            let wallet = arg(args, 0, "wallet");
            let status = engine.check_cooldown(wallet)?;
            match status.next_cast_at {
                None => println!("Ready to cast."),
                Some(at) => println!(
                    "Next cast in {} (at {}).",
                    format_wait(status.remaining_ms),
                    at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
            }
        }
        "buy" => {
            let wallet = arg(args, 0, "wallet");
            let rod_id = arg(args, 1, "rod");
            let profile =
                retry_on_conflict(CONFLICT_RETRIES, || engine.purchase_rod(wallet, rod_id))?;
            println!("Purchased {}. Balance: {} HOOK", rod_id, profile.balance);
        }
        "equip" => {
            let wallet = arg(args, 0, "wallet");
            let rod_id = arg(args, 1, "rod");
            retry_on_conflict(CONFLICT_RETRIES, || engine.equip_rod(wallet, rod_id))?;
            println!("Equipped {}.", rod_id);
        }
        "rename" => {
            let wallet = arg(args, 0, "wallet");
            let name = arg(args, 1, "name");
            let profile =
                retry_on_conflict(CONFLICT_RETRIES, || engine.set_display_name(wallet, name))?;
            println!("Display name set to {}.", profile.display_name);
        }
        "profile" => {
            let wallet = arg(args, 0, "wallet");
            let profile = engine.profile(wallet)?;
            print_profile(engine, &profile);
        }
        "rods" => match args.first() {
            Some(wallet) => {
                for listing in engine.rod_listings(wallet)? {
                    let rod = listing.rod;
                    println!(
                        "  {:<12} T{:<2} {:<28} {:>7} HOOK  lvl {:>2}  [{}]",
                        rod.id,
                        rod.tier,
                        rod.name,
                        rod.price,
                        rod.unlock_level,
                        listing.status.label()
                    );
                }
            }
            None => {
                for rod in engine.catalog().all_rods() {
                    println!(
                        "  {:<12} T{:<2} {:<28} {:>7} HOOK  lvl {:>2}  +{}% catch  +{}% rare  x{} XP",
                        rod.id,
                        rod.tier,
                        rod.name,
                        rod.price,
                        rod.unlock_level,
                        rod.catch_rate_bonus,
                        rod.rare_bonus_chance,
                        rod.xp_multiplier
                    );
                }
            }
        },
        "odds" => {
            let rod_id = args
                .first()
                .map(String::as_str)
                .unwrap_or(engine.config().starter_rod_id.as_str());
            let rod = engine
                .catalog()
                .rod_by_id(rod_id)
                .ok_or_else(|| GameError::UnknownRod(rod_id.to_string()))?;
            let resolver = CatchResolver::new(engine.catalog(), engine.config().base_success_rate);
            let modifiers = rod.modifiers();
            println!(
                "{}: {:.1}% catch rate",
                rod.name,
                resolver.success_rate(&modifiers).min(100.0)
            );
            let chances = resolver.catch_chances(&modifiers);
            for rarity in FishRarity::ALL {
                let share: f64 = chances
                    .iter()
                    .filter(|(s, _)| s.rarity == rarity)
                    .map(|(_, p)| p)
                    .sum();
                println!("  {:<10} {:>7.3}% per cast", rarity.label(), share * 100.0);
            }
        }
        "leaderboard" => {
            let sort = match args.first() {
                Some(raw) => raw
                    .parse::<LeaderboardSort>()
                    .unwrap_or_else(|e| usage_error(&e)),
                None => LeaderboardSort::default(),
            };
            let page: usize = args
                .get(1)
                .and_then(|p| p.parse::<usize>().ok())
                .unwrap_or(1)
                .max(1);
            let entries = engine.leaderboard(sort)?;
            println!("Leaderboard by {} (page {})", sort, page);
            for entry in leaderboard::page(&entries, page - 1, LEADERBOARD_PAGE_SIZE) {
                println!(
                    "  #{:<4} {:<20} lvl {:>3}  {:>9} XP  {:>6} fish",
                    entry.rank, entry.display_name, entry.level, entry.xp, entry.total_fish_caught
                );
            }
        }
        other => usage_error(&format!("Unknown command: {}", other)),
    }
    Ok(())
}

fn print_profile(engine: &Engine, profile: &PlayerProfile) {
    let progress = engine.curve().progress(profile.xp);
    println!("{} ({})", profile.display_name, profile.wallet);
    println!(
        "  Level {}  ({}/{} XP to next)",
        profile.level, progress.xp_into_level, progress.xp_for_next_level
    );
    println!("  Balance: {} HOOK", profile.balance);
    println!(
        "  Rod: {}  (owns {})",
        profile.equipped_rod_id,
        profile.owned_rods.len()
    );
    println!(
        "  Casts: {}  Fish: {}  Species: {}/{}",
        profile.total_casts,
        profile.total_fish_caught,
        profile.unique_species.len(),
        engine.catalog().all_species().len()
    );
    if let Some(last) = profile.last_catch() {
        println!(
            "  Last catch: {} {} ({})",
            last.rarity,
            last.species_name,
            last.caught_at.format("%Y-%m-%d %H:%M")
        );
    }
}

fn print_help() {
    println!("Hookline - Fishing rewards engine\n");
    println!("Usage: hookline [--data-dir DIR] [--config FILE] [--catalog FILE] <command>\n");
    println!("Commands:");
    println!("  register <wallet> [name]     Create a player (no-op if it exists)");
    println!("  cast <wallet>                Cast your line");
    println!("  cooldown <wallet>            Time until the next cast");
    println!("  buy <wallet> <rod>           Purchase a rod");
    println!("  equip <wallet> <rod>         Equip an owned rod");
    println!("  rename <wallet> <name>       Change display name");
    println!("  profile <wallet>             Show player stats");
    println!("  rods [wallet]                List rods (with shop status for a wallet)");
    println!("  odds [rod]                   Catch chances per rarity for a rod");
    println!("  leaderboard [xp|level|fish] [page]");
    println!("  --version                    Show version information");
    println!("  --help                       Show this help message");
    println!("\nProfiles are stored under ~/.hookline unless --data-dir is given.");
}
