//! Catch economy simulator CLI.
//!
//! Run Monte Carlo casting sessions to check rod balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 100 runs x 1000 casts, starter rod
//!   cargo run --bin simulate -- --rod master -l 16    # Master rod at its unlock level
//!   cargo run --bin simulate -- --seed 42             # Reproducible run

use hookline::catalog::Catalog;
use hookline::core::EngineConfig;
use hookline::simulator::{run_simulation, SimConfig};
use std::env;
use std::process;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    let catalog = match &options.catalog_path {
        Some(path) => Catalog::load(path).unwrap_or_else(|e| fail(&format!("{}: {}", path, e))),
        None => Catalog::standard(),
    };
    let mut config = options.config;
    if let Some(path) = &options.engine_path {
        config.engine = EngineConfig::load(path).unwrap_or_else(|e| fail(&format!("{}: {}", path, e)));
    }
    if options.unlock_level {
        match catalog.rod_by_id(&config.rod_id) {
            Some(rod) => config.starting_level = rod.unlock_level,
            None => fail(&format!("unknown rod: {}", config.rod_id)),
        }
    }

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              HOOKLINE BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Casts per Run:  {}", config.casts);
    println!("  Rod:            {}", config.rod_id);
    println!("  Start Level:    {}", config.starting_level);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config, Arc::new(catalog)) {
        Ok(report) => report,
        Err(e) => fail(&e.to_string()),
    };

    println!("{}", report.to_text());

    if options.json {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(e) = std::fs::write(&filename, json) {
            fail(&format!("failed to write {}: {}", filename, e));
        }
        println!("JSON report saved to: {}", filename);
    }
}

struct Options {
    config: SimConfig,
    catalog_path: Option<String>,
    engine_path: Option<String>,
    unlock_level: bool,
    json: bool,
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        config: SimConfig::default(),
        catalog_path: None,
        engine_path: None,
        unlock_level: false,
        json: false,
    };
    let config = &mut options.config;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-c" | "--casts" => {
                if i + 1 < args.len() {
                    config.casts = args[i + 1].parse().unwrap_or(1_000);
                    i += 1;
                }
            }
            "-r" | "--rod" => {
                if i + 1 < args.len() {
                    config.rod_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "-l" | "--level" => {
                if i + 1 < args.len() {
                    config.starting_level = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--catalog" => {
                if i + 1 < args.len() {
                    options.catalog_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    options.engine_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--at-unlock" => {
                options.unlock_level = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--json" => {
                options.json = true;
            }
            "--quick" => {
                *config = SimConfig::quick(config.seed.unwrap_or(42));
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    options
}

fn fail(message: &str) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn print_help() {
    println!("Hookline Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of sessions (default: 100)");
    println!("    -c, --casts <N>     Casts per session (default: 1000)");
    println!("    -r, --rod <ID>      Rod to equip (default: starter)");
    println!("    -l, --level <L>     Starting level (default: 1)");
    println!("    --at-unlock         Start at the rod's unlock level");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --catalog <FILE>    Load species and rods from JSON");
    println!("    --config <FILE>     Load engine rules from JSON");
    println!("    -v, --verbose       Per-run output");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick seeded check (10 runs x 200 casts)");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                        # Default run");
    println!("    cargo run --bin simulate -- --rod expert --at-unlock");
    println!("    cargo run --bin simulate -- --seed 42 --json    # Reproducible, saved");
}
