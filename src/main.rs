//! gridlife CLI - run a universe headless and watch it evolve.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use gridlife::{Grid, Seed};

fn default_fill() -> f64 {
    0.3
}

/// Run parameters for the headless demo.
#[derive(Debug, Serialize, Deserialize)]
struct RunConfig {
    /// Grid width in cells.
    width: u32,
    /// Grid height in cells.
    height: u32,
    /// Fraction of cells alive at generation zero.
    #[serde(default = "default_fill")]
    fill: f64,
    /// Fixed RNG seed; omit for a different universe every run.
    #[serde(default)]
    rng_seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: 48,
            height: 24,
            fill: default_fill(),
            rng_seed: None,
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--help" {
        eprintln!("Usage: {} [config.json] [generations]", args[0]);
        eprintln!();
        eprintln!("Run a Game of Life universe headless and print its evolution.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to run configuration file (optional)");
        eprintln!("  generations  Number of generations (default: 100)");
        eprintln!();
        eprintln!("Example configuration is printed with --example.");
        std::process::exit(1);
    }

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    let (config, generations) = parse_args(&args);

    let num_cells = config.width as usize * config.height as usize;
    let alive_count = (num_cells as f64 * config.fill).round() as usize;

    let seed = match config.rng_seed {
        Some(rng_seed) => Seed::random_with(
            &mut StdRng::seed_from_u64(rng_seed),
            alive_count,
            num_cells as u32,
        ),
        None => Seed::random(alive_count, num_cells as u32),
    }
    .unwrap_or_else(|e| {
        eprintln!("Error generating seed: {}", e);
        std::process::exit(1);
    });

    let mut grid = Grid::new(config.width, config.height, &seed).unwrap_or_else(|e| {
        eprintln!("Error building grid: {}", e);
        std::process::exit(1);
    });

    println!("Game of Life");
    println!("============");
    println!("Grid: {}x{}", config.width, config.height);
    println!("Alive at start: {} / {}", seed.len(), num_cells);
    println!("Generations: {}", generations);
    println!();

    let start = Instant::now();
    let mut total_changes: u64 = 0;

    for i in 0..generations {
        let changes = grid.advance().len();
        total_changes += changes as u64;

        // Print progress every 10%
        if (i + 1) % (generations / 10).max(1) == 0 {
            let elapsed = start.elapsed().as_secs_f32();
            let steps_per_sec = (i + 1) as f32 / elapsed;
            println!(
                "  Generation {}/{}: {} changed, {} alive, {:.1} steps/s",
                i + 1,
                generations,
                changes,
                grid.alive_indexes().len(),
                steps_per_sec
            );
        }
    }

    let elapsed = start.elapsed();

    println!();
    println!("Final state:");
    println!("  Alive cells: {}", grid.alive_indexes().len());
    println!(
        "  Changed cells: {} total, {:.1} per generation",
        total_changes,
        total_changes as f64 / generations.max(1) as f64
    );
    println!(
        "Time: {:.2}s ({:.1} steps/s)",
        elapsed.as_secs_f32(),
        generations as f32 / elapsed.as_secs_f32()
    );

    if config.width <= 80 && config.height <= 40 {
        println!();
        println!("{}", grid);
    }
}

fn parse_args(args: &[String]) -> (RunConfig, u64) {
    let mut config = RunConfig::default();
    let mut generations = 100;

    let mut positional = args.iter().skip(1);
    if let Some(first) = positional.next() {
        if first.ends_with(".json") {
            let config_str = fs::read_to_string(PathBuf::from(first)).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                std::process::exit(1);
            });
            config = serde_json::from_str(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                std::process::exit(1);
            });
            if let Some(second) = positional.next() {
                generations = second.parse().unwrap_or(100);
            }
        } else {
            generations = first.parse().unwrap_or(100);
        }
    }

    (config, generations)
}

fn print_example_config() {
    let config = RunConfig::default();

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
