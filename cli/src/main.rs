//! # Tilemerge CLI
//!
//! Runs headless simulations of the tilemerge engine with a configurable
//! policy and prints parseable summary statistics.

mod config;
mod policy;
mod stats;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use tilemerge_core::Session;

use config::Config;
use policy::{Player, Policy};
use stats::{Episode, Summary};

/// Offset between an episode's spawn seed and its player's seed.
const PLAYER_SEED_OFFSET: u64 = 1000;

#[derive(Parser, Debug)]
#[command(name = "tilemerge-cli")]
#[command(author, version, about = "Run tilemerge simulations in the terminal")]
struct Args {
    /// TOML file with simulation settings; flags below override it
    #[arg(short, long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// Number of episodes to run
    #[arg(short, long)]
    episodes: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum steps per episode (0 = unlimited)
    #[arg(short, long)]
    max_steps: Option<u32>,

    /// Move selection policy
    #[arg(short, long, value_enum)]
    policy: Option<Policy>,

    /// Side length of the grid
    #[arg(long)]
    size: Option<usize>,

    /// Show the grid after each move
    #[arg(long)]
    verbose: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn resolve(&self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => {
                Config::from_toml(path).with_context(|| format!("loading {}", path.display()))?
            }
            None => Config::default(),
        };
        if let Some(episodes) = self.episodes {
            cfg.episodes = episodes;
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some(max_steps) = self.max_steps {
            cfg.max_steps = max_steps;
        }
        if let Some(policy) = self.policy {
            cfg.policy = policy;
        }
        if let Some(size) = self.size {
            cfg.grid_size = size;
        }
        cfg.verbose |= self.verbose;
        cfg.validate().context("invalid settings")?;
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .init();

    let cfg = args.resolve()?;
    info!(
        "running {} episodes (policy={:?}, seed={}, size={})",
        cfg.episodes, cfg.policy, cfg.seed, cfg.grid_size
    );

    let mut episodes = Vec::with_capacity(cfg.episodes as usize);
    for index in 0..cfg.episodes {
        let episode = run_episode(&cfg, index)?;
        debug!(
            "episode {}: score={} max_tile={} steps={}",
            index + 1,
            episode.score,
            episode.max_tile,
            episode.steps
        );
        episodes.push(episode);
    }

    let Some(summary) = Summary::from_episodes(&episodes) else {
        bail!("no episodes were run");
    };

    println!("=== Simulation Results ===");
    println!("episodes={}", summary.episodes);
    println!("policy={:?}", cfg.policy);
    println!("seed={}", cfg.seed);
    println!("grid_size={}", cfg.grid_size);
    println!("max_steps={}", cfg.max_steps);
    print!("{summary}");
    Ok(())
}

/// Play one game to completion or to the step cap.
fn run_episode(cfg: &Config, index: u32) -> Result<Episode> {
    let seed = cfg.seed.wrapping_add(u64::from(index));
    let mut session = Session::with_size(cfg.grid_size, seed)
        .with_context(|| format!("starting episode {}", index + 1))?;
    let mut player = Player::new(cfg.policy, seed.wrapping_add(PLAYER_SEED_OFFSET));
    let mut steps = 0;

    while !session.is_done() && (cfg.max_steps == 0 || steps < cfg.max_steps) {
        let Some(action) = player.choose(session.grid()) else {
            break;
        };
        let result = session.step(action);
        steps += 1;

        if cfg.verbose {
            println!("Episode {} Step {}: {}", index + 1, steps, action);
            if result.reward > 0 {
                println!("  +{} points!", result.reward);
            }
            print!("{session}");
        }
    }

    if cfg.verbose {
        println!(
            "Episode {}: Score={}, MaxTile={}, Steps={}",
            index + 1,
            session.score(),
            session.max_tile(),
            steps
        );
    }

    Ok(Episode {
        score: session.score(),
        max_tile: session.max_tile(),
        steps,
    })
}
