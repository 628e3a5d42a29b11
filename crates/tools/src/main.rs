use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arena_core::{ActorKind, Game, Pos, RunOutcome, SimConfig};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs one seeded match with an idle human and reports how it ended.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of bots, at most three
    #[arg(short, long, default_value_t = 3)]
    bots: usize,
    #[arg(short, long, default_value_t = 3600)]
    frames: u32,
    /// Milliseconds per simulated frame
    #[arg(long, default_value_t = 17)]
    frame_ms: u32,
    /// Optional TOML file overriding simulation constants
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ActorSummary {
    kind: ActorKind,
    pos: Pos,
    alive: bool,
    blast_size: u32,
    bomb_allowance: u32,
    speed: u32,
}

#[derive(Debug, Serialize)]
struct MatchSummary {
    seed: u64,
    frames: u64,
    outcome: Option<RunOutcome>,
    actors: Vec<ActorSummary>,
    events: usize,
    snapshot_hash: u64,
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    SimConfig::from_toml_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

fn run_match(
    seed: u64,
    bots: usize,
    frames: u32,
    frame_ms: u32,
    config: SimConfig,
) -> MatchSummary {
    let mut game = Game::new(seed, config, bots);
    for _ in 0..frames {
        game.update(frame_ms);
        if game.outcome().is_some() {
            break;
        }
    }
    let actors = game
        .state()
        .actors
        .values()
        .map(|actor| ActorSummary {
            kind: actor.kind,
            pos: actor.pos,
            alive: actor.alive,
            blast_size: actor.blast_size,
            bomb_allowance: actor.bomb_allowance,
            speed: actor.speed,
        })
        .collect();
    MatchSummary {
        seed,
        frames: game.current_frame(),
        outcome: game.outcome(),
        actors,
        events: game.log().len(),
        snapshot_hash: game.snapshot_hash(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    info!(seed = args.seed, bots = args.bots, "starting match");
    let summary = run_match(args.seed, args.bots, args.frames, args.frame_ms, config);

    if args.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to encode summary")?;
        println!("{json}");
        return Ok(());
    }

    println!("Match complete.");
    println!("Frames: {}", summary.frames);
    println!("Outcome: {:?}", summary.outcome);
    for actor in &summary.actors {
        let status = if actor.alive { "alive" } else { "dead" };
        println!(
            "{:?} at ({}, {}) {status}, blast {}, bombs {}, speed {}",
            actor.kind,
            actor.pos.row,
            actor.pos.col,
            actor.blast_size,
            actor.bomb_allowance,
            actor.speed
        );
    }
    println!("Events: {}", summary.events);
    println!("Snapshot Hash: {}", summary.snapshot_hash);
    Ok(())
}
