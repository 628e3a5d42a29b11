use std::collections::BTreeSet;

use anyhow::{Result, bail};
use arena_core::{Direction, Game, PlayerCommand, SimConfig, Tile};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5000)]
    frames: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn check_invariants(game: &Game) -> Result<()> {
    let state = game.state();
    for actor in state.actors.values() {
        let tile = state.grid.tile_at(actor.pos);
        if matches!(tile, Tile::Wall | Tile::SoftWall) {
            bail!("Invariant failed: actor inside {tile:?} at {:?}", actor.pos);
        }
        if actor.bombs_placed > actor.bomb_allowance {
            bail!(
                "Invariant failed: {} bombs placed over allowance {}",
                actor.bombs_placed,
                actor.bomb_allowance
            );
        }
    }
    let mut indexed = BTreeSet::new();
    for bomb in state.live_bombs() {
        if state.grid.tile_at(bomb.pos) != Tile::Bomb || state.bomb_at(bomb.pos) != Some(bomb.id) {
            bail!("Invariant failed: bomb at {:?} out of sync with its tile", bomb.pos);
        }
        indexed.insert(bomb.pos);
    }
    if state.grid.count_tiles(Tile::Bomb) != indexed.len() {
        bail!("Invariant failed: bomb tile without a live bomb");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for max {} frames...", args.seed, args.frames);
    let mut game = Game::new(args.seed, SimConfig::default(), 3);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let commands = [
        PlayerCommand::Step(Direction::Left),
        PlayerCommand::Step(Direction::Up),
        PlayerCommand::Step(Direction::Right),
        PlayerCommand::Step(Direction::Down),
        PlayerCommand::PlantBomb,
    ];

    for _ in 0..args.frames {
        if rng.next_u32() % 3 == 0 {
            game.apply_player_command(choose(&mut rng, &commands));
        }
        game.update(17);
        check_invariants(&game)?;
        if let Some(outcome) = game.outcome() {
            println!("Finished with outcome {:?} after {} frames", outcome, game.current_frame());
            break;
        }
    }

    println!("Fuzz complete. Snapshot hash {}", game.snapshot_hash());
    Ok(())
}
