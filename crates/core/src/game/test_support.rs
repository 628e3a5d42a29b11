//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating arena and bomb setup across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::state::{Bomb, Explosion};

/// Default tuning with power-up drops disabled so soft-wall tests stay deterministic.
pub(crate) fn quiet_config() -> SimConfig {
    SimConfig { power_up_drop_percent: 0, ..SimConfig::default() }
}

pub(crate) fn game_from_ascii(lines: &[&str]) -> Game {
    let grid = Grid::from_ascii(lines).expect("fixture grid must parse");
    Game::from_grid(7, quiet_config(), grid)
}

/// Places a bomb with a full fuse, bypassing allowance and tile checks.
pub(crate) fn plant_at(game: &mut Game, owner: ActorId, pos: Pos, blast_size: u32) -> BombId {
    let timer_ms = game.config.fuse_ms as i32;
    let state = &mut game.state;
    let id = state.bombs.insert(Bomb {
        id: BombId::default(),
        pos,
        owner,
        blast_size,
        timer_ms,
        alive: true,
    });
    state.bombs[id].id = id;
    state.grid.set_tile(pos, Tile::Bomb);
    state.bomb_index.insert(pos, id);
    if let Some(actor) = state.actors.get_mut(owner) {
        actor.bombs_placed += 1;
    }
    id
}

pub(crate) fn set_timer(game: &mut Game, bomb: BombId, timer_ms: i32) {
    game.state.bombs[bomb].timer_ms = timer_ms;
}

pub(crate) fn spawn_fire(game: &mut Game, pos: Pos) -> ExplosionId {
    let remaining_ms = game.config.explosion_ms as i32;
    let id = game.state.explosions.insert(Explosion {
        id: ExplosionId::default(),
        pos,
        arm: None,
        remaining_ms,
    });
    game.state.explosions[id].id = id;
    id
}

/// Positions of every live fragment, sorted and deduplicated.
pub(crate) fn fire_positions(game: &Game) -> Vec<Pos> {
    let mut positions: Vec<Pos> =
        game.state.explosions.values().map(|explosion| explosion.pos).collect();
    positions.sort();
    positions.dedup();
    positions
}

/// Runs one bot decision immediately and applies it.
pub(crate) fn decide_for(game: &mut Game, bot: ActorId) -> Decision {
    game.run_bot_decision(bot).expect("bot must be alive and have a brain")
}
