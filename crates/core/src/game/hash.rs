//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own session scheduling or bot decisions.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    /// Hash of everything that influences future frames: terrain, actors, bombs, fire and
    /// the frame counter. Two sessions with equal seeds and inputs agree on it every frame.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.frame);
        hasher.write_u8(match self.outcome {
            None => 0,
            Some(RunOutcome::Victory) => 1,
            Some(RunOutcome::Defeat) => 2,
        });

        for pos in self.state.grid.positions() {
            hasher.write_u8(tile_code(self.state.grid.tile_at(pos)));
        }
        for actor in self.state.actors.values() {
            hasher.write_i32(actor.pos.row);
            hasher.write_i32(actor.pos.col);
            hasher.write_u32(actor.bomb_allowance);
            hasher.write_u32(actor.bombs_placed);
            hasher.write_u32(actor.blast_size);
            hasher.write_u32(actor.speed);
            hasher.write_u8(u8::from(actor.alive));
        }
        for bomb in self.state.live_bombs() {
            hasher.write_i32(bomb.pos.row);
            hasher.write_i32(bomb.pos.col);
            hasher.write_u32(bomb.blast_size);
            hasher.write_i32(bomb.timer_ms);
        }
        for explosion in self.state.explosions.values() {
            hasher.write_i32(explosion.pos.row);
            hasher.write_i32(explosion.pos.col);
            hasher.write_i32(explosion.remaining_ms);
        }
        hasher.finish()
    }
}

fn tile_code(tile: Tile) -> u8 {
    match tile {
        Tile::Empty => 0,
        Tile::Wall => 1,
        Tile::SoftWall => 2,
        Tile::Bomb => 3,
        Tile::PowerUp(PowerUpKind::BombCount) => 4,
        Tile::PowerUp(PowerUpKind::BlastSize) => 5,
        Tile::PowerUp(PowerUpKind::Speed) => 6,
    }
}
