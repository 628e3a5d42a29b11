//! Blast footprints and detonation resolution.
//! This module owns the wall/soft-wall/bomb blocking rule and the chain-reaction worklist.
//! It does not own bomb fuses or hazard forecasting.

use std::collections::VecDeque;

use rand_chacha::rand_core::Rng;
use tracing::debug;

use super::*;
use crate::state::Explosion;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlastTile {
    pub pos: Pos,
    /// `None` marks the center tile.
    pub arm: Option<Direction>,
}

/// Tiles a detonation at `center` reaches, read-only: center first, then each arm in
/// up/down/left/right order. An arm stops before a wall, and stops after a soft wall or bomb.
pub fn blast_footprint(grid: &Grid, center: Pos, blast_size: u32) -> Vec<BlastTile> {
    let mut tiles = vec![BlastTile { pos: center, arm: None }];
    for dir in Direction::BLAST_ORDER {
        for distance in 1..blast_size as i32 {
            let pos = center.offset(dir, distance);
            match grid.tile_at(pos) {
                Tile::Wall => break,
                Tile::SoftWall | Tile::Bomb => {
                    tiles.push(BlastTile { pos, arm: Some(dir) });
                    break;
                }
                Tile::Empty | Tile::PowerUp(_) => tiles.push(BlastTile { pos, arm: Some(dir) }),
            }
        }
    }
    tiles
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Detonation {
    /// Bombs in the order they detonated; the root first.
    pub bombs: Vec<BombId>,
    pub fragments: Vec<ExplosionId>,
    pub destroyed_soft_walls: Vec<Pos>,
}

impl Game {
    /// Detonates `root` and every bomb its blast chains into. A bomb that already
    /// detonated is skipped, so calling this twice is a no-op.
    pub fn detonate_bomb(&mut self, root: BombId) -> Detonation {
        let mut report = Detonation::default();
        let mut pending = VecDeque::from([root]);

        while let Some(bomb_id) = pending.pop_front() {
            let Some(bomb) = self.state.bombs.get_mut(bomb_id) else {
                continue;
            };
            if !bomb.alive {
                continue;
            }
            bomb.alive = false;
            let (center, blast_size, owner) = (bomb.pos, bomb.blast_size, bomb.owner);

            if self.state.bomb_index.get(&center) == Some(&bomb_id) {
                self.state.bomb_index.remove(&center);
            }
            self.state.grid.set_tile(center, Tile::Empty);
            if let Some(actor) = self.state.actors.get_mut(owner) {
                actor.bombs_placed = actor.bombs_placed.saturating_sub(1);
            }

            for tile in blast_footprint(&self.state.grid, center, blast_size) {
                match self.state.grid.tile_at(tile.pos) {
                    Tile::Bomb => {
                        if let Some(chained) = self.state.bomb_at(tile.pos) {
                            pending.push_back(chained);
                        }
                    }
                    Tile::SoftWall => report.destroyed_soft_walls.push(tile.pos),
                    Tile::Empty | Tile::PowerUp(_) | Tile::Wall => {}
                }
                self.state.grid.set_tile(tile.pos, Tile::Empty);
                let fragment = self.state.explosions.insert(Explosion {
                    id: ExplosionId::default(),
                    pos: tile.pos,
                    arm: tile.arm,
                    remaining_ms: i32::try_from(self.config.explosion_ms).unwrap_or(i32::MAX),
                });
                self.state.explosions[fragment].id = fragment;
                report.fragments.push(fragment);
            }

            let chained = bomb_id != root;
            debug!(?center, blast_size, chained, "bomb detonated");
            self.log.push(LogEvent::BombDetonated { bomb: bomb_id, pos: center, chained });
            report.bombs.push(bomb_id);
        }

        for pos in report.destroyed_soft_walls.clone() {
            self.log.push(LogEvent::SoftWallDestroyed { pos });
            self.roll_power_up_drop(pos);
        }
        report
    }

    fn roll_power_up_drop(&mut self, pos: Pos) {
        if self.config.power_up_drop_percent == 0 {
            return;
        }
        if self.rng.next_u32() % 100 >= self.config.power_up_drop_percent {
            return;
        }
        let kind = PowerUpKind::ALL[(self.rng.next_u32() as usize) % PowerUpKind::ALL.len()];
        self.state.grid.set_tile(pos, Tile::PowerUp(kind));
        self.log.push(LogEvent::PowerUpSpawned { pos, kind });
    }
}
