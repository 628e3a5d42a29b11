//! Per-tick hazard forecasting.
//! Effective detonation times are relaxed to a fixed point over the bomb chain graph, then
//! projected onto tiles as "milliseconds until lethal". The map is rebuilt from scratch every
//! time it is needed and never mutated afterwards.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use super::*;

/// Minimal description of a bomb for forecasting; `id` is `None` for hypothetical bombs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BombFuse {
    pub id: Option<BombId>,
    pub pos: Pos,
    pub blast_size: u32,
    pub fuse_ms: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HazardMap {
    tiles: BTreeMap<Pos, u32>,
    effective: BTreeMap<BombId, u32>,
}

impl HazardMap {
    pub fn for_state(state: &GameState) -> Self {
        let fuses = live_fuses(state);
        let fire: Vec<Pos> = state.explosions.values().map(|explosion| explosion.pos).collect();
        Self::build(&state.grid, &fuses, &fire)
    }

    /// Forecast for the current state plus a hypothetical bomb planted at `pos`.
    pub fn simulate_plant(state: &GameState, pos: Pos, blast_size: u32, fuse_ms: u32) -> Self {
        let mut grid = state.grid.clone();
        grid.set_tile(pos, Tile::Bomb);
        let mut fuses = live_fuses(state);
        fuses.push(BombFuse { id: None, pos, blast_size, fuse_ms });
        let fire: Vec<Pos> = state.explosions.values().map(|explosion| explosion.pos).collect();
        Self::build(&grid, &fuses, &fire)
    }

    /// `fire` tiles are already lethal and are recorded with time zero.
    pub fn build(grid: &Grid, fuses: &[BombFuse], fire: &[Pos]) -> Self {
        let reach: Vec<BTreeSet<Pos>> = fuses
            .iter()
            .map(|fuse| {
                blast_footprint(grid, fuse.pos, fuse.blast_size)
                    .into_iter()
                    .map(|tile| tile.pos)
                    .collect()
            })
            .collect();
        let effective = relax_chain_times(fuses, &reach);

        let mut tiles = BTreeMap::new();
        for (index, covered) in reach.iter().enumerate() {
            for pos in covered {
                record_min(&mut tiles, *pos, effective[index]);
            }
        }
        for pos in fire {
            record_min(&mut tiles, *pos, 0);
        }

        let effective = fuses
            .iter()
            .zip(&effective)
            .filter_map(|(fuse, time)| fuse.id.map(|id| (id, *time)))
            .collect();
        Self { tiles, effective }
    }

    /// Milliseconds until `pos` becomes lethal, or `None` when no blast reaches it.
    pub fn time_at(&self, pos: Pos) -> Option<u32> {
        self.tiles.get(&pos).copied()
    }

    pub fn is_safe_within(&self, pos: Pos, horizon_ms: u32) -> bool {
        self.time_at(pos).is_none_or(|time| time > horizon_ms)
    }

    pub fn is_clear(&self, pos: Pos) -> bool {
        self.time_at(pos).is_none()
    }

    /// Detonation time of a live bomb after chain reactions are accounted for.
    pub fn effective_time(&self, bomb: BombId) -> Option<u32> {
        self.effective.get(&bomb).copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, u32)> + '_ {
        self.tiles.iter().map(|(pos, time)| (*pos, *time))
    }
}

fn live_fuses(state: &GameState) -> Vec<BombFuse> {
    state
        .live_bombs()
        .map(|bomb| BombFuse {
            id: Some(bomb.id),
            pos: bomb.pos,
            blast_size: bomb.blast_size,
            fuse_ms: bomb.timer_ms.max(0) as u32,
        })
        .collect()
}

/// Lowers every bomb's time to that of any earlier bomb whose blast reaches it, until a full
/// pass changes nothing. Times only decrease and are bounded by zero, so this terminates.
fn relax_chain_times(fuses: &[BombFuse], reach: &[BTreeSet<Pos>]) -> Vec<u32> {
    let mut effective: Vec<u32> = fuses.iter().map(|fuse| fuse.fuse_ms).collect();
    let mut passes = 0_u32;
    loop {
        let mut changed = false;
        for source in 0..fuses.len() {
            for target in 0..fuses.len() {
                if source == target || effective[source] >= effective[target] {
                    continue;
                }
                if reach[source].contains(&fuses[target].pos) {
                    effective[target] = effective[source];
                    changed = true;
                }
            }
        }
        passes += 1;
        if !changed {
            break;
        }
    }
    trace!(bombs = fuses.len(), passes, "chain times relaxed");
    effective
}

fn record_min(tiles: &mut BTreeMap<Pos, u32>, pos: Pos, time: u32) {
    tiles.entry(pos).and_modify(|current| *current = (*current).min(time)).or_insert(time);
}
