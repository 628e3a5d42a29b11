//! Soft-wall demolition: pick a wall, walk next to it, plant.

use std::collections::BTreeMap;

use super::*;
use super::escape::{PlantVeto, try_plant};

pub(super) fn demolish_terrain(ctx: &DecisionContext<'_>, brain: &mut BotBrain) -> Option<Action> {
    let pos = ctx.actor.pos;
    let distances = reachable_distances(ctx.grid(), ctx.hazard, pos, ctx.travel_window());

    let target = match brain.demolition_target {
        Some(target) if is_viable(ctx, &distances, target) => target,
        _ => {
            brain.demolition_target = select_target(ctx, &distances);
            brain.demolition_target?
        }
    };

    if pos.manhattan(target) == 1 {
        match try_plant(ctx, brain) {
            Ok(action) => return Some(action),
            // Another side of the wall may still have a way out.
            Err(PlantVeto::NoEscape) => {}
            Err(_) if ctx.hazard.is_clear(pos) => return Some(Action::Wait),
            Err(_) => return None,
        }
    }
    approach(ctx, target)
}

/// A remembered target stays valid while it is still a soft wall with a reachable side.
fn is_viable(ctx: &DecisionContext<'_>, distances: &BTreeMap<Pos, u32>, target: Pos) -> bool {
    ctx.grid().tile_at(target) == Tile::SoftWall
        && neighbors(target).iter().any(|side| distances.contains_key(side))
}

/// Soft wall whose nearest reachable side is closest; ties go to the row-major first wall.
fn select_target(ctx: &DecisionContext<'_>, distances: &BTreeMap<Pos, u32>) -> Option<Pos> {
    let grid = ctx.grid();
    grid.positions()
        .filter(|pos| grid.tile_at(*pos) == Tile::SoftWall)
        .filter_map(|wall| {
            neighbors(wall)
                .iter()
                .filter_map(|side| distances.get(side))
                .min()
                .map(|distance| (*distance, wall))
        })
        .min()
        .map(|(_, wall)| wall)
}

/// Steps toward a clear side of `target`, preferring sides with at least two open neighbors.
fn approach(ctx: &DecisionContext<'_>, target: Pos) -> Option<Action> {
    let pos = ctx.actor.pos;
    let grid = ctx.grid();
    let mut best: Option<(bool, Vec<Pos>)> = None;
    for side in neighbors(target) {
        if side == pos || !grid.is_passable(side) {
            continue;
        }
        let Some(path) = ctx.safe_path_to(side) else {
            continue;
        };
        let cramped = grid.passable_neighbor_count(side) < 2;
        let better = match &best {
            None => true,
            Some((best_cramped, best_path)) => {
                (!cramped && *best_cramped)
                    || (cramped == *best_cramped && path.len() < best_path.len())
            }
        };
        if better {
            best = Some((cramped, path));
        }
    }
    best.and_then(|(_, path)| first_step(&path))
}
