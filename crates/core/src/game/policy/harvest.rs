//! Power-up collection.

use super::*;

/// Steps toward the safely reachable power-up with the most open surroundings; shorter paths
/// break ties, then row-major tile order.
pub(super) fn pursue_power_up(ctx: &DecisionContext<'_>) -> Option<Action> {
    let grid = ctx.grid();
    let mut best: Option<(usize, Vec<Pos>)> = None;
    for target in grid.positions() {
        if target == ctx.actor.pos || !matches!(grid.tile_at(target), Tile::PowerUp(_)) {
            continue;
        }
        let Some(path) = ctx.safe_path_to(target) else {
            continue;
        };
        let openness = grid.passable_neighbor_count(target);
        let better = match &best {
            None => true,
            Some((best_open, best_path)) => {
                openness > *best_open || (openness == *best_open && path.len() < best_path.len())
            }
        };
        if better {
            best = Some((openness, path));
        }
    }
    best.and_then(|(_, path)| first_step(&path))
}
