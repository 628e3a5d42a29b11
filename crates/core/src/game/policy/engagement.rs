//! Pressure on the human: plant when adjacent, otherwise take the approach tile that leaves
//! the opponent the fewest ways out.

use super::*;
use super::escape::try_plant;

pub(super) fn engage_opponent(
    ctx: &DecisionContext<'_>,
    brain: &mut BotBrain,
) -> Option<Action> {
    let opponent = ctx.state.human().filter(|human| human.alive)?;
    if ctx.actor.pos.manhattan(opponent.pos) == 1 {
        // Refusal falls through to demolition.
        return try_plant(ctx, brain).ok();
    }
    best_approach(ctx, opponent.pos).and_then(|(_, path)| first_step(&path))
}

/// Tile next to `opponent` that leaves it the fewest clear exits, with the path reaching it.
/// Equal scores go to the shorter path, then to search order.
fn best_approach(ctx: &DecisionContext<'_>, opponent: Pos) -> Option<(Pos, Vec<Pos>)> {
    let pos = ctx.actor.pos;
    let grid = ctx.grid();
    let opponent_exits = safe_exits(ctx, opponent);

    let mut best: Option<(usize, Pos, Vec<Pos>)> = None;
    for candidate in neighbors(opponent) {
        if candidate == pos || !grid.is_passable(candidate) {
            continue;
        }
        // Only the arrival has to be survivable; a later blast may still cover the tile.
        let Some(path) =
            find_safe_path(grid, ctx.hazard, pos, ctx.travel_window(), |tile, _| tile == candidate)
        else {
            continue;
        };
        let remaining = opponent_exits.len() - usize::from(opponent_exits.contains(&candidate));
        let better = match &best {
            None => true,
            Some((best_remaining, _, best_path)) => {
                remaining < *best_remaining
                    || (remaining == *best_remaining && path.len() < best_path.len())
            }
        };
        if better {
            best = Some((remaining, candidate, path));
        }
    }
    best.map(|(_, candidate, path)| (candidate, path))
}

/// Passable neighbors of `pos` that no blast reaches.
fn safe_exits(ctx: &DecisionContext<'_>, pos: Pos) -> Vec<Pos> {
    neighbors(pos)
        .into_iter()
        .filter(|tile| ctx.grid().is_passable(*tile) && ctx.hazard.is_clear(*tile))
        .collect()
}
