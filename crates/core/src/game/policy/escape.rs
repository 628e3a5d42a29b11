//! Plant vetting: a bot only plants where it can provably walk out of its own blast.

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PlantVeto {
    Cooldown,
    Allowance,
    Occupied,
    NoEscape,
}

/// Route from the bot's tile to safety assuming it plants there now, excluding the start.
///
/// The hypothetical bomb joins the chain graph, so an existing bomb that would set it off early
/// shortens the window. Planting costs one turn before the first move.
pub(super) fn plan_escape_after_plant(ctx: &DecisionContext<'_>) -> Option<Vec<Pos>> {
    let pos = ctx.actor.pos;
    let simulated =
        HazardMap::simulate_plant(ctx.state, pos, ctx.actor.blast_size, ctx.config.fuse_ms);
    let window = SafetyWindow::timed(ctx.step_ms(), 1);
    if !window.admits(&simulated, pos, 0) {
        return None;
    }
    let path = find_safe_path(ctx.grid(), &simulated, pos, window, |tile, depth| {
        depth > 0 && simulated.is_clear(tile)
    })?;
    Some(path[1..].to_vec())
}

/// Commits to planting when every precondition holds, recording the escape route and cooldown.
pub(super) fn try_plant(
    ctx: &DecisionContext<'_>,
    brain: &mut BotBrain,
) -> Result<Action, PlantVeto> {
    if brain.plant_cooldown > 0 {
        return Err(PlantVeto::Cooldown);
    }
    if !ctx.actor.has_bomb_available() {
        return Err(PlantVeto::Allowance);
    }
    if ctx.grid().tile_at(ctx.actor.pos) != Tile::Empty {
        return Err(PlantVeto::Occupied);
    }
    let route = plan_escape_after_plant(ctx).ok_or(PlantVeto::NoEscape)?;
    brain.escape_route = route.into();
    brain.plant_cooldown = ctx.config.plant_cooldown_decisions;
    Ok(Action::PlantBomb)
}
