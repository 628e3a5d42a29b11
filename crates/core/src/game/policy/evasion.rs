//! Getting out of blast zones: emergency evasion and walking a route queued after planting.

use rand_chacha::ChaCha8Rng;

use super::*;

/// Moves toward the nearest tile that will still be safe on arrival, when the current tile is
/// about to ignite. Never returns `Wait` while any passable neighbor exists.
pub(super) fn evade(
    ctx: &DecisionContext<'_>,
    brain: &mut BotBrain,
    rng: &mut ChaCha8Rng,
) -> Option<Action> {
    let pos = ctx.actor.pos;
    if !ctx.is_imminent(pos) {
        return None;
    }
    brain.escape_route.clear();

    let threshold = ctx.config.evade_threshold_ms;
    let step_ms = ctx.step_ms();
    let horizon = |depth: u32| threshold.saturating_add(depth.saturating_mul(step_ms));
    let path = find_safe_path(ctx.grid(), ctx.hazard, pos, ctx.travel_window(), |tile, depth| {
        depth > 0 && ctx.hazard.is_safe_within(tile, horizon(depth))
    });
    match path.as_deref().and_then(first_step) {
        Some(action) => Some(action),
        None => Some(fallback::random_step(ctx, rng)),
    }
}

/// Next step of the route recorded when the bot last planted. The route is dropped as soon as
/// its next tile stops being walkable or safe.
pub(super) fn follow_escape_route(
    ctx: &DecisionContext<'_>,
    brain: &mut BotBrain,
) -> Option<Action> {
    let pos = ctx.actor.pos;
    while brain.escape_route.front() == Some(&pos) {
        brain.escape_route.pop_front();
    }
    let next = *brain.escape_route.front()?;
    let direction = pos.direction_to(next);
    let usable = direction.is_some()
        && ctx.grid().is_passable(next)
        && ctx.travel_window().admits(ctx.hazard, next, 1);
    let Some(direction) = direction.filter(|_| usable) else {
        brain.escape_route.clear();
        return None;
    };
    brain.escape_route.pop_front();
    Some(Action::Step(direction))
}
