//! Last resort when no higher rule applies.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use super::*;

/// Greedy step toward the nearest soft wall when that step is acceptable, otherwise a random
/// acceptable move.
pub(super) fn fallback_move(ctx: &DecisionContext<'_>, rng: &mut ChaCha8Rng) -> Action {
    let pos = ctx.actor.pos;
    if let Some(wall) = nearest_soft_wall(ctx.grid(), pos) {
        let direction = greedy_direction(pos, wall);
        let next = pos.step(direction);
        if ctx.grid().is_passable(next) && is_acceptable_step(ctx, next) {
            return Action::Step(direction);
        }
    }
    random_step(ctx, rng)
}

/// Random move among acceptable neighbors. In imminent danger any passable neighbor will do;
/// otherwise the bot waits when nothing is acceptable.
pub(super) fn random_step(ctx: &DecisionContext<'_>, rng: &mut ChaCha8Rng) -> Action {
    let pos = ctx.actor.pos;
    let passable: Vec<Direction> = Direction::SEARCH_ORDER
        .into_iter()
        .filter(|dir| ctx.grid().is_passable(pos.step(*dir)))
        .collect();
    let acceptable: Vec<Direction> = passable
        .iter()
        .copied()
        .filter(|dir| is_acceptable_step(ctx, pos.step(*dir)))
        .collect();

    let choices = if !acceptable.is_empty() {
        acceptable
    } else if ctx.is_imminent(pos) {
        passable
    } else {
        Vec::new()
    };
    if choices.is_empty() {
        return Action::Wait;
    }
    let index = rng.next_u32() as usize % choices.len();
    Action::Step(choices[index])
}

/// Entering `next` must not end inside fire on arrival, and must not leave clear ground for
/// a tile a blast will reach.
fn is_acceptable_step(ctx: &DecisionContext<'_>, next: Pos) -> bool {
    if !ctx.travel_window().admits(ctx.hazard, next, 1) {
        return false;
    }
    !ctx.hazard.is_clear(ctx.actor.pos) || ctx.hazard.is_clear(next)
}

fn nearest_soft_wall(grid: &Grid, from: Pos) -> Option<Pos> {
    grid.positions()
        .filter(|pos| grid.tile_at(*pos) == Tile::SoftWall)
        .min_by_key(|pos| (from.manhattan(*pos), *pos))
}

/// Vertical when the row gap is strictly larger, horizontal otherwise.
fn greedy_direction(from: Pos, to: Pos) -> Direction {
    let d_row = to.row - from.row;
    let d_col = to.col - from.col;
    if d_row.abs() > d_col.abs() {
        if d_row > 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    } else if d_col > 0 {
        Direction::Right
    } else {
        Direction::Left
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn greedy_direction_prefers_the_longer_axis() {
        let from = Pos::new(5, 5);
        assert_eq!(greedy_direction(from, Pos::new(1, 4)), Direction::Up);
        assert_eq!(greedy_direction(from, Pos::new(7, 8)), Direction::Right);
        assert_eq!(greedy_direction(from, Pos::new(3, 3)), Direction::Left);
        assert_eq!(greedy_direction(from, Pos::new(9, 6)), Direction::Down);
    }

    #[test]
    fn unreachable_wall_still_draws_a_greedy_step() {
        let mut game = game_from_ascii(&[
            "#########", //
            "#...#...#",
            "#...#.+.#",
            "#########",
        ]);
        let bot = game.add_bot(Pos::new(2, 2));

        let decision = decide_for(&mut game, bot);

        assert_eq!(decision.rule, DecisionRule::Fallback);
        assert_eq!(decision.action, Action::Step(Direction::Right));
    }

    #[test]
    fn calm_bot_never_steps_into_a_forecast_blast() {
        let mut game = game_from_ascii(&[
            "#####", //
            "#...#",
            "#####",
        ]);
        let bot = game.add_bot(Pos::new(1, 1));
        let owner = game.add_human(Pos::new(1, 3));
        plant_at(&mut game, owner, Pos::new(1, 3), 2);

        let hazard = game.hazard_map();
        let actor = &game.state().actors[bot];
        let ctx = DecisionContext::new(game.state(), game.config(), &hazard, actor);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(random_step(&ctx, &mut rng), Action::Wait);
    }
}
