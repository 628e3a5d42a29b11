//! Regression test module wiring for engine behaviors.

mod frame_order;

/// Shared imports for engine regression tests.
mod support {
    pub(super) use super::super::*;
    pub(super) use crate::error::PlantError;
    pub(super) use crate::game::test_support::*;

    /// Human in a corridor plus a bot sealed behind walls so the match stays open.
    pub(super) fn corridor_with_sealed_bot() -> (Game, ActorId, ActorId) {
        let mut game = game_from_ascii(&[
            "#########", //
            "#.......#",
            "#########",
            "#.#######",
            "#########",
        ]);
        let human = game.add_human(Pos::new(1, 1));
        let bot = game.add_bot(Pos::new(3, 1));
        (game, human, bot)
    }
}
