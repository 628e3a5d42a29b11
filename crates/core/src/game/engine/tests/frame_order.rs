use super::support::*;

#[test]
fn bomb_detonates_when_its_fuse_reaches_zero() {
    let (mut game, human, _) = corridor_with_sealed_bot();
    game.apply_player_command(PlayerCommand::PlantBomb);
    for _ in 0..4 {
        game.apply_player_command(PlayerCommand::Step(Direction::Right));
    }

    game.update(2999);
    assert!(game.state().explosions.is_empty());
    assert_eq!(game.state().actors[human].bombs_placed, 1);

    game.update(1);
    assert_eq!(fire_positions(&game), vec![Pos::new(1, 1), Pos::new(1, 2)]);
    assert!(game.state().bombs.is_empty(), "spent bombs leave the arena");
    assert_eq!(game.state().actors[human].bombs_placed, 0);
    assert_eq!(game.state().grid.tile_at(Pos::new(1, 1)), Tile::Empty);
}

#[test]
fn fragments_expire_after_their_lifetime() {
    let (mut game, _, _) = corridor_with_sealed_bot();
    spawn_fire(&mut game, Pos::new(1, 7));

    game.update(299);
    assert_eq!(fire_positions(&game), vec![Pos::new(1, 7)]);

    game.update(1);
    assert!(fire_positions(&game).is_empty());
}

#[test]
fn human_in_fire_loses_and_the_session_freezes() {
    let (mut game, human, _) = corridor_with_sealed_bot();
    spawn_fire(&mut game, Pos::new(1, 1));

    game.update(16);

    assert!(!game.state().actors[human].alive);
    assert_eq!(game.outcome(), Some(RunOutcome::Defeat));
    let frame = game.current_frame();
    game.update(16);
    assert_eq!(game.current_frame(), frame);
    assert_eq!(
        game.apply_player_command(PlayerCommand::Step(Direction::Right)),
        ActionOutcome::Ignored
    );
}

#[test]
fn simultaneous_deaths_count_as_defeat() {
    let (mut game, _, _) = corridor_with_sealed_bot();
    spawn_fire(&mut game, Pos::new(1, 1));
    spawn_fire(&mut game, Pos::new(3, 1));

    game.update(16);

    assert_eq!(game.outcome(), Some(RunOutcome::Defeat));
}

#[test]
fn last_bot_dying_is_a_victory() {
    let (mut game, _, bot) = corridor_with_sealed_bot();
    spawn_fire(&mut game, Pos::new(3, 1));

    game.update(16);

    assert!(!game.state().actors[bot].alive);
    assert_eq!(game.outcome(), Some(RunOutcome::Victory));
    assert!(matches!(
        game.log().last(),
        Some(LogEvent::MatchEnded { outcome: RunOutcome::Victory })
    ));
}

#[test]
fn session_without_bots_is_won_immediately() {
    let mut game = game_from_ascii(&["#####", "#...#", "#####"]);
    game.add_human(Pos::new(1, 1));

    game.update(16);

    assert_eq!(game.outcome(), Some(RunOutcome::Victory));
}

#[test]
fn bots_decide_once_per_interval_scaled_by_speed() {
    let (mut game, _, bot) = corridor_with_sealed_bot();
    let interval = game.config().decision_interval;

    for _ in 0..interval - 1 {
        game.update(16);
    }
    assert_eq!(game.brain(bot).and_then(|brain| brain.last_rule), None);
    game.update(16);
    assert!(game.brain(bot).and_then(|brain| brain.last_rule).is_some());

    game.state_mut().actors[bot].speed = 3;
    let before = game.log().len();
    for _ in 0..interval / 3 {
        game.update(16);
    }
    assert_eq!(game.brain(bot).map(|brain| brain.decision_timer), Some(interval as i32));
    assert_eq!(game.log().len(), before, "a sealed bot keeps the same rule");
}

#[test]
fn bot_picks_up_the_power_up_it_stands_on_before_deciding() {
    let (mut game, _, bot) = corridor_with_sealed_bot();
    game.state_mut().grid.set_tile(Pos::new(3, 1), Tile::PowerUp(PowerUpKind::BlastSize));

    decide_for(&mut game, bot);

    assert_eq!(game.state().actors[bot].blast_size, game.config().start_blast_size + 1);
    assert_eq!(game.state().grid.tile_at(Pos::new(3, 1)), Tile::Empty);
}

#[test]
fn session_remembers_the_latest_frame_duration() {
    let (mut game, _, _) = corridor_with_sealed_bot();
    assert_eq!(game.frame_ms(), game.config().nominal_frame_ms);

    game.update(33);
    game.update(50);

    assert_eq!(game.frame_ms(), 50);
}
