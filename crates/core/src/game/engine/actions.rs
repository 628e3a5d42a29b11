//! Actor actions shared by the human command path and bot decisions.

use tracing::debug;

use super::*;
use crate::error::PlantError;
use crate::state::Bomb;

impl Game {
    /// Applies one discrete human command. Commands after the match ended, or without a
    /// human, are ignored.
    pub fn apply_player_command(&mut self, command: PlayerCommand) -> ActionOutcome {
        if self.outcome.is_some() {
            return ActionOutcome::Ignored;
        }
        let Some(human) = self.state.human else {
            return ActionOutcome::Ignored;
        };
        match command {
            PlayerCommand::Step(direction) => self.step_actor(human, direction),
            PlayerCommand::PlantBomb => match self.plant_bomb(human) {
                Ok(bomb) => ActionOutcome::Planted(bomb),
                Err(error) => ActionOutcome::Refused(error),
            },
        }
    }

    /// Plants a bomb with a full fuse on the actor's tile.
    ///
    /// Refused when the actor is gone or dead, when every allowed bomb is already live, or
    /// when the tile is not empty floor.
    pub fn plant_bomb(&mut self, actor_id: ActorId) -> Result<BombId, PlantError> {
        let result = self.try_plant_bomb(actor_id);
        if let Err(reason) = result {
            debug!(%reason, "plant refused");
            self.log.push(LogEvent::PlantRefused { actor: actor_id, reason });
        }
        result
    }

    fn try_plant_bomb(&mut self, actor_id: ActorId) -> Result<BombId, PlantError> {
        let actor = self.state.actors.get(actor_id).ok_or(PlantError::ActorNotFound)?;
        if !actor.alive {
            return Err(PlantError::ActorDead);
        }
        if !actor.has_bomb_available() {
            return Err(PlantError::AllowanceExhausted {
                placed: actor.bombs_placed,
                allowance: actor.bomb_allowance,
            });
        }
        let pos = actor.pos;
        if self.state.grid.tile_at(pos) != Tile::Empty {
            return Err(PlantError::TileOccupied(pos));
        }

        let bomb = Bomb {
            id: BombId::default(),
            pos,
            owner: actor_id,
            blast_size: actor.blast_size,
            timer_ms: i32::try_from(self.config.fuse_ms).unwrap_or(i32::MAX),
            alive: true,
        };
        let id = self.state.bombs.insert(bomb);
        self.state.bombs[id].id = id;
        self.state.grid.set_tile(pos, Tile::Bomb);
        self.state.bomb_index.insert(pos, id);
        if let Some(actor) = self.state.actors.get_mut(actor_id) {
            actor.bombs_placed += 1;
        }
        debug!(?pos, "bomb planted");
        self.log.push(LogEvent::BombPlanted { bomb: id, owner: actor_id, pos });
        Ok(id)
    }

    /// Moves one tile when the destination is passable, then picks up any power-up there.
    /// Actors never block each other.
    pub fn step_actor(&mut self, actor_id: ActorId, direction: Direction) -> ActionOutcome {
        let Some(actor) = self.state.actors.get_mut(actor_id) else {
            return ActionOutcome::Ignored;
        };
        if !actor.alive {
            return ActionOutcome::Ignored;
        }
        let next = actor.pos.step(direction);
        if !self.state.grid.is_passable(next) {
            return ActionOutcome::Blocked;
        }
        actor.pos = next;
        self.collect_power_up(actor_id);
        ActionOutcome::Moved(next)
    }

    pub(super) fn collect_power_up(&mut self, actor_id: ActorId) {
        let Some(actor) = self.state.actors.get_mut(actor_id) else {
            return;
        };
        let Tile::PowerUp(kind) = self.state.grid.tile_at(actor.pos) else {
            return;
        };
        if !actor.alive {
            return;
        }
        actor.apply_power_up(kind, self.config.speed_cap);
        self.state.grid.set_tile(actor.pos, Tile::Empty);
        debug!(?kind, pos = ?actor.pos, "power-up collected");
        self.log.push(LogEvent::PowerUpCollected { actor: actor_id, kind });
    }

    pub(super) fn apply_bot_action(&mut self, bot: ActorId, action: Action) -> ActionOutcome {
        match action {
            Action::Wait => ActionOutcome::Idle,
            Action::Step(direction) => self.step_actor(bot, direction),
            Action::PlantBomb => match self.plant_bomb(bot) {
                Ok(bomb) => ActionOutcome::Planted(bomb),
                Err(error) => {
                    if let Some(brain) = self.brains.get_mut(bot) {
                        brain.escape_route.clear();
                    }
                    ActionOutcome::Refused(error)
                }
            },
        }
    }
}
