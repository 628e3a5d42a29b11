//! Game session: owns the grid, entity arenas, bot brains and the seeded RNG.
//! Every query and decision receives this state explicitly; nothing is ambient.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SecondaryMap;

use crate::config::SimConfig;
use crate::mapgen;
use crate::state::{Actor, GameState, Grid};
use crate::types::*;

mod blast;
mod engine;
mod hash;
mod hazard;
mod pathfinding;
mod policy;

#[cfg(test)]
mod test_support;

pub use blast::{BlastTile, Detonation, blast_footprint};
pub use hazard::{BombFuse, HazardMap};
pub use pathfinding::{SafetyWindow, find_path, find_safe_path, neighbors, reachable_distances};
pub use policy::{BotBrain, Decision, DecisionContext, decide};

pub struct Game {
    seed: u64,
    frame: u64,
    /// Duration of the most recent frame; bots plan their steps with it.
    frame_ms: u32,
    rng: ChaCha8Rng,
    config: SimConfig,
    state: GameState,
    brains: SecondaryMap<ActorId, BotBrain>,
    log: Vec<LogEvent>,
    outcome: Option<RunOutcome>,
}

impl Game {
    /// Classic 13x15 arena with the human in the top-left corner and up to three bots.
    pub fn new(seed: u64, config: SimConfig, bot_count: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = mapgen::classic_arena(&mut rng, config.soft_wall_percent);
        let spawns = mapgen::spawn_points(&grid);
        let mut game = Self::with_rng(seed, rng, config, grid);
        game.add_human(spawns[0]);
        for pos in spawns.iter().skip(1).take(bot_count.min(3)) {
            game.add_bot(*pos);
        }
        game
    }

    pub fn from_grid(seed: u64, config: SimConfig, grid: Grid) -> Self {
        Self::with_rng(seed, ChaCha8Rng::seed_from_u64(seed), config, grid)
    }

    fn with_rng(seed: u64, rng: ChaCha8Rng, config: SimConfig, grid: Grid) -> Self {
        Self {
            seed,
            frame: 0,
            frame_ms: config.nominal_frame_ms,
            rng,
            config,
            state: GameState::new(grid),
            brains: SecondaryMap::new(),
            log: Vec::new(),
            outcome: None,
        }
    }

    pub fn add_human(&mut self, pos: Pos) -> ActorId {
        let id = self.spawn_actor(ActorKind::Human, pos);
        self.state.human = Some(id);
        id
    }

    pub fn add_bot(&mut self, pos: Pos) -> ActorId {
        let id = self.spawn_actor(ActorKind::Bot, pos);
        self.brains.insert(id, BotBrain::new(self.config.decision_interval));
        id
    }

    fn spawn_actor(&mut self, kind: ActorKind, pos: Pos) -> ActorId {
        let actor = Actor {
            id: ActorId::default(),
            kind,
            pos,
            bomb_allowance: self.config.start_bomb_allowance,
            bombs_placed: 0,
            blast_size: self.config.start_blast_size,
            speed: self.config.start_speed,
            alive: true,
        };
        let id = self.state.actors.insert(actor);
        self.state.actors[id].id = id;
        id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_frame(&self) -> u64 {
        self.frame
    }

    pub fn frame_ms(&self) -> u32 {
        self.frame_ms
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for external collaborators such as level editors and tests.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn brain(&self, actor: ActorId) -> Option<&BotBrain> {
        self.brains.get(actor)
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    /// Fresh hazard snapshot of the current instant.
    pub fn hazard_map(&self) -> HazardMap {
        HazardMap::for_state(&self.state)
    }
}
