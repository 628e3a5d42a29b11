//! Bot decision ladder.
//! This module evaluates the rules top to bottom and returns the first applicable action.
//! It does not mutate the session; `Game` applies the returned action.

use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;

use super::*;

mod demolition;
mod engagement;
mod escape;
mod evasion;
mod fallback;
mod harvest;

/// Per-bot memory carried between decisions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotBrain {
    /// Frames left until the next decision; decremented by the bot's speed every frame.
    pub decision_timer: i32,
    /// Tiles still to walk after planting, nearest first.
    pub escape_route: VecDeque<Pos>,
    pub demolition_target: Option<Pos>,
    pub plant_cooldown: u32,
    pub last_rule: Option<DecisionRule>,
}

impl BotBrain {
    pub fn new(decision_interval: u32) -> Self {
        Self {
            decision_timer: i32::try_from(decision_interval).unwrap_or(i32::MAX),
            escape_route: VecDeque::new(),
            demolition_target: None,
            plant_cooldown: 0,
            last_rule: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub rule: DecisionRule,
}

/// Everything one decision may read. Built fresh for every bot decision.
pub struct DecisionContext<'a> {
    pub state: &'a GameState,
    pub config: &'a SimConfig,
    pub hazard: &'a HazardMap,
    pub actor: &'a Actor,
    /// Frame duration used to turn decision counts into travel time.
    pub frame_ms: u32,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        state: &'a GameState,
        config: &'a SimConfig,
        hazard: &'a HazardMap,
        actor: &'a Actor,
    ) -> Self {
        Self { state, config, hazard, actor, frame_ms: config.nominal_frame_ms }
    }

    pub fn with_frame_ms(mut self, frame_ms: u32) -> Self {
        self.frame_ms = frame_ms;
        self
    }

    fn grid(&self) -> &Grid {
        &self.state.grid
    }

    fn step_ms(&self) -> u32 {
        self.config.step_ms(self.actor.speed, self.frame_ms)
    }

    fn travel_window(&self) -> SafetyWindow {
        SafetyWindow::timed(self.step_ms(), 0)
    }

    fn is_imminent(&self, pos: Pos) -> bool {
        !self.hazard.is_safe_within(pos, self.config.evade_threshold_ms)
    }

    /// Hazard-aware path to a destination outside every blast.
    fn safe_path_to(&self, goal: Pos) -> Option<Vec<Pos>> {
        if !self.hazard.is_clear(goal) {
            return None;
        }
        find_safe_path(self.grid(), self.hazard, self.actor.pos, self.travel_window(), |pos, _| {
            pos == goal
        })
    }
}

pub fn decide(
    ctx: &DecisionContext<'_>,
    brain: &mut BotBrain,
    rng: &mut ChaCha8Rng,
) -> Decision {
    brain.plant_cooldown = brain.plant_cooldown.saturating_sub(1);

    if let Some(action) = evasion::evade(ctx, brain, rng) {
        return Decision { action, rule: DecisionRule::Evade };
    }
    if let Some(action) = evasion::follow_escape_route(ctx, brain) {
        return Decision { action, rule: DecisionRule::Retreat };
    }
    if let Some(action) = harvest::pursue_power_up(ctx) {
        return Decision { action, rule: DecisionRule::Harvest };
    }
    if let Some(action) = engagement::engage_opponent(ctx, brain) {
        return Decision { action, rule: DecisionRule::Engage };
    }
    if let Some(action) = demolition::demolish_terrain(ctx, brain) {
        return Decision { action, rule: DecisionRule::Demolish };
    }
    Decision { action: fallback::fallback_move(ctx, rng), rule: DecisionRule::Fallback }
}

/// First move along `path`, which starts at the walker's own tile.
fn first_step(path: &[Pos]) -> Option<Action> {
    let (from, to) = (path.first()?, path.get(1)?);
    from.direction_to(*to).map(Action::Step)
}
