//! Per-frame simulation loop: fuses, fire, deaths, match outcome and bot scheduling.

use std::collections::BTreeSet;

use tracing::{debug, info, trace};

use super::*;

impl Game {
    /// Advances the session by one frame of `dt_ms` milliseconds. A finished match is frozen.
    ///
    /// Order within a frame: age fire, count fuses down and detonate, remove spent bombs, kill
    /// actors standing in fire, settle the outcome, then let bots whose timer ran out decide.
    pub fn update(&mut self, dt_ms: u32) {
        if self.outcome.is_some() {
            return;
        }
        self.frame += 1;
        self.frame_ms = dt_ms;
        self.age_explosions(dt_ms);
        self.tick_bombs(dt_ms);
        self.resolve_deaths();
        if self.resolve_outcome() {
            return;
        }
        self.advance_bots();
    }

    fn age_explosions(&mut self, dt_ms: u32) {
        let elapsed = i32::try_from(dt_ms).unwrap_or(i32::MAX);
        for explosion in self.state.explosions.values_mut() {
            explosion.remaining_ms = explosion.remaining_ms.saturating_sub(elapsed);
        }
        self.state.explosions.retain(|_, explosion| explosion.remaining_ms > 0);
    }

    fn tick_bombs(&mut self, dt_ms: u32) {
        let elapsed = i32::try_from(dt_ms).unwrap_or(i32::MAX);
        let mut expired = Vec::new();
        for (id, bomb) in self.state.bombs.iter_mut() {
            if !bomb.alive {
                continue;
            }
            bomb.timer_ms = bomb.timer_ms.saturating_sub(elapsed);
            if bomb.timer_ms <= 0 {
                expired.push(id);
            }
        }
        for id in expired {
            // Already-chained bombs come back as empty reports.
            self.detonate_bomb(id);
        }
        self.state.bombs.retain(|_, bomb| bomb.alive);
    }

    fn resolve_deaths(&mut self) {
        let fire: BTreeSet<Pos> =
            self.state.explosions.values().map(|explosion| explosion.pos).collect();
        for actor in self.state.actors.values_mut() {
            if actor.alive && fire.contains(&actor.pos) {
                actor.alive = false;
                debug!(kind = ?actor.kind, pos = ?actor.pos, "actor killed");
                self.log.push(LogEvent::ActorKilled { actor: actor.id, pos: actor.pos });
            }
        }
    }

    /// Human death is checked first, so a simultaneous wipe is a defeat.
    fn resolve_outcome(&mut self) -> bool {
        let human_dead = self.state.human().is_some_and(|human| !human.alive);
        let bots_remaining = self
            .state
            .actors
            .values()
            .any(|actor| actor.kind == ActorKind::Bot && actor.alive);
        let outcome = if human_dead {
            RunOutcome::Defeat
        } else if !bots_remaining {
            RunOutcome::Victory
        } else {
            return false;
        };
        info!(?outcome, frame = self.frame, "match ended");
        self.outcome = Some(outcome);
        self.log.push(LogEvent::MatchEnded { outcome });
        true
    }

    fn advance_bots(&mut self) {
        for bot in self.state.bot_ids() {
            let Some(actor) = self.state.actors.get(bot) else {
                continue;
            };
            if !actor.alive {
                continue;
            }
            let speed = i32::try_from(actor.speed.max(1)).unwrap_or(i32::MAX);
            let Some(brain) = self.brains.get_mut(bot) else {
                continue;
            };
            brain.decision_timer = brain.decision_timer.saturating_sub(speed);
            if brain.decision_timer > 0 {
                continue;
            }
            let interval = i32::try_from(self.config.decision_interval).unwrap_or(i32::MAX);
            brain.decision_timer = interval;
            self.run_bot_decision(bot);
        }
    }

    /// Lets `bot` collect whatever it stands on, decide against a fresh hazard map, and act.
    /// Returns `None` for dead actors and for actors without a brain.
    pub fn run_bot_decision(&mut self, bot: ActorId) -> Option<Decision> {
        self.collect_power_up(bot);
        let hazard = HazardMap::for_state(&self.state);
        let actor = self.state.actors.get(bot).filter(|actor| actor.alive)?;
        let brain = self.brains.get_mut(bot)?;

        let ctx = DecisionContext::new(&self.state, &self.config, &hazard, actor)
            .with_frame_ms(self.frame_ms);
        let decision = decide(&ctx, brain, &mut self.rng);
        let rule_changed = brain.last_rule != Some(decision.rule);
        brain.last_rule = Some(decision.rule);

        if rule_changed {
            debug!(rule = ?decision.rule, "bot switched rule");
            self.log.push(LogEvent::BotRuleChanged { actor: bot, rule: decision.rule });
        }
        trace!(action = ?decision.action, rule = ?decision.rule, "bot decided");
        self.apply_bot_action(bot, decision.action);
        Some(decision)
    }
}
