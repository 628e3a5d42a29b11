//! Tunable simulation constants.
//! Fuse and threshold values encode intended difficulty; they are preserved as named fields
//! rather than derived.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Milliseconds between planting and detonation.
    pub fuse_ms: u32,
    /// Lifetime of one explosion fragment.
    pub explosion_ms: u32,
    /// Hazard time at or below which a bot abandons everything to evade.
    pub evade_threshold_ms: u32,
    /// Frames between bot decisions at speed 1.
    pub decision_interval: u32,
    /// Frame duration assumed until the session has advanced its first frame.
    pub nominal_frame_ms: u32,
    pub speed_cap: u32,
    /// Bot decisions during which planting stays suppressed after a plant.
    pub plant_cooldown_decisions: u32,
    pub soft_wall_percent: u32,
    pub power_up_drop_percent: u32,
    pub start_bomb_allowance: u32,
    pub start_blast_size: u32,
    pub start_speed: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fuse_ms: 3000,
            explosion_ms: 300,
            evade_threshold_ms: 1200,
            decision_interval: 60,
            nominal_frame_ms: 17,
            speed_cap: 3,
            plant_cooldown_decisions: 2,
            soft_wall_percent: 90,
            power_up_drop_percent: 25,
            start_bomb_allowance: 1,
            start_blast_size: 2,
            start_speed: 1,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, bool, &str); 8] = [
            ("fuse_ms", self.fuse_ms > 0, "must be positive"),
            ("decision_interval", self.decision_interval > 0, "must be positive"),
            ("nominal_frame_ms", self.nominal_frame_ms > 0, "must be positive"),
            ("speed_cap", self.speed_cap > 0, "must be positive"),
            ("start_blast_size", self.start_blast_size > 0, "must reach at least the center"),
            ("start_speed", self.start_speed > 0, "must be positive"),
            ("soft_wall_percent", self.soft_wall_percent <= 100, "must not exceed 100"),
            ("power_up_drop_percent", self.power_up_drop_percent <= 100, "must not exceed 100"),
        ];
        for (field, ok, reason) in checks {
            if !ok {
                return Err(ConfigError::Invalid { field, reason: reason.to_string() });
            }
        }
        Ok(())
    }

    /// Milliseconds between two decisions of a bot moving at `speed` when every frame lasts
    /// `frame_ms`. Decisions are counted in frames, so slower frames mean longer steps.
    pub fn step_ms(&self, speed: u32, frame_ms: u32) -> u32 {
        let frames = self.decision_interval.div_ceil(speed.max(1));
        frames.saturating_mul(frame_ms.max(1))
    }
}
