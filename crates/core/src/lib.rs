pub mod config;
pub mod error;
pub mod game;
pub mod mapgen;
pub mod state;
pub mod types;

pub use config::SimConfig;
pub use error::{ConfigError, GridParseError, PlantError};
pub use game::{
    BlastTile, BombFuse, BotBrain, Decision, Detonation, Game, HazardMap, SafetyWindow,
    blast_footprint, find_path, find_safe_path, reachable_distances,
};
pub use state::{Actor, Bomb, Explosion, GameState, Grid};
pub use types::*;
