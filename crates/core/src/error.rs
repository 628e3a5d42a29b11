//! Error taxonomy for the simulation library.
//! None of these are fatal to a running session: plant refusals are logged and skipped,
//! configuration and grid errors surface only while a session is being built.

use thiserror::Error;

use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlantError {
    #[error("actor does not exist")]
    ActorNotFound,
    #[error("actor is dead")]
    ActorDead,
    #[error("bomb allowance exhausted ({placed}/{allowance} placed)")]
    AllowanceExhausted { placed: u32, allowance: u32 },
    #[error("tile {0:?} is already occupied")]
    TileOccupied(Pos),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridParseError {
    #[error("grid has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("unknown tile glyph {glyph:?} at ({row}, {col})")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
}
