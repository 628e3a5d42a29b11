use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::error::PlantError;

new_key_type! {
    pub struct ActorId;
    pub struct BombId;
    pub struct ExplosionId;
}

/// Grid coordinate addressed as (row, col); row grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, dir: Direction) -> Self {
        self.offset(dir, 1)
    }

    pub fn offset(self, dir: Direction, distance: i32) -> Self {
        let (d_row, d_col) = dir.delta();
        Self { row: self.row + d_row * distance, col: self.col + d_col * distance }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Direction of a single orthogonal step from `self` to `other`.
    pub fn direction_to(self, other: Pos) -> Option<Direction> {
        Direction::SEARCH_ORDER.into_iter().find(|dir| self.step(*dir) == other)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Neighbor enumeration order shared by every search and tie-break.
    pub const SEARCH_ORDER: [Direction; 4] =
        [Direction::Left, Direction::Up, Direction::Right, Direction::Down];

    /// Arm order used when a detonation spawns fragments.
    pub const BLAST_ORDER: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    BombCount,
    BlastSize,
    Speed,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] =
        [PowerUpKind::BombCount, PowerUpKind::BlastSize, PowerUpKind::Speed];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Wall,
    SoftWall,
    Bomb,
    PowerUp(PowerUpKind),
}

impl Tile {
    pub fn is_passable(self) -> bool {
        match self {
            Tile::Empty | Tile::PowerUp(_) => true,
            Tile::Wall | Tile::SoftWall | Tile::Bomb => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Human,
    Bot,
}

/// Discrete per-tick command produced by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    Step(Direction),
    PlantBomb,
}

/// Discrete per-tick action chosen by a bot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Wait,
    Step(Direction),
    PlantBomb,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Idle,
    Moved(Pos),
    Blocked,
    Planted(BombId),
    Refused(PlantError),
    Ignored,
}

/// Rung of the bot decision ladder that produced an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionRule {
    Evade,
    Retreat,
    Harvest,
    Engage,
    Demolish,
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    BombPlanted { bomb: BombId, owner: ActorId, pos: Pos },
    PlantRefused { actor: ActorId, reason: PlantError },
    BombDetonated { bomb: BombId, pos: Pos, chained: bool },
    SoftWallDestroyed { pos: Pos },
    PowerUpSpawned { pos: Pos, kind: PowerUpKind },
    PowerUpCollected { actor: ActorId, kind: PowerUpKind },
    ActorKilled { actor: ActorId, pos: Pos },
    BotRuleChanged { actor: ActorId, rule: DecisionRule },
    MatchEnded { outcome: RunOutcome },
}
