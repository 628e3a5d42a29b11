use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::error::GridParseError;
use crate::types::*;

#[derive(Clone, Debug)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub pos: Pos,
    pub bomb_allowance: u32,
    /// Outstanding bombs this actor planted that have not detonated yet.
    pub bombs_placed: u32,
    pub blast_size: u32,
    pub speed: u32,
    pub alive: bool,
}

impl Actor {
    pub fn has_bomb_available(&self) -> bool {
        self.bombs_placed < self.bomb_allowance
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind, speed_cap: u32) {
        match kind {
            PowerUpKind::BombCount => self.bomb_allowance += 1,
            PowerUpKind::BlastSize => self.blast_size += 1,
            PowerUpKind::Speed => self.speed = (self.speed + 1).min(speed_cap),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Bomb {
    pub id: BombId,
    pub pos: Pos,
    pub owner: ActorId,
    /// Tiles reached per arm, center included.
    pub blast_size: u32,
    pub timer_ms: i32,
    pub alive: bool,
}

#[derive(Clone, Debug)]
pub struct Explosion {
    pub id: ExplosionId,
    pub pos: Pos,
    /// `None` for the blast center, which renders in every direction.
    pub arm: Option<Direction>,
    pub remaining_ms: i32,
}

impl Explosion {
    pub fn is_center(&self) -> bool {
        self.arm.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub tiles: Vec<Tile>,
}

impl Grid {
    /// Empty board enclosed by a wall border.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut tiles = vec![Tile::Empty; rows * cols];
        for col in 0..cols {
            tiles[col] = Tile::Wall;
            tiles[(rows - 1) * cols + col] = Tile::Wall;
        }
        for row in 0..rows {
            tiles[row * cols] = Tile::Wall;
            tiles[row * cols + (cols - 1)] = Tile::Wall;
        }
        Self { rows, cols, tiles }
    }

    /// Parses `#` wall, `+` soft wall, `.` empty and `b`/`f`/`s` power-ups.
    pub fn from_ascii(lines: &[&str]) -> Result<Self, GridParseError> {
        let Some(first) = lines.first() else {
            return Err(GridParseError::Empty);
        };
        let cols = first.chars().count();
        let mut tiles = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridParseError::RaggedRow { row, expected: cols, found });
            }
            for (col, glyph) in line.chars().enumerate() {
                let tile = match glyph {
                    '#' => Tile::Wall,
                    '+' => Tile::SoftWall,
                    '.' => Tile::Empty,
                    'b' => Tile::PowerUp(PowerUpKind::BombCount),
                    'f' => Tile::PowerUp(PowerUpKind::BlastSize),
                    's' => Tile::PowerUp(PowerUpKind::Speed),
                    _ => return Err(GridParseError::UnknownGlyph { glyph, row, col }),
                };
                tiles.push(tile);
            }
        }
        Ok(Self { rows: lines.len(), cols, tiles })
    }

    /// Out-of-bounds positions read as permanent walls.
    pub fn tile_at(&self, pos: Pos) -> Tile {
        if !self.in_bounds(pos) {
            return Tile::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn is_passable(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_passable()
    }

    pub fn passable_neighbor_count(&self, pos: Pos) -> usize {
        Direction::SEARCH_ORDER.iter().filter(|dir| self.is_passable(pos.step(**dir))).count()
    }

    /// Row-major iteration over every position on the board.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| Pos::new(row as i32, col as i32))
        })
    }

    pub fn count_tiles(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|candidate| **candidate == tile).count()
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.row as usize) * self.cols + (pos.col as usize)
    }
}

pub struct GameState {
    pub grid: Grid,
    pub actors: SlotMap<ActorId, Actor>,
    pub bombs: SlotMap<BombId, Bomb>,
    pub explosions: SlotMap<ExplosionId, Explosion>,
    /// Position index for live bombs; every `Tile::Bomb` has exactly one entry.
    pub bomb_index: BTreeMap<Pos, BombId>,
    pub human: Option<ActorId>,
}

impl GameState {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            actors: SlotMap::with_key(),
            bombs: SlotMap::with_key(),
            explosions: SlotMap::with_key(),
            bomb_index: BTreeMap::new(),
            human: None,
        }
    }

    pub fn bomb_at(&self, pos: Pos) -> Option<BombId> {
        self.bomb_index.get(&pos).copied()
    }

    pub fn live_bombs(&self) -> impl Iterator<Item = &Bomb> + '_ {
        self.bombs.values().filter(|bomb| bomb.alive)
    }

    pub fn human(&self) -> Option<&Actor> {
        self.human.and_then(|id| self.actors.get(id))
    }

    pub fn bot_ids(&self) -> Vec<ActorId> {
        self.actors
            .iter()
            .filter(|(_, actor)| actor.kind == ActorKind::Bot)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn is_fire(&self, pos: Pos) -> bool {
        self.explosions.values().any(|explosion| explosion.pos == pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_grid_round_trips_tile_tags() {
        let grid = Grid::from_ascii(&["#####", "#.+b#", "#####"]).expect("grid");
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.cols, 5);
        assert_eq!(grid.tile_at(Pos::new(1, 2)), Tile::SoftWall);
        assert_eq!(grid.tile_at(Pos::new(1, 3)), Tile::PowerUp(PowerUpKind::BombCount));
        assert_eq!(grid.tile_at(Pos::new(-1, 0)), Tile::Wall);
        assert_eq!(grid.tile_at(Pos::new(1, 9)), Tile::Wall);
    }

    #[test]
    fn ragged_and_unknown_rows_are_rejected() {
        assert_eq!(
            Grid::from_ascii(&["###", "##"]),
            Err(GridParseError::RaggedRow { row: 1, expected: 3, found: 2 })
        );
        assert_eq!(
            Grid::from_ascii(&["#?#"]),
            Err(GridParseError::UnknownGlyph { glyph: '?', row: 0, col: 1 })
        );
        assert_eq!(Grid::from_ascii(&[]), Err(GridParseError::Empty));
    }

    #[test]
    fn speed_power_up_respects_cap() {
        let mut actor = Actor {
            id: ActorId::default(),
            kind: ActorKind::Bot,
            pos: Pos::new(1, 1),
            bomb_allowance: 1,
            bombs_placed: 0,
            blast_size: 2,
            speed: 2,
            alive: true,
        };
        actor.apply_power_up(PowerUpKind::Speed, 3);
        actor.apply_power_up(PowerUpKind::Speed, 3);
        actor.apply_power_up(PowerUpKind::BlastSize, 3);
        actor.apply_power_up(PowerUpKind::BombCount, 3);
        assert_eq!(actor.speed, 3);
        assert_eq!(actor.blast_size, 3);
        assert_eq!(actor.bomb_allowance, 2);
    }
}
