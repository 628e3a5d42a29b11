//! Classic arena generation.
//! This module exists to turn a fixed pillar template plus a seeded RNG into a playable grid.
//! It does not place actors; it only reports where they may spawn.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::state::Grid;
use crate::types::{Pos, Tile};

/// `#` wall, `.` may become a soft wall, `x` always stays open so spawns can move.
const CLASSIC_TEMPLATE: [&str; 13] = [
    "###############",
    "#xx.........xx#",
    "#x#.#.#.#.#.#x#",
    "#x...........x#",
    "#.#.#.#.#.#.#.#",
    "#.............#",
    "#.#.#.#.#.#.#.#",
    "#.............#",
    "#.#.#.#.#.#.#.#",
    "#x...........x#",
    "#x#.#.#.#.#.#x#",
    "#xx.........xx#",
    "###############",
];

pub const CLASSIC_ROWS: usize = CLASSIC_TEMPLATE.len();
pub const CLASSIC_COLS: usize = 15;

/// Fills every fillable template tile with a soft wall with `soft_wall_percent` probability.
pub fn classic_arena(rng: &mut ChaCha8Rng, soft_wall_percent: u32) -> Grid {
    let mut grid = Grid::new(CLASSIC_ROWS, CLASSIC_COLS);
    for (row, line) in CLASSIC_TEMPLATE.iter().enumerate() {
        for (col, glyph) in line.chars().enumerate() {
            let pos = Pos::new(row as i32, col as i32);
            let tile = match glyph {
                '#' => Tile::Wall,
                '.' if rng.next_u32() % 100 < soft_wall_percent => Tile::SoftWall,
                _ => Tile::Empty,
            };
            grid.set_tile(pos, tile);
        }
    }
    grid
}

/// Interior corners in the order human, then bots: top-left, top-right, bottom-left,
/// bottom-right.
pub fn spawn_points(grid: &Grid) -> [Pos; 4] {
    let last_row = grid.rows as i32 - 2;
    let last_col = grid.cols as i32 - 2;
    [
        Pos::new(1, 1),
        Pos::new(1, last_col),
        Pos::new(last_row, 1),
        Pos::new(last_row, last_col),
    ]
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn template_rows_are_all_fifteen_wide() {
        assert!(CLASSIC_TEMPLATE.iter().all(|line| line.len() == CLASSIC_COLS));
    }

    #[test]
    fn same_seed_builds_the_same_arena() {
        let first = classic_arena(&mut ChaCha8Rng::seed_from_u64(11), 90);
        let second = classic_arena(&mut ChaCha8Rng::seed_from_u64(11), 90);
        let other = classic_arena(&mut ChaCha8Rng::seed_from_u64(12), 90);
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn spawn_corners_stay_open_and_can_move() {
        let grid = classic_arena(&mut ChaCha8Rng::seed_from_u64(3), 100);
        for spawn in spawn_points(&grid) {
            assert_eq!(grid.tile_at(spawn), Tile::Empty);
            assert_eq!(grid.passable_neighbor_count(spawn), 2, "{spawn:?}");
        }
    }

    #[test]
    fn pillars_and_border_are_permanent() {
        let grid = classic_arena(&mut ChaCha8Rng::seed_from_u64(5), 0);
        assert_eq!(grid.tile_at(Pos::new(2, 2)), Tile::Wall);
        assert_eq!(grid.tile_at(Pos::new(10, 12)), Tile::Wall);
        assert_eq!(grid.tile_at(Pos::new(0, 7)), Tile::Wall);
        assert_eq!(grid.count_tiles(Tile::SoftWall), 0);
    }
}
