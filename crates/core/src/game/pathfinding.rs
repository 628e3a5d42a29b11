//! Breadth-first search over passable tiles.
//! This module exists so goal search and hazard-constrained search share one expansion order.
//! It does not own target selection; callers decide what counts as a goal.

use std::collections::{BTreeMap, VecDeque};

use super::*;

/// Neighbors in the fixed left, up, right, down order every search expands in.
pub fn neighbors(pos: Pos) -> [Pos; 4] {
    Direction::SEARCH_ORDER.map(|dir| pos.step(dir))
}

/// Shortest passable path from `start` to `goal`, both inclusive.
/// The start tile itself is never checked, so an actor standing on a bomb can still leave.
pub fn find_path(grid: &Grid, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    if start == goal {
        return Some(vec![start]);
    }
    if !grid.is_passable(goal) {
        return None;
    }
    bfs(grid, start, |_, _| true, |pos, _| pos == goal)
}

/// Time window a hazard-constrained search must respect.
///
/// A tile first entered at BFS depth `d` may only be expanded when its hazard time is strictly
/// greater than `base_ms + (d + delay_steps) * step_ms`. With `step_ms == 0` this is a fixed
/// horizon; with `base_ms == 0` it tracks when the walker would actually stand on the tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SafetyWindow {
    pub base_ms: u32,
    pub step_ms: u32,
    pub delay_steps: u32,
}

impl SafetyWindow {
    pub const fn fixed(horizon_ms: u32) -> Self {
        Self { base_ms: horizon_ms, step_ms: 0, delay_steps: 0 }
    }

    /// `delay_steps` counts turns spent before the first move, e.g. one for planting.
    pub const fn timed(step_ms: u32, delay_steps: u32) -> Self {
        Self { base_ms: 0, step_ms, delay_steps }
    }

    pub fn limit_at(&self, depth: u32) -> u32 {
        let steps = depth.saturating_add(self.delay_steps);
        self.base_ms.saturating_add(steps.saturating_mul(self.step_ms))
    }

    pub fn admits(&self, hazard: &HazardMap, pos: Pos, depth: u32) -> bool {
        hazard.is_safe_within(pos, self.limit_at(depth))
    }
}

/// Shortest path from `start` to the first tile satisfying `is_goal(pos, depth)`, expanding
/// only tiles the `window` admits. The start tile is never window-checked; `is_goal` sees it at
/// depth zero.
pub fn find_safe_path<IsGoal>(
    grid: &Grid,
    hazard: &HazardMap,
    start: Pos,
    window: SafetyWindow,
    is_goal: IsGoal,
) -> Option<Vec<Pos>>
where
    IsGoal: Fn(Pos, u32) -> bool,
{
    bfs(grid, start, |pos, depth| window.admits(hazard, pos, depth), is_goal)
}

/// BFS depth of every tile reachable from `start` under `window`, start included at zero.
pub fn reachable_distances(
    grid: &Grid,
    hazard: &HazardMap,
    start: Pos,
    window: SafetyWindow,
) -> BTreeMap<Pos, u32> {
    let mut distances = BTreeMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let depth = distances[&current] + 1;
        for next in neighbors(current) {
            if distances.contains_key(&next)
                || !grid.is_passable(next)
                || !window.admits(hazard, next, depth)
            {
                continue;
            }
            distances.insert(next, depth);
            queue.push_back(next);
        }
    }
    distances
}

fn bfs<CanEnter, IsGoal>(
    grid: &Grid,
    start: Pos,
    can_enter: CanEnter,
    is_goal: IsGoal,
) -> Option<Vec<Pos>>
where
    CanEnter: Fn(Pos, u32) -> bool,
    IsGoal: Fn(Pos, u32) -> bool,
{
    let mut came_from: BTreeMap<Pos, Pos> = BTreeMap::new();
    let mut queue = VecDeque::from([(start, 0_u32)]);
    came_from.insert(start, start);

    while let Some((current, depth)) = queue.pop_front() {
        if is_goal(current, depth) {
            return Some(reconstruct_path(&came_from, start, current));
        }
        for next in neighbors(current) {
            if came_from.contains_key(&next)
                || !grid.is_passable(next)
                || !can_enter(next, depth + 1)
            {
                continue;
            }
            came_from.insert(next, current);
            queue.push_back((next, depth + 1));
        }
    }
    None
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(prev) = came_from.get(&current).copied() else {
            break;
        };
        current = prev;
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor(length: usize) -> Grid {
        let cols = length + 2;
        let border = "#".repeat(cols);
        let floor = format!("#{}#", ".".repeat(length));
        Grid::from_ascii(&[border.as_str(), floor.as_str(), border.as_str()]).expect("grid")
    }

    #[test]
    fn straight_corridor_path_includes_both_ends() {
        let grid = corridor(8);
        let start = Pos::new(1, 1);
        let goal = Pos::new(1, 8);

        let path = find_path(&grid, start, goal).expect("path");

        assert_eq!(path.len() as u32, start.manhattan(goal) + 1);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
    }

    #[test]
    fn blocked_corridor_is_unreachable() {
        let mut grid = corridor(8);
        grid.set_tile(Pos::new(1, 4), Tile::Wall);
        assert_eq!(find_path(&grid, Pos::new(1, 1), Pos::new(1, 8)), None);

        grid.set_tile(Pos::new(1, 4), Tile::SoftWall);
        assert_eq!(find_path(&grid, Pos::new(1, 1), Pos::new(1, 8)), None);

        grid.set_tile(Pos::new(1, 4), Tile::Bomb);
        assert_eq!(find_path(&grid, Pos::new(1, 1), Pos::new(1, 8)), None);
    }

    #[test]
    fn ties_break_in_left_up_right_down_order() {
        let grid = Grid::from_ascii(&[
            "#####", //
            "#...#",
            "#...#",
            "#...#",
            "#####",
        ])
        .expect("grid");
        let path = find_path(&grid, Pos::new(2, 2), Pos::new(1, 1)).expect("path");
        assert_eq!(path, vec![Pos::new(2, 2), Pos::new(2, 1), Pos::new(1, 1)]);
    }

    #[test]
    fn power_up_tiles_are_walkable() {
        let grid = Grid::from_ascii(&["#####", "#.s.#", "#####"]).expect("grid");
        let path = find_path(&grid, Pos::new(1, 1), Pos::new(1, 3)).expect("path");
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn fixed_window_rejects_tiles_at_or_below_horizon() {
        let mut grid = corridor(6);
        grid.set_tile(Pos::new(1, 6), Tile::Bomb);
        let fuses = [BombFuse { id: None, pos: Pos::new(1, 6), blast_size: 3, fuse_ms: 1000 }];
        let hazard = HazardMap::build(&grid, &fuses, &[]);
        let start = Pos::new(1, 1);
        let goal = Pos::new(1, 4);

        let tight = find_safe_path(&grid, &hazard, start, SafetyWindow::fixed(1000), |pos, _| {
            pos == goal
        });
        let loose = find_safe_path(&grid, &hazard, start, SafetyWindow::fixed(999), |pos, _| {
            pos == goal
        });

        assert_eq!(tight, None);
        assert_eq!(loose.map(|path| path.len()), Some(4));
    }

    #[test]
    fn timed_window_lets_walker_cross_fire_that_starts_later() {
        let mut grid = corridor(6);
        grid.set_tile(Pos::new(1, 1), Tile::Bomb);
        let fuses = [BombFuse { id: None, pos: Pos::new(1, 1), blast_size: 3, fuse_ms: 2500 }];
        let hazard = HazardMap::build(&grid, &fuses, &[]);
        let start = Pos::new(1, 2);
        let is_exit = |pos: Pos, depth: u32| depth > 0 && hazard.is_clear(pos);

        let quick = find_safe_path(&grid, &hazard, start, SafetyWindow::timed(1000, 0), is_exit);
        assert_eq!(quick, Some(vec![start, Pos::new(1, 3), Pos::new(1, 4)]));

        let slow = find_safe_path(&grid, &hazard, start, SafetyWindow::timed(3000, 0), is_exit);
        assert_eq!(slow, None, "a slow walker would still be in the arm at ignition");
    }

    #[test]
    fn timed_window_refuses_tiles_that_ignite_before_arrival() {
        let grid = corridor(5);
        let fuses = [BombFuse { id: None, pos: Pos::new(1, 3), blast_size: 2, fuse_ms: 1500 }];
        let hazard = HazardMap::build(&grid, &fuses, &[]);
        let window = SafetyWindow::timed(1000, 0);

        assert!(window.admits(&hazard, Pos::new(1, 2), 1));
        assert!(!window.admits(&hazard, Pos::new(1, 3), 2));
        let path = find_safe_path(&grid, &hazard, Pos::new(1, 1), window, |pos, _| {
            pos == Pos::new(1, 5)
        });
        assert_eq!(path, None);
    }

    #[test]
    fn reachable_distances_match_bfs_depth() {
        let grid = corridor(4);
        let hazard = HazardMap::default();
        let distances =
            reachable_distances(&grid, &hazard, Pos::new(1, 1), SafetyWindow::fixed(0));
        assert_eq!(distances.get(&Pos::new(1, 4)), Some(&3));
        assert_eq!(distances.len(), 4);
    }
}
