//! Seeded maze generation.
//!
//! Recursive backtracker over a `cols x rows` cell lattice drawn into a
//! `(2 * cols + 1) x (2 * rows + 1)` grid: cells sit at odd coordinates and
//! the cells between them are opened when a passage is carved.
//!
//! A cell is never given four passages, since the robot would read it as
//! the destination. Cells the backtracker cannot reach under that limit stay
//! blocked. The robot starts in the top-left cell facing the first step
//! toward the goal, so it never has to turn back through its start.

use crate::simulation::grid::{Grid, Position};
use crate::simulation::heading::Heading;
use crate::simulation::run::Pose;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, VecDeque};

const MAX_PASSAGES: u8 = 3;
/// Largest lattice side accepted by [`generate`], in cells.
pub const MAX_SIDE: i32 = 1_000;

/// A generated maze with its start pose and goal.
#[derive(Clone, Debug)]
pub struct GeneratedMaze {
    pub grid: Grid,
    /// Top-left cell, facing along the route to the goal.
    pub start: Pose,
    /// The reachable cell farthest from the start.
    pub goal: Position,
}

/// Builds a maze of `cols x rows` cells from `seed`.
///
/// Returns `None` for an empty lattice, a single cell, or a side longer
/// than [`MAX_SIDE`].
#[must_use]
pub fn generate(cols: i32, rows: i32, seed: u64) -> Option<GeneratedMaze> {
    if !(1..=MAX_SIDE).contains(&cols) || !(1..=MAX_SIDE).contains(&rows) {
        return None;
    }
    let cells = usize::try_from(cols.checked_mul(rows)?).ok()?;
    if cells < 2 {
        return None;
    }
    let mut grid = Grid::new(cols * 2 + 1, rows * 2 + 1)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut passages = vec![0u8; cells];
    let mut visited = vec![false; cells];
    #[allow(clippy::cast_sign_loss)]
    let slot = |c: Position| (c.y * cols + c.x) as usize;

    let origin = Position::new(0, 0);
    visited[slot(origin)] = true;
    grid.set_passable(to_grid(origin), true);
    let mut stack = vec![origin];

    while let Some(&current) = stack.last() {
        let mut headings = Heading::ALL;
        headings.shuffle(&mut rng);
        let next = headings.into_iter().map(|h| current.step(h)).find(|&n| {
            (0..cols).contains(&n.x)
                && (0..rows).contains(&n.y)
                && !visited[slot(n)]
                && passages[slot(current)] < MAX_PASSAGES
        });

        match next {
            Some(n) => {
                visited[slot(n)] = true;
                passages[slot(current)] += 1;
                passages[slot(n)] += 1;
                let wall = Position::new(current.x + n.x + 1, current.y + n.y + 1);
                grid.set_passable(wall, true);
                grid.set_passable(to_grid(n), true);
                stack.push(n);
            }
            None => {
                stack.pop();
            }
        }
    }

    let start_position = to_grid(origin);
    let (goal, first_step) = farthest_cell(&grid, start_position)?;
    let heading = Heading::ALL
        .into_iter()
        .find(|&h| start_position.step(h) == first_step)?;

    Some(GeneratedMaze {
        grid,
        start: Pose::new(start_position, heading),
        goal,
    })
}

const fn to_grid(cell: Position) -> Position {
    Position::new(cell.x * 2 + 1, cell.y * 2 + 1)
}

/// Breadth-first search over open cells. Returns the last cell dequeued
/// (the farthest from `start`) and the first cell on the way to it.
fn farthest_cell(grid: &Grid, start: Position) -> Option<(Position, Position)> {
    let mut parents = HashMap::from([(start, start)]);
    let mut queue = VecDeque::from([start]);
    let mut last = start;
    while let Some(cell) = queue.pop_front() {
        last = cell;
        for heading in Heading::ALL {
            let n = cell.step(heading);
            if grid.is_open(n) && !parents.contains_key(&n) {
                parents.insert(n, cell);
                queue.push_back(n);
            }
        }
    }

    let mut step = last;
    loop {
        let parent = *parents.get(&step)?;
        if parent == start {
            return (step != start).then_some((last, step));
        }
        step = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_maze() {
        let a = generate(4, 3, 7).unwrap();
        let b = generate(4, 3, 7).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.goal, b.goal);
    }

    #[test]
    fn test_rejects_degenerate_lattice() {
        assert!(generate(0, 3, 1).is_none());
        assert!(generate(1, 1, 1).is_none());
    }

    #[test]
    fn test_rejects_oversized_lattice() {
        assert!(generate(100_000, 100_000, 1).is_none());
        assert!(generate(i32::MAX, 2, 1).is_none());
        assert!(generate(MAX_SIDE + 1, 2, 1).is_none());
    }
}
