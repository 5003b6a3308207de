use crate::simulation::grid::{Grid, Position};
use crate::simulation::heading::Heading;
use rayon::prelude::*;

pub const OPEN: char = '.';
pub const BLOCKED: char = ' ';
pub const GOAL: char = 'E';

/// Draws the maze as one string per row: `.` open, blank blocked, the
/// heading arrow for the robot and `E` for the goal.
#[must_use]
pub fn compute_maze_lines(
    grid: &Grid,
    robot: Position,
    heading: Heading,
    goal: Option<Position>,
) -> Vec<String> {
    // Rows are independent, so render them in parallel
    (0..grid.height())
        .into_par_iter()
        .map(|y| {
            (0..grid.width())
                .map(|x| {
                    let pos = Position::new(x, y);
                    if pos == robot {
                        heading.glyph()
                    } else if Some(pos) == goal {
                        GOAL
                    } else if grid.is_passable(pos) {
                        OPEN
                    } else {
                        BLOCKED
                    }
                })
                .collect::<String>()
        })
        .collect()
}
