//! Text maze format.
//!
//! ```text
//! 5          <- optional width
//! 3          <- optional height
//! S..#.
//! #.##.
//! #...E
//! ```
//!
//! `.` is passable, `S` marks the start and `E` the goal (both passable),
//! anything else is blocked. Short rows are padded with blocked cells.

use crate::simulation::grid::{Grid, Position};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected a positive {what}, found {found:?}")]
    InvalidHeader {
        line: usize,
        what: &'static str,
        found: String,
    },

    #[error("maze has no rows")]
    Empty,

    #[error("maze declares {height} rows but has {found}")]
    TooManyRows { height: i32, found: usize },

    #[error("marker {marker:?} appears at {first} and {second}")]
    DuplicateMarker {
        marker: char,
        first: Position,
        second: Position,
    },
}

/// A parsed maze and its optional markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeFile {
    pub grid: Grid,
    pub start: Option<Position>,
    pub goal: Option<Position>,
}

/// Reads and parses a maze file.
///
/// # Errors
///
/// I/O failures and everything [`parse_maze`] rejects.
pub fn load_maze(path: impl AsRef<Path>) -> Result<MazeFile, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let maze = parse_maze(&text)?;
    info!(
        path = %path.display(),
        width = maze.grid.width(),
        height = maze.grid.height(),
        open = maze.grid.open_count(),
        "maze loaded"
    );
    Ok(maze)
}

/// Parses the text format described in the module docs.
///
/// # Errors
///
/// Malformed header, no rows, more rows than declared, or a repeated marker.
pub fn parse_maze(text: &str) -> Result<MazeFile, LoadError> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let header = lines
        .first()
        .is_some_and(|l| l.trim().parse::<i64>().is_ok());
    let (width, height, rows) = if header {
        let width = header_value(&lines, 0, "width")?;
        let height = header_value(&lines, 1, "height")?;
        let rows = &lines[2..];
        if rows.len() > usize::try_from(height).unwrap_or(usize::MAX) {
            return Err(LoadError::TooManyRows {
                height,
                found: rows.len(),
            });
        }
        (width, height, rows)
    } else {
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        (to_dimension(width)?, to_dimension(lines.len())?, &lines[..])
    };

    let mut grid = Grid::new(width, height).ok_or(LoadError::Empty)?;
    let mut start = None;
    let mut goal = None;
    for (y, row) in (0..).zip(rows) {
        for (x, ch) in (0..width).zip(row.chars()) {
            let pos = Position::new(x, y);
            match ch {
                '.' => {}
                'S' => place_marker(&mut start, 'S', pos)?,
                'E' => place_marker(&mut goal, 'E', pos)?,
                _ => continue,
            }
            grid.set_passable(pos, true);
        }
    }

    Ok(MazeFile { grid, start, goal })
}

fn header_value(lines: &[&str], index: usize, what: &'static str) -> Result<i32, LoadError> {
    let raw = lines.get(index).copied().unwrap_or_default().trim();
    match raw.parse::<i32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(LoadError::InvalidHeader {
            line: index + 1,
            what,
            found: raw.to_string(),
        }),
    }
}

fn to_dimension(len: usize) -> Result<i32, LoadError> {
    match i32::try_from(len) {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(LoadError::Empty),
    }
}

fn place_marker(
    slot: &mut Option<Position>,
    marker: char,
    pos: Position,
) -> Result<(), LoadError> {
    if let Some(first) = *slot {
        return Err(LoadError::DuplicateMarker {
            marker,
            first,
            second: pos,
        });
    }
    *slot = Some(pos);
    Ok(())
}
