use clap::{Parser, ValueEnum};
use maze_robot::simulation::generator::MAX_SIDE;
use maze_robot::simulation::params::{DEFAULT_HEADING, MAX_TICKS, PATH_CAPACITY, TICK_RATE_MS};
use maze_robot::simulation::{Heading, Position};
use maze_robot::ui::OptimizeChoice;
use std::path::PathBuf;

/// Maze robot simulator: explore with a left-hand rule, shorten the recorded
/// path, replay it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Maze text file
    #[arg(required_unless_present = "generate", conflicts_with = "generate")]
    pub maze: Option<PathBuf>,

    /// Generate a random maze of WxH cells instead of loading one
    #[arg(short, long, value_parser = parse_size)]
    pub generate: Option<(i32, i32)>,

    /// Seed for --generate
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Start cell as X,Y (defaults to the S marker, then 0,0)
    #[arg(short, long, value_parser = parse_position)]
    pub start: Option<Position>,

    /// Starting heading
    #[arg(long, value_enum, default_value_t = HeadingArg::from(DEFAULT_HEADING))]
    pub heading: HeadingArg,

    /// Goal cell as X,Y (defaults to the E marker)
    #[arg(long, value_parser = parse_position)]
    pub goal: Option<Position>,

    #[arg(long, default_value_t = MAX_TICKS)]
    pub max_ticks: u64,

    /// Recorded path capacity in symbols
    #[arg(long, default_value_t = PATH_CAPACITY)]
    pub path_capacity: usize,

    /// Replay an optimized path after discovery
    #[arg(long, value_enum, default_value_t = OptimizeArg::Ask)]
    pub optimize: OptimizeArg,

    /// Run without the terminal view and print the paths
    #[arg(long)]
    pub headless: bool,

    /// Auto-run step interval in milliseconds
    #[arg(long, default_value_t = TICK_RATE_MS)]
    pub tick_ms: u64,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HeadingArg {
    Up,
    Down,
    Left,
    Right,
}

impl From<Heading> for HeadingArg {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::Up => Self::Up,
            Heading::Down => Self::Down,
            Heading::Left => Self::Left,
            Heading::Right => Self::Right,
        }
    }
}

impl From<HeadingArg> for Heading {
    fn from(arg: HeadingArg) -> Self {
        match arg {
            HeadingArg::Up => Self::Up,
            HeadingArg::Down => Self::Down,
            HeadingArg::Left => Self::Left,
            HeadingArg::Right => Self::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OptimizeArg {
    Yes,
    No,
    Ask,
}

impl From<OptimizeArg> for OptimizeChoice {
    fn from(arg: OptimizeArg) -> Self {
        match arg {
            OptimizeArg::Yes => Self::Yes,
            OptimizeArg::No => Self::No,
            OptimizeArg::Ask => Self::Ask,
        }
    }
}

fn parse_pair(raw: &str, separator: char) -> Result<(i32, i32), String> {
    let (a, b) = raw
        .split_once(separator)
        .ok_or_else(|| format!("expected two numbers separated by '{separator}'"))?;
    let a = a.trim().parse().map_err(|e| format!("{a:?}: {e}"))?;
    let b = b.trim().parse().map_err(|e| format!("{b:?}: {e}"))?;
    Ok((a, b))
}

fn parse_position(raw: &str) -> Result<Position, String> {
    let (x, y) = parse_pair(raw, ',')?;
    Ok(Position::new(x, y))
}

fn parse_size(raw: &str) -> Result<(i32, i32), String> {
    let (w, h) = parse_pair(&raw.to_ascii_lowercase(), 'x')?;
    if w <= 0 || h <= 0 {
        return Err("maze size must be positive".to_string());
    }
    if w > MAX_SIDE || h > MAX_SIDE {
        return Err(format!("maze sides are limited to {MAX_SIDE} cells"));
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_defaults_to_param() {
        let cli = Cli::parse_from(["maze_robot", "maze.txt"]);
        assert_eq!(Heading::from(cli.heading), DEFAULT_HEADING);
    }

    #[test]
    fn test_size_is_bounded() {
        assert_eq!(parse_size("4x3"), Ok((4, 3)));
        assert!(parse_size("0x3").is_err());
        assert!(parse_size("100000x100000").is_err());
        assert!(parse_size(&format!("{}x2", MAX_SIDE + 1)).is_err());
    }
}
