//! Absolute headings, relative directions and the rotation tables.
//!
//! The robot faces one of four absolute headings. Everything it senses or
//! records is expressed relative to that heading: `Front`, `Back`, `Left`
//! and `Right`, written `U`, `D`, `L`, `R` in path strings.

use std::fmt;

/// Absolute facing on the grid. `Up` decreases `y`, `Down` increases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Quarter turn counter-clockwise.
    #[must_use]
    pub const fn turn_left(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Down => Self::Right,
            Self::Left => Self::Down,
            Self::Right => Self::Up,
        }
    }

    /// Quarter turn clockwise.
    #[must_use]
    pub const fn turn_right(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::Right => Self::Down,
        }
    }

    /// Applies a relative turn. `Front` keeps the heading.
    #[must_use]
    pub const fn rotate(self, turn: Relative) -> Self {
        match turn {
            Relative::Front => self,
            Relative::Back => self.opposite(),
            Relative::Left => self.turn_left(),
            Relative::Right => self.turn_right(),
        }
    }

    /// Grid offset of one step forward.
    #[must_use]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    /// Arrow used when drawing the robot.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Up => '^',
            Self::Down => 'v',
            Self::Left => '<',
            Self::Right => '>',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Direction relative to the current heading.
///
/// Doubles as the turn alphabet of recorded paths: `Front` is "go straight"
/// (`U`) and `Back` is a U-turn (`D`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relative {
    Front,
    Back,
    Left,
    Right,
}

impl Relative {
    pub const ALL: [Self; 4] = [Self::Front, Self::Back, Self::Left, Self::Right];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Front => 'U',
            Self::Back => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'U' => Some(Self::Front),
            'D' => Some(Self::Back),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Relative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
