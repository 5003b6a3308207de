//! Local topology classification and turn decisions.
//!
//! The `back` sensor always looks at the cell the robot just left, which is
//! what lets the predicates below tell a corridor bend from a dead end.

use crate::simulation::error::{Result, SimulationError};
use crate::simulation::grid::Position;
use crate::simulation::heading::Relative;
use crate::simulation::path::Path;
use crate::simulation::sensors::SensorReadings;
use std::fmt;

/// Branch choice order while discovering: hug the left wall.
pub const PRIORITIES: [Relative; 3] = [Relative::Left, Relative::Front, Relative::Right];

/// What the current cell looks like from the robot's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Open on every side.
    Destination,
    /// Three or more open sides.
    Intersection,
    /// Came from behind, blocked ahead, one side open.
    CorridorTurn,
    /// Open only behind.
    DeadEnd,
    Straight,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Destination => "destination",
            Self::Intersection => "intersection",
            Self::CorridorTurn => "corridor turn",
            Self::DeadEnd => "dead end",
            Self::Straight => "straight",
        };
        f.write_str(name)
    }
}

#[must_use]
pub fn is_destination(s: &SensorReadings) -> bool {
    s.front && s.back && s.left && s.right
}

#[must_use]
pub fn is_intersection(s: &SensorReadings) -> bool {
    s.open_count() >= 3
}

#[must_use]
pub fn is_corridor_turn(s: &SensorReadings) -> bool {
    s.back && !s.front && (s.left || s.right)
}

#[must_use]
pub fn is_dead_end(s: &SensorReadings) -> bool {
    s.back && !s.front && !s.left && !s.right
}

/// Classifies a snapshot; earlier predicates win.
#[must_use]
pub fn classify(sensors: &SensorReadings) -> Classification {
    if is_destination(sensors) {
        Classification::Destination
    } else if is_intersection(sensors) {
        Classification::Intersection
    } else if is_corridor_turn(sensors) {
        Classification::CorridorTurn
    } else if is_dead_end(sensors) {
        Classification::DeadEnd
    } else {
        Classification::Straight
    }
}

/// Operating mode of the robot, carrying the path it writes or reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Discovering { recorded: Path },
    Replaying { path: Path, cursor: usize },
}

impl Mode {
    #[must_use]
    pub fn discovering(capacity: usize) -> Self {
        Self::Discovering {
            recorded: Path::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn replaying(path: Path) -> Self {
        Self::Replaying { path, cursor: 0 }
    }

    /// The recorded path, or the path being replayed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Discovering { recorded } => recorded,
            Self::Replaying { path, .. } => path,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Discovering { .. } => "discovery",
            Self::Replaying { .. } => "replay",
        }
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        match self {
            Self::Discovering { .. } => None,
            Self::Replaying { cursor, .. } => Some(*cursor),
        }
    }
}

/// Picks the rotation for this tick, recording or consuming path symbols as
/// the mode requires.
///
/// Returns `None` at the destination, where the robot must not move.
///
/// # Errors
///
/// Fails on a full recording buffer, an exhausted replay path, or an
/// intersection with no open branch.
pub fn decide(
    classification: Classification,
    sensors: &SensorReadings,
    mode: &mut Mode,
    position: Position,
) -> Result<Option<Relative>> {
    let turn = match classification {
        Classification::Destination => return Ok(None),
        Classification::Intersection => match mode {
            Mode::Discovering { recorded } => {
                let turn = PRIORITIES
                    .into_iter()
                    .find(|&d| sensors.get(d))
                    .ok_or(SimulationError::InconsistentSensorState { position })?;
                recorded.record(turn)?;
                turn
            }
            Mode::Replaying { path, cursor } => {
                let turn = path
                    .get(*cursor)
                    .ok_or(SimulationError::ReplayExhausted {
                        position,
                        consumed: *cursor,
                    })?;
                *cursor += 1;
                turn
            }
        },
        Classification::CorridorTurn => {
            if sensors.left {
                Relative::Left
            } else {
                Relative::Right
            }
        }
        Classification::DeadEnd => {
            if let Mode::Discovering { recorded } = mode {
                recorded.record(Relative::Back)?;
            }
            Relative::Back
        }
        Classification::Straight => Relative::Front,
    };
    Ok(Some(turn))
}
