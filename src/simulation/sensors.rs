//! Proximity sensor ring.
//!
//! The four sensors are fixed to the robot's body, so the absolute cell each
//! one looks at depends on the heading. One offset table per heading keeps
//! that mapping explicit.

use crate::simulation::grid::{Grid, Position};
use crate::simulation::heading::{Heading, Relative};

/// One reading per relative direction; `true` means the neighbour is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SensorReadings {
    pub front: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl SensorReadings {
    #[must_use]
    pub const fn new(front: bool, back: bool, left: bool, right: bool) -> Self {
        Self {
            front,
            back,
            left,
            right,
        }
    }

    #[must_use]
    pub const fn get(&self, direction: Relative) -> bool {
        match direction {
            Relative::Front => self.front,
            Relative::Back => self.back,
            Relative::Left => self.left,
            Relative::Right => self.right,
        }
    }

    /// Number of open directions.
    #[must_use]
    pub fn open_count(&self) -> usize {
        Relative::ALL.iter().filter(|&&d| self.get(d)).count()
    }
}

fn facing_up(direction: Relative) -> (i32, i32) {
    match direction {
        Relative::Front => (0, -1),
        Relative::Back => (0, 1),
        Relative::Left => (-1, 0),
        Relative::Right => (1, 0),
    }
}

fn facing_down(direction: Relative) -> (i32, i32) {
    match direction {
        Relative::Front => (0, 1),
        Relative::Back => (0, -1),
        Relative::Left => (1, 0),
        Relative::Right => (-1, 0),
    }
}

fn facing_left(direction: Relative) -> (i32, i32) {
    match direction {
        Relative::Front => (-1, 0),
        Relative::Back => (1, 0),
        Relative::Left => (0, 1),
        Relative::Right => (0, -1),
    }
}

fn facing_right(direction: Relative) -> (i32, i32) {
    match direction {
        Relative::Front => (1, 0),
        Relative::Back => (-1, 0),
        Relative::Left => (0, -1),
        Relative::Right => (0, 1),
    }
}

/// Absolute grid offset seen by the `direction` sensor while facing `heading`.
#[must_use]
pub fn sensor_offset(heading: Heading, direction: Relative) -> (i32, i32) {
    match heading {
        Heading::Up => facing_up(direction),
        Heading::Down => facing_down(direction),
        Heading::Left => facing_left(direction),
        Heading::Right => facing_right(direction),
    }
}

/// Reads all four sensors for a robot at `position` facing `heading`.
#[must_use]
pub fn read(grid: &Grid, position: Position, heading: Heading) -> SensorReadings {
    let open = |direction| grid.is_open(position.offset(sensor_offset(heading, direction)));
    SensorReadings {
        front: open(Relative::Front),
        back: open(Relative::Back),
        left: open(Relative::Left),
        right: open(Relative::Right),
    }
}
