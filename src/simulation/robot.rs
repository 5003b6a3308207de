use crate::simulation::error::{Result, SimulationError};
use crate::simulation::grid::{Grid, Position};
use crate::simulation::heading::Heading;
use crate::simulation::navigation::{self, Classification, Mode};
use crate::simulation::path::Path;
use crate::simulation::sensors::{self, SensorReadings};

/// Result of one [`Robot::update_state`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Turned as classified and advanced one cell.
    Moved(Classification),
    /// Open on all sides; the robot stays put.
    AtDestination,
}

/// The line-following robot.
///
/// Sensors are refreshed with [`Robot::sense`] and acted upon by
/// [`Robot::update_state`], one pair per tick.
#[derive(Debug, Clone)]
pub struct Robot {
    pub position: Position,
    pub heading: Heading,
    pub sensors: SensorReadings,
    pub mode: Mode,
    pub last_classification: Option<Classification>,
}

impl Robot {
    /// A robot that explores and records into a path of `capacity` symbols.
    #[must_use]
    pub fn discovering(position: Position, heading: Heading, capacity: usize) -> Self {
        Self::with_mode(position, heading, Mode::discovering(capacity))
    }

    /// A robot that follows `path` at every intersection.
    #[must_use]
    pub fn replaying(position: Position, heading: Heading, path: Path) -> Self {
        Self::with_mode(position, heading, Mode::replaying(path))
    }

    #[must_use]
    pub fn with_mode(position: Position, heading: Heading, mode: Mode) -> Self {
        Self {
            position,
            heading,
            // Only the front sensor reads open until the first refresh.
            sensors: SensorReadings::new(true, false, false, false),
            mode,
            last_classification: None,
        }
    }

    /// Refreshes all four sensors from the grid.
    pub fn sense(&mut self, grid: &Grid) {
        self.sensors = sensors::read(grid, self.position, self.heading);
    }

    /// Classifies the current readings, turns, and steps one cell.
    ///
    /// # Errors
    ///
    /// Any [`SimulationError`] from the turn decision, or
    /// [`SimulationError::Collision`] if the cell ahead after turning is
    /// blocked or out of bounds. Position and heading are unchanged on
    /// error, but a symbol recorded by the decision stays recorded.
    pub fn update_state(&mut self, grid: &Grid) -> Result<Step> {
        let classification = navigation::classify(&self.sensors);
        self.last_classification = Some(classification);

        let Some(turn) =
            navigation::decide(classification, &self.sensors, &mut self.mode, self.position)?
        else {
            return Ok(Step::AtDestination);
        };

        let heading = self.heading.rotate(turn);
        let next = self.position.step(heading);
        if !grid.is_open(next) {
            return Err(SimulationError::Collision { position: next });
        }
        self.heading = heading;
        self.position = next;
        Ok(Step::Moved(classification))
    }

    /// The path recorded so far, or the path being replayed.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.mode.path()
    }
}
