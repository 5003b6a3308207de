//! Tick loop for a single discovery or replay pass.

use crate::simulation::error::{Result, SimulationError};
use crate::simulation::grid::{Grid, Position};
use crate::simulation::heading::Heading;
use crate::simulation::navigation::Classification;
use crate::simulation::params::{MAX_TICKS, PATH_CAPACITY};
use crate::simulation::path::Path;
use crate::simulation::robot::{Robot, Step};
use crate::simulation::sensors::SensorReadings;
use std::fmt;
use tracing::{debug, info, warn};

/// Starting position and facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pose {
    pub position: Position,
    pub heading: Heading,
}

impl Pose {
    #[must_use]
    pub const fn new(position: Position, heading: Heading) -> Self {
        Self { position, heading }
    }

    /// Checks that the pose stands on an open cell of `grid`.
    ///
    /// # Errors
    ///
    /// [`SimulationError::BlockedStart`] if it does not.
    pub fn check(self, grid: &Grid) -> Result<()> {
        if grid.is_open(self.position) {
            Ok(())
        } else {
            Err(SimulationError::BlockedStart {
                position: self.position,
            })
        }
    }
}

/// Per-run limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub max_ticks: u64,
    pub path_capacity: usize,
    /// Arrival cell besides the all-open destination pattern.
    pub goal: Option<Position>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks: MAX_TICKS,
            path_capacity: PATH_CAPACITY,
            goal: None,
        }
    }
}

/// How a run ended successfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrival {
    /// All four sensors read open.
    Destination,
    /// Stepped onto the configured goal cell.
    Goal,
}

impl fmt::Display for Arrival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Destination => f.write_str("destination"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Observable state after a tick, for rendering and logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub tick: u64,
    pub position: Position,
    pub heading: Heading,
    pub sensors: SensorReadings,
    pub classification: Option<Classification>,
    pub mode: &'static str,
    pub cursor: Option<usize>,
    pub path: String,
    pub arrival: Option<Arrival>,
}

/// Summary of a finished run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub arrival: Arrival,
    pub ticks: u64,
    pub end: Pose,
    /// Recorded path for discovery, the followed path for replay.
    pub path: Path,
    /// Every cell occupied, starting with the start cell.
    pub trail: Vec<Position>,
}

/// One pass of the robot through a maze.
#[derive(Debug, Clone)]
pub struct Run<'g> {
    grid: &'g Grid,
    robot: Robot,
    config: RunConfig,
    tick: u64,
    trail: Vec<Position>,
    arrival: Option<Arrival>,
}

impl<'g> Run<'g> {
    /// Starts a discovery pass that records its turns.
    #[must_use]
    pub fn discover(grid: &'g Grid, start: Pose, config: RunConfig) -> Self {
        let robot = Robot::discovering(start.position, start.heading, config.path_capacity);
        Self::new(grid, robot, config)
    }

    /// Starts a replay pass over `path`.
    #[must_use]
    pub fn replay(grid: &'g Grid, start: Pose, path: Path, config: RunConfig) -> Self {
        let robot = Robot::replaying(start.position, start.heading, path);
        Self::new(grid, robot, config)
    }

    fn new(grid: &'g Grid, robot: Robot, config: RunConfig) -> Self {
        info!(
            mode = robot.mode.label(),
            x = robot.position.x,
            y = robot.position.y,
            heading = %robot.heading,
            "run started"
        );
        Self {
            grid,
            trail: vec![robot.position],
            robot,
            config,
            tick: 0,
            arrival: None,
        }
    }

    /// Senses, decides and moves once.
    ///
    /// Returns the arrival once the run is over; further calls keep
    /// returning it without moving.
    ///
    /// # Errors
    ///
    /// Any [`SimulationError`]; the run should be abandoned afterwards.
    pub fn tick(&mut self) -> Result<Option<Arrival>> {
        if self.arrival.is_some() {
            return Ok(self.arrival);
        }
        if self.tick >= self.config.max_ticks {
            warn!(limit = self.config.max_ticks, "tick limit reached");
            return Err(SimulationError::TickLimit {
                limit: self.config.max_ticks,
            });
        }

        self.robot.sense(self.grid);
        match self.robot.update_state(self.grid)? {
            Step::AtDestination => {
                self.arrival = Some(Arrival::Destination);
            }
            Step::Moved(classification) => {
                self.tick += 1;
                self.trail.push(self.robot.position);
                debug!(
                    tick = self.tick,
                    x = self.robot.position.x,
                    y = self.robot.position.y,
                    heading = %self.robot.heading,
                    %classification,
                    path = %self.robot.path(),
                    "tick"
                );
                if self.config.goal == Some(self.robot.position) {
                    self.arrival = Some(Arrival::Goal);
                }
            }
        }

        if let Some(arrival) = self.arrival {
            info!(%arrival, ticks = self.tick, path = %self.robot.path(), "run finished");
        }
        Ok(self.arrival)
    }

    /// Ticks until arrival.
    ///
    /// # Errors
    ///
    /// The first [`SimulationError`] raised by a tick.
    pub fn run_to_end(mut self) -> Result<RunReport> {
        loop {
            if let Some(arrival) = self.tick()? {
                return Ok(self.into_report(arrival));
            }
        }
    }

    /// Consumes a finished run. Returns `None` if it has not arrived yet.
    #[must_use]
    pub fn finish(self) -> Option<RunReport> {
        let arrival = self.arrival?;
        Some(self.into_report(arrival))
    }

    fn into_report(self, arrival: Arrival) -> RunReport {
        RunReport {
            arrival,
            ticks: self.tick,
            end: Pose::new(self.robot.position, self.robot.heading),
            path: self.robot.mode.path().clone(),
            trail: self.trail,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            position: self.robot.position,
            heading: self.robot.heading,
            sensors: self.robot.sensors,
            classification: self.robot.last_classification,
            mode: self.robot.mode.label(),
            cursor: self.robot.mode.cursor(),
            path: self.robot.path().to_string(),
            arrival: self.arrival,
        }
    }

    #[must_use]
    pub const fn robot(&self) -> &Robot {
        &self.robot
    }

    #[must_use]
    pub const fn grid(&self) -> &'g Grid {
        self.grid
    }

    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    #[must_use]
    pub fn trail(&self) -> &[Position] {
        &self.trail
    }

    #[must_use]
    pub const fn arrival(&self) -> Option<Arrival> {
        self.arrival
    }
}
