//! Errors that end a simulation run.

use crate::simulation::grid::Position;
use crate::simulation::path::PathError;
use thiserror::Error;

/// A fatal condition for the current run. The grid is never modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("inconsistent sensor state at {position}: intersection with no open branch")]
    InconsistentSensorState { position: Position },

    #[error("path recording failed: {0}")]
    Path(#[from] PathError),

    #[error("replay path exhausted at {position} after {consumed} symbols")]
    ReplayExhausted { position: Position, consumed: usize },

    #[error("start cell {position} is blocked or outside the maze")]
    BlockedStart { position: Position },

    #[error("collision: {position} is blocked or outside the maze")]
    Collision { position: Position },

    #[error("no arrival within {limit} ticks")]
    TickLimit { limit: u64 },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
