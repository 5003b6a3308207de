//! Simulation constants.

use crate::simulation::heading::Heading;

/// Recorded path capacity in symbols.
pub const PATH_CAPACITY: usize = 99;
/// Ticks after which a run is abandoned.
pub const MAX_TICKS: u64 = 10_000;
pub const DEFAULT_HEADING: Heading = Heading::Right;
/// Auto-run step interval for the terminal view, in milliseconds.
pub const TICK_RATE_MS: u64 = 150;
