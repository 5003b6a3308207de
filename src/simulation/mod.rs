pub mod error;
pub mod generator;
pub mod grid;
pub mod heading;
pub mod navigation;
pub mod optimizer;
pub mod params;
pub mod path;
pub mod robot;
pub mod run;
pub mod sensors;

pub use error::SimulationError;
pub use grid::{Grid, Position};
pub use heading::{Heading, Relative};
pub use navigation::{Classification, Mode};
pub use path::{Path, PathError};
pub use robot::Robot;
pub use run::{Arrival, Pose, Run, RunConfig, RunReport, Snapshot};
