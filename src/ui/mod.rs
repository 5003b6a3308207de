pub mod app;
pub mod field;
pub mod render;

pub use app::{App, OptimizeChoice, Phase};
