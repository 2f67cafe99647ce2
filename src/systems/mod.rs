//! Application systems
//!
//! The fixed-step simulation loop and the cosmetic environment clock.

mod environment;
mod simulation;

pub use environment::{EnvironmentClock, DAY_LENGTH, SUNRISE, SUNSET};
pub use simulation::{SessionSnapshot, SimulationLoop, SimulationResult};
